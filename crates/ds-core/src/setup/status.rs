/// Setup status persisted across app restarts.
///
/// 首次配置流程的持久化状态。
///
/// The flag is written on success and on cancellation alike, so the
/// user is never prompted for the default library twice.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetupStatus {
    pub default_library_configured: bool,
}

impl Default for SetupStatus {
    fn default() -> Self {
        Self {
            default_library_configured: false,
        }
    }
}
