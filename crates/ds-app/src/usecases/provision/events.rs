/// Events surfaced to the UI shell while the default library is being
/// provisioned.
///
/// 配置默认资料库期间推送给界面层的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionEvent {
    /// Progress text for the dialog's status label.
    StatusChanged { message: String },
    /// Flow finished; the dialog may close with an accepted outcome.
    Succeeded,
    /// Flow failed fatally; `message` is user-facing.
    Failed { message: String },
    /// User aborted; the dialog closes with a rejected outcome.
    Cancelled,
}
