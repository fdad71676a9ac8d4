use std::path::PathBuf;

use thiserror::Error;

/// Fatal provisioning failures surfaced to the user.
///
/// 配置流程的致命错误。
///
/// Every variant terminates the flow; there is no retry. The `Display`
/// output is the exact user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupFailure {
    /// Create-default-repo came back 404: the server predates the
    /// create-default-repo API.
    #[error("Failed to create default library:\n\nThe server version must be 2.1 or higher to support this.")]
    ServerTooOld,

    #[error("Failed to create default library: error code {code}")]
    CreateRepo { code: i32 },

    #[error("Failed to download default library: error code {code}")]
    DownloadInfo { code: i32 },

    #[error("Failed to create folder \"{}\"", .path.display())]
    CreateFolder { path: PathBuf },

    /// The local daemon rejected the clone command.
    #[error("Failed to download default library:\n{error}")]
    Clone { error: String },
}
