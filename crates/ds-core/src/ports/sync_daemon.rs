use crate::ids::RepoId;
use crate::ports::errors::CloneError;
use crate::repo::{CloneRequest, LocalRepo};

/// Synchronous commands against the local sync daemon.
///
/// These are in-process calls to a local service and are treated as
/// instantaneous; callers do not time them out.
pub trait SyncDaemonPort: Send + Sync {
    /// Look up a repository the daemon has fully materialized on disk.
    /// `None` means the repository is absent or still downloading.
    fn get_local_repo(&self, repo_id: &RepoId) -> Option<LocalRepo>;

    /// Start cloning a repository into `request.dest_path`. Returns as
    /// soon as the daemon has accepted the command; the download itself
    /// completes in the background.
    fn clone_repo(&self, request: &CloneRequest) -> Result<(), CloneError>;
}
