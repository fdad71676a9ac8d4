use async_trait::async_trait;

use crate::account::Account;
use crate::ids::RepoId;
use crate::ports::errors::RemoteError;
use crate::repo::RepoDownloadInfo;

/// Asynchronous server requests used by the provisioning flow.
///
/// Each call resolves exactly once, with either its payload or a
/// numeric failure code.
#[async_trait]
pub trait RepoServicePort: Send + Sync {
    /// Ask the server to create (or return) the account's default library.
    async fn create_default_repo(&self, account: &Account) -> Result<RepoId, RemoteError>;

    /// Fetch the transport parameters needed to clone `repo_id`.
    async fn get_repo_download_info(
        &self,
        account: &Account,
        repo_id: &RepoId,
    ) -> Result<RepoDownloadInfo, RemoteError>;
}
