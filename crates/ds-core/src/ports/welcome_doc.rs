use std::path::Path;

use async_trait::async_trait;

/// Delivery of the bundled getting-started document.
#[async_trait]
pub trait WelcomeDocPort: Send + Sync {
    /// Copy the bundled document into `worktree`. Strictly best-effort:
    /// callers log failures and never surface them to the user.
    async fn copy_into(&self, worktree: &Path) -> anyhow::Result<()>;
}
