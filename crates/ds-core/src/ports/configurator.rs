use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Access to the client configuration: where worktrees live and which
/// local folder is mapped as the virtual drive.
#[async_trait]
pub trait ConfiguratorPort: Send + Sync {
    /// Root directory under which new worktrees are created.
    fn worktree_dir(&self) -> PathBuf;

    /// Record `worktree` as the virtual drive root.
    async fn set_virtual_drive(&self, worktree: &Path) -> anyhow::Result<()>;
}
