//! File-based client configurator
//!
//! Stores which worktree is mounted as the virtual drive in a small
//! JSON state file next to the rest of the client configuration.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use ds_core::ports::ConfiguratorPort;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct VirtualDriveState {
    root: Option<PathBuf>,
}

pub struct FileConfigurator {
    /// Directory under which library worktrees are placed.
    worktree_root: PathBuf,
    state_path: PathBuf,
}

impl FileConfigurator {
    pub fn new(worktree_root: impl Into<PathBuf>, state_path: impl Into<PathBuf>) -> Self {
        Self {
            worktree_root: worktree_root.into(),
            state_path: state_path.into(),
        }
    }

    /// Currently configured virtual drive root, if any.
    pub async fn virtual_drive(&self) -> Result<Option<PathBuf>> {
        let content = match fs::read_to_string(&self.state_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("read virtual drive state failed: {}", self.state_path.display())
                })
            }
        };

        let state: VirtualDriveState = serde_json::from_str(&content)?;
        Ok(state.root)
    }

    async fn atomic_write(&self, content: &str) -> Result<()> {
        if let Some(dir) = self.state_path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create state dir failed: {}", dir.display()))?;
        }

        let tmp_path = self.state_path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp state failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.state_path).await.with_context(|| {
            format!(
                "rename temp state to target failed: {} -> {}",
                tmp_path.display(),
                self.state_path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl ConfiguratorPort for FileConfigurator {
    fn worktree_dir(&self) -> PathBuf {
        self.worktree_root.clone()
    }

    async fn set_virtual_drive(&self, worktree: &Path) -> Result<()> {
        let state = VirtualDriveState {
            root: Some(worktree.to_path_buf()),
        };
        let content =
            serde_json::to_string_pretty(&state).context("serialize virtual drive state failed")?;

        self.atomic_write(&content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn virtual_drive_is_none_before_first_write() {
        let temp_dir = TempDir::new().unwrap();
        let configurator = FileConfigurator::new(
            temp_dir.path().join("libraries"),
            temp_dir.path().join("state.json"),
        );

        assert_eq!(configurator.virtual_drive().await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_virtual_drive_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let configurator = FileConfigurator::new(
            temp_dir.path().join("libraries"),
            temp_dir.path().join("conf").join("state.json"),
        );

        let worktree = temp_dir.path().join("libraries").join("My Library");
        configurator.set_virtual_drive(&worktree).await.unwrap();

        assert_eq!(configurator.virtual_drive().await.unwrap(), Some(worktree));
    }

    #[tokio::test]
    async fn set_virtual_drive_overwrites_previous_root() {
        let temp_dir = TempDir::new().unwrap();
        let configurator = FileConfigurator::new(
            temp_dir.path().join("libraries"),
            temp_dir.path().join("state.json"),
        );

        configurator
            .set_virtual_drive(&temp_dir.path().join("old"))
            .await
            .unwrap();
        configurator
            .set_virtual_drive(&temp_dir.path().join("new"))
            .await
            .unwrap();

        assert_eq!(
            configurator.virtual_drive().await.unwrap(),
            Some(temp_dir.path().join("new"))
        );
    }

    #[test]
    fn worktree_dir_returns_configured_root() {
        let configurator = FileConfigurator::new("/data/libraries", "/data/state.json");
        assert_eq!(configurator.worktree_dir(), PathBuf::from("/data/libraries"));
    }
}
