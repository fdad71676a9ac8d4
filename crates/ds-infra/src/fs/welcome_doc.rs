//! Bundled getting-started document
//!
//! Copies the "Getting Started" guide shipped next to the application
//! binary into a freshly provisioned library. The copy is best-effort:
//! a missing bundle or a failed copy is logged and never surfaces as a
//! setup failure.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use ds_core::ports::WelcomeDocPort;

pub const WELCOME_DOC_NAME: &str = "Getting Started.pdf";

pub struct BundledWelcomeDoc {
    /// Directory the application ships resources in.
    app_dir: PathBuf,
}

impl BundledWelcomeDoc {
    pub fn new(app_dir: impl Into<PathBuf>) -> Self {
        Self {
            app_dir: app_dir.into(),
        }
    }

    fn source_path(&self) -> PathBuf {
        self.app_dir.join(WELCOME_DOC_NAME)
    }
}

#[async_trait]
impl WelcomeDocPort for BundledWelcomeDoc {
    async fn copy_into(&self, worktree: &Path) -> anyhow::Result<()> {
        let source = self.source_path();
        if !source.exists() {
            tracing::debug!(
                source = %source.display(),
                "getting-started document not bundled, skipping copy"
            );
            return Ok(());
        }

        let target = worktree.join(WELCOME_DOC_NAME);
        fs::copy(&source, &target).await.map_err(|e| {
            anyhow::anyhow!(
                "Failed to copy {} to {}: {e}",
                source.display(),
                target.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn copies_document_into_worktree() {
        let app_dir = TempDir::new().unwrap();
        let worktree = TempDir::new().unwrap();
        fs::write(app_dir.path().join(WELCOME_DOC_NAME), b"%PDF-1.4")
            .await
            .unwrap();

        let doc = BundledWelcomeDoc::new(app_dir.path());
        doc.copy_into(worktree.path()).await.unwrap();

        let copied = fs::read(worktree.path().join(WELCOME_DOC_NAME))
            .await
            .unwrap();
        assert_eq!(copied, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn missing_bundle_is_not_an_error() {
        let app_dir = TempDir::new().unwrap();
        let worktree = TempDir::new().unwrap();

        let doc = BundledWelcomeDoc::new(app_dir.path());
        doc.copy_into(worktree.path()).await.unwrap();

        assert!(!worktree.path().join(WELCOME_DOC_NAME).exists());
    }

    #[tokio::test]
    async fn unwritable_target_reports_error() {
        let app_dir = TempDir::new().unwrap();
        fs::write(app_dir.path().join(WELCOME_DOC_NAME), b"%PDF-1.4")
            .await
            .unwrap();

        let doc = BundledWelcomeDoc::new(app_dir.path());
        let result = doc
            .copy_into(Path::new("/nonexistent-worktree-for-test"))
            .await;

        assert!(result.is_err());
    }
}
