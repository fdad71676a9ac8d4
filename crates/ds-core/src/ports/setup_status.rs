use async_trait::async_trait;

use crate::setup::SetupStatus;

/// Persistence of the one-time setup flag.
///
/// Implementations are provided by the infrastructure layer
/// (e.g. file-based storage). Writes are idempotent.
#[async_trait]
pub trait SetupStatusPort: Send + Sync {
    async fn get_status(&self) -> anyhow::Result<SetupStatus>;
    async fn set_status(&self, status: &SetupStatus) -> anyhow::Result<()>;
}
