//! First-run provisioning of the default library.

pub mod events;
pub mod orchestrator;

pub use events::ProvisionEvent;
pub use orchestrator::{ProvisionConfig, ProvisionOrchestrator};
