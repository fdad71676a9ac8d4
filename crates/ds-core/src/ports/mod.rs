//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the core business logic to remain independent of
//! external dependencies.

pub mod configurator;
pub mod errors;
pub mod repo_service;
pub mod setup_status;
pub mod sync_daemon;
pub mod welcome_doc;

pub use configurator::ConfiguratorPort;
pub use errors::{CloneError, RemoteError};
pub use repo_service::RepoServicePort;
pub use setup_status::SetupStatusPort;
pub use sync_daemon::SyncDaemonPort;
pub use welcome_doc::WelcomeDocPort;
