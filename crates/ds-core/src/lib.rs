//! # ds-core
//!
//! Core domain models and business logic for Driftsync.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod account;
pub mod ids;
pub mod ports;
pub mod repo;
pub mod setup;

// Re-export commonly used types at the crate root
pub use account::Account;
pub use ids::RepoId;
pub use repo::{CloneRequest, LocalRepo, RepoDownloadInfo};
pub use setup::{SetupFailure, SetupState, SetupStatus};
