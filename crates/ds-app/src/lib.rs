//! Driftsync Application Orchestration Layer
//!
//! This crate contains business logic use cases and runtime orchestration.

pub mod usecases;

pub use usecases::provision::{ProvisionConfig, ProvisionEvent, ProvisionOrchestrator};
