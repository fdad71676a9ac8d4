//! Setup domain module.
//!
//! This module defines the default-library provisioning state machine types.

pub mod failure;
pub mod state_machine;
pub mod status;

pub use failure::SetupFailure;
pub use state_machine::{SetupAction, SetupEvent, SetupState, SetupStateMachine};
pub use status::SetupStatus;
