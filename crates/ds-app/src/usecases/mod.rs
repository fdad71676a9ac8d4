//! Business logic use cases

pub mod provision;
