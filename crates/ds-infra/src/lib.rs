//! Driftsync Infrastructure Layer
//!
//! File-backed implementations of the ports defined in `ds-core`.

pub mod configurator;
pub mod fs;
pub mod setup_status;

pub use configurator::FileConfigurator;
pub use fs::app_data_dir::app_data_dir;
pub use fs::welcome_doc::BundledWelcomeDoc;
pub use setup_status::FileSetupStatusRepository;
