//! Filesystem helpers and adapters.

pub mod app_data_dir;
pub mod welcome_doc;
