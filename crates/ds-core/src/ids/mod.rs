//! ID type wrappers for type safety.

pub mod repo_id;

pub use repo_id::RepoId;
