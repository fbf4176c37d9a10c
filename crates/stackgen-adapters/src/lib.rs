//! Infrastructure adapters for stackgen.
//!
//! This crate implements the ports defined in
//! `stackgen-core::application::ports`. It contains all external
//! dependencies and I/O operations.

pub mod fetcher;
pub mod filesystem;
pub mod prompter;
pub mod secrets;

// Re-export commonly used adapters
pub use fetcher::GitTemplateFetcher;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use prompter::{DefaultsPrompter, DialoguerPrompter};
pub use secrets::OsRandomSecrets;
