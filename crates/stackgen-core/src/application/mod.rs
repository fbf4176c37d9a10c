//! Application layer for stackgen.
//!
//! This layer contains:
//! - **Services**: use case orchestration (ProjectService, EnvSynthesizer,
//!   the compose and documentation generators)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! derivation rules itself. All derivation rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{CreateRequest, EnvSynthesizer, OptionsResolver, ProjectService};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, Prompter, SecretProvider, TemplateFetcher};

pub use error::ApplicationError;
