//! Stackgen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the stackgen
//! project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          stackgen-cli (CLI)             │
//! │      (Implements Driving Ports)         │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ProjectService, EnvSynthesizer, …)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Filesystem, TemplateFetcher,          │
//! │   SecretProvider, Prompter)             │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    stackgen-adapters (Infrastructure)   │
//! │  (LocalFilesystem, GitTemplateFetcher,  │
//! │   OsRandomSecrets, DialoguerPrompter)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Domain Layer (Pure Logic)         │
//! │  (ProjectOptions, FeatureRegistry,      │
//! │   EnvFile — no external dependencies)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stackgen_core::{
//!     application::{CreateRequest, ProjectService},
//!     domain::ProjectOptions,
//! };
//!
//! // With injected adapters:
//! let service = ProjectService::new(&filesystem, &fetcher, &secrets, &prompter);
//! service.create_api(
//!     std::path::Path::new("./my-api"),
//!     CreateRequest { non_interactive: true, ..Default::default() },
//! )?;
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ports::{Answer, Answers, Filesystem, Prompter, Question, QuestionKind, SecretProvider,
            TemplateFetcher, VapidKeypair},
        ApplicationError, CreateRequest, EnvSynthesizer, OptionsResolver, ProjectService,
    };
    pub use crate::domain::{
        derive_port, enabled_features, slugify, Database, DomainError, EnvFile, Feature,
        FeatureDef, FrontendOptions, ProjectOptions, StorageProvider, FEATURE_REGISTRY,
    };
    pub use crate::error::{ErrorCategory, StackgenError, StackgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
