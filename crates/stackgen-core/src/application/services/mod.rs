//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish high-level
//! use cases like "create an API project" or "synthesize an env file".

pub mod compose_service;
pub mod env_service;
pub mod options_resolver;
pub mod project_service;
pub mod readme_service;

pub use env_service::EnvSynthesizer;
pub use options_resolver::OptionsResolver;
pub use project_service::{
    CreateRequest, ProjectService, API_TEMPLATE_MONGODB, API_TEMPLATE_POSTGRES, FRONTEND_TEMPLATE,
};
