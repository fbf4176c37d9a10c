//! Domain layer: pure value types and derivation rules.
//!
//! Nothing here touches the filesystem, the network, or a terminal — the
//! application layer drives those through ports.

pub mod env_file;
pub mod error;
pub mod features;
pub mod options;

pub use env_file::EnvFile;
pub use error::{DomainError, ErrorCategory};
pub use features::{enabled_features, Feature, FeatureDef, FEATURE_REGISTRY};
pub use options::{
    derive_port, slugify, Database, FrontendOptions, ProjectOptions, StorageProvider,
};
