//! Domain-layer errors: violations of the options model's own rules.

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic at the caller's discretion)
/// - Categorizable (for CLI display)
/// - Actionable (provide suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Port input did not parse as a number in range.
    #[error("invalid port '{input}': must be a number between 1 and 65535")]
    InvalidPort { input: String },

    /// App name resolved to empty, which would break every derived slug.
    #[error("application name cannot be empty")]
    EmptyAppName,

    #[error("unknown database '{0}'")]
    UnknownDatabase(String),

    #[error("unknown storage provider '{0}'")]
    UnknownStorageProvider(String),

    /// A prompted answer had the wrong shape for its question kind.
    #[error("answer for '{key}' has unexpected type")]
    AnswerTypeMismatch { key: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidPort { input } => vec![
                format!("'{input}' is not a valid port"),
                "Use a number between 1 and 65535, e.g. 4000".into(),
                "Leave the prompt empty to accept the derived default".into(),
            ],
            Self::EmptyAppName => vec![
                "Provide a project directory or answer the name prompt".into(),
                "Example: stackgen new my-app".into(),
            ],
            Self::UnknownDatabase(name) => vec![
                format!("'{name}' is not a supported database"),
                "Supported: mongodb, postgres".into(),
            ],
            Self::UnknownStorageProvider(name) => vec![
                format!("'{name}' is not a supported storage provider"),
                "Supported: aws, cloudinary".into(),
            ],
            Self::AnswerTypeMismatch { key } => vec![
                format!("The prompter returned a wrong-typed answer for '{key}'"),
                "This is likely a bug in a custom prompter implementation".into(),
            ],
        }
    }

    /// Error category for display and exit-code mapping.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidPort { .. }
            | Self::EmptyAppName
            | Self::UnknownDatabase(_)
            | Self::UnknownStorageProvider(_) => ErrorCategory::Validation,
            Self::AnswerTypeMismatch { .. } => ErrorCategory::Internal,
        }
    }
}

/// Domain error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_port_is_validation() {
        let err = DomainError::InvalidPort { input: "abc".into() };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions().iter().any(|s| s.contains("65535")));
    }

    #[test]
    fn answer_mismatch_is_internal() {
        let err = DomainError::AnswerTypeMismatch { key: "appPort".into() };
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
