//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Target directory exists and is not empty; nothing has been written.
    #[error("directory {path} already exists and is not empty")]
    DirectoryNotEmpty { path: PathBuf },

    /// Template materialization failed. Fatal: without the template tree
    /// there is nothing to derive artifacts into.
    #[error("failed to fetch template '{template}': {reason}")]
    TemplateFetchFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The interactive prompter failed (terminal closed, read error).
    #[error("prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// The template's package manifest could not be parsed or rewritten.
    #[error("failed to rewrite manifest {path}: {reason}")]
    ManifestRewrite { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DirectoryNotEmpty { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project directory".into(),
                format!("Or remove the existing one: rm -rf {}", path.display()),
            ],
            Self::TemplateFetchFailed { template, .. } => vec![
                format!("Could not materialize template '{template}'"),
                "Check your network connection".into(),
                "Check that git is installed and on your PATH".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::PromptFailed { .. } => vec![
                "The interactive prompt could not be completed".into(),
                "Re-run with --yes to accept defaults non-interactively".into(),
            ],
            Self::ManifestRewrite { path, .. } => vec![
                format!("The template's {} is not valid JSON", path.display()),
                "The template may be broken; try fetching it again".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DirectoryNotEmpty { .. } => ErrorCategory::Precondition,
            Self::TemplateFetchFailed { .. } => ErrorCategory::NotFound,
            Self::FilesystemError { .. }
            | Self::PromptFailed { .. }
            | Self::ManifestRewrite { .. } => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failure_carries_context_but_no_error_source() {
        let err = ApplicationError::TemplateFetchFailed {
            template: "owner/repo".into(),
            reason: "network unreachable".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to fetch template 'owner/repo': network unreachable"
        );
        // The template slug is plain context, not a chained error.
        assert!(std::error::Error::source(&err).is_none());
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
