//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stackgen-adapters` crate provides implementations.

use crate::domain::DomainError;
use crate::error::StackgenResult;
use std::collections::BTreeMap;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stackgen_adapters::filesystem::LocalFilesystem` (production)
/// - `stackgen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StackgenResult<()>;

    /// Write content to a file, creating it if absent.
    fn write_file(&self, path: &Path, content: &str) -> StackgenResult<()>;

    /// Read a file into a string.
    fn read_to_string(&self, path: &Path) -> StackgenResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory containing at least one entry.
    fn dir_is_nonempty(&self, path: &Path) -> bool;

    /// Remove a file. Callers check existence first; removing is not
    /// expected to be called on absent paths.
    fn remove_file(&self, path: &Path) -> StackgenResult<()>;
}

/// Port for template materialization.
///
/// Given a template source identifier (an `owner/repo` slug or a local
/// directory path) and a destination, produces the template's directory tree
/// at the destination. Implementations must behave like a force-overwrite,
/// no-cache fetch.
///
/// Implemented by `stackgen_adapters::GitTemplateFetcher`.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateFetcher: Send + Sync {
    fn fetch(&self, source: &str, dest: &Path) -> StackgenResult<()>;
}

/// A public/private keypair for web-push message signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VapidKeypair {
    pub public_key: String,
    pub private_key: String,
}

/// Port for secret material.
///
/// Implemented by `stackgen_adapters::OsRandomSecrets`. Every call draws
/// fresh randomness; values must never repeat across runs.
#[cfg_attr(test, mockall::automock)]
pub trait SecretProvider: Send + Sync {
    /// A hex-encoded secret of `bytes` random bytes.
    fn secure_key(&self, bytes: usize) -> String;

    /// A web-push signing keypair.
    ///
    /// Implementations that shell out to an external keypair tool must fall
    /// back to locally generated random material rather than failing —
    /// keypair generation is never fatal to a run.
    fn vapid_keypair(&self) -> VapidKeypair;
}

// ── Prompter ──────────────────────────────────────────────────────────────────

/// What kind of answer a question collects.
#[derive(Debug, Clone)]
pub enum QuestionKind {
    /// Free-text input. When `numeric` is set the prompter must reject
    /// answers that do not parse as a number before returning.
    Input { default: String, numeric: bool },
    /// Yes/no.
    Confirm { default: bool },
    /// Single choice from `(value, label)` pairs; the answer is the value.
    Select {
        choices: Vec<(String, String)>,
        default: String,
    },
}

/// One interactive question.
///
/// Visibility predicates ("only ask when docker is enabled") are resolved by
/// the options resolver before the question list reaches the prompter, so
/// prompters stay dumb.
#[derive(Debug, Clone)]
pub struct Question {
    pub key: &'static str,
    pub message: String,
    pub kind: QuestionKind,
}

impl Question {
    pub fn input(key: &'static str, message: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            key,
            message: message.into(),
            kind: QuestionKind::Input {
                default: default.into(),
                numeric: false,
            },
        }
    }

    pub fn numeric(
        key: &'static str,
        message: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            key,
            message: message.into(),
            kind: QuestionKind::Input {
                default: default.into(),
                numeric: true,
            },
        }
    }

    pub fn confirm(key: &'static str, message: impl Into<String>, default: bool) -> Self {
        Self {
            key,
            message: message.into(),
            kind: QuestionKind::Confirm { default },
        }
    }

    pub fn select(
        key: &'static str,
        message: impl Into<String>,
        choices: Vec<(String, String)>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            key,
            message: message.into(),
            kind: QuestionKind::Select {
                choices,
                default: default.into(),
            },
        }
    }
}

/// A collected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Bool(bool),
}

/// Answers keyed by question key.
#[derive(Debug, Clone, Default)]
pub struct Answers(BTreeMap<&'static str, Answer>);

impl Answers {
    pub fn insert(&mut self, key: &'static str, answer: Answer) {
        self.0.insert(key, answer);
    }

    /// Text (or select) answer for `key`, erroring on a type mismatch.
    pub fn text(&self, key: &'static str) -> Result<Option<&str>, DomainError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Answer::Text(s)) => Ok(Some(s.as_str())),
            Some(Answer::Bool(_)) => Err(DomainError::AnswerTypeMismatch { key: key.into() }),
        }
    }

    /// Boolean answer for `key`, erroring on a type mismatch.
    pub fn flag(&self, key: &'static str) -> Result<Option<bool>, DomainError> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Answer::Bool(b)) => Ok(Some(*b)),
            Some(Answer::Text(_)) => Err(DomainError::AnswerTypeMismatch { key: key.into() }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Port for interactive question collection.
///
/// Implemented by:
/// - `stackgen_adapters::DialoguerPrompter` (interactive terminal)
/// - `stackgen_adapters::DefaultsPrompter` (non-interactive: every question
///   answers with its default)
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    fn ask(&self, questions: &[Question]) -> StackgenResult<Answers>;
}
