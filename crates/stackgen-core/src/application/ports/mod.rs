//! Application ports (trait seams).
//!
//! Only driven (output) ports exist today; the driving side is the services'
//! public methods themselves.

pub mod output;

pub use output::{
    Answer, Answers, Filesystem, Prompter, Question, QuestionKind, SecretProvider,
    TemplateFetcher, VapidKeypair,
};

#[cfg(test)]
pub use output::{MockFilesystem, MockPrompter, MockSecretProvider, MockTemplateFetcher};
