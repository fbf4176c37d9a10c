//! Prompter adapters.
//!
//! `DialoguerPrompter` drives an interactive terminal session;
//! `DefaultsPrompter` answers every question with its default, for
//! non-interactive runs and tests.

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use tracing::debug;

use stackgen_core::{
    application::{
        ports::{Answer, Answers, Prompter, Question, QuestionKind},
        ApplicationError,
    },
    error::StackgenResult,
};

/// Interactive terminal prompter.
#[derive(Default)]
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    fn ask_one(&self, question: &Question) -> StackgenResult<Answer> {
        match &question.kind {
            QuestionKind::Input { default, numeric } => {
                let mut input = Input::<String>::with_theme(&self.theme)
                    .with_prompt(&question.message)
                    .default(default.clone());
                if *numeric {
                    input = input.validate_with(|value: &String| {
                        value
                            .trim()
                            .parse::<u64>()
                            .map(|_| ())
                            .map_err(|_| "Please enter a number")
                    });
                }
                let value = input.interact_text().map_err(prompt_error)?;
                Ok(Answer::Text(value))
            }
            QuestionKind::Confirm { default } => {
                let value = Confirm::with_theme(&self.theme)
                    .with_prompt(&question.message)
                    .default(*default)
                    .interact()
                    .map_err(prompt_error)?;
                Ok(Answer::Bool(value))
            }
            QuestionKind::Select { choices, default } => {
                let labels: Vec<&str> = choices.iter().map(|(_, label)| label.as_str()).collect();
                let default_index = choices
                    .iter()
                    .position(|(value, _)| value == default)
                    .unwrap_or(0);
                let index = Select::with_theme(&self.theme)
                    .with_prompt(&question.message)
                    .items(&labels)
                    .default(default_index)
                    .interact()
                    .map_err(prompt_error)?;
                Ok(Answer::Text(choices[index].0.clone()))
            }
        }
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&self, questions: &[Question]) -> StackgenResult<Answers> {
        let mut answers = Answers::default();
        for question in questions {
            let answer = self.ask_one(question)?;
            answers.insert(question.key, answer);
        }
        debug!(count = questions.len(), "prompt batch collected");
        Ok(answers)
    }
}

fn prompt_error(e: dialoguer::Error) -> stackgen_core::error::StackgenError {
    ApplicationError::PromptFailed {
        reason: e.to_string(),
    }
    .into()
}

/// Non-interactive prompter: every question answers with its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultsPrompter;

impl DefaultsPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DefaultsPrompter {
    fn ask(&self, questions: &[Question]) -> StackgenResult<Answers> {
        let mut answers = Answers::default();
        for question in questions {
            let answer = match &question.kind {
                QuestionKind::Input { default, .. } => Answer::Text(default.clone()),
                QuestionKind::Confirm { default } => Answer::Bool(*default),
                QuestionKind::Select { default, .. } => Answer::Text(default.clone()),
            };
            answers.insert(question.key, answer);
        }
        Ok(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_prompter_echoes_every_default() {
        let questions = vec![
            Question::input("name", "Name?", "demo"),
            Question::numeric("port", "Port?", "4100"),
            Question::confirm("docker", "Docker?", true),
            Question::select(
                "db",
                "Database?",
                vec![
                    ("mongodb".into(), "MongoDB".into()),
                    ("postgres".into(), "PostgreSQL".into()),
                ],
                "postgres",
            ),
        ];

        let answers = DefaultsPrompter::new().ask(&questions).unwrap();
        assert_eq!(answers.text("name").unwrap(), Some("demo"));
        assert_eq!(answers.text("port").unwrap(), Some("4100"));
        assert_eq!(answers.flag("docker").unwrap(), Some(true));
        assert_eq!(answers.text("db").unwrap(), Some("postgres"));
    }
}
