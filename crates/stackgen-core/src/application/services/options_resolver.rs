//! Options resolver: merges defaults, base options, and prompted answers
//! into one immutable options record.
//!
//! Precedence, lowest to highest: built-in defaults → base options (used when
//! one composition driver embeds another, e.g. fullstack) → interactively
//! collected answers. With the non-interactive flag set, prompting is skipped
//! entirely and every question takes its default.

use tracing::{debug, instrument};

use crate::{
    application::ports::{Answers, Prompter, Question},
    domain::{Database, DomainError, FrontendOptions, ProjectOptions},
    error::StackgenResult,
};

/// Resolves [`ProjectOptions`] / [`FrontendOptions`] for one invocation.
pub struct OptionsResolver<'a> {
    prompter: &'a dyn Prompter,
}

impl<'a> OptionsResolver<'a> {
    pub fn new(prompter: &'a dyn Prompter) -> Self {
        Self { prompter }
    }

    /// Resolve options for an API project.
    ///
    /// `project_name` is the target directory's leaf name; it seeds the app
    /// name and the derived default port. `base` overrides the defaults
    /// wholesale (its `app_name` falls back to `project_name` when empty —
    /// the app name must never resolve to empty).
    #[instrument(skip_all, fields(project = %project_name))]
    pub fn resolve_api(
        &self,
        project_name: &str,
        non_interactive: bool,
        base: Option<&ProjectOptions>,
    ) -> StackgenResult<ProjectOptions> {
        let mut options = seed_options(project_name, base)?;

        if !non_interactive {
            options = self.prompt_basic(options)?;
            options = self.prompt_features(options)?;
        }

        debug!(
            app_name = %options.app_name,
            port = options.app_port,
            database = %options.database,
            "API options resolved"
        );
        Ok(options)
    }

    /// Resolve options for a frontend project.
    #[instrument(skip_all, fields(project = %project_name))]
    pub fn resolve_frontend(
        &self,
        project_name: &str,
        non_interactive: bool,
        base: Option<&ProjectOptions>,
        api_url_default: Option<&str>,
    ) -> StackgenResult<FrontendOptions> {
        let mut options = FrontendOptions::defaults(project_name);
        options.base = seed_options(project_name, base)?;
        if let Some(url) = api_url_default {
            options.api_url = url.to_string();
        }

        if !non_interactive {
            let questions = vec![
                Question::input(
                    "apiUrl",
                    "What's the URL of your GraphQL API?",
                    options.api_url.clone(),
                ),
                Question::confirm(
                    "useCloudinary",
                    "Include Cloudinary configuration?",
                    options.use_cloudinary,
                ),
                Question::confirm(
                    "googleOAuth",
                    "Include Google OAuth configuration?",
                    options.google_oauth,
                ),
                Question::confirm(
                    "webPushNotifications",
                    "Include Web Push notifications configuration?",
                    options.web_push_notifications,
                ),
            ];
            let answers = self.prompter.ask(&questions)?;

            if let Some(url) = answers.text("apiUrl")? {
                options.api_url = url.to_string();
            }
            if let Some(v) = answers.flag("useCloudinary")? {
                options.use_cloudinary = v;
            }
            if let Some(v) = answers.flag("googleOAuth")? {
                options.google_oauth = v;
            }
            if let Some(v) = answers.flag("webPushNotifications")? {
                options.web_push_notifications = v;
            }
        }

        debug!(api_url = %options.api_url, "frontend options resolved");
        Ok(options)
    }

    /// First prompt batch: name, port, docker.
    fn prompt_basic(&self, mut options: ProjectOptions) -> StackgenResult<ProjectOptions> {
        let questions = vec![
            Question::input(
                "appName",
                "What is your application name?",
                options.app_name.clone(),
            ),
            Question::numeric(
                "appPort",
                "Which port should the server run on?",
                options.app_port.to_string(),
            ),
            Question::confirm("includeDocker", "Include Docker configuration?", true),
        ];
        let answers = self.prompter.ask(&questions)?;

        if let Some(name) = answers.text("appName")? {
            if !name.trim().is_empty() {
                options.app_name = name.trim().to_string();
            }
        }
        if let Some(port) = answers.text("appPort")? {
            options.app_port = parse_port(port)?;
        }
        if let Some(v) = answers.flag("includeDocker")? {
            options.include_docker = v;
        }
        Ok(options)
    }

    /// Second prompt batch: database and feature toggles. The database
    /// container question is only asked when docker was enabled in batch one
    /// (its visibility predicate, resolved here rather than in the prompter).
    fn prompt_features(&self, mut options: ProjectOptions) -> StackgenResult<ProjectOptions> {
        let mut questions = vec![Question::select(
            "database",
            "Which database would you like to use?",
            vec![
                ("mongodb".into(), "MongoDB".into()),
                ("postgres".into(), "PostgreSQL".into()),
            ],
            options.database.as_str(),
        )];
        if options.include_docker {
            questions.push(Question::confirm(
                "includeDbDocker",
                "Include database Docker container? (Recommended for development)",
                options.database == Database::Mongodb,
            ));
        }
        questions.extend([
            Question::confirm(
                "includeEmail",
                "Include email service configuration?",
                options.include_email,
            ),
            Question::confirm(
                "includeOAuth",
                "Include Google OAuth configuration?",
                options.include_oauth,
            ),
            Question::confirm(
                "includePayments",
                "Include payment gateway configuration?",
                options.include_payments,
            ),
            Question::confirm(
                "includeGemini",
                "Include Google Gemini AI API configuration?",
                options.include_gemini,
            ),
            Question::confirm(
                "includeWebPush",
                "Include Web Push notifications configuration?",
                options.include_web_push,
            ),
        ]);

        let answers = self.prompter.ask(&questions)?;
        apply_feature_answers(&mut options, &answers)?;
        Ok(options)
    }
}

/// Defaults overlaid with base options; the app name never resolves empty.
fn seed_options(
    project_name: &str,
    base: Option<&ProjectOptions>,
) -> StackgenResult<ProjectOptions> {
    let options = match base {
        Some(base) => {
            let mut options = base.clone();
            if options.app_name.trim().is_empty() {
                options.app_name = project_name.to_string();
            }
            options
        }
        None => ProjectOptions::defaults(project_name),
    };

    if options.app_name.trim().is_empty() {
        return Err(DomainError::EmptyAppName.into());
    }
    Ok(options)
}

fn apply_feature_answers(
    options: &mut ProjectOptions,
    answers: &Answers,
) -> Result<(), DomainError> {
    if let Some(db) = answers.text("database")? {
        options.database = db.parse()?;
    }
    if let Some(v) = answers.flag("includeDbDocker")? {
        options.include_db_docker = v;
    }
    if let Some(v) = answers.flag("includeEmail")? {
        options.include_email = v;
    }
    if let Some(v) = answers.flag("includeOAuth")? {
        options.include_oauth = v;
    }
    if let Some(v) = answers.flag("includePayments")? {
        options.include_payments = v;
    }
    if let Some(v) = answers.flag("includeGemini")? {
        options.include_gemini = v;
    }
    if let Some(v) = answers.flag("includeWebPush")? {
        options.include_web_push = v;
    }
    Ok(())
}

/// Validate a user-supplied port string. Only numeric validation is applied;
/// collision with running services is deliberately not checked.
fn parse_port(input: &str) -> Result<u16, DomainError> {
    let trimmed = input.trim();
    match trimmed.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(DomainError::InvalidPort {
            input: trimmed.to_string(),
        }),
    }
}
