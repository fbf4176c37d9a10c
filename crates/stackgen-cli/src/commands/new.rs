//! Implementation of the `stackgen new` command.
//!
//! Responsibility: translate CLI arguments into a core `CreateRequest`,
//! wire up the adapters, and display results. No derivation logic lives
//! here.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use stackgen_adapters::{
    DefaultsPrompter, DialoguerPrompter, GitTemplateFetcher, LocalFilesystem, OsRandomSecrets,
};
use stackgen_core::{
    application::{
        ports::Prompter, CreateRequest, ProjectService,
    },
    domain::{derive_port, Database, ProjectOptions},
};

use crate::{
    cli::{global::GlobalArgs, NewArgs, ProjectType},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `stackgen new` command.
///
/// Dispatch sequence:
/// 1. Parse and validate the project name / target path
/// 2. Build base options from config defaults
/// 3. Wire adapters and dispatch by project type
/// 4. Print next-steps guidance
#[instrument(skip_all, fields(project = %args.name, kind = %args.kind))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve project path
    let (project_name, project_path) = resolve_project_path(&args.name)?;
    validate_project_name(&project_name)?;

    // 2. Base options from config (prompt defaults, not final values)
    let base = base_options(&project_name, &config)?;
    let template = resolve_template(&args, &config, &base);
    let frontend_template = resolve_frontend_template(&args, &config);
    let non_interactive = args.yes || global.quiet;

    debug!(
        non_interactive,
        template = template.as_deref().unwrap_or("auto"),
        frontend_template = frontend_template.as_deref().unwrap_or("auto"),
        "new command resolved"
    );

    // 3. Wire adapters
    let filesystem = LocalFilesystem::new();
    let fetcher = GitTemplateFetcher::new();
    let secrets = OsRandomSecrets::new();
    let dialoguer = DialoguerPrompter::new();
    let defaults = DefaultsPrompter::new();
    let prompter: &dyn Prompter = if non_interactive { &defaults } else { &dialoguer };
    let service = ProjectService::new(&filesystem, &fetcher, &secrets, prompter);

    let request = CreateRequest {
        non_interactive,
        template: template.as_deref(),
        frontend_template: frontend_template.as_deref(),
        base: base.as_ref(),
    };

    output.header(&format!("Creating '{project_name}'..."))?;
    info!(project = %project_name, path = %project_path.display(), "generation started");

    match args.kind {
        ProjectType::Api => {
            let options = service.create_api(&project_path, request)?;
            output.success(&format!(
                "API project '{}' created (port {})",
                options.app_name, options.app_port
            ))?;
            print_next_steps(&output, &global, &project_name, &["npm install", "npm run dev"])?;
        }
        ProjectType::Frontend => {
            let options = service.create_frontend(&project_path, request, None)?;
            output.success(&format!(
                "Frontend project '{}' created",
                options.base.app_name
            ))?;
            print_next_steps(&output, &global, &project_name, &["npm install", "npm run dev"])?;
        }
        ProjectType::Fullstack => {
            service.create_fullstack(&project_path, &project_name, request)?;
            output.success(&format!("Fullstack workspace '{project_name}' created"))?;
            print_next_steps(
                &output,
                &global,
                &project_name,
                &["npm install", "npm run dev   # starts API and client"],
            )?;
        }
    }

    info!(project = %project_name, "generation completed");
    Ok(())
}

// ── Path resolution ───────────────────────────────────────────────────────────

pub fn resolve_project_path(name: &str) -> CliResult<(String, PathBuf)> {
    let path = Path::new(name);

    let project_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: name.into(),
            reason: "cannot extract valid project name".into(),
        })?
        .to_string();

    Ok((project_name, path.to_path_buf()))
}

fn validate_project_name(name: &str) -> CliResult<()> {
    if name.is_empty() {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if name.starts_with('.') {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot start with '.'".into(),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == ' ')
    {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "use alphanumeric characters, hyphens, and underscores".into(),
        });
    }
    Ok(())
}

// ── Config translation ────────────────────────────────────────────────────────

/// Config defaults become base options: they seed prompts and win over the
/// built-in defaults, but answers still win over them.
fn base_options(project_name: &str, config: &AppConfig) -> CliResult<Option<ProjectOptions>> {
    let defaults = &config.defaults;
    if defaults.database.is_none() && defaults.docker.is_none() && defaults.port.is_none() {
        return Ok(None);
    }

    let mut base = ProjectOptions::defaults(project_name);
    if let Some(database) = &defaults.database {
        base.database = database.parse::<Database>().map_err(|e| CliError::ConfigError {
            message: format!("defaults.database: {e}"),
            source: None,
        })?;
    }
    if let Some(docker) = defaults.docker {
        base.include_docker = docker;
    }
    base.app_port = defaults.port.unwrap_or_else(|| derive_port(project_name));
    Ok(Some(base))
}

/// Template precedence: `--template` flag, then the matching config
/// override, then core's database-based selection (signalled by `None`).
fn resolve_template(
    args: &NewArgs,
    config: &AppConfig,
    base: &Option<ProjectOptions>,
) -> Option<String> {
    if let Some(template) = &args.template {
        return Some(template.clone());
    }
    match args.kind {
        ProjectType::Frontend => config.templates.frontend.clone(),
        ProjectType::Api | ProjectType::Fullstack => {
            let database = base
                .as_ref()
                .map(|b| b.database)
                .unwrap_or(Database::Mongodb);
            match database {
                Database::Mongodb => config.templates.api_mongodb.clone(),
                Database::Postgres => config.templates.api_postgres.clone(),
            }
        }
    }
}

/// Template for the client half of a fullstack run, same precedence as
/// [`resolve_template`]. `--template` applies to both halves so that one
/// local fixture can drive an entire offline fullstack generation.
fn resolve_frontend_template(args: &NewArgs, config: &AppConfig) -> Option<String> {
    if args.kind != ProjectType::Fullstack {
        return None;
    }
    args.template
        .clone()
        .or_else(|| config.templates.frontend.clone())
}

fn print_next_steps(
    output: &OutputManager,
    global: &GlobalArgs,
    project_name: &str,
    commands: &[&str],
) -> CliResult<()> {
    if global.quiet {
        return Ok(());
    }
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {project_name}"))?;
    for command in commands {
        output.print(&format!("  {command}"))?;
    }
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────
