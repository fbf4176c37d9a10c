//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stackgen",
    bin_name = "stackgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Fullstack project generation from one options record",
    long_about = "Stackgen fetches a starter template and derives its \
                  environment file, compose files, and documentation from a \
                  single set of project options.",
    after_help = "EXAMPLES:\n\
        \x20 stackgen new my-app                       # fullstack workspace\n\
        \x20 stackgen new my-api --type api --yes      # API with defaults\n\
        \x20 stackgen new web --type frontend\n\
        \x20 stackgen templates\n\
        \x20 stackgen completions bash > /usr/share/bash-completion/completions/stackgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from a starter template.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 stackgen new my-app                   # fullstack: my-app-api + my-app-client\n\
            \x20 stackgen new my-api  --type api\n\
            \x20 stackgen new web     --type frontend --yes\n\
            \x20 stackgen new my-api  --type api --template owner/my-starter"
    )]
    New(NewArgs),

    /// List the built-in starter templates.
    #[command(
        visible_alias = "ls",
        about = "List starter templates",
        after_help = "EXAMPLES:\n\
            \x20 stackgen templates\n\
            \x20 stackgen templates --format json"
    )]
    Templates(TemplatesArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stackgen completions bash > ~/.local/share/bash-completion/completions/stackgen\n\
            \x20 stackgen completions zsh  > ~/.zfunc/_stackgen\n\
            \x20 stackgen completions fish > ~/.config/fish/completions/stackgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the stackgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stackgen config get defaults.database\n\
            \x20 stackgen config list\n\
            \x20 stackgen config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `stackgen new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name or path.  A plain name creates `./name`; a path like
    /// `../foo` places the project one level up.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    /// What to generate.
    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        value_enum,
        default_value_t = ProjectType::Fullstack,
        help = "Project type"
    )]
    pub kind: ProjectType,

    /// Accept every default without prompting.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip prompts and accept all defaults"
    )]
    pub yes: bool,

    /// Use a specific template source, bypassing database-based selection.
    /// Accepts an `owner/repo` GitHub slug or a local directory path.
    #[arg(
        long = "template",
        value_name = "SOURCE",
        help = "Template source (owner/repo slug or local directory)"
    )]
    pub template: Option<String>,
}

/// What kind of project `new` generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ProjectType {
    /// Express + TypeScript GraphQL API.
    Api,
    /// Next.js client.
    Frontend,
    /// API + client siblings under an npm-workspaces root.
    Fullstack,
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api => write!(f, "api"),
            Self::Frontend => write!(f, "frontend"),
            Self::Fullstack => write!(f, "fullstack"),
        }
    }
}

// ── templates ─────────────────────────────────────────────────────────────────

/// Arguments for `stackgen templates`.
#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: TemplatesFormat,
}

/// Output format for the `templates` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TemplatesFormat {
    /// Human-readable table.
    Table,
    /// One slug per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stackgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `stackgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.database`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_new_command_defaults_to_fullstack() {
        let cli = Cli::parse_from(["stackgen", "new", "my-app"]);
        if let Commands::New(args) = cli.command {
            assert_eq!(args.kind, ProjectType::Fullstack);
            assert!(!args.yes);
        } else {
            panic!("expected New command");
        }
    }

    #[test]
    fn parse_new_api_with_template_override() {
        let cli = Cli::parse_from([
            "stackgen",
            "new",
            "my-api",
            "--type",
            "api",
            "--template",
            "owner/starter",
            "--yes",
        ]);
        if let Commands::New(args) = cli.command {
            assert_eq!(args.kind, ProjectType::Api);
            assert_eq!(args.template.as_deref(), Some("owner/starter"));
            assert!(args.yes);
        } else {
            panic!("expected New command");
        }
    }

    #[test]
    fn project_type_display() {
        assert_eq!(ProjectType::Api.to_string(), "api");
        assert_eq!(ProjectType::Frontend.to_string(), "frontend");
        assert_eq!(ProjectType::Fullstack.to_string(), "fullstack");
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["stackgen", "--quiet", "--verbose", "templates"]);
        assert!(result.is_err());
    }

    #[test]
    fn templates_alias() {
        let cli = Cli::parse_from(["stackgen", "ls"]);
        assert!(matches!(cli.command, Commands::Templates(_)));
    }
}
