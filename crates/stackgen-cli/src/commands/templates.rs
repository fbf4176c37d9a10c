//! `stackgen templates` — list the built-in starter template sources.

use serde_json::json;

use stackgen_core::application::services::{
    API_TEMPLATE_MONGODB, API_TEMPLATE_POSTGRES, FRONTEND_TEMPLATE,
};

use crate::{
    cli::{TemplatesArgs, TemplatesFormat},
    error::CliResult,
    output::OutputManager,
};

/// A built-in template row.
struct TemplateRow {
    kind: &'static str,
    database: &'static str,
    slug: &'static str,
}

const ROWS: &[TemplateRow] = &[
    TemplateRow {
        kind: "api",
        database: "mongodb",
        slug: API_TEMPLATE_MONGODB,
    },
    TemplateRow {
        kind: "api",
        database: "postgres",
        slug: API_TEMPLATE_POSTGRES,
    },
    TemplateRow {
        kind: "frontend",
        database: "-",
        slug: FRONTEND_TEMPLATE,
    },
];

pub fn execute(args: TemplatesArgs, output: OutputManager) -> CliResult<()> {
    match args.format {
        TemplatesFormat::Table => {
            output.header("Built-in templates:")?;
            output.print("")?;
            output.print(&format!("{:<10} {:<10} SOURCE", "TYPE", "DATABASE"))?;
            for row in ROWS {
                output.print(&format!(
                    "{:<10} {:<10} {}",
                    row.kind, row.database, row.slug
                ))?;
            }
            output.print("")?;
            output.print("Override with --template <owner/repo | local dir>.")?;
        }
        TemplatesFormat::List => {
            for row in ROWS {
                output.print(row.slug)?;
            }
        }
        TemplatesFormat::Json => {
            let rows: Vec<_> = ROWS
                .iter()
                .map(|row| {
                    json!({
                        "type": row.kind,
                        "database": row.database,
                        "source": row.slug,
                    })
                })
                .collect();
            // serde_json cannot fail on these literals.
            output.print(&serde_json::to_string_pretty(&rows).unwrap_or_default())?;
        }
    }
    Ok(())
}
