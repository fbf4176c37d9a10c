//! Documentation synthesizer: project README generation.
//!
//! Sections branch on the same predicates as the other generators
//! (`include_docker`, `include_db_docker`, the feature flags) so the
//! documentation never describes an artifact that was not produced.

use crate::domain::{enabled_features, Database, ProjectOptions};

/// README for a generated API project.
pub fn api_readme(options: &ProjectOptions) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", options.app_name));
    out.push_str(&format!(
        "A GraphQL API built with Express, TypeScript, and {}.\n\n",
        options.database.display_name()
    ));

    out.push_str("## Prerequisites\n\n");
    out.push_str("- Node.js 20+\n");
    if options.include_docker {
        out.push_str("- Docker and Docker Compose\n");
    }
    if !options.include_db_docker {
        out.push_str(&format!(
            "- A running {} instance\n",
            options.database.display_name()
        ));
    }
    out.push('\n');

    out.push_str("## Getting started\n\n");
    out.push_str(
        "Environment variables live in `.env`; it was generated for you with \
         fresh secrets and sensible development defaults.\n\n",
    );
    if options.include_docker {
        out.push_str("Start the development stack:\n\n");
        out.push_str("```sh\ndocker compose -f docker-compose.dev.yml up --build\n```\n\n");
        out.push_str("Or run the production build:\n\n");
        out.push_str("```sh\ndocker compose -f docker-compose.prod.yml up --build -d\n```\n\n");
    } else {
        out.push_str("Install dependencies and start the dev server:\n\n");
        out.push_str("```sh\nnpm install\nnpm run dev\n```\n\n");
    }
    out.push_str(&format!(
        "The API listens on [http://localhost:{port}](http://localhost:{port}); \
         the GraphQL playground is at `/graphql`.\n\n",
        port = options.app_port
    ));

    push_database_section(&mut out, options);
    push_feature_sections(&mut out, options);

    out.push_str("---\n\nGenerated with stackgen.\n");
    out
}

/// Root README for a fullstack workspace.
pub fn root_readme(project_name: &str, options: &ProjectOptions) -> String {
    let api_dir = format!("{project_name}-api");
    let client_dir = format!("{project_name}-client");
    let mut out = String::new();
    out.push_str(&format!("# {project_name}\n\n"));
    out.push_str(&format!(
        "A fullstack workspace: a GraphQL API in `{api_dir}/` and a Next.js \
         client in `{client_dir}/`.\n\n"
    ));
    out.push_str("## Getting started\n\n");
    out.push_str("```sh\nnpm install\nnpm run dev\n```\n\n");
    out.push_str(&format!(
        "`npm run dev` starts both apps concurrently: the API on \
         [http://localhost:{}](http://localhost:{}) and the client on \
         [http://localhost:3030](http://localhost:3030).\n\n",
        options.app_port, options.app_port
    ));
    out.push_str("## Scripts\n\n");
    out.push_str("| Script | What it does |\n|---|---|\n");
    out.push_str("| `npm run dev` | Run API and client together |\n");
    out.push_str("| `npm run dev:api` | Run the API alone |\n");
    out.push_str("| `npm run dev:client` | Run the client alone |\n");
    out.push_str("| `npm run build` | Build both apps |\n");
    out.push_str("| `npm run start` | Start both production builds |\n");
    out.push_str("| `npm run codegen` | Regenerate client GraphQL types |\n\n");
    out.push_str(&format!(
        "See `{api_dir}/README.md` for API-specific configuration.\n\n"
    ));
    out.push_str("---\n\nGenerated with stackgen.\n");
    out
}

fn push_database_section(out: &mut String, options: &ProjectOptions) {
    out.push_str(&format!("## {}\n\n", options.database.display_name()));
    out.push_str(&format!(
        "The connection string is set as `{}` in `.env`.\n\n",
        options.database.env_key()
    ));
    if options.include_db_docker {
        out.push_str(&format!(
            "The database runs as the `{}` compose service with a persistent \
             named volume. Inspect it with:\n\n",
            options.database.service_name()
        ));
        match options.database {
            Database::Mongodb => {
                out.push_str(&format!(
                    "```sh\ndocker compose -f docker-compose.dev.yml exec mongo \
                     mongosh {}\n```\n\n",
                    options.db_slug()
                ));
            }
            Database::Postgres => {
                out.push_str(&format!(
                    "```sh\ndocker compose -f docker-compose.dev.yml exec postgres \
                     psql -U postgres {}\n```\n\n",
                    options.db_slug()
                ));
            }
        }
    } else {
        out.push_str(&format!(
            "Point `{}` at your own {} instance before starting the server.\n\n",
            options.database.env_key(),
            options.database.display_name()
        ));
    }
}

fn push_feature_sections(out: &mut String, options: &ProjectOptions) {
    for def in enabled_features(options) {
        out.push_str(&format!("## {}\n\n", def.doc_title));
        out.push_str("Configured via:\n\n");
        for key in def.env_keys {
            out.push_str(&format!("- `{key}`\n"));
        }
        out.push('\n');
    }
}
