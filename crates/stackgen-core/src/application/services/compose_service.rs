//! Container artifact generator: compose files, dev Dockerfile, database
//! init script.
//!
//! Compose passthrough lines come from the same feature registry the env
//! synthesizer uses, so a variable appears in a service's `environment:`
//! block exactly when the env plan writes it. Rendering is plain string
//! building; the output is YAML by construction, not by a YAML library, so
//! the emitted files diff cleanly against hand-maintained ones.

use crate::domain::{enabled_features, Database, ProjectOptions};

/// Environment keys every generated service passes through, before the
/// database key and feature blocks.
const BASE_PASSTHROUGH: &[&str] = &[
    "PORT",
    "APP_NAME",
    "APP_URL",
    "ACCESS_TOKEN_SECRET",
    "REFRESH_TOKEN_SECRET",
    "WEBHOOK_SECRET",
];

/// All environment keys the compose services pass through, in emission
/// order. Mirrors the env plan's key set for the same options.
pub fn passthrough_keys(options: &ProjectOptions) -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = BASE_PASSTHROUGH.to_vec();
    keys.push(options.database.env_key());
    for def in enabled_features(options) {
        keys.extend(def.env_keys);
    }
    keys
}

/// Development compose file: builds from `Dockerfile.dev`, mounts the source
/// tree read-only for live reload, and keeps `node_modules` inside the
/// container via an anonymous volume.
pub fn dev_compose(options: &ProjectOptions) -> String {
    let mut out = String::new();
    out.push_str("services:\n");
    out.push_str("  api:\n");
    out.push_str("    build:\n");
    out.push_str("      context: .\n");
    out.push_str("      dockerfile: Dockerfile.dev\n");
    out.push_str(&format!(
        "    ports:\n      - \"{port}:{port}\"\n",
        port = options.app_port
    ));
    out.push_str("    env_file:\n      - .env\n");
    out.push_str("    environment:\n");
    out.push_str("      - NODE_ENV=development\n");
    push_passthrough(&mut out, options);
    out.push_str("    volumes:\n");
    for mount in ["./src", "./package.json", "./package-lock.json", "./tsconfig.json", "./nodemon.json"] {
        let target = mount.trim_start_matches("./");
        out.push_str(&format!("      - {mount}:/usr/src/app/{target}:ro\n"));
    }
    out.push_str("      - /usr/src/app/node_modules\n");
    if options.include_db_docker {
        out.push_str(&format!(
            "    depends_on:\n      - {}\n",
            options.database.service_name()
        ));
        push_database_service(&mut out, options);
        push_database_volume(&mut out, options);
    }
    out
}

/// Production compose file: builds from `Dockerfile`, no source mounts,
/// restarts on failure.
pub fn prod_compose(options: &ProjectOptions) -> String {
    let mut out = String::new();
    out.push_str("services:\n");
    out.push_str("  api:\n");
    out.push_str("    build:\n");
    out.push_str("      context: .\n");
    out.push_str("      dockerfile: Dockerfile\n");
    out.push_str("    restart: unless-stopped\n");
    out.push_str(&format!(
        "    ports:\n      - \"{port}:{port}\"\n",
        port = options.app_port
    ));
    out.push_str("    env_file:\n      - .env\n");
    out.push_str("    environment:\n");
    out.push_str("      - NODE_ENV=production\n");
    push_passthrough(&mut out, options);
    if options.include_db_docker {
        out.push_str(&format!(
            "    depends_on:\n      - {}\n",
            options.database.service_name()
        ));
        push_database_service(&mut out, options);
        push_database_volume(&mut out, options);
    }
    out
}

/// Development Dockerfile driving the dev compose service.
pub fn dockerfile_dev(options: &ProjectOptions) -> String {
    format!(
        "FROM node:lts\n\n\
         WORKDIR /usr/src/app\n\n\
         COPY package*.json ./\n\
         RUN npm ci\n\n\
         COPY . .\n\n\
         EXPOSE {port}\n\n\
         CMD [\"npm\", \"run\", \"dev\"]\n",
        port = options.app_port
    )
}

/// Seed script mounted into the mongo container's init directory. Only
/// meaningful for mongodb; the postgres image creates its database from
/// `POSTGRES_DB` on its own.
pub fn mongo_init_script(options: &ProjectOptions) -> String {
    format!(
        "// Database initialization for {name}\n\
         db = db.getSiblingDB(\"{slug}\");\n\
         db.createCollection(\"init\");\n",
        name = options.app_name,
        slug = options.db_slug()
    )
}

fn push_passthrough(out: &mut String, options: &ProjectOptions) {
    for key in passthrough_keys(options) {
        out.push_str(&format!("      - {key}=${{{key}}}\n"));
    }
}

fn push_database_service(out: &mut String, options: &ProjectOptions) {
    let db = options.database;
    out.push_str(&format!("  {}:\n", db.service_name()));
    out.push_str(&format!("    image: {}\n", db.image()));
    out.push_str(&format!(
        "    ports:\n      - \"{port}:{port}\"\n",
        port = db.port()
    ));
    match db {
        Database::Mongodb => {
            out.push_str("    environment:\n");
            out.push_str(&format!(
                "      - MONGO_INITDB_DATABASE={}\n",
                options.db_slug()
            ));
            out.push_str("    volumes:\n");
            out.push_str("      - mongo_data:/data/db\n");
            out.push_str("      - ./mongo-init:/docker-entrypoint-initdb.d:ro\n");
        }
        Database::Postgres => {
            out.push_str("    environment:\n");
            out.push_str("      - POSTGRES_USER=postgres\n");
            out.push_str("      - POSTGRES_PASSWORD=postgres\n");
            out.push_str(&format!("      - POSTGRES_DB={}\n", options.db_slug()));
            out.push_str("    volumes:\n");
            out.push_str("      - postgres_data:/var/lib/postgresql/data\n");
        }
    }
}

fn push_database_volume(out: &mut String, options: &ProjectOptions) {
    let volume = match options.database {
        Database::Mongodb => "mongo_data",
        Database::Postgres => "postgres_data",
    };
    out.push_str(&format!("volumes:\n  {volume}:\n"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockSecretProvider, VapidKeypair};
    use crate::application::services::env_service::EnvSynthesizer;

    fn opts() -> ProjectOptions {
        let mut options = ProjectOptions::defaults("demo");
        options.app_port = 4100;
        options
    }

    #[test]
    fn dev_compose_mounts_source_read_only() {
        let compose = dev_compose(&opts());
        assert!(compose.contains("dockerfile: Dockerfile.dev"));
        assert!(compose.contains("- ./src:/usr/src/app/src:ro"));
        assert!(compose.contains("- ./nodemon.json:/usr/src/app/nodemon.json:ro"));
        assert!(compose.contains("- /usr/src/app/node_modules"));
        assert!(compose.contains("- NODE_ENV=development"));
        assert!(compose.contains("- \"4100:4100\""));
    }

    #[test]
    fn prod_compose_has_no_source_mounts() {
        let compose = prod_compose(&opts());
        assert!(compose.contains("dockerfile: Dockerfile\n"));
        assert!(compose.contains("restart: unless-stopped"));
        assert!(compose.contains("- NODE_ENV=production"));
        assert!(!compose.contains("./src"));
        assert!(!compose.contains("node_modules"));
    }

    #[test]
    fn database_stanza_present_only_with_db_docker() {
        let mut options = opts();
        options.include_db_docker = false;
        let compose = dev_compose(&options);
        assert!(!compose.contains("depends_on"));
        assert!(!compose.contains("mongo_data"));

        options.include_db_docker = true;
        let compose = dev_compose(&options);
        assert!(compose.contains("depends_on:\n      - mongo"));
        assert!(compose.contains("image: mongo:7"));
        assert!(compose.contains("MONGO_INITDB_DATABASE=demo"));
        assert!(compose.contains("- ./mongo-init:/docker-entrypoint-initdb.d:ro"));
        assert!(compose.ends_with("volumes:\n  mongo_data:\n"));
    }

    #[test]
    fn postgres_stanza_uses_underscore_slug_and_named_volume() {
        let mut options = ProjectOptions::defaults("My App");
        options.database = Database::Postgres;
        options.include_db_docker = true;
        let compose = prod_compose(&options);
        assert!(compose.contains("image: postgres:15"));
        assert!(compose.contains("POSTGRES_DB=my_app"));
        assert!(compose.contains("postgres_data:/var/lib/postgresql/data"));
        assert!(!compose.contains("mongo-init"));
    }

    #[test]
    fn passthrough_tracks_env_plan_key_set() {
        // The lockstep invariant: compose passthrough keys equal the env
        // plan's keys for the same options, base keys included.
        let mut secrets = MockSecretProvider::new();
        secrets.expect_secure_key().returning(|n| "ef".repeat(n));
        secrets.expect_vapid_keypair().returning(|| VapidKeypair {
            public_key: "pk".into(),
            private_key: "sk".into(),
        });
        let synth = EnvSynthesizer::new(&secrets);

        for bits in 0u8..32 {
            let mut options = opts();
            options.include_web_push = bits & 1 != 0;
            options.include_email = bits & 2 != 0;
            options.include_oauth = bits & 4 != 0;
            options.include_payments = bits & 8 != 0;
            options.include_gemini = bits & 16 != 0;

            let plan_keys: Vec<String> =
                synth.api_plan(&options).into_iter().map(|(k, _)| k).collect();
            let compose_keys: Vec<String> = passthrough_keys(&options)
                .into_iter()
                .map(String::from)
                .collect();
            assert_eq!(plan_keys, compose_keys, "drift with bits {bits:05b}");
        }
    }

    #[test]
    fn dockerfile_dev_exposes_resolved_port() {
        let dockerfile = dockerfile_dev(&opts());
        assert!(dockerfile.starts_with("FROM node:lts\n"));
        assert!(dockerfile.contains("EXPOSE 4100"));
        assert!(dockerfile.contains("RUN npm ci"));
        assert!(dockerfile.ends_with("CMD [\"npm\", \"run\", \"dev\"]\n"));
    }

    #[test]
    fn mongo_init_stamps_app_name_and_slug() {
        let mut options = ProjectOptions::defaults("My App");
        options.include_db_docker = true;
        let script = mongo_init_script(&options);
        assert!(script.contains("My App"));
        assert!(script.contains("getSiblingDB(\"my-app\")"));
    }
}
