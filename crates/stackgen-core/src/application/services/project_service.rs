//! Composition drivers: the api, frontend, and fullstack project flows.
//!
//! Each driver orchestrates the same pipeline through the driven ports:
//! precondition check → template fetch → manifest rewrite → env synthesis →
//! container artifacts → documentation. All paths are threaded explicitly;
//! the process working directory is never changed.

use std::path::Path;

use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::{
    application::{
        error::ApplicationError,
        ports::{Filesystem, Prompter, SecretProvider, TemplateFetcher},
        services::{compose_service, env_service::EnvSynthesizer, options_resolver::OptionsResolver, readme_service},
    },
    domain::{Database, FrontendOptions, ProjectOptions},
    error::StackgenResult,
};

/// Template slug for the MongoDB-backed API starter.
pub const API_TEMPLATE_MONGODB: &str = "miracleonyenma/express-ts-graphql-starter";
/// Template slug for the PostgreSQL-backed API starter.
pub const API_TEMPLATE_POSTGRES: &str = "aevrHQ/express-ts-postgres-graphql-starter";
/// Template slug for the Next.js client starter.
pub const FRONTEND_TEMPLATE: &str = "miracleonyenma/nextjs-starter-client";

/// Container artifacts stripped from the template when docker is declined.
const DOCKER_ARTIFACTS: &[&str] = &[
    "Dockerfile",
    "docker-compose.yml",
    "docker-compose.dev.yml",
    "docker-compose.prod.yml",
];

/// Parameters for one driver invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateRequest<'a> {
    /// Accept every default without prompting.
    pub non_interactive: bool,
    /// Template source override; bypasses database-based selection.
    pub template: Option<&'a str>,
    /// Template override for the client half of a fullstack run. The api
    /// and frontend starters are different trees, so the fullstack driver
    /// carries one override per half.
    pub frontend_template: Option<&'a str>,
    /// Base options overlaid on defaults before prompting.
    pub base: Option<&'a ProjectOptions>,
}

/// Orchestrates project creation through the driven ports.
pub struct ProjectService<'a> {
    filesystem: &'a dyn Filesystem,
    fetcher: &'a dyn TemplateFetcher,
    secrets: &'a dyn SecretProvider,
    prompter: &'a dyn Prompter,
}

impl<'a> ProjectService<'a> {
    pub fn new(
        filesystem: &'a dyn Filesystem,
        fetcher: &'a dyn TemplateFetcher,
        secrets: &'a dyn SecretProvider,
        prompter: &'a dyn Prompter,
    ) -> Self {
        Self {
            filesystem,
            fetcher,
            secrets,
            prompter,
        }
    }

    /// Create an API project at `target`.
    ///
    /// Fatal before any write when `target` exists and is not empty.
    #[instrument(skip_all, fields(target = %target.display()))]
    pub fn create_api(
        &self,
        target: &Path,
        request: CreateRequest<'_>,
    ) -> StackgenResult<ProjectOptions> {
        self.ensure_target_free(target)?;

        let project_name = leaf_name(target);
        let resolver = OptionsResolver::new(self.prompter);
        let options = resolver.resolve_api(&project_name, request.non_interactive, request.base)?;

        let template = request.template.unwrap_or(match options.database {
            Database::Mongodb => API_TEMPLATE_MONGODB,
            Database::Postgres => API_TEMPLATE_POSTGRES,
        });
        info!(template, "fetching API template");
        self.fetch_template(template, target)?;

        self.rewrite_manifest(
            &target.join("package.json"),
            &options.app_name,
            "API generated with stackgen",
        )?;
        self.write_api_env(target, &options)?;
        self.write_container_artifacts(target, &options)?;
        self.filesystem
            .write_file(&target.join("README.md"), &readme_service::api_readme(&options))?;

        info!(app = %options.app_name, port = options.app_port, "API project created");
        Ok(options)
    }

    /// Create a frontend project at `target`.
    ///
    /// `api_url_default` seeds the API URL prompt; the fullstack driver
    /// passes the sibling API's resolved address here.
    #[instrument(skip_all, fields(target = %target.display()))]
    pub fn create_frontend(
        &self,
        target: &Path,
        request: CreateRequest<'_>,
        api_url_default: Option<&str>,
    ) -> StackgenResult<FrontendOptions> {
        self.ensure_target_free(target)?;

        let project_name = leaf_name(target);
        let resolver = OptionsResolver::new(self.prompter);
        let options = resolver.resolve_frontend(
            &project_name,
            request.non_interactive,
            request.base,
            api_url_default,
        )?;

        let template = request.template.unwrap_or(FRONTEND_TEMPLATE);
        info!(template, "fetching frontend template");
        self.fetch_template(template, target)?;

        self.rewrite_manifest(
            &target.join("package.json"),
            &options.base.app_name,
            "Next.js client generated with stackgen",
        )?;
        self.write_frontend_env(target, &options)?;

        info!(app = %options.base.app_name, "frontend project created");
        Ok(options)
    }

    /// Create a fullstack workspace under `parent`: `<name>-api` and
    /// `<name>-client` siblings plus a root npm-workspaces manifest.
    ///
    /// Aborts at the first failed step; output produced by earlier steps is
    /// left on disk.
    #[instrument(skip_all, fields(parent = %parent.display(), project = %project_name))]
    pub fn create_fullstack(
        &self,
        parent: &Path,
        project_name: &str,
        request: CreateRequest<'_>,
    ) -> StackgenResult<()> {
        let api_dir = format!("{project_name}-api");
        let client_dir = format!("{project_name}-client");

        let mut step = FullstackStep::Init;
        let mut api_options: Option<ProjectOptions> = None;

        loop {
            step = match step {
                FullstackStep::Init => {
                    self.filesystem.create_dir_all(parent)?;
                    FullstackStep::CreateApi
                }
                FullstackStep::CreateApi => {
                    let options = self.create_api(&parent.join(&api_dir), request)?;
                    api_options = Some(options);
                    FullstackStep::CreateFrontend
                }
                FullstackStep::CreateFrontend => {
                    let api_url = api_options
                        .as_ref()
                        .map(ProjectOptions::app_url)
                        .unwrap_or_else(|| FrontendOptions::defaults(project_name).api_url);
                    self.create_frontend(
                        &parent.join(&client_dir),
                        CreateRequest {
                            template: request.frontend_template,
                            ..request
                        },
                        Some(&api_url),
                    )?;
                    FullstackStep::WriteRootManifest
                }
                FullstackStep::WriteRootManifest => {
                    let options = api_options
                        .clone()
                        .unwrap_or_else(|| ProjectOptions::defaults(project_name));
                    let manifest = root_manifest(project_name, &api_dir, &client_dir);
                    self.filesystem
                        .write_file(&parent.join("package.json"), &render_json(&manifest))?;
                    self.filesystem.write_file(
                        &parent.join("README.md"),
                        &readme_service::root_readme(project_name, &options),
                    )?;
                    FullstackStep::Done
                }
                FullstackStep::Done => break,
            };
        }

        info!("fullstack workspace created");
        Ok(())
    }

    fn ensure_target_free(&self, target: &Path) -> StackgenResult<()> {
        if self.filesystem.dir_is_nonempty(target) {
            return Err(ApplicationError::DirectoryNotEmpty {
                path: target.to_path_buf(),
            }
            .into());
        }
        Ok(())
    }

    fn fetch_template(&self, source: &str, dest: &Path) -> StackgenResult<()> {
        self.filesystem.create_dir_all(dest)?;
        self.fetcher.fetch(source, dest)
    }

    /// Rewrite the template's `package.json` in place: project identity
    /// fields change, everything else is preserved byte-for-meaning.
    fn rewrite_manifest(&self, path: &Path, app_name: &str, description: &str) -> StackgenResult<()> {
        let raw = self.filesystem.read_to_string(path)?;
        let mut manifest: Value =
            serde_json::from_str(&raw).map_err(|e| ApplicationError::ManifestRewrite {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let object = manifest
            .as_object_mut()
            .ok_or_else(|| ApplicationError::ManifestRewrite {
                path: path.to_path_buf(),
                reason: "top-level value is not an object".into(),
            })?;
        object.insert(
            "name".into(),
            Value::String(crate::domain::slugify(app_name, '-')),
        );
        object.insert("version".into(), Value::String("0.1.0".into()));
        object.insert("description".into(), Value::String(description.into()));

        self.filesystem.write_file(path, &render_json(&manifest))
    }

    fn write_api_env(&self, target: &Path, options: &ProjectOptions) -> StackgenResult<()> {
        let example = target.join(".env.example");
        let seed = if self.filesystem.exists(&example) {
            self.filesystem.read_to_string(&example)?
        } else {
            warn!("template has no .env.example, starting from an empty seed");
            String::new()
        };

        let synthesizer = EnvSynthesizer::new(self.secrets);
        let plan = synthesizer.api_plan(options);
        let env = EnvSynthesizer::apply(&seed, &plan);
        self.filesystem.write_file(&target.join(".env"), &env.render())
    }

    fn write_frontend_env(&self, target: &Path, options: &FrontendOptions) -> StackgenResult<()> {
        let example = target.join(".env.example");
        let seed = if self.filesystem.exists(&example) {
            self.filesystem.read_to_string(&example)?
        } else {
            format!(
                "NEXT_PUBLIC_APP_URL={}\nNEXT_PUBLIC_APP_NAME={}\n",
                FrontendOptions::DEV_URL,
                options.base.app_name
            )
        };

        let synthesizer = EnvSynthesizer::new(self.secrets);
        let plan = synthesizer.frontend_plan(options);
        let env = EnvSynthesizer::apply(&seed, &plan);
        self.filesystem
            .write_file(&target.join(".env.local"), &env.render())
    }

    /// Write or remove container artifacts according to the docker flags.
    fn write_container_artifacts(
        &self,
        target: &Path,
        options: &ProjectOptions,
    ) -> StackgenResult<()> {
        if !options.include_docker {
            for name in DOCKER_ARTIFACTS {
                let path = target.join(name);
                if self.filesystem.exists(&path) {
                    self.filesystem.remove_file(&path)?;
                }
            }
            return Ok(());
        }

        self.filesystem.write_file(
            &target.join("docker-compose.dev.yml"),
            &compose_service::dev_compose(options),
        )?;
        self.filesystem.write_file(
            &target.join("docker-compose.prod.yml"),
            &compose_service::prod_compose(options),
        )?;
        self.filesystem.write_file(
            &target.join("Dockerfile.dev"),
            &compose_service::dockerfile_dev(options),
        )?;

        if options.include_db_docker && options.database == Database::Mongodb {
            let init_dir = target.join("mongo-init");
            self.filesystem.create_dir_all(&init_dir)?;
            self.filesystem.write_file(
                &init_dir.join("init.js"),
                &compose_service::mongo_init_script(options),
            )?;
        }
        Ok(())
    }
}

/// Fullstack driver progression; each step either advances or aborts the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FullstackStep {
    Init,
    CreateApi,
    CreateFrontend,
    WriteRootManifest,
    Done,
}

/// Root npm-workspaces manifest tying the two generated apps together.
fn root_manifest(project_name: &str, api_dir: &str, client_dir: &str) -> Value {
    json!({
        "name": crate::domain::slugify(project_name, '-'),
        "version": "0.1.0",
        "private": true,
        "workspaces": [api_dir, client_dir],
        "scripts": {
            "dev": "concurrently -n api,client \"npm run dev:api\" \"npm run dev:client\"",
            "dev:api": format!("npm run dev --workspace {api_dir}"),
            "dev:client": format!("npm run dev --workspace {client_dir}"),
            "build": "npm run build:api && npm run build:client",
            "build:api": format!("npm run build --workspace {api_dir}"),
            "build:client": format!("npm run build --workspace {client_dir}"),
            "start": "concurrently -n api,client \"npm run start:api\" \"npm run start:client\"",
            "start:api": format!("npm run start --workspace {api_dir}"),
            "start:client": format!("npm run start --workspace {client_dir}"),
            "codegen": format!("npm run codegen --workspace {client_dir}"),
        },
        "devDependencies": {
            "concurrently": "^8.2.2",
        },
    })
}

fn render_json(value: &Value) -> String {
    // to_string_pretty cannot fail for values built from valid JSON.
    let mut out = serde_json::to_string_pretty(value).unwrap_or_default();
    out.push('\n');
    out
}

fn leaf_name(target: &Path) -> String {
    target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MockFilesystem, MockPrompter, MockSecretProvider, MockTemplateFetcher, VapidKeypair,
    };
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    type Store = Arc<Mutex<BTreeMap<PathBuf, String>>>;

    /// A MockFilesystem wired to a shared in-memory path → content map.
    fn fake_fs(store: &Store) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let s2 = store.clone();
        fs.expect_write_file().returning(move |path, content| {
            s2.lock().unwrap().insert(path.to_path_buf(), content.to_string());
            Ok(())
        });
        let s3 = store.clone();
        fs.expect_read_to_string().returning(move |path| {
            s3.lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| {
                    ApplicationError::FilesystemError {
                        path: path.to_path_buf(),
                        reason: "not found".into(),
                    }
                    .into()
                })
        });
        let s4 = store.clone();
        fs.expect_exists()
            .returning(move |path| s4.lock().unwrap().contains_key(path));
        let s5 = store.clone();
        fs.expect_remove_file().returning(move |path| {
            s5.lock().unwrap().remove(path);
            Ok(())
        });
        fs
    }

    /// A fetcher that materializes a minimal node template into the store.
    fn fake_fetcher(store: &Store, with_env_example: bool, with_docker: bool) -> MockTemplateFetcher {
        let store = store.clone();
        let mut fetcher = MockTemplateFetcher::new();
        fetcher.expect_fetch().returning(move |_, dest| {
            let mut map = store.lock().unwrap();
            map.insert(
                dest.join("package.json"),
                r#"{"name":"starter","version":"9.9.9","scripts":{"dev":"nodemon"},"license":"MIT"}"#
                    .to_string(),
            );
            if with_env_example {
                map.insert(
                    dest.join(".env.example"),
                    "# Server\nPORT=4000\nLOG_LEVEL=debug\n".to_string(),
                );
            }
            if with_docker {
                map.insert(dest.join("Dockerfile"), "FROM node:lts\n".to_string());
                map.insert(dest.join("docker-compose.yml"), "services: {}\n".to_string());
            }
            Ok(())
        });
        fetcher
    }

    fn fixed_secrets() -> MockSecretProvider {
        let mut secrets = MockSecretProvider::new();
        secrets.expect_secure_key().returning(|n| "ab".repeat(n));
        secrets.expect_vapid_keypair().returning(|| VapidKeypair {
            public_key: "vapid-public".into(),
            private_key: "vapid-private".into(),
        });
        secrets
    }

    fn silent_prompter() -> MockPrompter {
        let mut prompter = MockPrompter::new();
        prompter.expect_ask().never();
        prompter
    }

    fn read(store: &Store, path: impl AsRef<Path>) -> String {
        store
            .lock()
            .unwrap()
            .get(path.as_ref())
            .cloned()
            .unwrap_or_else(|| panic!("missing file {}", path.as_ref().display()))
    }

    fn base_with_db_docker() -> ProjectOptions {
        let mut base = ProjectOptions::defaults("demo");
        base.include_db_docker = true;
        base
    }

    #[test]
    fn create_api_rejects_nonempty_target_before_writing() {
        let store: Store = Store::default();
        let mut fs = MockFilesystem::new();
        fs.expect_dir_is_nonempty().returning(|_| true);
        fs.expect_write_file().never();
        let mut fetcher = MockTemplateFetcher::new();
        fetcher.expect_fetch().never();
        let secrets = fixed_secrets();
        let prompter = silent_prompter();

        let service = ProjectService::new(&fs, &fetcher, &secrets, &prompter);
        let err = service
            .create_api(
                Path::new("/work/demo"),
                CreateRequest {
                    non_interactive: true,
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.to_string().contains("not empty"));
        assert!(store.lock().unwrap().is_empty());
    }

    #[test]
    fn create_api_produces_full_artifact_set() {
        let store: Store = Store::default();
        let mut fs = fake_fs(&store);
        fs.expect_dir_is_nonempty().returning(|_| false);
        let fetcher = fake_fetcher(&store, true, false);
        let secrets = fixed_secrets();
        let prompter = silent_prompter();
        let base = base_with_db_docker();

        let service = ProjectService::new(&fs, &fetcher, &secrets, &prompter);
        let options = service
            .create_api(
                Path::new("/work/demo"),
                CreateRequest {
                    non_interactive: true,
                    base: Some(&base),
                    ..Default::default()
                },
            )
            .unwrap();

        // Manifest: identity rewritten, other fields preserved.
        let manifest: Value =
            serde_json::from_str(&read(&store, "/work/demo/package.json")).unwrap();
        assert_eq!(manifest["name"], "demo");
        assert_eq!(manifest["version"], "0.1.0");
        assert_eq!(manifest["description"], "API generated with stackgen");
        assert_eq!(manifest["license"], "MIT");
        assert_eq!(manifest["scripts"]["dev"], "nodemon");

        // Env: seed comments kept, plan applied, seeded PORT overwritten.
        let env = read(&store, "/work/demo/.env");
        assert!(env.starts_with("# Server\n"));
        assert!(env.contains(&format!("PORT={}", options.app_port)));
        assert!(env.contains("LOG_LEVEL=debug"));
        assert!(env.contains("MONGO_URI=mongodb://mongo:27017/demo"));
        assert!(env.contains("VAPID_PUBLIC_KEY=vapid-public"));
        assert!(!env.contains("PORT=4000"));

        // Container artifacts.
        assert!(read(&store, "/work/demo/docker-compose.dev.yml").contains("Dockerfile.dev"));
        assert!(read(&store, "/work/demo/docker-compose.prod.yml").contains("unless-stopped"));
        assert!(read(&store, "/work/demo/Dockerfile.dev").starts_with("FROM node:lts"));
        assert!(read(&store, "/work/demo/mongo-init/init.js").contains("getSiblingDB"));

        // Documentation.
        assert!(read(&store, "/work/demo/README.md").contains("# demo"));
    }

    #[test]
    fn declining_docker_strips_template_container_files() {
        let store: Store = Store::default();
        let mut fs = fake_fs(&store);
        fs.expect_dir_is_nonempty().returning(|_| false);
        let fetcher = fake_fetcher(&store, true, true);
        let secrets = fixed_secrets();
        let prompter = silent_prompter();
        let mut base = ProjectOptions::defaults("demo");
        base.include_docker = false;

        let service = ProjectService::new(&fs, &fetcher, &secrets, &prompter);
        service
            .create_api(
                Path::new("/work/demo"),
                CreateRequest {
                    non_interactive: true,
                    base: Some(&base),
                    ..Default::default()
                },
            )
            .unwrap();

        let map = store.lock().unwrap();
        assert!(!map.contains_key(Path::new("/work/demo/Dockerfile")));
        assert!(!map.contains_key(Path::new("/work/demo/docker-compose.yml")));
        assert!(!map.contains_key(Path::new("/work/demo/docker-compose.dev.yml")));
        assert!(!map.contains_key(Path::new("/work/demo/mongo-init/init.js")));
    }

    #[test]
    fn template_selection_follows_database() {
        let store: Store = Store::default();
        for (database, expected) in [
            (Database::Mongodb, API_TEMPLATE_MONGODB),
            (Database::Postgres, API_TEMPLATE_POSTGRES),
        ] {
            store.lock().unwrap().clear();
            let mut fs = fake_fs(&store);
            fs.expect_dir_is_nonempty().returning(|_| false);
            let inner = store.clone();
            let mut fetcher = MockTemplateFetcher::new();
            let expected_source = expected.to_string();
            fetcher.expect_fetch().returning(move |source, dest| {
                assert_eq!(source, expected_source);
                inner.lock().unwrap().insert(
                    dest.join("package.json"),
                    r#"{"name":"starter"}"#.to_string(),
                );
                Ok(())
            });
            let secrets = fixed_secrets();
            let prompter = silent_prompter();
            let mut base = ProjectOptions::defaults("demo");
            base.database = database;

            let service = ProjectService::new(&fs, &fetcher, &secrets, &prompter);
            service
                .create_api(
                    Path::new("/work/demo"),
                    CreateRequest {
                        non_interactive: true,
                        base: Some(&base),
                        ..Default::default()
                    },
                )
                .unwrap();
        }
    }

    #[test]
    fn template_override_bypasses_database_selection() {
        let store: Store = Store::default();
        let mut fs = fake_fs(&store);
        fs.expect_dir_is_nonempty().returning(|_| false);
        let inner = store.clone();
        let mut fetcher = MockTemplateFetcher::new();
        fetcher.expect_fetch().returning(move |source, dest| {
            assert_eq!(source, "me/custom-starter");
            inner.lock().unwrap().insert(
                dest.join("package.json"),
                r#"{"name":"starter"}"#.to_string(),
            );
            Ok(())
        });
        let secrets = fixed_secrets();
        let prompter = silent_prompter();

        let service = ProjectService::new(&fs, &fetcher, &secrets, &prompter);
        service
            .create_api(
                Path::new("/work/demo"),
                CreateRequest {
                    non_interactive: true,
                    template: Some("me/custom-starter"),
                    ..Default::default()
                },
            )
            .unwrap();
    }

    #[test]
    fn broken_manifest_is_a_rewrite_error() {
        let store: Store = Store::default();
        let mut fs = fake_fs(&store);
        fs.expect_dir_is_nonempty().returning(|_| false);
        let inner = store.clone();
        let mut fetcher = MockTemplateFetcher::new();
        fetcher.expect_fetch().returning(move |_, dest| {
            inner
                .lock()
                .unwrap()
                .insert(dest.join("package.json"), "not json at all".to_string());
            Ok(())
        });
        let secrets = fixed_secrets();
        let prompter = silent_prompter();

        let service = ProjectService::new(&fs, &fetcher, &secrets, &prompter);
        let err = service
            .create_api(
                Path::new("/work/demo"),
                CreateRequest {
                    non_interactive: true,
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.to_string().contains("rewrite"));
    }

    #[test]
    fn frontend_seeds_env_local_when_template_has_no_example() {
        let store: Store = Store::default();
        let mut fs = fake_fs(&store);
        fs.expect_dir_is_nonempty().returning(|_| false);
        let fetcher = fake_fetcher(&store, false, false);
        let secrets = fixed_secrets();
        let prompter = silent_prompter();

        let service = ProjectService::new(&fs, &fetcher, &secrets, &prompter);
        service
            .create_frontend(
                Path::new("/work/demo-client"),
                CreateRequest {
                    non_interactive: true,
                    ..Default::default()
                },
                Some("http://localhost:4100"),
            )
            .unwrap();

        let env = read(&store, "/work/demo-client/.env.local");
        assert!(env.contains("NEXT_PUBLIC_APP_URL=http://localhost:3030"));
        assert!(env.contains("NEXT_PUBLIC_APP_NAME=demo-client"));
        assert!(env.contains("NEXT_PUBLIC_API_URL=http://localhost:4100"));
        assert!(env.contains("NEXT_PUBLIC_GRAPHQL_API=http://localhost:4100/graphql"));
        assert!(env.contains("SESSION_SECRET="));
        // No compose artifacts for frontends.
        assert!(!store
            .lock()
            .unwrap()
            .contains_key(Path::new("/work/demo-client/docker-compose.dev.yml")));
    }

    #[test]
    fn fullstack_wires_api_port_into_client_and_root_manifest() {
        let store: Store = Store::default();
        let mut fs = fake_fs(&store);
        fs.expect_dir_is_nonempty().returning(|_| false);
        let fetcher = fake_fetcher(&store, true, false);
        let secrets = fixed_secrets();
        let prompter = silent_prompter();

        let service = ProjectService::new(&fs, &fetcher, &secrets, &prompter);
        service
            .create_fullstack(
                Path::new("/work/demo"),
                "demo",
                CreateRequest {
                    non_interactive: true,
                    ..Default::default()
                },
            )
            .unwrap();

        let api_env = read(&store, "/work/demo/demo-api/.env");
        let api_port: u16 = api_env
            .lines()
            .find_map(|l| l.strip_prefix("PORT="))
            .unwrap()
            .parse()
            .unwrap();

        let client_env = read(&store, "/work/demo/demo-client/.env.local");
        assert!(client_env.contains(&format!("NEXT_PUBLIC_API_URL=http://localhost:{api_port}")));

        let manifest: Value =
            serde_json::from_str(&read(&store, "/work/demo/package.json")).unwrap();
        assert_eq!(manifest["workspaces"], json!(["demo-api", "demo-client"]));
        assert_eq!(manifest["devDependencies"]["concurrently"], "^8.2.2");
        assert_eq!(
            manifest["scripts"]["dev:api"],
            "npm run dev --workspace demo-api"
        );
        assert_eq!(
            manifest["scripts"]["codegen"],
            "npm run codegen --workspace demo-client"
        );

        let readme = read(&store, "/work/demo/README.md");
        assert!(readme.contains("demo-api"));
        assert!(readme.contains(&format!("http://localhost:{api_port}")));
    }

    #[test]
    fn fullstack_overrides_reach_both_halves() {
        let store: Store = Store::default();
        let mut fs = fake_fs(&store);
        fs.expect_dir_is_nonempty().returning(|_| false);
        let secrets = fixed_secrets();
        let prompter = silent_prompter();

        let sources: Arc<Mutex<Vec<String>>> = Arc::default();
        let inner = store.clone();
        let seen = sources.clone();
        let mut fetcher = MockTemplateFetcher::new();
        fetcher.expect_fetch().returning(move |source, dest| {
            seen.lock().unwrap().push(source.to_string());
            inner.lock().unwrap().insert(
                dest.join("package.json"),
                r#"{"name":"starter"}"#.to_string(),
            );
            Ok(())
        });

        let service = ProjectService::new(&fs, &fetcher, &secrets, &prompter);
        service
            .create_fullstack(
                Path::new("/work/demo"),
                "demo",
                CreateRequest {
                    non_interactive: true,
                    template: Some("me/api-starter"),
                    frontend_template: Some("me/client-starter"),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(
            *sources.lock().unwrap(),
            vec!["me/api-starter".to_string(), "me/client-starter".to_string()]
        );
    }

    #[test]
    fn fullstack_aborts_when_api_target_is_occupied() {
        let store: Store = Store::default();
        let mut fs = fake_fs(&store);
        fs.expect_dir_is_nonempty().returning(|_| true);
        let mut fetcher = MockTemplateFetcher::new();
        fetcher.expect_fetch().never();
        let secrets = fixed_secrets();
        let prompter = silent_prompter();

        let service = ProjectService::new(&fs, &fetcher, &secrets, &prompter);
        let err = service
            .create_fullstack(
                Path::new("/work/demo"),
                "demo",
                CreateRequest {
                    non_interactive: true,
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.to_string().contains("not empty"));
    }
}
