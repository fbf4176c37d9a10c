//! Template fetcher adapter.
//!
//! Resolves a template source to a directory tree at the destination.
//! Two source forms are supported:
//! - a local directory path, copied with `walkdir` (used by tests and for
//!   offline template development);
//! - an `owner/repo` GitHub slug, shallow-cloned with the system `git`.
//!
//! Either way the result is a plain tree with no `.git` history, matching
//! degit-style template semantics.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};
use walkdir::WalkDir;

use stackgen_core::{
    application::{ports::TemplateFetcher, ApplicationError},
    error::StackgenResult,
};

/// Fetches templates from GitHub slugs or local directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitTemplateFetcher;

impl GitTemplateFetcher {
    pub fn new() -> Self {
        Self
    }

    fn fetch_local(&self, source: &Path, dest: &Path) -> StackgenResult<()> {
        debug!(source = %source.display(), "copying local template");
        for entry in WalkDir::new(source) {
            let entry = entry.map_err(|e| fetch_error(source.display(), e))?;
            let rel = entry
                .path()
                .strip_prefix(source)
                .map_err(|e| fetch_error(source.display(), e))?;
            if rel.as_os_str().is_empty() || rel.starts_with(".git") {
                continue;
            }
            let target = dest.join(rel);
            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target).map_err(|e| fetch_error(source.display(), e))?;
            } else {
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| fetch_error(source.display(), e))?;
                }
                std::fs::copy(entry.path(), &target)
                    .map_err(|e| fetch_error(source.display(), e))?;
            }
        }
        Ok(())
    }

    fn fetch_remote(&self, slug: &str, dest: &Path) -> StackgenResult<()> {
        let url = format!("https://github.com/{slug}.git");
        info!(%url, "cloning template");
        let output = Command::new("git")
            .args(["clone", "--depth", "1", &url])
            .arg(dest)
            .output()
            .map_err(|e| fetch_error(slug, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ApplicationError::TemplateFetchFailed {
                template: slug.to_string(),
                reason: stderr.trim().to_string(),
            }
            .into());
        }

        // Templates are plain trees; drop the clone's history.
        let git_dir = dest.join(".git");
        if git_dir.exists() {
            std::fs::remove_dir_all(&git_dir).map_err(|e| fetch_error(slug, e))?;
        }
        Ok(())
    }
}

impl TemplateFetcher for GitTemplateFetcher {
    fn fetch(&self, source: &str, dest: &Path) -> StackgenResult<()> {
        let local = Path::new(source);
        if local.is_dir() {
            self.fetch_local(local, dest)
        } else {
            self.fetch_remote(source, dest)
        }
    }
}

fn fetch_error(
    template: impl ToString,
    e: impl std::fmt::Display,
) -> stackgen_core::error::StackgenError {
    ApplicationError::TemplateFetchFailed {
        template: template.to_string(),
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn local_copy_reproduces_the_tree_without_git_dir() {
        let src = tempdir().unwrap();
        std::fs::create_dir_all(src.path().join("src")).unwrap();
        std::fs::write(src.path().join("package.json"), "{}").unwrap();
        std::fs::write(src.path().join("src/index.ts"), "export {}").unwrap();
        std::fs::create_dir_all(src.path().join(".git")).unwrap();
        std::fs::write(src.path().join(".git/HEAD"), "ref").unwrap();

        let dest = tempdir().unwrap();
        let fetcher = GitTemplateFetcher::new();
        fetcher
            .fetch(src.path().to_str().unwrap(), dest.path())
            .unwrap();

        assert!(dest.path().join("package.json").exists());
        assert!(dest.path().join("src/index.ts").exists());
        assert!(!dest.path().join(".git").exists());
    }

    #[test]
    fn local_copy_overwrites_existing_files() {
        let src = tempdir().unwrap();
        std::fs::write(src.path().join("a.txt"), "new").unwrap();

        let dest = tempdir().unwrap();
        std::fs::write(dest.path().join("a.txt"), "old").unwrap();

        let fetcher = GitTemplateFetcher::new();
        fetcher
            .fetch(src.path().to_str().unwrap(), dest.path())
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(dest.path().join("a.txt")).unwrap(),
            "new"
        );
    }

    #[test]
    fn unreachable_slug_is_a_fetch_error() {
        // Not a local directory and not clonable without network access.
        let dest = tempdir().unwrap();
        let fetcher = GitTemplateFetcher::new();
        let result = fetcher.fetch(
            "definitely-not-a-user/definitely-not-a-repo-0000",
            &dest.path().join("out"),
        );
        assert!(result.is_err());
    }
}
