//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use stackgen_core::{
    application::{ports::Filesystem, ApplicationError},
    error::StackgenResult,
};

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file without going through the port (testing helper).
    pub fn seed(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        let mut inner = self.inner.write().unwrap();
        if let Some(parent) = path.parent() {
            inner.directories.insert(parent.to_path_buf());
        }
        inner.files.insert(path, content.into());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.files.keys().cloned().collect()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.files.clear();
        inner.directories.clear();
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> StackgenResult<()> {
        let mut inner = self.inner.write().map_err(lock_error)?;
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StackgenResult<()> {
        let mut inner = self.inner.write().map_err(lock_error)?;
        if let Some(parent) = path.parent() {
            inner.directories.insert(parent.to_path_buf());
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> StackgenResult<String> {
        let inner = self.inner.read().map_err(lock_error)?;
        inner.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "file not found".into(),
            }
            .into()
        })
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn dir_is_nonempty(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.keys().any(|f| f.starts_with(path) && f != path)
    }

    fn remove_file(&self, path: &Path) -> StackgenResult<()> {
        let mut inner = self.inner.write().map_err(lock_error)?;
        inner.files.remove(path).map(|_| ()).ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "file not found".into(),
            }
            .into()
        })
    }
}

fn lock_error<T>(_: T) -> stackgen_core::error::StackgenError {
    stackgen_core::error::StackgenError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behaves_like_a_filesystem() {
        let fs = MemoryFilesystem::new();
        let path = Path::new("/proj/.env");

        assert!(!fs.exists(path));
        fs.write_file(path, "PORT=1234\n").unwrap();
        assert!(fs.exists(path));
        assert_eq!(fs.read_to_string(path).unwrap(), "PORT=1234\n");

        assert!(fs.dir_is_nonempty(Path::new("/proj")));
        assert!(!fs.dir_is_nonempty(Path::new("/other")));

        fs.remove_file(path).unwrap();
        assert!(!fs.exists(path));
        assert!(fs.remove_file(path).is_err());
    }

    #[test]
    fn create_dir_all_registers_every_ancestor() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/a/b/c")).unwrap();
        assert!(fs.exists(Path::new("/a")));
        assert!(fs.exists(Path::new("/a/b")));
        assert!(fs.exists(Path::new("/a/b/c")));
        // Empty directories are still "free" targets.
        assert!(!fs.dir_is_nonempty(Path::new("/a/b/c")));
    }
}
