//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use primer_core::{
    application::{ApplicationError, ports::Filesystem},
    error::PrimerResult,
};

use super::local::has_extension;

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can keep a handle after boxing one into a
/// service.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_parents(&mut self, path: &Path) {
        let mut parent = path.parent();
        while let Some(dir) = parent {
            if dir.as_os_str().is_empty() {
                break;
            }
            self.directories.insert(dir.to_path_buf());
            parent = dir.parent();
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            inner.add_parents(path);
            inner.files.insert(path.to_path_buf(), content.to_owned());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> PrimerResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }

    fn write(&self) -> PrimerResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned.into())
    }
}

fn not_found(path: &Path) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "No such file or directory".into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> PrimerResult<String> {
        let inner = self.read()?;
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path).into())
    }

    fn write_file(&self, path: &Path, content: &str) -> PrimerResult<()> {
        let mut inner = self.write()?;

        // Parent must exist
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_owned());
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> PrimerResult<()> {
        let mut inner = self.write()?;

        if let Some(content) = inner.files.remove(from) {
            inner.add_parents(to);
            inner.files.insert(to.to_path_buf(), content);
            return Ok(());
        }
        if !inner.directories.remove(from) {
            return Err(not_found(from).into());
        }

        let moved_dirs: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter(|d| d.starts_with(from))
            .cloned()
            .collect();
        for dir in moved_dirs {
            inner.directories.remove(&dir);
            if let Ok(rest) = dir.strip_prefix(from) {
                inner.directories.insert(to.join(rest));
            }
        }

        let moved_files: Vec<PathBuf> = inner
            .files
            .keys()
            .filter(|f| f.starts_with(from))
            .cloned()
            .collect();
        for file in moved_files {
            if let (Some(content), Ok(rest)) = (inner.files.remove(&file), file.strip_prefix(from))
            {
                inner.files.insert(to.join(rest), content);
            }
        }

        inner.add_parents(to);
        inner.directories.insert(to.to_path_buf());
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> PrimerResult<()> {
        let mut inner = self.write()?;
        inner
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path).into())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .is_ok_and(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .is_ok_and(|inner| inner.directories.contains(path))
    }

    fn discover(&self, root: &Path, extensions: &[String]) -> PrimerResult<Vec<PathBuf>> {
        let inner = self.read()?;
        let found = inner
            .files
            .keys()
            .filter_map(|f| f.strip_prefix(root).ok())
            .filter(|rel| {
                rel.parent().is_none_or(|dirs| {
                    !dirs
                        .components()
                        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
                })
            })
            .filter(|rel| has_extension(rel, extensions))
            .map(Path::to_path_buf)
            .collect();
        Ok(found)
    }
}
