//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::{DirEntry, WalkDir};

use primer_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{PrimerError, PrimerResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> PrimerResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> PrimerResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn rename(&self, from: &Path, to: &Path) -> PrimerResult<()> {
        std::fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename"))
    }

    fn remove_file(&self, path: &Path) -> PrimerResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn discover(&self, root: &Path, extensions: &[String]) -> PrimerResult<Vec<PathBuf>> {
        let mut found = Vec::new();
        let walker = WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .filter_entry(|e| !is_hidden_dir(e));

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                PrimerError::from(ApplicationError::FilesystemError {
                    path,
                    reason: format!("Failed to walk directory: {e}"),
                })
            })?;
            if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(root) {
                trace!(file = %rel.display(), "discovered");
                found.push(rel.to_path_buf());
            }
        }

        found.sort();
        Ok(found)
    }
}

/// The root itself is never treated as hidden.
fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_string_lossy().starts_with('.')
}

/// Case-insensitive extension match. `extensions` are given without dots.
pub(crate) fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> PrimerError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}
