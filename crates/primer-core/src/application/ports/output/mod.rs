//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `primer-adapters` crate provides the filesystem and subprocess
//! implementations; the CLI provides the prompters.

use std::path::{Path, PathBuf};

use crate::domain::Rejection;
use crate::error::PrimerResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `primer_adapters::filesystem::LocalFilesystem` (production)
/// - `primer_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> PrimerResult<String>;

    /// Replace a file's content.
    fn write_file(&self, path: &Path, content: &str) -> PrimerResult<()>;

    /// Move a file or directory.
    fn rename(&self, from: &Path, to: &Path) -> PrimerResult<()>;

    /// Delete a single file.
    fn remove_file(&self, path: &Path) -> PrimerResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Every file under `root` whose extension is in `extensions`, as paths
    /// relative to `root`. Hidden directories are not descended into.
    fn discover(&self, root: &Path, extensions: &[String]) -> PrimerResult<Vec<PathBuf>>;
}

/// Port for running external programs.
///
/// Implemented by `primer_adapters::process::SystemRunner`.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `program args...` in `cwd` and return its stdout.
    ///
    /// A non-zero exit status is an error.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> PrimerResult<String>;

    /// Run a command line through the platform shell.
    fn run_shell(&self, command: &str, cwd: &Path) -> PrimerResult<String>;

    /// `true` when `program args...` starts and exits successfully.
    fn probe(&self, program: &str, args: &[String], cwd: &Path) -> bool;
}

/// Port for asking the user questions.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// Show `prompt` and return the raw answer without its line ending.
    fn ask(&self, prompt: &str) -> PrimerResult<String>;

    /// Tell the user why `response` was refused.
    fn reject(&self, response: &str, reason: &Rejection) -> PrimerResult<()>;
}
