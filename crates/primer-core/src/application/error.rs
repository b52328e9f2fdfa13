//! Application layer errors.
//!
//! These errors represent failures while carrying out a bootstrap, not
//! rule violations. Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A subprocess could not be started or exited unsuccessfully.
    #[error("Command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    /// The dependency manager is missing and no installer is configured.
    #[error("'{program}' is not installed")]
    ToolMissing { program: String },

    /// The placeholder module directory is gone (already bootstrapped?).
    #[error("Module directory not found at {path}")]
    ModuleDirMissing { path: PathBuf },

    /// A rename would overwrite an existing path.
    #[error("Refusing to overwrite existing path {path}")]
    DestinationExists { path: PathBuf },

    /// Reading an answer from the user failed.
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// The template's `primer.toml` could not be parsed.
    #[error("Invalid manifest {path}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned).
    #[error("Filesystem state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "The template may now be partially bootstrapped; inspect `git status`".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("`{command}` did not succeed"),
                "Ensure the command is installed and in your PATH".into(),
                "Check the command output above for details".into(),
            ],
            Self::ToolMissing { program } => vec![
                format!("Install '{program}' and re-run"),
                "Or pass --skip-install to bootstrap without it".into(),
            ],
            Self::ModuleDirMissing { path } => vec![
                format!("Expected the placeholder directory {}", path.display()),
                "This template looks already bootstrapped; bootstrapping is one-shot".into(),
            ],
            Self::DestinationExists { path } => vec![
                format!("Move or delete {} first", path.display()),
            ],
            Self::PromptFailed { .. } => vec![
                "Run primer from an interactive terminal".into(),
                "Or pipe one answer per line on stdin".into(),
            ],
            Self::ManifestInvalid { path, .. } => vec![
                format!("Fix the syntax in {}", path.display()),
                "Delete the file to use the built-in defaults".into(),
            ],
            Self::LockPoisoned => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::CommandFailed { .. } | Self::LockPoisoned => {
                ErrorCategory::Internal
            }
            Self::ToolMissing { .. } | Self::ModuleDirMissing { .. } => ErrorCategory::NotFound,
            Self::DestinationExists { .. } | Self::PromptFailed { .. } => {
                ErrorCategory::Validation
            }
            Self::ManifestInvalid { .. } => ErrorCategory::Configuration,
        }
    }
}
