//! Unified error handling for Primer Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Primer Core operations.
#[derive(Debug, Error, Clone)]
pub enum PrimerError {
    /// Errors from the domain layer (rule violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O and subprocess failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl PrimerError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
            },
            Self::Application(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type PrimerResult<T> = Result<T, PrimerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rejection;
    use std::path::PathBuf;

    #[test]
    fn invalid_identifier_is_validation() {
        let err: PrimerError = DomainError::InvalidIdentifier {
            value: "X".into(),
            reason: Rejection::NotLowercase,
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.to_string(), "\"X\" should be all lower case.");
    }

    #[test]
    fn missing_module_dir_mentions_one_shot() {
        let err: PrimerError = ApplicationError::ModuleDirMissing {
            path: PathBuf::from("pythontemplate"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions().iter().any(|s| s.contains("one-shot")));
    }

    #[test]
    fn command_failure_is_internal() {
        let err: PrimerError = ApplicationError::CommandFailed {
            command: "git commit".into(),
            reason: "exit status: 1".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
