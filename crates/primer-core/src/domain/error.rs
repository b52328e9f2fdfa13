// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::validation::Rejection;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (the CLI renders them more than once)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// A user-supplied identifier failed validation.
    ///
    /// Interactive prompts never surface this; they re-ask instead. It only
    /// escapes when a value arrives pre-filled from flags or config.
    #[error("\"{value}\" {reason}")]
    InvalidIdentifier { value: String, reason: Rejection },

    #[error("Placeholder token cannot be empty")]
    EmptyPlaceholder,

    #[error("Placeholder '{token}' is declared more than once")]
    DuplicatePlaceholder { token: String },

    #[error("Invalid blueprint: {0}")]
    InvalidBlueprint(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidIdentifier { reason, .. } => match reason {
                Rejection::NotIdentifier => vec![
                    "Use letters, digits and underscores only".into(),
                    "Start with a letter".into(),
                ],
                Rejection::NotLowercase | Rejection::ContainsUnderscore => vec![
                    "Module names are short, all-lowercase words".into(),
                    "Examples: myproj, widgets, parser".into(),
                ],
                Rejection::TooLong { max } => {
                    vec![format!("Shorten the name to at most {max} characters")]
                }
                Rejection::NotCapitalized => vec![
                    "Class names start with an uppercase letter".into(),
                    "Examples: Widget, HttpClient".into(),
                ],
            },
            Self::DuplicatePlaceholder { token } => vec![
                format!("Remove the second declaration of '{token}' from primer.toml"),
            ],
            Self::InvalidBlueprint(msg) => vec![
                "Check the template's primer.toml".into(),
                format!("Details: {msg}"),
            ],
            Self::EmptyPlaceholder => vec![
                "Give every placeholder in primer.toml a non-empty token".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidIdentifier { .. } => ErrorCategory::Validation,
            Self::EmptyPlaceholder
            | Self::DuplicatePlaceholder { .. }
            | Self::InvalidBlueprint(_) => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}
