//! Identifier validation for user-entered names.
//!
//! Every check returns a [`Rejection`] whose `Display` is the reason shown to
//! the user after their quoted answer, e.g. `"My_Mod" should be all lower case.`

use std::fmt;

/// Longest module name accepted.
pub const MAX_MODULE_NAME_LEN: usize = 20;

/// Why an answer was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotIdentifier,
    NotLowercase,
    ContainsUnderscore,
    TooLong { max: usize },
    NotCapitalized,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotIdentifier => f.write_str("is not a valid identifier."),
            Self::NotLowercase => f.write_str("should be all lower case."),
            Self::ContainsUnderscore => f.write_str("should not contain an underscore _"),
            Self::TooLong { max } => write!(f, "is too long (max {max} char limit)."),
            Self::NotCapitalized => f.write_str("first letter should be capitalized."),
        }
    }
}

/// Syntactic identifier check: a letter or `_` followed by letters, digits
/// or `_`.
pub fn is_identifier(value: &str) -> Result<(), Rejection> {
    let mut chars = value.chars();
    let valid = match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(Rejection::NotIdentifier)
    }
}

pub fn is_lower(value: &str) -> Result<(), Rejection> {
    if value.to_lowercase() == value {
        Ok(())
    } else {
        Err(Rejection::NotLowercase)
    }
}

/// Module names: identifier, lowercase, no underscore, bounded length.
///
/// Checks run in that order and the first failure is reported.
pub fn good_module_name(value: &str) -> Result<(), Rejection> {
    is_identifier(value)?;
    is_lower(value)?;
    if value.contains('_') {
        return Err(Rejection::ContainsUnderscore);
    }
    if value.chars().count() > MAX_MODULE_NAME_LEN {
        return Err(Rejection::TooLong {
            max: MAX_MODULE_NAME_LEN,
        });
    }
    Ok(())
}

/// Class names: identifier with an uppercase first letter.
pub fn good_class_name(value: &str) -> Result<(), Rejection> {
    is_identifier(value)?;
    match value.chars().next() {
        Some(c) if c.is_uppercase() => Ok(()),
        _ => Err(Rejection::NotCapitalized),
    }
}
