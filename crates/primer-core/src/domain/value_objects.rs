//! Domain value objects: validated names and yes/no answers.
//!
//! `ModuleName` and `ClassName` can only be built through validation, so any
//! value of those types already satisfies the rules in `validation.rs`.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::domain::validation::{Rejection, good_class_name, good_module_name};

// ── ModuleName ────────────────────────────────────────────────────────────────

/// A lowercase, underscore-free identifier of bounded length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Self::check(value).map_err(|reason| invalid(value, reason))
    }

    /// Like [`Self::parse`] but reports only the rejection reason.
    pub fn check(value: &str) -> Result<Self, Rejection> {
        good_module_name(value)?;
        Ok(Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ModuleName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── ClassName ─────────────────────────────────────────────────────────────────

/// An identifier starting with an uppercase letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassName(String);

impl ClassName {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Self::check(value).map_err(|reason| invalid(value, reason))
    }

    pub fn check(value: &str) -> Result<Self, Rejection> {
        good_class_name(value)?;
        Ok(Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ClassName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn invalid(value: &str, reason: Rejection) -> DomainError {
    DomainError::InvalidIdentifier {
        value: value.to_owned(),
        reason,
    }
}

// ── Yes/no ────────────────────────────────────────────────────────────────────

/// Interpret a free-text yes/no answer.
///
/// `yes`, `y`, `true`, `t` and `1` are yes (case-insensitive). An empty
/// answer takes `default`. Anything else is no.
pub fn parse_yes_no(response: &str, default: bool) -> bool {
    let response = response.trim().to_lowercase();
    if response.is_empty() {
        return default;
    }
    matches!(response.as_str(), "yes" | "y" | "true" | "t" | "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_name_round_trips_display() {
        let name = ModuleName::parse("myproj").unwrap();
        assert_eq!(name.to_string(), "myproj");
        assert_eq!(name.as_str(), "myproj");
    }

    #[test]
    fn module_name_error_carries_value_and_reason() {
        let err = "Bad_Name".parse::<ModuleName>().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidIdentifier {
                value: "Bad_Name".into(),
                reason: Rejection::NotLowercase,
            }
        );
        assert_eq!(err.to_string(), "\"Bad_Name\" should be all lower case.");
    }

    #[test]
    fn class_name_requires_capital() {
        assert!(ClassName::parse("Widget").is_ok());
        assert!(ClassName::parse("widget").is_err());
    }

    #[test]
    fn yes_no_answers() {
        for yes in ["yes", "Y", "TRUE", "t", "1", " y "] {
            assert!(parse_yes_no(yes, false), "{yes} should be yes");
        }
        for no in ["no", "n", "false", "0", "maybe"] {
            assert!(!parse_yes_no(no, true), "{no} should be no");
        }
    }

    #[test]
    fn empty_answer_takes_default() {
        assert!(parse_yes_no("", true));
        assert!(!parse_yes_no("   ", false));
    }
}
