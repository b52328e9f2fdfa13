//! Whole-word placeholder substitution.
//!
//! A [`SubstitutionTable`] maps placeholder tokens to replacement values. A
//! [`Substituter`] compiles the table into a single regular expression and
//! rewrites text in one left-to-right pass:
//!
//! ```text
//! table:  this -> that
//! input:  "this thistle"
//! output: "that thistle"      // `this` inside `thistle` is not a whole word
//! ```

use std::collections::BTreeMap;
use std::fmt;

use regex::{Captures, Regex};

use crate::domain::error::DomainError;

/// Placeholder → replacement mapping. Keys are unique; order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionTable {
    entries: BTreeMap<String, String>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping. Re-inserting a token is an error, not an overwrite.
    pub fn insert(
        &mut self,
        token: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), DomainError> {
        let token = token.into();
        if token.is_empty() {
            return Err(DomainError::EmptyPlaceholder);
        }
        if self.entries.contains_key(&token) {
            return Err(DomainError::DuplicatePlaceholder { token });
        }
        self.entries.insert(token, value.into());
        Ok(())
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for SubstitutionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (token, value) in self.iter() {
            writeln!(f, "{token} -> {value}")?;
        }
        Ok(())
    }
}

/// Result of substituting one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substituted {
    pub text: String,
    pub replacements: usize,
}

/// A compiled substitution table.
#[derive(Debug, Clone)]
pub struct Substituter {
    table: SubstitutionTable,
    // None when the table is empty; an empty alternation would match
    // every word boundary.
    pattern: Option<Regex>,
}

impl Substituter {
    pub fn new(table: SubstitutionTable) -> Result<Self, DomainError> {
        if table.is_empty() {
            return Ok(Self {
                table,
                pattern: None,
            });
        }

        // Longest first, so when two tokens start at the same offset the
        // longer one is tried first.
        let mut tokens: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let alternation = tokens
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"\b(?:{alternation})\b"))
            .map_err(|e| DomainError::InvalidBlueprint(format!("bad placeholder pattern: {e}")))?;

        Ok(Self {
            table,
            pattern: Some(pattern),
        })
    }

    pub fn table(&self) -> &SubstitutionTable {
        &self.table
    }

    /// Replace every whole-word token occurrence in `text`.
    ///
    /// Values are inserted literally and never re-scanned.
    pub fn apply(&self, text: &str) -> Substituted {
        let Some(pattern) = &self.pattern else {
            return Substituted {
                text: text.to_owned(),
                replacements: 0,
            };
        };

        let mut replacements = 0;
        let rewritten = pattern.replace_all(text, |caps: &Captures<'_>| {
            replacements += 1;
            let token = &caps[0];
            self.table.get(token).unwrap_or(token).to_owned()
        });

        Substituted {
            text: rewritten.into_owned(),
            replacements,
        }
    }

    /// Replacement for a whole string (file stem, directory name), if the
    /// string is exactly a token.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.table.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn substituter(pairs: &[(&str, &str)]) -> Substituter {
        let mut table = SubstitutionTable::new();
        for (k, v) in pairs {
            table.insert(*k, *v).unwrap();
        }
        Substituter::new(table).unwrap()
    }

    #[test]
    fn replaces_whole_words_only() {
        let s = substituter(&[("this", "that")]);
        let out = s.apply("this thistle is this");
        assert_eq!(out.text, "that thistle is that");
        assert_eq!(out.replacements, 2);
    }

    #[test]
    fn embedded_token_in_identifier_is_untouched() {
        let s = substituter(&[("pythontemplate", "myproj")]);
        let src = "import pythontemplate\nfrom pythontemplate_ext import x\nmypythontemplate = 1\n";
        let out = s.apply(src);
        assert_eq!(
            out.text,
            "import myproj\nfrom pythontemplate_ext import x\nmypythontemplate = 1\n"
        );
        assert_eq!(out.replacements, 1);
    }

    #[test]
    fn punctuation_counts_as_boundary() {
        let s = substituter(&[("pythontemplate", "myproj")]);
        let out = s.apply("pythontemplate.cli.main:run_app \"pythontemplate/\"");
        assert_eq!(out.text, "myproj.cli.main:run_app \"myproj/\"");
    }

    #[test]
    fn multiple_tokens_in_one_pass() {
        let s = substituter(&[
            ("CURRENT_YEAR_HERE", "2026"),
            ("YOUR_NAME_HERE", "Jane"),
            ("pythontemplate", "myproj"),
        ]);
        let out = s.apply("Copyright (c) CURRENT_YEAR_HERE YOUR_NAME_HERE - pythontemplate");
        assert_eq!(out.text, "Copyright (c) 2026 Jane - myproj");
        assert_eq!(out.replacements, 3);
    }

    #[test]
    fn values_are_literal_and_not_rescanned() {
        // `$1` must not be treated as a capture reference, and the inserted
        // `b` must not be replaced again.
        let s = substituter(&[("a", "$1 b"), ("b", "c")]);
        assert_eq!(s.apply("a b").text, "$1 b c");
    }

    #[test]
    fn longer_token_preferred_at_same_offset() {
        let s = substituter(&[("foo", "X"), ("foo_bar", "Y")]);
        assert_eq!(s.apply("foo foo_bar").text, "X Y");
    }

    #[test]
    fn regex_metacharacters_in_tokens_are_escaped() {
        let s = substituter(&[("a.b", "ok")]);
        assert_eq!(s.apply("a.b axb").text, "ok axb");
    }

    #[test]
    fn empty_table_is_identity() {
        let s = Substituter::new(SubstitutionTable::new()).unwrap();
        let out = s.apply("anything at all");
        assert_eq!(out.text, "anything at all");
        assert_eq!(out.replacements, 0);
    }

    #[test]
    fn duplicate_and_empty_tokens_rejected() {
        let mut table = SubstitutionTable::new();
        table.insert("x", "1").unwrap();
        assert_eq!(
            table.insert("x", "2"),
            Err(DomainError::DuplicatePlaceholder { token: "x".into() })
        );
        assert_eq!(table.insert("", "2"), Err(DomainError::EmptyPlaceholder));
    }

    #[test]
    fn second_application_is_not_a_no_op() {
        // Replacing with a value that is itself a token keeps rewriting.
        let s = substituter(&[("alpha", "beta"), ("beta", "gamma")]);
        let once = s.apply("alpha").text;
        let twice = s.apply(&once).text;
        assert_eq!(once, "beta");
        assert_eq!(twice, "gamma");
    }

    #[test]
    fn lookup_matches_exact_names() {
        let s = substituter(&[("pythontemplate", "myproj")]);
        assert_eq!(s.lookup("pythontemplate"), Some("myproj"));
        assert_eq!(s.lookup("pythontemplate_x"), None);
    }
}
