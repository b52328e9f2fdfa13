//! What a template needs bootstrapped.
//!
//! A [`Blueprint`] names the placeholder tokens, the files to rewrite, the
//! renames to perform and the external commands to run. Templates describe
//! theirs in a `primer.toml` at their root; any field left out falls back to
//! [`Blueprint::default`], which describes a Poetry-managed Python package
//! template.
//!
//! ```toml
//! entry_point = "primer.toml"
//!
//! [placeholders]
//! year   = "CURRENT_YEAR_HERE"
//! author = "YOUR_NAME_HERE"
//! module = "pythontemplate"
//!
//! [[placeholders.classes]]
//! token  = "TemplateClass"
//! prompt = "Main class name"
//!
//! [files]
//! extensions = ["py"]
//! extra      = ["pyproject.toml"]
//!
//! [[renames]]
//! from = "README_TEMPLATE.rst"
//! to   = "README.rst"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Name of the manifest file a template may carry.
pub const MANIFEST_FILE: &str = "primer.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Blueprint {
    pub placeholders: Placeholders,
    pub files: FileRules,
    /// Placeholder package directory; defaults to the module token.
    pub module_dir: Option<PathBuf>,
    pub renames: Vec<Rename>,
    /// `.gitignore` lines dropped when the project is an application.
    pub application_only_ignores: Vec<String>,
    pub dependency_manager: Option<DependencyManager>,
    pub git: GitSettings,
    /// The self-deleting bootstrap file, relative to the template root.
    pub entry_point: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Placeholders {
    pub year: String,
    pub author: String,
    pub module: String,
    pub classes: Vec<ClassPlaceholder>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassPlaceholder {
    pub token: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileRules {
    /// Extensions (without the dot) of files rewritten anywhere in the tree.
    pub extensions: Vec<String>,
    /// Root-relative files rewritten regardless of extension.
    pub extra: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// A declared `[dependency_manager]` table replaces the Poetry default
/// whole; fields it leaves out are empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyManager {
    pub program: String,
    /// Shell command that installs `program` when it is not on `PATH`.
    #[serde(default)]
    pub install: Option<String>,
    /// Commands run after the rewrite, each as `[program, args...]`.
    #[serde(default)]
    pub post_bootstrap: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitSettings {
    pub commit_message: String,
}

impl Default for Blueprint {
    fn default() -> Self {
        Self {
            placeholders: Placeholders::default(),
            files: FileRules::default(),
            module_dir: None,
            renames: vec![Rename {
                from: PathBuf::from("README_TEMPLATE.rst"),
                to: PathBuf::from("README.rst"),
            }],
            application_only_ignores: vec!["/poetry.lock".into()],
            dependency_manager: Some(DependencyManager::default()),
            git: GitSettings::default(),
            entry_point: PathBuf::from(MANIFEST_FILE),
        }
    }
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            year: "CURRENT_YEAR_HERE".into(),
            author: "YOUR_NAME_HERE".into(),
            module: "pythontemplate".into(),
            classes: Vec::new(),
        }
    }
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            extensions: vec!["py".into()],
            extra: vec![PathBuf::from("pyproject.toml")],
        }
    }
}

impl Default for DependencyManager {
    fn default() -> Self {
        Self {
            program: "poetry".into(),
            install: Some(
                "curl -sSL https://install.python-poetry.org | python3 - --preview".into(),
            ),
            post_bootstrap: vec![
                vec!["poetry".into(), "install".into()],
                vec![
                    "poetry".into(),
                    "run".into(),
                    "python".into(),
                    "-m".into(),
                    "pre_commit".into(),
                    "install".into(),
                ],
            ],
        }
    }
}

impl Default for GitSettings {
    fn default() -> Self {
        Self {
            commit_message: "bootstrap from template".into(),
        }
    }
}

impl Blueprint {
    /// The placeholder directory that becomes the module directory.
    pub fn module_dir(&self) -> PathBuf {
        self.module_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.placeholders.module))
    }

    /// Extensions normalised to no leading dot, lowercase.
    pub fn extensions(&self) -> Vec<String> {
        self.files
            .extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect()
    }

    /// Every placeholder token the blueprint declares.
    pub fn tokens(&self) -> Vec<&str> {
        let p = &self.placeholders;
        let mut tokens = vec![p.year.as_str(), p.author.as_str(), p.module.as_str()];
        tokens.extend(p.classes.iter().map(|c| c.token.as_str()));
        tokens
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for token in self.tokens() {
            if token.is_empty() {
                return Err(DomainError::EmptyPlaceholder);
            }
            if !seen.insert(token) {
                return Err(DomainError::DuplicatePlaceholder {
                    token: token.to_owned(),
                });
            }
        }

        for ext in self.extensions() {
            if ext.is_empty() || ext.contains(['/', '\\', '*']) {
                return Err(DomainError::InvalidBlueprint(format!(
                    "bad file extension '{ext}'"
                )));
            }
        }

        let module_dir = self.module_dir();
        let mut paths: Vec<&Path> = vec![self.entry_point.as_path(), module_dir.as_path()];
        paths.extend(self.files.extra.iter().map(PathBuf::as_path));
        for rename in &self.renames {
            paths.push(&rename.from);
            paths.push(&rename.to);
        }
        for path in paths {
            ensure_relative(path)?;
        }

        if let Some(dm) = &self.dependency_manager {
            if dm.program.trim().is_empty() {
                return Err(DomainError::InvalidBlueprint(
                    "dependency manager program cannot be empty".into(),
                ));
            }
            if dm.post_bootstrap.iter().any(Vec::is_empty) {
                return Err(DomainError::InvalidBlueprint(
                    "post-bootstrap commands cannot be empty".into(),
                ));
            }
        }

        if self.git.commit_message.trim().is_empty() {
            return Err(DomainError::InvalidBlueprint(
                "commit message cannot be empty".into(),
            ));
        }

        Ok(())
    }
}

fn ensure_relative(path: &Path) -> Result<(), DomainError> {
    if path.as_os_str().is_empty() {
        return Err(DomainError::InvalidBlueprint("empty path".into()));
    }
    if path.is_absolute() || path.has_root() {
        return Err(DomainError::InvalidBlueprint(format!(
            "absolute paths not allowed: {}",
            path.display()
        )));
    }
    if path
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(DomainError::InvalidBlueprint(format!(
            "path escapes the template root: {}",
            path.display()
        )));
    }
    Ok(())
}
