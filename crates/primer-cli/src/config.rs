//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `PRIMER_*` environment variables, `__` between sections
//!    (`PRIMER_GIT__COMMIT=false`)
//! 3. Config file (`--config FILE`, else the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "PRIMER";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Answers used instead of prompting.
    pub defaults: Defaults,
    /// Version control settings.
    pub git: GitConfig,
    /// Dependency manager settings.
    pub tooling: ToolingConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub author: Option<String>,
    pub library: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Commit the bootstrapped project.
    pub commit: bool,
    /// Overrides the template's commit message.
    pub commit_message: Option<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            commit: true,
            commit_message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolingConfig {
    /// Install the dependency manager and run its post-bootstrap commands.
    pub install: bool,
}

impl Default for ToolingConfig {
    fn default() -> Self {
        Self { install: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration, layering file and environment over defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it the default location is read when present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::build(
            config_file.map(PathBuf::as_path),
            Environment::with_prefix(ENV_PREFIX),
        )
    }

    fn build(config_file: Option<&Path>, env: Environment) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.primer.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "primer", "primer")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".primer.toml"))
    }
}
