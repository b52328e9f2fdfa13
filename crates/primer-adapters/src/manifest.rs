//! Blueprint loading from a template's `primer.toml`.
//!
//! A template without a manifest gets [`Blueprint::default`]. A manifest may
//! name any subset of fields; the rest keep their defaults. Unknown keys are
//! rejected so typos surface instead of silently doing nothing.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use primer_core::{
    application::ApplicationError,
    domain::{Blueprint, MANIFEST_FILE},
    error::PrimerResult,
};

/// Loads the [`Blueprint`] for the template rooted at `root`.
#[derive(Debug, Clone)]
pub struct BlueprintLoader {
    root: PathBuf,
}

impl BlueprintLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where the manifest is expected.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Read and validate the manifest, or fall back to the default blueprint.
    ///
    /// # Errors
    ///
    /// [`ApplicationError::ManifestInvalid`] when the manifest cannot be read
    /// or parsed; the blueprint's own validation errors otherwise.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load(&self) -> PrimerResult<Blueprint> {
        let path = self.manifest_path();
        if !path.is_file() {
            debug!("no manifest, using built-in blueprint");
            return Ok(Blueprint::default());
        }

        let raw = fs::read_to_string(&path).map_err(|e| invalid(&path, e.to_string()))?;
        let blueprint = parse(&raw).map_err(|reason| invalid(&path, reason))?;
        blueprint.validate()?;
        debug!(
            tokens = blueprint.tokens().len(),
            "loaded blueprint from manifest"
        );
        Ok(blueprint)
    }
}

/// Parse manifest text into a blueprint. Missing fields take defaults.
pub fn parse(raw: &str) -> Result<Blueprint, String> {
    toml::from_str(raw).map_err(|e| e.to_string())
}

fn invalid(path: &Path, reason: String) -> ApplicationError {
    ApplicationError::ManifestInvalid {
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primer_core::error::PrimerError;
    use tempfile::TempDir;

    #[test]
    fn missing_manifest_uses_default() {
        let dir = TempDir::new().unwrap();
        let blueprint = BlueprintLoader::new(dir.path()).load().unwrap();
        assert_eq!(blueprint, Blueprint::default());
    }

    #[test]
    fn partial_manifest_keeps_defaults() {
        let blueprint = parse(
            r#"
            [placeholders]
            module = "skeleton"

            [[placeholders.classes]]
            token = "TemplateClass"
            prompt = "Main class name"
            "#,
        )
        .unwrap();
        assert_eq!(blueprint.placeholders.module, "skeleton");
        assert_eq!(blueprint.placeholders.author, "YOUR_NAME_HERE");
        assert_eq!(blueprint.placeholders.classes.len(), 1);
        assert_eq!(blueprint.module_dir(), PathBuf::from("skeleton"));
        assert_eq!(blueprint.git.commit_message, "bootstrap from template");
    }

    #[test]
    fn declared_dependency_manager_replaces_default() {
        let blueprint = parse("[dependency_manager]\nprogram = \"uv\"\n").unwrap();
        let dm = blueprint.dependency_manager.unwrap();
        assert_eq!(dm.program, "uv");
        assert!(dm.install.is_none());
        assert!(dm.post_bootstrap.is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse("[placeholders]\nmodul = \"x\"\n").is_err());
    }

    #[test]
    fn malformed_manifest_reports_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "[placeholders\n").unwrap();
        let err = BlueprintLoader::new(dir.path()).load().unwrap_err();
        assert!(matches!(
            err,
            PrimerError::Application(ApplicationError::ManifestInvalid { .. })
        ));
    }

    #[test]
    fn invalid_blueprint_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(MANIFEST_FILE),
            "[placeholders]\nyear = \"X\"\nauthor = \"X\"\n",
        )
        .unwrap();
        let err = BlueprintLoader::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, PrimerError::Domain(_)));
    }
}
