//! Bootstrap Service - main application orchestrator.
//!
//! This service turns a template checkout into a project in two phases:
//!
//! 1. [`BootstrapService::plan`] works out every change without writing
//!    anything: substitution table, file set, renames, commands.
//! 2. [`BootstrapService::execute`] applies the plan step by step.
//!
//! Execution stops at the first failure and does not undo earlier steps; a
//! failed run leaves the template partially bootstrapped.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Filesystem},
        services::input_service::Answers,
    },
    domain::{Blueprint, DependencyManager, FileSet, Rename, Substituter, rename_target},
    error::PrimerResult,
};

const GITIGNORE: &str = ".gitignore";

/// Every change a bootstrap run will make. Paths are relative to `root`.
#[derive(Debug, Clone)]
pub struct BootstrapPlan {
    pub root: PathBuf,
    pub substituter: Substituter,
    pub files: FileSet,
    /// Rewritten files whose stem is a placeholder, with their new path.
    pub file_renames: Vec<(PathBuf, PathBuf)>,
    /// Placeholder module directory and where it moves.
    pub module_move: (PathBuf, PathBuf),
    pub renames: Vec<Rename>,
    /// `.gitignore` lines to drop; empty for libraries.
    pub gitignore_removals: Vec<String>,
    pub dependency_manager: Option<DependencyManager>,
    pub commit_message: String,
    pub entry_point: PathBuf,
}

/// Switches for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapOptions {
    /// Log the plan; write nothing and run nothing.
    pub dry_run: bool,
    /// Skip dependency-manager detection, installation and post-bootstrap
    /// commands.
    pub skip_install: bool,
    /// Skip `git add` / `git commit`.
    pub skip_commit: bool,
}

/// What a run actually did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub files_rewritten: usize,
    pub replacements: usize,
    pub files_renamed: usize,
    pub gitignore_lines_removed: usize,
    pub commands_run: Vec<String>,
    pub committed: bool,
    pub entry_point_removed: bool,
}

/// Main bootstrap service.
pub struct BootstrapService {
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn CommandRunner>,
}

impl BootstrapService {
    /// Create a new bootstrap service with the given adapters.
    pub fn new(filesystem: Box<dyn Filesystem>, runner: Box<dyn CommandRunner>) -> Self {
        Self { filesystem, runner }
    }

    /// Work out every change for `answers` applied to the template at `root`.
    ///
    /// Only reads: discovers files and checks that the placeholder module
    /// directory is still there.
    #[instrument(skip_all, fields(root = %root.display(), module = %answers.module))]
    pub fn plan(
        &self,
        root: &Path,
        blueprint: &Blueprint,
        answers: &Answers,
        year: i32,
    ) -> PrimerResult<BootstrapPlan> {
        blueprint.validate()?;

        let table = answers.substitution_table(blueprint, year)?;
        let substituter = Substituter::new(table)?;

        let module_dir = blueprint.module_dir();
        if !self.filesystem.is_dir(&root.join(&module_dir)) {
            return Err(ApplicationError::ModuleDirMissing {
                path: root.join(&module_dir),
            }
            .into());
        }
        let module_target = module_dir.with_file_name(answers.module.as_str());

        let discovered = self
            .filesystem
            .discover(root, &blueprint.extensions())?;
        let files = FileSet::assemble(discovered, &blueprint.files.extra, &blueprint.entry_point);
        info!(files = files.len(), "File set assembled");

        let file_renames = files
            .iter()
            .filter_map(|p| rename_target(p, &substituter).map(|to| (p.to_path_buf(), to)))
            .filter(|(from, to)| from != to)
            .collect();

        let gitignore_removals = if answers.library {
            Vec::new()
        } else {
            blueprint.application_only_ignores.clone()
        };

        Ok(BootstrapPlan {
            root: root.to_path_buf(),
            substituter,
            files,
            file_renames,
            module_move: (module_dir, module_target),
            renames: blueprint.renames.clone(),
            gitignore_removals,
            dependency_manager: blueprint.dependency_manager.clone(),
            commit_message: blueprint.git.commit_message.clone(),
            entry_point: blueprint.entry_point.clone(),
        })
    }

    /// Apply `plan`.
    #[instrument(skip_all, fields(root = %plan.root.display(), dry_run = options.dry_run))]
    pub fn execute(
        &self,
        plan: &BootstrapPlan,
        options: BootstrapOptions,
    ) -> PrimerResult<BootstrapReport> {
        let mut report = BootstrapReport::default();

        if options.dry_run {
            log_plan(plan);
            return Ok(report);
        }

        let root = plan.root.as_path();

        // 1. Dependency manager present
        if !options.skip_install {
            if let Some(dm) = &plan.dependency_manager {
                self.ensure_dependency_manager(dm, root)?;
            }
        }

        // 2. Application projects track their lock file
        if !plan.gitignore_removals.is_empty() {
            report.gitignore_lines_removed =
                self.edit_gitignore(root, &plan.gitignore_removals)?;
        }

        // 3. Rewrite, then rename files named after a placeholder
        for rel in plan.files.iter() {
            let path = root.join(rel);
            let original = self.filesystem.read_to_string(&path)?;
            let substituted = plan.substituter.apply(&original);
            debug!(
                file = %rel.display(),
                replacements = substituted.replacements,
                "Rewriting"
            );
            self.filesystem.write_file(&path, &substituted.text)?;
            report.files_rewritten += 1;
            report.replacements += substituted.replacements;
        }
        for (from, to) in &plan.file_renames {
            self.move_path(&root.join(from), &root.join(to))?;
            report.files_renamed += 1;
        }

        // 4. Module directory
        let (module_dir, module_target) = &plan.module_move;
        let module_dir = root.join(module_dir);
        if !self.filesystem.is_dir(&module_dir) {
            return Err(ApplicationError::ModuleDirMissing { path: module_dir }.into());
        }
        if module_dir != root.join(module_target) {
            self.move_path(&module_dir, &root.join(module_target))?;
        }

        // 5. Fixed renames
        for rename in &plan.renames {
            let from = root.join(&rename.from);
            if !self.filesystem.exists(&from) {
                warn!(path = %from.display(), "Rename source missing, skipping");
                continue;
            }
            self.move_path(&from, &root.join(&rename.to))?;
        }

        // 6. Post-bootstrap commands
        if !options.skip_install {
            if let Some(dm) = &plan.dependency_manager {
                for command in &dm.post_bootstrap {
                    let Some((program, args)) = command.split_first() else {
                        continue;
                    };
                    info!(command = %command.join(" "), "Running");
                    self.runner.run(program, args, root)?;
                    report.commands_run.push(command.join(" "));
                }
            }
        }

        // 7. Commit
        if !options.skip_commit {
            self.runner
                .run("git", &["add".into(), "-A".into()], root)?;
            self.runner.run(
                "git",
                &["commit".into(), "-m".into(), plan.commit_message.clone()],
                root,
            )?;
            report.committed = true;
            info!("Changes committed");
        }

        // 8. One-shot: remove the entry point
        let entry_point = root.join(&plan.entry_point);
        if self.filesystem.exists(&entry_point) {
            self.filesystem.remove_file(&entry_point)?;
            report.entry_point_removed = true;
        }

        info!(
            files = report.files_rewritten,
            replacements = report.replacements,
            "Bootstrap completed"
        );
        Ok(report)
    }

    /// Make sure the dependency manager can be run, installing it if needed.
    pub fn ensure_dependency_manager(&self, dm: &DependencyManager, cwd: &Path) -> PrimerResult<()> {
        if self.runner.probe(&dm.program, &["--version".into()], cwd) {
            debug!(program = %dm.program, "Dependency manager found");
            return Ok(());
        }

        let Some(install) = &dm.install else {
            return Err(ApplicationError::ToolMissing {
                program: dm.program.clone(),
            }
            .into());
        };

        info!(program = %dm.program, "Installing dependency manager");
        self.runner.run_shell(install, cwd)?;
        Ok(())
    }

    fn edit_gitignore(&self, root: &Path, removals: &[String]) -> PrimerResult<usize> {
        let path = root.join(GITIGNORE);
        if !self.filesystem.exists(&path) {
            debug!("No .gitignore, nothing to edit");
            return Ok(0);
        }
        let content = self.filesystem.read_to_string(&path)?;
        let (edited, removed) = strip_lines(&content, removals);
        if removed > 0 {
            self.filesystem.write_file(&path, &edited)?;
        }
        Ok(removed)
    }

    fn move_path(&self, from: &Path, to: &Path) -> PrimerResult<()> {
        if self.filesystem.exists(to) {
            return Err(ApplicationError::DestinationExists {
                path: to.to_path_buf(),
            }
            .into());
        }
        debug!(from = %from.display(), to = %to.display(), "Renaming");
        self.filesystem.rename(from, to)
    }
}

/// Drop every line equal to one of `removals`, keeping other lines and
/// their endings untouched.
fn strip_lines(content: &str, removals: &[String]) -> (String, usize) {
    let mut removed = 0;
    let kept: String = content
        .split_inclusive('\n')
        .filter(|line| {
            let bare = line.trim_end_matches(['\n', '\r']);
            let drop = removals.iter().any(|r| r == bare);
            if drop {
                removed += 1;
            }
            !drop
        })
        .collect();
    (kept, removed)
}

fn log_plan(plan: &BootstrapPlan) {
    info!("Dry run: no changes will be made");
    for (token, value) in plan.substituter.table().iter() {
        info!(%token, %value, "Would substitute");
    }
    for file in plan.files.iter() {
        info!(file = %file.display(), "Would rewrite");
    }
    for (from, to) in &plan.file_renames {
        info!(from = %from.display(), to = %to.display(), "Would rename");
    }
    let (from, to) = &plan.module_move;
    info!(from = %from.display(), to = %to.display(), "Would move module directory");
    for line in &plan.gitignore_removals {
        info!(%line, "Would remove from .gitignore");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockCommandRunner, MockFilesystem};
    use crate::domain::ModuleName;
    use crate::error::PrimerError;
    use std::collections::BTreeMap;

    fn answers(library: bool) -> Answers {
        Answers {
            author: "Jane".into(),
            module: ModuleName::parse("myproj").unwrap(),
            classes: BTreeMap::new(),
            library,
        }
    }

    fn poetry() -> DependencyManager {
        DependencyManager::default()
    }

    #[test]
    fn strip_lines_keeps_other_lines_and_endings() {
        let (out, removed) = strip_lines(
            "__pycache__/\r\n/poetry.lock\n/dist\n/poetry.lock",
            &["/poetry.lock".into()],
        );
        assert_eq!(out, "__pycache__/\r\n/dist\n");
        assert_eq!(removed, 2);
    }

    #[test]
    fn strip_lines_matches_whole_lines_only() {
        let (out, removed) = strip_lines("/poetry.lock.bak\n", &["/poetry.lock".into()]);
        assert_eq!(out, "/poetry.lock.bak\n");
        assert_eq!(removed, 0);
    }

    #[test]
    fn installed_tool_is_not_reinstalled() {
        let mut runner = MockCommandRunner::new();
        runner.expect_probe().times(1).returning(|_, _, _| true);
        runner.expect_run_shell().never();

        let service = BootstrapService::new(Box::new(MockFilesystem::new()), Box::new(runner));
        service
            .ensure_dependency_manager(&poetry(), Path::new("."))
            .unwrap();
    }

    #[test]
    fn missing_tool_runs_installer() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_probe()
            .withf(|program, args, _| program == "poetry" && args.len() == 1 && args[0] == "--version")
            .times(1)
            .returning(|_, _, _| false);
        runner
            .expect_run_shell()
            .withf(|cmd, _| cmd.contains("install.python-poetry.org"))
            .times(1)
            .returning(|_, _| Ok(String::new()));

        let service = BootstrapService::new(Box::new(MockFilesystem::new()), Box::new(runner));
        service
            .ensure_dependency_manager(&poetry(), Path::new("."))
            .unwrap();
    }

    #[test]
    fn missing_tool_without_installer_fails() {
        let mut runner = MockCommandRunner::new();
        runner.expect_probe().returning(|_, _, _| false);

        let service = BootstrapService::new(Box::new(MockFilesystem::new()), Box::new(runner));
        let dm = DependencyManager {
            install: None,
            ..poetry()
        };
        let err = service
            .ensure_dependency_manager(&dm, Path::new("."))
            .unwrap_err();
        assert!(matches!(
            err,
            PrimerError::Application(ApplicationError::ToolMissing { .. })
        ));
    }

    #[test]
    fn plan_fails_when_module_dir_is_gone() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| false);
        fs.expect_discover().never();

        let service = BootstrapService::new(Box::new(fs), Box::new(MockCommandRunner::new()));
        let err = service
            .plan(Path::new("/t"), &Blueprint::default(), &answers(true), 2026)
            .unwrap_err();
        assert!(matches!(
            err,
            PrimerError::Application(ApplicationError::ModuleDirMissing { .. })
        ));
    }

    #[test]
    fn plan_collects_renames_and_application_ignores() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_discover().returning(|_, _| {
            Ok(vec![
                PathBuf::from("pythontemplate/__init__.py"),
                PathBuf::from("pythontemplate/pythontemplate.py"),
                PathBuf::from("build.py"),
            ])
        });

        let service = BootstrapService::new(Box::new(fs), Box::new(MockCommandRunner::new()));
        let plan = service
            .plan(Path::new("/t"), &Blueprint::default(), &answers(false), 2026)
            .unwrap();

        assert_eq!(plan.files.len(), 4, "three discovered plus pyproject.toml");
        assert_eq!(
            plan.file_renames,
            vec![(
                PathBuf::from("pythontemplate/pythontemplate.py"),
                PathBuf::from("pythontemplate/myproj.py"),
            )]
        );
        assert_eq!(
            plan.module_move,
            (PathBuf::from("pythontemplate"), PathBuf::from("myproj"))
        );
        assert_eq!(plan.gitignore_removals, vec!["/poetry.lock".to_string()]);
    }

    #[test]
    fn dry_run_touches_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_discover().returning(|_, _| Ok(Vec::new()));
        fs.expect_write_file().never();
        fs.expect_rename().never();
        fs.expect_remove_file().never();
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();
        runner.expect_probe().never();

        let service = BootstrapService::new(Box::new(fs), Box::new(runner));
        let plan = service
            .plan(Path::new("/t"), &Blueprint::default(), &answers(true), 2026)
            .unwrap();
        let report = service
            .execute(
                &plan,
                BootstrapOptions {
                    dry_run: true,
                    ..BootstrapOptions::default()
                },
            )
            .unwrap();
        assert_eq!(report, BootstrapReport::default());
    }
}
