//! Subprocess adapter using `std::process::Command`.

use std::io;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tracing::{debug, instrument};

use primer_core::{
    application::{ApplicationError, ports::CommandRunner},
    error::PrimerResult,
};

/// Runs commands on the host, capturing their output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    #[instrument(skip(self, cwd), fields(cwd = %cwd.display()))]
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> PrimerResult<String> {
        let command = describe(program, args);
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output();
        finish(&command, program, output)
    }

    #[instrument(skip(self, cwd), fields(cwd = %cwd.display()))]
    fn run_shell(&self, command: &str, cwd: &Path) -> PrimerResult<String> {
        let (shell, flag) = if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };
        let output = Command::new(shell)
            .arg(flag)
            .arg(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output();
        finish(command, shell, output)
    }

    fn probe(&self, program: &str, args: &[String], cwd: &Path) -> bool {
        let found = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success());
        debug!(program, found, "probed");
        found
    }
}

fn describe(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn finish(command: &str, program: &str, output: io::Result<Output>) -> PrimerResult<String> {
    match output {
        Ok(out) if out.status.success() => {
            debug!(command, "succeeded");
            Ok(String::from_utf8_lossy(&out.stdout).into_owned())
        }
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            let stderr = stderr.trim();
            let reason = if stderr.is_empty() {
                format!("exited with {}", out.status)
            } else {
                format!("exited with {}: {stderr}", out.status)
            };
            Err(ApplicationError::CommandFailed {
                command: command.to_owned(),
                reason,
            }
            .into())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ApplicationError::ToolMissing {
            program: program.to_owned(),
        }
        .into()),
        Err(e) => Err(ApplicationError::CommandFailed {
            command: command.to_owned(),
            reason: e.to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primer_core::error::PrimerError;
    use tempfile::TempDir;

    #[test]
    fn missing_program_is_tool_missing() {
        let dir = TempDir::new().unwrap();
        let err = SystemRunner::new()
            .run("primer-no-such-program", &[], dir.path())
            .unwrap_err();
        assert!(matches!(
            err,
            PrimerError::Application(ApplicationError::ToolMissing { ref program })
                if program == "primer-no-such-program"
        ));
    }

    #[test]
    fn probe_never_fails() {
        let dir = TempDir::new().unwrap();
        assert!(!SystemRunner::new().probe("primer-no-such-program", &["--version".into()], dir.path()));
    }

    #[cfg(unix)]
    #[test]
    fn shell_output_is_captured() {
        let dir = TempDir::new().unwrap();
        let out = SystemRunner::new().run_shell("echo hello", dir.path()).unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_carries_stderr() {
        let dir = TempDir::new().unwrap();
        let err = SystemRunner::new()
            .run_shell("echo boom >&2; exit 3", dir.path())
            .unwrap_err();
        match err {
            PrimerError::Application(ApplicationError::CommandFailed { reason, .. }) => {
                assert!(reason.contains("boom"), "{reason}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn runs_in_working_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker"), "").unwrap();
        let out = SystemRunner::new()
            .run("ls", &[], dir.path())
            .unwrap();
        assert!(out.contains("marker"));
    }
}
