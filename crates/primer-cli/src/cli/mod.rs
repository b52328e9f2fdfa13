//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "primer",
    bin_name = "primer",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Bootstrap a fresh project from a template checkout",
    long_about = "Primer asks for a project's name, module and classes, rewrites \
                  the template's placeholder tokens, renames the placeholder \
                  package, installs dependencies and commits the result. \
                  A template can only be bootstrapped once.",
    after_help = "EXAMPLES:\n\
        \x20 primer run\n\
        \x20 primer run ../my-template --author 'Jane Doe' --module widgets -y\n\
        \x20 primer check module widgets\n\
        \x20 primer completions bash > /usr/share/bash-completion/completions/primer",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Bootstrap the template in DIR.
    #[command(
        visible_alias = "r",
        about = "Bootstrap a template into a project",
        after_help = "EXAMPLES:\n\
            \x20 primer run                                  # prompt for everything\n\
            \x20 primer run --module widgets --application   # prompt for the author only\n\
            \x20 primer run --class TemplateClass=Widget -y\n\
            \x20 primer run --dry-run"
    )]
    Run(RunArgs),

    /// Validate an identifier without bootstrapping anything.
    #[command(
        about = "Check a module or class name",
        after_help = "EXAMPLES:\n\
            \x20 primer check module widgets\n\
            \x20 primer check class Widget"
    )]
    Check(CheckArgs),

    /// Initialise a Primer configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 primer init           # default location\n\
            \x20 primer init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 primer completions bash > ~/.local/share/bash-completion/completions/primer\n\
            \x20 primer completions zsh  > ~/.zfunc/_primer\n\
            \x20 primer completions fish > ~/.config/fish/completions/primer.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Primer configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 primer config get defaults.author\n\
            \x20 primer config list\n\
            \x20 primer config path"
    )]
    Config(ConfigCommands),
}

// ── run ───────────────────────────────────────────────────────────────────────

/// Arguments for `primer run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Template root; defaults to the current directory.
    #[arg(value_name = "DIR", default_value = ".", help = "Template directory")]
    pub dir: PathBuf,

    /// Author name; prompted for when absent.
    #[arg(short = 'a', long = "author", value_name = "NAME", help = "Author name")]
    pub author: Option<String>,

    /// Module name; prompted for when absent.
    #[arg(
        short = 'm',
        long = "module",
        value_name = "NAME",
        help = "Module name (lowercase, no underscores, at most 20 chars)"
    )]
    pub module: Option<String>,

    /// Class names for class placeholders, as `TOKEN=Name`.
    #[arg(
        long = "class",
        value_name = "TOKEN=NAME",
        value_parser = parse_class_assignment,
        help = "Class name for a class placeholder (repeatable)"
    )]
    pub classes: Vec<(String, String)>,

    /// The project is a library.
    #[arg(long = "library", conflicts_with = "application", help = "Project is a library")]
    pub library: bool,

    /// The project is an application (its lock file is committed).
    #[arg(long = "application", help = "Project is an application")]
    pub application: bool,

    /// Do not detect, install or run the dependency manager.
    #[arg(long = "skip-install", help = "Skip dependency manager steps")]
    pub skip_install: bool,

    /// Do not `git add` / `git commit`.
    #[arg(long = "no-commit", help = "Leave the changes uncommitted")]
    pub no_commit: bool,

    /// Preview what would change without writing anything.
    #[arg(long = "dry-run", help = "Show what would change without changing it")]
    pub dry_run: bool,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Skip confirmation")]
    pub yes: bool,
}

impl RunArgs {
    /// `--library` / `--application` as a tri-state.
    pub fn library(&self) -> Option<bool> {
        match (self.library, self.application) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn parse_class_assignment(raw: &str) -> Result<(String, String), String> {
    let (token, name) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TOKEN=Name, got '{raw}'"))?;
    if token.is_empty() {
        return Err("placeholder token cannot be empty".into());
    }
    Ok((token.to_owned(), name.to_owned()))
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `primer check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Which rules to apply.
    #[arg(value_enum)]
    pub kind: IdentifierKind,

    /// The name to check.
    pub value: String,
}

/// Identifier rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IdentifierKind {
    Module,
    Class,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `primer init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `primer completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `primer config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.author`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
