//! Flags shared by every `primer` subcommand.

use std::path::PathBuf;

use clap::{Args, ValueEnum, builder::FalseyValueParser};

#[derive(Debug, Clone, Args)]
#[command(next_help_heading = "Global options")]
pub struct GlobalArgs {
    /// Log more: `-v` one line per bootstrap step, `-vv` every file and
    /// command, `-vvv` file discovery as well.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print errors only. `run` still asks for confirmation unless `--yes`.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain, uncoloured output. Any non-empty `NO_COLOR` turns this on.
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        hide_env_values = true,
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Read settings from FILE instead of the platform config directory.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How results are printed on stdout.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// `true` when stdout must carry nothing but one JSON document.
    pub fn json(&self) -> bool {
        self.output_format == OutputFormat::Json
    }
}

/// Rendering of command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` otherwise.
    #[default]
    Auto,
    Human,
    Plain,
    /// A single JSON report; logs become JSON lines on stderr.
    Json,
}
