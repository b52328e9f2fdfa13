//! `primer`: turn a template checkout into a fresh project, once.
//!
//! Exit codes:
//!
//! | code | meaning                                          |
//! |------|--------------------------------------------------|
//! |  0   | success                                          |
//! |  1   | a command, file or internal step failed          |
//! |  2   | bad arguments, rejected name, cancelled          |
//! |  3   | template, module directory or tool not found     |
//! |  4   | unreadable config file or `primer.toml`          |

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod prompt;

fn main() -> ExitCode {
    // PRIMER_* and RUST_LOG may come from a .env next to the template
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // also --help and --version, which exit 0
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    if let Err(e) = logging::init_logging(&cli.global) {
        eprintln!("primer: {e:#}");
        return ExitCode::FAILURE;
    }

    let verbose = cli.global.verbose > 0;
    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err, verbose),
    }
}

fn dispatch(cli: Cli) -> CliResult<()> {
    let Cli { global, command } = cli;
    debug!(?command, "dispatching");

    // init creates the file --config names, so it never reads it
    let config = match command {
        Commands::Init(_) => AppConfig::default(),
        _ => AppConfig::load(global.config.as_ref()).map_err(|e| CliError::ConfigError {
            message: format!("{e:#}"),
            source: None,
        })?,
    };
    let output = OutputManager::new(&global, &config);
    let config_file = global.config.clone();

    match command {
        Commands::Run(args) => commands::run::execute(args, global, config, output),
        Commands::Check(args) => commands::check::execute(args, output),
        Commands::Init(args) => commands::init::execute(args, config_file, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, config_file, output),
    }
}

/// Log `err`, print it on stderr and pick the exit code.
fn report(err: &CliError, verbose: bool) -> ExitCode {
    err.log();
    let message = if std::io::stderr().is_terminal() {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{message}");
    ExitCode::from(err.exit_code())
}
