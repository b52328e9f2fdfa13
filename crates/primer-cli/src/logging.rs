//! Tracing subscriber for the `primer` binary.
//!
//! The library crates only emit events; this is the one place a subscriber
//! is installed. Everything goes to stderr so stdout stays free for results.
//!
//! | flags     | level of the primer crates |
//! |-----------|----------------------------|
//! | `-q`      | error                      |
//! | none      | warn                       |
//! | `-v`      | info                       |
//! | `-vv`     | debug                      |
//! | `-vvv`    | trace                      |
//!
//! A set `RUST_LOG` replaces the table entirely.

use std::io::{self, IsTerminal as _};

use anyhow::Context as _;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Install the process-wide subscriber. Fails if one is already installed.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(level_for(args))));

    // exactly one of the two is Some
    let text = (!args.json()).then(|| {
        fmt::layer()
            .with_target(false)
            .with_ansi(!args.no_color && io::stderr().is_terminal())
            .with_writer(io::stderr)
    });
    let json = args
        .json()
        .then(|| fmt::layer().json().with_writer(io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .try_init()
        .context("a tracing subscriber is already installed")
}

/// Filter directives: primer crates at `level`, dependencies at `warn`.
fn directives(level: &str) -> String {
    ["primer", "primer_core", "primer_adapters"]
        .iter()
        .fold(String::from("warn"), |acc, target| {
            format!("{acc},{target}={level}")
        })
}

fn level_for(args: &GlobalArgs) -> &'static str {
    match (args.quiet, args.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}
