//! Application layer for Primer.
//!
//! This layer contains:
//! - **Services**: answer collection and the bootstrap run itself
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! rules itself. Identifier and substitution rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    Answers, BootstrapOptions, BootstrapPlan, BootstrapReport, BootstrapService, Preset,
    ask_until_valid, collect_answers,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandRunner, Filesystem, Prompter};

pub use error::ApplicationError;
