//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `primer-adapters` and the CLI
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: reading, rewriting and renaming template files
//!   - `CommandRunner`: dependency manager and version-control subprocesses
//!   - `Prompter`: console questions and rejection notices

pub mod output;

pub use output::{CommandRunner, Filesystem, Prompter};

#[cfg(test)]
pub use output::{MockCommandRunner, MockFilesystem, MockPrompter};
