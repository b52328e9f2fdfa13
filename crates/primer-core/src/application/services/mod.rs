//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the two
//! halves of a run: collecting answers and bootstrapping the template.

pub mod bootstrap_service;
pub mod input_service;

pub use bootstrap_service::{BootstrapOptions, BootstrapPlan, BootstrapReport, BootstrapService};
pub use input_service::{Answers, Preset, ask_until_valid, collect_answers};
