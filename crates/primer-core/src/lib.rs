//! Primer Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Primer, a
//! one-shot bootstrapper that turns a project template into a new project.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            primer-cli (CLI)             │
//! │      (prompts, output, config)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (collect_answers, BootstrapService)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, CommandRunner, Prompter)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    primer-adapters (Infrastructure)     │
//! │ (LocalFilesystem, SystemRunner, etc)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (validation, Substituter, Blueprint)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use primer_core::prelude::*;
//! # fn run(
//! #     filesystem: Box<dyn Filesystem>,
//! #     runner: Box<dyn CommandRunner>,
//! #     prompter: &dyn Prompter,
//! # ) -> PrimerResult<()> {
//! let blueprint = Blueprint::default();
//!
//! // 1. Ask the user
//! let answers = collect_answers(prompter, &blueprint, Preset::default())?;
//!
//! // 2. Plan and apply
//! let service = BootstrapService::new(filesystem, runner);
//! let plan = service.plan(".".as_ref(), &blueprint, &answers, 2026)?;
//! service.execute(&plan, BootstrapOptions::default())?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Answers, BootstrapOptions, BootstrapPlan, BootstrapReport, BootstrapService, Preset,
        collect_answers,
        ports::{CommandRunner, Filesystem, Prompter},
    };
    pub use crate::domain::{
        Blueprint, ClassName, ModuleName, Rejection, Substituter, SubstitutionTable,
    };
    pub use crate::error::{PrimerError, PrimerResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
