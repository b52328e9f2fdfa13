//! Infrastructure adapters for Primer.
//!
//! This crate implements the ports defined in `primer-core::application::ports`
//! that touch the outside world: the filesystem and subprocesses. It also
//! loads template manifests.

pub mod filesystem;
pub mod manifest;
pub mod process;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use manifest::BlueprintLoader;
pub use process::SystemRunner;
