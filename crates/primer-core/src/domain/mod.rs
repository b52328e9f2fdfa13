// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Primer.
//!
//! Pure logic only: identifier rules, the substitution table and its
//! whole-word rewriter, the blueprint describing a template, and file-set
//! assembly. All I/O is behind ports defined in the application layer.
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, process or console access
//! - **Immutable values**: all domain objects are Clone + PartialEq
pub mod blueprint;
pub mod error;
pub mod file_set;
pub mod substitution;
pub mod validation;
pub mod value_objects;

pub use blueprint::{
    Blueprint, ClassPlaceholder, DependencyManager, FileRules, GitSettings, MANIFEST_FILE,
    Placeholders, Rename,
};
pub use error::{DomainError, ErrorCategory};
pub use file_set::{FileSet, rename_target};
pub use substitution::{Substituted, Substituter, SubstitutionTable};
pub use validation::{MAX_MODULE_NAME_LEN, Rejection};
pub use value_objects::{ClassName, ModuleName, parse_yes_no};
