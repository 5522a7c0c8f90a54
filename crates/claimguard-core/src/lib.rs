//! ClaimGuard Core
//!
//! Core types and error handling shared across ClaimGuard components.
//!
//! This crate provides:
//! - The closed vocabularies used by rules and reports (`Severity`, `Category`)
//! - The document-level `Verdict`
//! - Error types and result handling, including load-time rule compilation failures

pub mod error;
pub mod types;

pub use error::{CompilationFailure, Error, Result, RuleCompilationError};
pub use types::{Category, Severity, Verdict};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{CompilationFailure, Error, Result, RuleCompilationError};
    pub use crate::types::{Category, Severity, Verdict};
}
