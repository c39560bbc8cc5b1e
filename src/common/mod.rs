//! Common types shared across the reader, parser and store.
//!
//! Everything that fails in this crate fails with [`Error`], so callers only
//! ever match on one enum regardless of which stage produced the problem.

// Submodule declarations
pub mod error;

// Re-exports for convenience
pub use error::{Error, Result};
