//! Unified error type for the timetable pipeline.
//!
//! This module provides one error type that covers reading the workbook,
//! serializing entries and talking to the database.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
