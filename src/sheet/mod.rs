//! In-memory spreadsheet grid.
//!
//! The parser does not care where a sheet came from: the `.xlsx` reader
//! produces [`Sheet`]s, and tests build them directly with [`SheetBuilder`].
//!
//! # Quick Start
//!
//! ```rust
//! use timetable::sheet::{CellValue, Color, SheetBuilder};
//!
//! let sheet = SheetBuilder::new("ИВТ-21")
//!     .value(1, 3, "ИВТ-21")
//!     .filled(2, 3, "лек.Физика", Color::Argb(0xFFFF0000))
//!     .build();
//!
//! assert_eq!(sheet.value(1, 3), &CellValue::String("ИВТ-21".to_string()));
//! assert_eq!(sheet.fill(2, 3), Some(Color::Argb(0xFFFF0000)));
//! ```

// Submodule declarations
mod grid;
pub mod types;

// Re-exports
pub use grid::{Cell, Sheet, SheetBuilder, reference_to_coords};
pub use types::{CellValue, Color};
