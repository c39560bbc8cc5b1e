//! Excel (.xlsx) workbook reading.
//!
//! This module reads the parts of an `.xlsx` package that a timetable needs:
//! the sheet list, shared strings, cell fill colours and cell values. Each
//! worksheet is returned as an in-memory [`Sheet`](crate::sheet::Sheet).
//!
//! # Example
//!
//! ```no_run
//! use timetable::xlsx::Workbook;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let workbook = Workbook::open("schedule.xlsx")?;
//! for (name, sheet) in workbook.sheets() {
//!     let sheet = sheet?;
//!     println!("{}: {} cells", name, sheet.cell_count());
//! }
//! # Ok(())
//! # }
//! ```

pub mod package;
mod parsers;
mod styles;
mod workbook;


pub use package::Package;
pub use styles::Styles;
pub use workbook::Workbook;
