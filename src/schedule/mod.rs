//! Timetable extraction.
//!
//! Turns timetable sheets into [`ScheduleEntry`] records. Each sheet belongs
//! to one group; rows carry a day marker, a time range and a lesson cell whose
//! text names the lesson type, subject, teacher and room and whose fill
//! colour says which weeks the lesson runs on.
//!
//! Extraction is best-effort: rows that cannot be decoded are skipped and
//! counted in the [`ParseReport`], never treated as errors.
//!
//! # Example
//!
//! ```no_run
//! use timetable::schedule::Parser;
//! use timetable::xlsx::Workbook;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let workbook = Workbook::open("schedule.xlsx")?;
//! let extraction = Parser::default().parse_workbook(&workbook);
//! println!("{}", timetable::schedule::to_json(&extraction.entries)?);
//! # Ok(())
//! # }
//! ```

// Submodule declarations
mod day;
pub mod decompose;
mod entry;
mod lesson;
mod options;
mod parser;

// Re-exports
pub use day::Weekday;
pub use decompose::{Decomposed, decompose};
pub use entry::{ScheduleEntry, from_json, to_json};
pub use lesson::{Lesson, LessonType, WEEK_COLORS, WeekParity};
pub use options::ParserOptions;
pub use parser::{CarryForward, Extraction, ParseReport, Parser, SkipReason};
