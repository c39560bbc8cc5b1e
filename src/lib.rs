//! Timetable - extract class schedules from university timetable spreadsheets
//!
//! A timetable workbook holds one sheet per student group. Column A marks the
//! weekday, column B the time range and column C the class itself, with the
//! cell fill colour saying which weeks of the term it runs on. This crate
//! turns such a workbook into flat, typed [`schedule::ScheduleEntry`] records
//! and optionally stores them in SQLite for querying.
//!
//! # Features
//!
//! - **Workbook reader**: Streams `.xlsx` parts with `quick-xml`, keeping cell
//!   values and fill colours
//! - **Schedule parser**: Carries day and time forward across rows and decodes
//!   lesson type, subject, teacher, room and week parity
//! - **Store**: Normalized SQLite tables with filtered and date-based queries
//!
//! # Example - Extracting a workbook
//!
//! ```no_run
//! use timetable::schedule::{Parser, ParserOptions, to_json};
//! use timetable::xlsx::Workbook;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let workbook = Workbook::open("timetable.xlsx")?;
//! let extraction = Parser::new(ParserOptions::default()).parse_workbook(&workbook);
//! println!("{}", to_json(&extraction.entries)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - What does a group have on a given day
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use timetable::calendar::WeekCalendar;
//! use timetable::store::{ScheduleFilter, Store};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Store::open("schedule.db")?;
//! let date = NaiveDate::from_ymd_opt(2024, 10, 14).unwrap();
//! let filter = ScheduleFilter::new()
//!     .with_group("ИВТ-21")
//!     .on_date(date, &WeekCalendar::default());
//! for row in store.query(&filter)? {
//!     println!("{row}");
//! }
//! # Ok(())
//! # }
//! ```

/// Term week numbering and parity
pub mod calendar;

/// Common types shared across the crate
pub mod common;

/// YAML configuration
pub mod config;

/// Stderr logger used by the command-line tool
pub mod logger;

/// Schedule records and the sheet parser that produces them
///
/// This is the core of the crate: everything else either feeds sheets into
/// [`schedule::Parser`] or consumes the entries it returns.
pub mod schedule;

/// In-memory worksheet grid
pub mod sheet;

/// SQLite storage and queries
pub mod store;

/// `.xlsx` workbook reader
pub mod xlsx;

pub use common::{Error, Result};
