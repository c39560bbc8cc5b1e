//! Layout options for timetable sheets.

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};
use crate::sheet::reference_to_coords;

/// Sheet layout options for the timetable parser.
///
/// Every timetable sheet has the same shape: the group name sits in one
/// header cell, then each row has a day-marker column, a time column and a
/// content column whose fill colour encodes week parity.
///
/// # Examples
///
/// ```rust
/// use timetable::schedule::ParserOptions;
///
/// // Create with defaults (group in C1, columns A/B/C)
/// let options = ParserOptions::default();
///
/// // Or customize
/// let options = ParserOptions::new()
///     .with_group_cell("D1")
///     .with_content_column(4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserOptions {
    /// A1 reference of the cell holding the group name
    pub group_cell: String,
    /// 1-based column of the day-marker cell
    pub day_column: u32,
    /// 1-based column of the time cell
    pub time_column: u32,
    /// 1-based column of the lesson content cell
    pub content_column: u32,
    /// Text that marks the time column header; such cells are not times
    pub time_header: String,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            group_cell: "C1".to_string(),
            day_column: 1,
            time_column: 2,
            content_column: 3,
            time_header: "Часы".to_string(),
        }
    }
}

impl ParserOptions {
    /// Create a new `ParserOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cell that holds the group name.
    #[inline]
    pub fn with_group_cell(mut self, reference: impl Into<String>) -> Self {
        self.group_cell = reference.into();
        self
    }

    /// Set the day-marker column.
    #[inline]
    pub fn with_day_column(mut self, column: u32) -> Self {
        self.day_column = column;
        self
    }

    /// Set the time column.
    #[inline]
    pub fn with_time_column(mut self, column: u32) -> Self {
        self.time_column = column;
        self
    }

    /// Set the content column.
    #[inline]
    pub fn with_content_column(mut self, column: u32) -> Self {
        self.content_column = column;
        self
    }

    /// Set the time column header text.
    #[inline]
    pub fn with_time_header(mut self, header: impl Into<String>) -> Self {
        self.time_header = header.into();
        self
    }

    /// Check that the layout can address real cells.
    pub fn validate(&self) -> Result<()> {
        reference_to_coords(&self.group_cell)
            .map_err(|_| Error::Config(format!("group_cell '{}' is not a cell reference", self.group_cell)))?;
        for (name, column) in [
            ("day_column", self.day_column),
            ("time_column", self.time_column),
            ("content_column", self.content_column),
        ] {
            if column == 0 {
                return Err(Error::Config(format!("{} is 1-based and cannot be 0", name)));
            }
        }
        // Every text cell contains the empty string, so a blank header
        // would hide every time cell.
        if self.time_header.trim().is_empty() {
            return Err(Error::Config("time_header cannot be blank".to_string()));
        }
        Ok(())
    }
}
