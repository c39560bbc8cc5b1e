//! Row-by-row extraction of schedule entries from timetable sheets.
//!
//! Day and time cells are usually merged over several lesson rows, so only
//! the first row of a block carries them. The parser threads the last day
//! and time seen down the sheet and attaches them to every lesson below.

use std::io::{Read, Seek};

use log::{debug, info, trace, warn};

use super::day::Weekday;
use super::decompose::decompose;
use super::entry::ScheduleEntry;
use super::lesson::{Lesson, WeekParity};
use super::options::ParserOptions;
use crate::sheet::{CellValue, Sheet};
use crate::xlsx::Workbook;

/// Day and time carried forward from earlier rows of a sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarryForward {
    day: Option<Weekday>,
    time: Option<String>,
}

impl CarryForward {
    /// Fresh state for a new sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The day in effect.
    pub fn day(&self) -> Option<Weekday> {
        self.day
    }

    /// The time slot in effect.
    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    /// Update the state from one row's day and time cells.
    ///
    /// A day cell replaces the day only when it is a weekday marker. A time
    /// cell replaces the time only when it is non-blank text that is not the
    /// column header. Anything else leaves the state as it was.
    pub fn observe(&mut self, day_cell: &CellValue, time_cell: &CellValue, time_header: &str) {
        if let Some(day) = Weekday::from_marker(&day_cell.to_string()) {
            self.day = Some(day);
        }

        if let Some(raw) = time_cell.as_str()
            && !raw.contains(time_header)
        {
            let time: String = raw.chars().filter(|&c| c != '\n' && c != '\r').collect();
            let time = time.trim();
            if !time.is_empty() {
                self.time = Some(time.to_string());
            }
        }
    }

    /// Day and time together, once both are known.
    fn context(&self) -> Option<(Weekday, &str)> {
        Some((self.day?, self.time.as_deref()?))
    }
}

/// Why a row produced no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The content cell is empty
    NoContent,
    /// No day or no time has been seen yet on this sheet
    NoContext,
    /// The content does not start with a lesson-type prefix
    Unclassified,
}

/// Counters for one parse pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Sheets parsed
    pub sheets: usize,
    /// Rows visited
    pub rows: usize,
    /// Entries emitted
    pub entries: usize,
    /// Rows skipped because the content cell was empty
    pub skipped_no_content: usize,
    /// Rows skipped because day or time was not known yet
    pub skipped_no_context: usize,
    /// Rows skipped because the lesson type was not recognized
    pub skipped_unclassified: usize,
    /// Emitted entries whose colour did not map to a parity
    pub unknown_week: usize,
    /// Sheets that could not be read, with the reason
    pub failed_sheets: Vec<(String, String)>,
}

impl ParseReport {
    fn skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::NoContent => self.skipped_no_content += 1,
            SkipReason::NoContext => self.skipped_no_context += 1,
            SkipReason::Unclassified => self.skipped_unclassified += 1,
        }
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: ParseReport) {
        self.sheets += other.sheets;
        self.rows += other.rows;
        self.entries += other.entries;
        self.skipped_no_content += other.skipped_no_content;
        self.skipped_no_context += other.skipped_no_context;
        self.skipped_unclassified += other.skipped_unclassified;
        self.unknown_week += other.unknown_week;
        self.failed_sheets.extend(other.failed_sheets);
    }
}

/// Entries extracted from a workbook together with the pass counters.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub entries: Vec<ScheduleEntry>,
    pub report: ParseReport,
}

/// Timetable sheet parser.
///
/// # Examples
///
/// ```rust
/// use timetable::schedule::{Parser, WeekParity, Weekday};
/// use timetable::sheet::{Color, SheetBuilder};
///
/// let sheet = SheetBuilder::new("ИВТ-21")
///     .value(1, 3, "ИВТ-21")
///     .value(2, 1, "ПОНЕДЕЛЬНИК")
///     .value(2, 2, "9:00-10:30")
///     .filled(2, 3, "лек.Физика ПЕТРОВ П.П. 12-101", Color::Argb(0xFFFF0000))
///     .build();
///
/// let entries = Parser::default().parse_sheet(&sheet);
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].day, Weekday::Monday);
/// assert_eq!(entries[0].lesson.week_parity, WeekParity::Every);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    /// Create a parser for the given sheet layout.
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    /// The layout this parser reads.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse one sheet into entries.
    pub fn parse_sheet(&self, sheet: &Sheet) -> Vec<ScheduleEntry> {
        let mut entries = Vec::new();
        self.parse_sheet_into(sheet, &mut entries);
        entries
    }

    /// Parse one sheet, appending entries to `entries`, and return the
    /// counters for this sheet.
    pub fn parse_sheet_into(&self, sheet: &Sheet, entries: &mut Vec<ScheduleEntry>) -> ParseReport {
        let group = self.group_name(sheet);
        let mut report = ParseReport {
            sheets: 1,
            ..ParseReport::default()
        };
        let mut state = CarryForward::new();

        for row in sheet.row_numbers() {
            report.rows += 1;
            state.observe(
                sheet.value(row, self.options.day_column),
                sheet.value(row, self.options.time_column),
                &self.options.time_header,
            );

            match self.parse_row(sheet, row, &group, &state) {
                Ok(entry) => {
                    if entry.lesson.week_parity == WeekParity::Unknown {
                        debug!(
                            "{}!row {}: fill {:?} has no week parity",
                            sheet.name(),
                            row,
                            sheet.fill(row, self.options.content_column)
                        );
                        report.unknown_week += 1;
                    }
                    report.entries += 1;
                    entries.push(entry);
                },
                Err(SkipReason::NoContent) => report.skip(SkipReason::NoContent),
                Err(reason) => {
                    debug!("{}!row {}: skipped ({:?})", sheet.name(), row, reason);
                    report.skip(reason);
                },
            }
        }

        info!(
            "sheet '{}' (group {}): {} entries from {} rows",
            sheet.name(),
            group,
            report.entries,
            report.rows
        );
        report
    }

    /// Parse a sequence of sheets; state starts fresh on each one.
    pub fn parse_sheets<'a, I>(&self, sheets: I) -> Extraction
    where
        I: IntoIterator<Item = &'a Sheet>,
    {
        let mut extraction = Extraction::default();
        for sheet in sheets {
            let report = self.parse_sheet_into(sheet, &mut extraction.entries);
            extraction.report.merge(report);
        }
        extraction
    }

    /// Parse every sheet of a workbook in tab order.
    ///
    /// A sheet that cannot be read is recorded in the report and skipped;
    /// the other sheets are still parsed.
    pub fn parse_workbook<R: Read + Seek>(&self, workbook: &Workbook<R>) -> Extraction {
        let mut extraction = Extraction::default();
        for (name, sheet) in workbook.sheets() {
            match sheet {
                Ok(sheet) => {
                    let report = self.parse_sheet_into(&sheet, &mut extraction.entries);
                    extraction.report.merge(report);
                },
                Err(e) => {
                    warn!("sheet '{}' skipped: {}", name, e);
                    extraction
                        .report
                        .failed_sheets
                        .push((name.to_string(), e.to_string()));
                },
            }
        }
        extraction
    }

    /// Turn one row into an entry, or say why it has none.
    fn parse_row(
        &self,
        sheet: &Sheet,
        row: u32,
        group: &str,
        state: &CarryForward,
    ) -> Result<ScheduleEntry, SkipReason> {
        let content = sheet.value(row, self.options.content_column).to_string();
        let content = content.trim();
        if content.is_empty() {
            return Err(SkipReason::NoContent);
        }

        let (day, time) = state.context().ok_or(SkipReason::NoContext)?;
        let week_parity = WeekParity::from_fill(sheet.fill(row, self.options.content_column));
        let decomposed = decompose(content).ok_or(SkipReason::Unclassified)?;
        trace!("{}!row {}: {:?}", sheet.name(), row, decomposed);

        Ok(ScheduleEntry {
            group: group.to_string(),
            day,
            time_slot: time.to_string(),
            lesson: Lesson {
                subject: decomposed.subject,
                lesson_type: decomposed.lesson_type,
                teacher: decomposed.teacher,
                room: decomposed.room,
                week_parity,
            },
        })
    }

    /// The group name from the header cell, or the tab title when the header
    /// cell is blank or the reference is unusable.
    fn group_name(&self, sheet: &Sheet) -> String {
        let header = sheet
            .value_by_reference(&self.options.group_cell)
            .map(|value| value.to_string().trim().to_string())
            .unwrap_or_default();
        if header.is_empty() {
            warn!(
                "sheet '{}': no group name in {}, using the sheet name",
                sheet.name(),
                self.options.group_cell
            );
            sheet.name().trim().to_string()
        } else {
            header
        }
    }
}
