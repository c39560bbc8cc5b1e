//! The record produced for every classified content cell.

use serde::{Deserialize, Serialize};

use super::day::Weekday;
use super::lesson::Lesson;

/// One scheduled class.
///
/// Serializes to the interchange shape
/// `{group, day, time, course: {name, type, teacher, room, week}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Group the sheet belongs to
    pub group: String,
    /// Day the class is on
    pub day: Weekday,
    /// Time range as written in the sheet, e.g. `9:00-10:30`
    #[serde(rename = "time")]
    pub time_slot: String,
    /// The class itself
    #[serde(rename = "course")]
    pub lesson: Lesson,
}

/// Serialize entries as a pretty-printed JSON array.
pub fn to_json(entries: &[ScheduleEntry]) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Parse entries from a JSON array.
pub fn from_json(json: &str) -> crate::Result<Vec<ScheduleEntry>> {
    Ok(serde_json::from_str(json)?)
}
