//! Days of the week as they appear in the timetable.

use std::fmt;

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// A day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "Понедельник")]
    Monday,
    #[serde(rename = "Вторник")]
    Tuesday,
    #[serde(rename = "Среда")]
    Wednesday,
    #[serde(rename = "Четверг")]
    Thursday,
    #[serde(rename = "Пятница")]
    Friday,
    #[serde(rename = "Суббота")]
    Saturday,
    #[serde(rename = "Воскресенье")]
    Sunday,
}

/// Normalized day-marker tokens (whitespace removed, upper case).
static DAY_MARKERS: phf::Map<&'static str, Weekday> = phf_map! {
    "ПОНЕДЕЛЬНИК" => Weekday::Monday,
    "ВТОРНИК" => Weekday::Tuesday,
    "СРЕДА" => Weekday::Wednesday,
    "ЧЕТВЕРГ" => Weekday::Thursday,
    "ПЯТНИЦА" => Weekday::Friday,
    "СУББОТА" => Weekday::Saturday,
    "ВОСКРЕСЕНЬЕ" => Weekday::Sunday,
};

impl Weekday {
    /// All days in week order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Display name, e.g. `Понедельник`.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Понедельник",
            Weekday::Tuesday => "Вторник",
            Weekday::Wednesday => "Среда",
            Weekday::Thursday => "Четверг",
            Weekday::Friday => "Пятница",
            Weekday::Saturday => "Суббота",
            Weekday::Sunday => "Воскресенье",
        }
    }

    /// Recognize a day-marker cell.
    ///
    /// Whitespace anywhere in the cell is ignored and case does not matter,
    /// so `" П О Н Е Д Е Л Ь Н И К "` (a vertically spaced merged cell) is
    /// Monday.
    pub fn from_marker(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        DAY_MARKERS.get(normalized.as_str()).copied()
    }

    /// Look up a day by its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.name() == name)
    }

    /// Position in the week, Monday = 1.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Self::ALL[day.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
