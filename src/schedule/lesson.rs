//! Lesson classification: type prefixes and week-parity colours.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sheet::Color;

/// The pedagogical category of a class session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LessonType {
    #[serde(rename = "Лекция")]
    Lecture,
    #[serde(rename = "Практика")]
    Practice,
    #[serde(rename = "Лабораторная")]
    Lab,
}

impl LessonType {
    /// All lesson types.
    pub const ALL: [LessonType; 3] = [LessonType::Lecture, LessonType::Practice, LessonType::Lab];

    /// The prefix that marks this type at the start of a content cell.
    pub fn prefix(self) -> &'static str {
        match self {
            LessonType::Lecture => "лек.",
            LessonType::Practice => "пр.",
            LessonType::Lab => "лаб.",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            LessonType::Lecture => "Лекция",
            LessonType::Practice => "Практика",
            LessonType::Lab => "Лабораторная",
        }
    }

    /// Look up a type by its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Classify content text by its leading prefix.
    ///
    /// The match is exact and case-sensitive. Returns the type and the text
    /// after the prefix, or `None` when no prefix matches.
    pub fn classify(text: &str) -> Option<(Self, &str)> {
        Self::ALL
            .into_iter()
            .find_map(|t| text.strip_prefix(t.prefix()).map(|rest| (t, rest)))
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which weeks of the term a class runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekParity {
    #[serde(rename = "Нечетная неделя")]
    Odd,
    #[serde(rename = "Четная неделя")]
    Even,
    #[serde(rename = "Каждая неделя")]
    Every,
    /// The cell colour did not match any known parity colour.
    #[serde(rename = "Неизвестно")]
    Unknown,
}

/// Fill colours that encode week parity.
pub const WEEK_COLORS: [(u32, WeekParity); 3] = [
    (0xFF00_FF00, WeekParity::Odd),   // green
    (0xFFFF_FF00, WeekParity::Even),  // yellow
    (0xFFFF_0000, WeekParity::Every), // red
];

impl WeekParity {
    /// All parities, `Unknown` last.
    pub const ALL: [WeekParity; 4] = [
        WeekParity::Odd,
        WeekParity::Even,
        WeekParity::Every,
        WeekParity::Unknown,
    ];

    /// Map a cell fill to a parity.
    ///
    /// Anything that is not exactly one of [`WEEK_COLORS`] is `Unknown`,
    /// including cells without fill and theme or indexed colours.
    pub fn from_fill(fill: Option<Color>) -> Self {
        let Some(argb) = fill.and_then(|c| c.argb()) else {
            return WeekParity::Unknown;
        };
        WEEK_COLORS
            .iter()
            .find(|(color, _)| *color == argb)
            .map_or(WeekParity::Unknown, |(_, parity)| *parity)
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            WeekParity::Odd => "Нечетная неделя",
            WeekParity::Even => "Четная неделя",
            WeekParity::Every => "Каждая неделя",
            WeekParity::Unknown => "Неизвестно",
        }
    }

    /// Look up a parity by its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for WeekParity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One class session as decoded from a content cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Course name
    #[serde(rename = "name")]
    pub subject: String,
    /// Lecture, practice or lab
    #[serde(rename = "type")]
    pub lesson_type: LessonType,
    /// `Surname I.I.`, or a sentinel when not given
    pub teacher: String,
    /// Room code, `None` when the cell names no room
    pub room: Option<String>,
    /// Week parity from the cell colour
    #[serde(rename = "week")]
    pub week_parity: WeekParity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prefixes() {
        assert_eq!(
            LessonType::classify("пр.Физика"),
            Some((LessonType::Practice, "Физика"))
        );
        assert_eq!(
            LessonType::classify("лек.Физика"),
            Some((LessonType::Lecture, "Физика"))
        );
        assert_eq!(LessonType::classify("лаб.Химия"), Some((LessonType::Lab, "Химия")));
        assert_eq!(LessonType::classify("лаб."), Some((LessonType::Lab, "")));
    }

    #[test]
    fn test_classify_is_exact() {
        assert_eq!(LessonType::classify("Пр.Физика"), None);
        assert_eq!(LessonType::classify(" пр.Физика"), None);
        assert_eq!(LessonType::classify("пр Физика"), None);
        assert_eq!(LessonType::classify("сем.Философия"), None);
    }

    #[test]
    fn test_week_from_fill() {
        assert_eq!(WeekParity::from_fill(Some(Color::Argb(0xFF00FF00))), WeekParity::Odd);
        assert_eq!(WeekParity::from_fill(Some(Color::Argb(0xFFFFFF00))), WeekParity::Even);
        assert_eq!(WeekParity::from_fill(Some(Color::Argb(0xFFFF0000))), WeekParity::Every);
        assert_eq!(WeekParity::from_fill(Some(Color::Argb(0x00FF0000))), WeekParity::Unknown);
        assert_eq!(WeekParity::from_fill(Some(Color::Theme(5))), WeekParity::Unknown);
        assert_eq!(WeekParity::from_fill(None), WeekParity::Unknown);
    }

    #[test]
    fn test_lesson_json_shape() {
        let lesson = Lesson {
            subject: "Физика".to_string(),
            lesson_type: LessonType::Lab,
            teacher: "Петров П.П.".to_string(),
            room: None,
            week_parity: WeekParity::Every,
        };
        let json = serde_json::to_value(&lesson).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Физика",
                "type": "Лабораторная",
                "teacher": "Петров П.П.",
                "room": null,
                "week": "Каждая неделя",
            })
        );
    }

    #[test]
    fn test_names_round_trip() {
        for t in LessonType::ALL {
            assert_eq!(LessonType::from_name(t.name()), Some(t));
        }
        for p in WeekParity::ALL {
            assert_eq!(WeekParity::from_name(p.name()), Some(p));
        }
    }
}
