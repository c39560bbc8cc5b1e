//! Decomposition of a content cell into lesson fields.
//!
//! The steps run in a fixed order and each one narrows the text the next one
//! sees: the type prefix is stripped, the room is cut from the tail, the
//! teacher is searched in what remains and everything before the teacher is
//! the subject. The physical-education rule runs last and overrides the rest.

use once_cell::sync::Lazy;
use regex::Regex;

use super::lesson::LessonType;

/// Teacher value when the cell names no teacher.
pub const DEFAULT_TEACHER: &str = "НУ";

/// Marker phrase of physical-education sessions.
pub const PE_MARKER: &str = "КпоВ: Базовая физическая культура";
/// Subject written for physical-education sessions.
pub const PE_SUBJECT: &str = "КпоВ: Базовая физическая культура / Базовые виды спорта";
/// Teacher written for physical-education sessions.
///
/// Both letters are Cyrillic. Databases built by older tooling that wrote a
/// Latin `C` here hold this teacher under a different name, so their teacher
/// ids do not line up with ones loaded by this crate.
pub const PE_TEACHER: &str = "СК";
/// Room written for physical-education sessions.
pub const PE_ROOM: &str = "СК";

/// `12-345`, optionally followed by one Cyrillic letter of either case, at
/// end of text.
static ROOM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]{2}-[0-9]{3}[а-яёА-ЯЁ]?$").expect("room pattern is valid"));

/// `ФАМИЛИЯ И.О.`
static TEACHER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[А-ЯЁ]+\s[А-ЯЁ]\.[А-ЯЁ]\.").expect("teacher pattern is valid"));

/// Lesson fields decoded from one content cell, before week parity is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposed {
    pub lesson_type: LessonType,
    pub subject: String,
    pub teacher: String,
    pub room: Option<String>,
}

/// Decode a content cell.
///
/// Returns `None` when the text does not start with a lesson-type prefix;
/// such cells cannot be classified and produce no entry.
pub fn decompose(content: &str) -> Option<Decomposed> {
    let (lesson_type, class_string) = LessonType::classify(content)?;

    let (room, class_string) = split_room(class_string);
    let (subject, teacher) = match split_teacher(class_string) {
        Some((subject, teacher)) => (subject.to_string(), normalize_teacher(teacher)),
        None => (class_string.trim().to_string(), DEFAULT_TEACHER.to_string()),
    };

    if subject.contains(PE_MARKER) {
        return Some(Decomposed {
            lesson_type,
            subject: PE_SUBJECT.to_string(),
            teacher: PE_TEACHER.to_string(),
            room: Some(PE_ROOM.to_string()),
        });
    }

    Some(Decomposed {
        lesson_type,
        subject,
        teacher,
        room: room.map(str::to_string),
    })
}

/// Cut a trailing room code off `text`.
///
/// Returns the room (if any) and the trimmed text before it. Without a match
/// the text is returned untouched.
pub fn split_room(text: &str) -> (Option<&str>, &str) {
    match ROOM_PATTERN.find(text) {
        Some(m) => (Some(m.as_str()), text[..m.start()].trim()),
        None => (None, text),
    }
}

/// Find the teacher in `text`.
///
/// Returns the trimmed text before the teacher and the raw teacher match.
/// Anything after the teacher is dropped.
pub fn split_teacher(text: &str) -> Option<(&str, &str)> {
    TEACHER_PATTERN
        .find(text)
        .map(|m| (text[..m.start()].trim(), m.as_str()))
}

/// Normalize `ИВАНОВ И.И.` to `Иванов И.И.`.
///
/// The surname keeps its first letter upper case and the rest goes lower
/// case; initials are left as they are. Parts are re-joined with one space.
pub fn normalize_teacher(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    let mut parts = upper.split_whitespace();

    let mut normalized = String::with_capacity(upper.len());
    if let Some(surname) = parts.next() {
        let mut chars = surname.chars();
        if let Some(first) = chars.next() {
            normalized.extend(first.to_uppercase());
            normalized.push_str(&chars.as_str().to_lowercase());
        }
    }
    for part in parts {
        normalized.push(' ');
        normalized.push_str(part);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_full_cell() {
        let lesson = decompose("пр.ВЫЧИСЛИТЕЛЬНАЯ МАТЕМАТИКА ИВАНОВ И.И. 12-345а").unwrap();
        assert_eq!(
            lesson,
            Decomposed {
                lesson_type: LessonType::Practice,
                subject: "ВЫЧИСЛИТЕЛЬНАЯ МАТЕМАТИКА".to_string(),
                teacher: "Иванов И.И.".to_string(),
                room: Some("12-345а".to_string()),
            }
        );
    }

    #[test]
    fn test_physical_education_override() {
        let lesson = decompose("лек.КпоВ: Базовая физическая культура").unwrap();
        assert_eq!(lesson.lesson_type, LessonType::Lecture);
        assert_eq!(lesson.subject, PE_SUBJECT);
        assert_eq!(lesson.teacher, PE_TEACHER);
        assert_eq!(lesson.room.as_deref(), Some(PE_ROOM));
    }

    #[test]
    fn test_physical_education_sentinels_are_cyrillic() {
        for sentinel in [PE_TEACHER, PE_ROOM] {
            assert_eq!(sentinel, "СК");
            assert!(sentinel.chars().all(|c| ('А'..='Я').contains(&c)), "{sentinel:?}");
            assert_ne!(sentinel, "CК");
        }
    }

    #[test]
    fn test_physical_education_beats_extracted_fields() {
        let lesson =
            decompose("пр.Элективные дисциплины КпоВ: Базовая физическая культура СИДОРОВ С.С. 01-101")
                .unwrap();
        assert_eq!(lesson.subject, PE_SUBJECT);
        assert_eq!(lesson.teacher, PE_TEACHER);
        assert_eq!(lesson.room.as_deref(), Some(PE_ROOM));
    }

    #[test]
    fn test_missing_teacher_and_room() {
        let lesson = decompose("лаб.  Химия  ").unwrap();
        assert_eq!(lesson.subject, "Химия");
        assert_eq!(lesson.teacher, DEFAULT_TEACHER);
        assert_eq!(lesson.room, None);
    }

    #[test]
    fn test_teacher_without_room() {
        let lesson = decompose("лек.Физика ПЕТРОВА А.Б.").unwrap();
        assert_eq!(lesson.subject, "Физика");
        assert_eq!(lesson.teacher, "Петрова А.Б.");
        assert_eq!(lesson.room, None);
    }

    #[test]
    fn test_text_after_teacher_is_dropped() {
        let lesson = decompose("лек.Физика ПЕТРОВ А.Б. (поток) 10-200").unwrap();
        assert_eq!(lesson.subject, "Физика");
        assert_eq!(lesson.teacher, "Петров А.Б.");
        assert_eq!(lesson.room.as_deref(), Some("10-200"));
    }

    #[test]
    fn test_room_must_be_at_end() {
        assert_eq!(split_room("Физика 12-345 ауд."), (None, "Физика 12-345 ауд."));
        assert_eq!(split_room("Физика 12-345б"), (Some("12-345б"), "Физика"));
        assert_eq!(split_room("Физика 12-345А"), (Some("12-345А"), "Физика"));
        assert_eq!(split_room("Физика 12-34"), (None, "Физика 12-34"));
        assert_eq!(split_room("Физика 12-345ab"), (None, "Физика 12-345ab"));
    }

    #[test]
    fn test_unclassified() {
        assert_eq!(decompose("Физика ИВАНОВ И.И. 12-345"), None);
        assert_eq!(decompose(""), None);
    }

    #[test]
    fn test_normalize_teacher() {
        assert_eq!(normalize_teacher("ИВАНОВ И.И."), "Иванов И.И.");
        assert_eq!(normalize_teacher("ЁЛКИН\tЕ.Ё."), "Ёлкин Е.Ё.");
        assert_eq!(normalize_teacher(""), "");
    }

    proptest! {
        #[test]
        fn prop_trailing_room_is_extracted_and_removed(
            subject in "[А-Яа-я ]{1,20}",
            digits in "[0-9]{2}-[0-9]{3}",
            suffix in proptest::option::of("[а-яА-Я]"),
        ) {
            let room = format!("{}{}", digits, suffix.unwrap_or_default());
            let content = format!("лаб.{} {}", subject, room);
            let lesson = decompose(&content).unwrap();

            prop_assert_eq!(lesson.room.as_deref(), Some(room.as_str()));
            prop_assert!(!lesson.subject.contains(&room));
            prop_assert_eq!(lesson.subject, subject.trim().to_string());
        }

        #[test]
        fn prop_pe_marker_always_overrides(
            before in "[А-Яа-я ]{0,10}",
            teacher in "[А-Я]{2,8} [А-Я]\\.[А-Я]\\.",
            room in "[0-9]{2}-[0-9]{3}",
        ) {
            let content = format!("пр.{}{} {} {}", before, PE_MARKER, teacher, room);
            let lesson = decompose(&content).unwrap();
            prop_assert_eq!(lesson.teacher, PE_TEACHER);
            prop_assert_eq!(lesson.room.as_deref(), Some(PE_ROOM));
        }
    }
}
