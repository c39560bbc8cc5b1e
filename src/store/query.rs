//! Filtered reads over the schedule tables.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{Connection, params_from_iter};

use crate::calendar::WeekCalendar;
use crate::common::{Error, Result};
use crate::schedule::{LessonType, WeekParity, Weekday};

/// Equality filters over stored classes. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub group: Option<String>,
    pub teacher: Option<String>,
    pub discipline: Option<String>,
    pub room: Option<String>,
    pub lesson_type: Option<LessonType>,
    pub day: Option<Weekday>,
    /// `Odd` and `Even` also match classes held every week.
    pub week: Option<WeekParity>,
}

impl ScheduleFilter {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[inline]
    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = Some(teacher.into());
        self
    }

    #[inline]
    pub fn with_discipline(mut self, discipline: impl Into<String>) -> Self {
        self.discipline = Some(discipline.into());
        self
    }

    #[inline]
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    #[inline]
    pub fn with_lesson_type(mut self, lesson_type: LessonType) -> Self {
        self.lesson_type = Some(lesson_type);
        self
    }

    #[inline]
    pub fn with_day(mut self, day: Weekday) -> Self {
        self.day = Some(day);
        self
    }

    #[inline]
    pub fn with_week(mut self, week: WeekParity) -> Self {
        self.week = Some(week);
        self
    }

    /// Restrict to classes held on `date`: its weekday and week parity.
    pub fn on_date(self, date: NaiveDate, calendar: &WeekCalendar) -> Self {
        self.with_day(calendar.weekday(date))
            .with_week(calendar.week_parity(date))
    }

    /// Build the WHERE clause and its parameters.
    fn where_clause(&self) -> (String, Vec<String>) {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        let equalities = [
            ("g.name", self.group.as_deref()),
            ("t.name", self.teacher.as_deref()),
            ("di.name", self.discipline.as_deref()),
            ("s.room", self.room.as_deref()),
            ("s.lesson_type", self.lesson_type.map(LessonType::name)),
            ("d.name", self.day.map(Weekday::name)),
        ];
        for (column, value) in equalities {
            if let Some(value) = value {
                conditions.push(format!("{column} = ?"));
                params.push(value.to_string());
            }
        }

        match self.week {
            Some(week @ (WeekParity::Odd | WeekParity::Even)) => {
                conditions.push("(s.week = ? OR s.week = ?)".to_string());
                params.push(week.name().to_string());
                params.push(WeekParity::Every.name().to_string());
            },
            Some(week) => {
                conditions.push("s.week = ?".to_string());
                params.push(week.name().to_string());
            },
            None => {},
        }

        if conditions.is_empty() {
            (String::new(), params)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), params)
        }
    }
}

/// One stored class with lookup names resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub day: String,
    pub time: String,
    pub group: String,
    pub discipline: String,
    pub lesson_type: String,
    pub teacher: String,
    pub room: Option<String>,
    pub week: String,
}

impl fmt::Display for ScheduleRow {
    /// Tab-separated, with an empty field for a missing room.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.day,
            self.time,
            self.group,
            self.discipline,
            self.lesson_type,
            self.teacher,
            self.room.as_deref().unwrap_or(""),
            self.week
        )
    }
}

const SELECT_ROWS: &str = "SELECT d.name, s.time, g.name, di.name, s.lesson_type, t.name, s.room, s.week
FROM schedule s
JOIN days_of_week d ON d.id = s.day_id
JOIN groups g ON g.id = s.group_id
JOIN disciplines di ON di.id = s.discipline_id
JOIN teachers t ON t.id = s.teacher_id";

pub(crate) fn query(conn: &Connection, filter: &ScheduleFilter) -> Result<Vec<ScheduleRow>> {
    let (clause, params) = filter.where_clause();
    // Times are free text and do not sort; within a day keep load (sheet) order.
    let sql = format!("{SELECT_ROWS}{clause} ORDER BY s.day_id, s.id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            Ok(ScheduleRow {
                day: row.get(0)?,
                time: row.get(1)?,
                group: row.get(2)?,
                discipline: row.get(3)?,
                lesson_type: row.get(4)?,
                teacher: row.get(5)?,
                room: row.get(6)?,
                week: row.get(7)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Value lists offered for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Groups,
    Teachers,
    Disciplines,
    Rooms,
}

impl Choice {
    pub const ALL: [Choice; 4] = [Choice::Groups, Choice::Teachers, Choice::Disciplines, Choice::Rooms];

    pub fn name(self) -> &'static str {
        match self {
            Choice::Groups => "groups",
            Choice::Teachers => "teachers",
            Choice::Disciplines => "disciplines",
            Choice::Rooms => "rooms",
        }
    }

    fn sql(self) -> &'static str {
        match self {
            Choice::Groups => "SELECT name FROM groups ORDER BY name",
            Choice::Teachers => "SELECT name FROM teachers ORDER BY name",
            Choice::Disciplines => "SELECT name FROM disciplines ORDER BY name",
            Choice::Rooms => "SELECT DISTINCT room FROM schedule WHERE room IS NOT NULL ORDER BY room",
        }
    }
}

impl FromStr for Choice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::InvalidFormat(format!("unknown list: {s}")))
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) fn choices(conn: &Connection, choice: Choice) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(choice.sql())?;
    let values = stmt
        .query_map([], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;
    Ok(values)
}
