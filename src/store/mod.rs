//! SQLite store for extracted schedules.
//!
//! Entries are normalized into lookup tables for days, groups, disciplines
//! and teachers plus one `schedule` row per class. The store then answers
//! filtered queries, including "what runs on this date".
//!
//! # Example
//!
//! ```no_run
//! use timetable::store::{ScheduleFilter, Store};
//!
//! let store = Store::open("schedule.db")?;
//! for row in store.query(&ScheduleFilter::new().with_group("ИВТ-21"))? {
//!     println!("{row}");
//! }
//! # Ok::<(), timetable::Error>(())
//! ```

mod loader;
mod query;
mod schema;

use std::path::Path;

use rusqlite::Connection;

pub use loader::LoadReport;
pub use query::{Choice, ScheduleFilter, ScheduleRow};

use crate::common::Result;
use crate::schedule::ScheduleEntry;

/// A schedule database.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a database file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        schema::create(&conn)?;
        Ok(Self { conn })
    }

    /// Insert entries in a single transaction.
    ///
    /// Nothing is written if any insert fails.
    pub fn load(&mut self, entries: &[ScheduleEntry]) -> Result<LoadReport> {
        let tx = self.conn.transaction()?;
        let report = loader::load(&tx, entries)?;
        tx.commit()?;
        Ok(report)
    }

    /// Stored classes matching `filter`, by day and then in load order.
    pub fn query(&self, filter: &ScheduleFilter) -> Result<Vec<ScheduleRow>> {
        query::query(&self.conn, filter)
    }

    /// Sorted values for one filter field.
    pub fn choices(&self, choice: Choice) -> Result<Vec<String>> {
        query::choices(&self.conn, choice)
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekCalendar;
    use crate::schedule::{Lesson, LessonType, WeekParity, Weekday};
    use chrono::NaiveDate;

    fn entry(
        group: &str,
        day: Weekday,
        time: &str,
        subject: &str,
        teacher: &str,
        room: Option<&str>,
        week: WeekParity,
    ) -> ScheduleEntry {
        ScheduleEntry {
            group: group.to_string(),
            day,
            time_slot: time.to_string(),
            lesson: Lesson {
                subject: subject.to_string(),
                lesson_type: LessonType::Lecture,
                teacher: teacher.to_string(),
                room: room.map(str::to_string),
                week_parity: week,
            },
        }
    }

    /// Two sheets in extraction order: all of ИВТ-21, then ИВТ-22.
    fn sample() -> Vec<ScheduleEntry> {
        vec![
            entry("ИВТ-21", Weekday::Monday, "9:00-10:30", "ХИМИЯ", "НУ", Some("12-101а"), WeekParity::Odd),
            entry("ИВТ-21", Weekday::Monday, "10:40-12:10", "МАТЕМАТИКА", "Иванов И.И.", None, WeekParity::Every),
            entry("ИВТ-21", Weekday::Tuesday, "9:00-10:30", "ФИЗИКА", "Петров П.П.", Some("12-345"), WeekParity::Odd),
            entry("ИВТ-22", Weekday::Monday, "9:00-10:30", "МАТЕМАТИКА", "Иванов И.И.", Some("12-101а"), WeekParity::Even),
        ]
    }

    fn count(store: &Store, table: &str) -> i64 {
        store
            .connection()
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_load_deduplicates_lookups() {
        let mut store = Store::open_in_memory().unwrap();
        let report = store.load(&sample()).unwrap();
        assert_eq!(
            report,
            LoadReport {
                entries: 4,
                groups: 2,
                disciplines: 3,
                teachers: 3,
            }
        );
        assert_eq!(count(&store, "days_of_week"), 7);
        assert_eq!(count(&store, "groups"), 2);
        assert_eq!(count(&store, "schedule"), 4);
    }

    #[test]
    fn test_reload_reuses_ids() {
        let mut store = Store::open_in_memory().unwrap();
        store.load(&sample()).unwrap();
        store.load(&sample()[..1]).unwrap();
        assert_eq!(count(&store, "days_of_week"), 7);
        assert_eq!(count(&store, "groups"), 2);
        assert_eq!(count(&store, "schedule"), 5);
        let orphans: i64 = store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM schedule s LEFT JOIN groups g ON g.id = s.group_id WHERE g.id IS NULL",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn test_query_orders_by_day_then_sheet_order() {
        let mut store = Store::open_in_memory().unwrap();
        store.load(&sample()).unwrap();
        let rows = store.query(&ScheduleFilter::new()).unwrap();
        let keys: Vec<_> = rows
            .iter()
            .map(|r| (r.day.as_str(), r.time.as_str(), r.group.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Понедельник", "9:00-10:30", "ИВТ-21"),
                ("Понедельник", "10:40-12:10", "ИВТ-21"),
                ("Понедельник", "9:00-10:30", "ИВТ-22"),
                ("Вторник", "9:00-10:30", "ИВТ-21"),
            ]
        );
        assert_eq!(rows[1].room, None);
    }

    #[test]
    fn test_group_day_is_chronological() {
        let mut store = Store::open_in_memory().unwrap();
        store.load(&sample()).unwrap();
        let filter = ScheduleFilter::new()
            .with_group("ИВТ-21")
            .with_day(Weekday::Monday);
        let times: Vec<_> = store
            .query(&filter)
            .unwrap()
            .into_iter()
            .map(|r| r.time)
            .collect();
        assert_eq!(times, vec!["9:00-10:30", "10:40-12:10"]);
    }

    #[test]
    fn test_query_filters() {
        let mut store = Store::open_in_memory().unwrap();
        store.load(&sample()).unwrap();

        let rows = store
            .query(&ScheduleFilter::new().with_teacher("Иванов И.И."))
            .unwrap();
        assert_eq!(rows.len(), 2);

        let rows = store
            .query(&ScheduleFilter::new().with_room("12-101а").with_group("ИВТ-21"))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].discipline, "ХИМИЯ");

        let rows = store
            .query(&ScheduleFilter::new().with_lesson_type(LessonType::Lab))
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_query_on_date_includes_every_week() {
        let mut store = Store::open_in_memory().unwrap();
        store.load(&sample()).unwrap();
        let calendar = WeekCalendar::new(NaiveDate::from_ymd_opt(2024, 9, 2).unwrap());

        // Monday of week 0, an odd week
        let filter = ScheduleFilter::new()
            .with_group("ИВТ-21")
            .on_date(NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(), &calendar);
        let subjects: Vec<_> = store
            .query(&filter)
            .unwrap()
            .into_iter()
            .map(|r| r.discipline)
            .collect();
        assert_eq!(subjects, vec!["ХИМИЯ", "МАТЕМАТИКА"]);

        // Monday of week 1, an even week
        let filter = ScheduleFilter::new()
            .on_date(NaiveDate::from_ymd_opt(2024, 9, 9).unwrap(), &calendar);
        let groups: Vec<_> = store
            .query(&filter)
            .unwrap()
            .into_iter()
            .map(|r| (r.group, r.week))
            .collect();
        assert_eq!(
            groups,
            vec![
                ("ИВТ-21".to_string(), "Каждая неделя".to_string()),
                ("ИВТ-22".to_string(), "Четная неделя".to_string()),
            ]
        );
    }

    #[test]
    fn test_choices() {
        let mut store = Store::open_in_memory().unwrap();
        store.load(&sample()).unwrap();
        assert_eq!(store.choices(Choice::Groups).unwrap(), vec!["ИВТ-21", "ИВТ-22"]);
        assert_eq!(store.choices(Choice::Rooms).unwrap(), vec!["12-101а", "12-345"]);
        assert_eq!(store.choices(Choice::Teachers).unwrap().len(), 3);
    }

    #[test]
    fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.db");
        {
            let mut store = Store::open(&path).unwrap();
            store.load(&sample()).unwrap();
        }
        let store = Store::open(&path).unwrap();
        assert_eq!(store.query(&ScheduleFilter::new()).unwrap().len(), 4);
    }
}
