//! Writes extracted entries into the normalized tables.

use std::collections::HashMap;

use log::{debug, info};
use rusqlite::{OptionalExtension, Transaction};

use crate::common::{Error, Result};
use crate::schedule::{ScheduleEntry, Weekday};

/// Counts from one load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Schedule rows inserted
    pub entries: usize,
    /// Distinct groups referenced by the load
    pub groups: usize,
    /// Distinct disciplines referenced by the load
    pub disciplines: usize,
    /// Distinct teachers referenced by the load
    pub teachers: usize,
}

/// Name to row id cache for one lookup table.
struct Lookup {
    table: &'static str,
    ids: HashMap<String, i64>,
}

impl Lookup {
    fn new(table: &'static str) -> Self {
        Self {
            table,
            ids: HashMap::new(),
        }
    }

    /// Insert `name` unless present and return its id.
    fn resolve(&mut self, tx: &Transaction<'_>, name: &str) -> Result<i64> {
        if let Some(&id) = self.ids.get(name) {
            return Ok(id);
        }
        tx.execute(
            &format!("INSERT OR IGNORE INTO {} (name) VALUES (?1)", self.table),
            [name],
        )?;
        let id: i64 = tx
            .query_row(
                &format!("SELECT id FROM {} WHERE name = ?1", self.table),
                [name],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| Error::InvalidFormat(format!("{} has no row for {name}", self.table)))?;
        self.ids.insert(name.to_string(), id);
        Ok(id)
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Load `entries` inside `tx`.
///
/// Weekdays are inserted first, in calendar order, so day ids sort the same
/// way the days do. Lookup rows already in the database are reused.
pub(crate) fn load(tx: &Transaction<'_>, entries: &[ScheduleEntry]) -> Result<LoadReport> {
    let mut days = Lookup::new("days_of_week");
    for day in Weekday::ALL {
        days.resolve(tx, day.name())?;
    }

    let mut groups = Lookup::new("groups");
    let mut disciplines = Lookup::new("disciplines");
    let mut teachers = Lookup::new("teachers");

    let mut insert = tx.prepare(
        "INSERT INTO schedule (day_id, time, group_id, discipline_id, teacher_id, room, lesson_type, week)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    for entry in entries {
        let lesson = &entry.lesson;
        let day_id = days.resolve(tx, entry.day.name())?;
        let group_id = groups.resolve(tx, &entry.group)?;
        let discipline_id = disciplines.resolve(tx, &lesson.subject)?;
        let teacher_id = teachers.resolve(tx, &lesson.teacher)?;
        insert.execute((
            day_id,
            &entry.time_slot,
            group_id,
            discipline_id,
            teacher_id,
            lesson.room.as_deref(),
            lesson.lesson_type.name(),
            lesson.week_parity.name(),
        ))?;
        debug!("stored {} {} {} {}", entry.group, entry.day, entry.time_slot, lesson.subject);
    }

    let report = LoadReport {
        entries: entries.len(),
        groups: groups.len(),
        disciplines: disciplines.len(),
        teachers: teachers.len(),
    };
    info!(
        "loaded {} entries ({} groups, {} disciplines, {} teachers)",
        report.entries, report.groups, report.disciplines, report.teachers
    );
    Ok(report)
}
