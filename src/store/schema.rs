//! Table layout of the schedule database.

use rusqlite::Connection;

use crate::common::Result;

/// Lookup tables, each a unique list of names.
pub(crate) const LOOKUP_TABLES: [&str; 4] = ["days_of_week", "groups", "disciplines", "teachers"];

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS days_of_week (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS groups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS disciplines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS teachers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS schedule (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    day_id INTEGER NOT NULL REFERENCES days_of_week(id),
    time TEXT NOT NULL,
    group_id INTEGER NOT NULL REFERENCES groups(id),
    discipline_id INTEGER NOT NULL REFERENCES disciplines(id),
    teacher_id INTEGER NOT NULL REFERENCES teachers(id),
    room TEXT,
    lesson_type TEXT NOT NULL,
    week TEXT NOT NULL
);
";

/// Create any missing tables.
pub(crate) fn create(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_create_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create(&conn).unwrap();
        create(&conn).unwrap();
        assert_eq!(
            table_names(&conn),
            vec!["days_of_week", "disciplines", "groups", "schedule", "teachers"]
        );
    }

    #[test]
    fn test_room_is_nullable() {
        let conn = Connection::open_in_memory().unwrap();
        create(&conn).unwrap();
        for table in LOOKUP_TABLES {
            conn.execute(&format!("INSERT INTO {table} (name) VALUES ('x')"), [])
                .unwrap();
        }
        conn.execute(
            "INSERT INTO schedule (day_id, time, group_id, discipline_id, teacher_id, room, lesson_type, week)
             VALUES (1, '9:00-10:30', 1, 1, 1, NULL, 'Лекция', 'Каждая неделя')",
            [],
        )
        .unwrap();
        let room: Option<String> = conn
            .query_row("SELECT room FROM schedule", [], |row| row.get(0))
            .unwrap();
        assert_eq!(room, None);
    }
}
