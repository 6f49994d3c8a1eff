use rusqlite::Connection;

/// Initialize the database schema.
///
/// Dates are stored as `YYYY-MM-DD` and times as `HH:MM` text, so existing
/// planner files open unchanged and both sort chronologically as strings.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS trainings (
            id INTEGER PRIMARY KEY,
            category TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            date TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_trainings_date ON trainings(date);
        ",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'trainings'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_opens_legacy_table() {
        // Files written before this schema have untyped, nullable columns
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE trainings (
                id INTEGER PRIMARY KEY,
                category TEXT,
                description TEXT,
                date TEXT,
                start_time TEXT,
                end_time TEXT
            );
            INSERT INTO trainings (category, description, date, start_time, end_time)
            VALUES ('U15', 'Travail physique', '2025-04-07', '18:00', '19:30');",
        )
        .unwrap();

        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM trainings", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
