use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::models::{CategoryStat, Session, SessionId};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

const SELECT_SESSION: &str =
    "SELECT id, category, description, date, start_time, end_time FROM trainings";

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn parse_date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    NaiveDate::parse_from_str(&text, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_time_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveTime> {
    let text: String = row.get(idx)?;
    NaiveTime::parse_from_str(&text, TIME_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<Session> {
    Ok(Session {
        id: Some(row.get(0)?),
        // Older files allow NULL text columns
        category: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        date: parse_date_column(row, 3)?,
        start_time: parse_time_column(row, 4)?,
        end_time: parse_time_column(row, 5)?,
    })
}

/// Insert a session and return its new ID
pub fn insert_session(conn: &Connection, session: &Session) -> rusqlite::Result<SessionId> {
    conn.execute(
        "INSERT INTO trainings (category, description, date, start_time, end_time)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            session.category,
            session.description,
            format_date(session.date),
            format_time(session.start_time),
            format_time(session.end_time),
        ],
    )?;
    Ok(SessionId::new(conn.last_insert_rowid()))
}

/// Replace every field of the session with the given ID.
///
/// Returns the number of rows changed (0 if the ID does not exist).
pub fn update_session(
    conn: &Connection,
    id: SessionId,
    session: &Session,
) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE trainings
         SET category = ?1, description = ?2, date = ?3, start_time = ?4, end_time = ?5
         WHERE id = ?6",
        params![
            session.category,
            session.description,
            format_date(session.date),
            format_time(session.start_time),
            format_time(session.end_time),
            id,
        ],
    )
}

/// Delete a session by ID
pub fn delete_session(conn: &Connection, id: SessionId) -> rusqlite::Result<usize> {
    conn.execute("DELETE FROM trainings WHERE id = ?1", params![id])
}

/// Look up a single session
pub fn get_session(conn: &Connection, id: SessionId) -> rusqlite::Result<Option<Session>> {
    conn.query_row(
        &format!("{SELECT_SESSION} WHERE id = ?1"),
        params![id],
        session_from_row,
    )
    .optional()
}

/// Get sessions dated within `[first, last]`, optionally for one category.
///
/// Ordered by date then start time.
pub fn get_sessions_between(
    conn: &Connection,
    first: NaiveDate,
    last: NaiveDate,
    category: Option<&str>,
) -> rusqlite::Result<Vec<Session>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_SESSION}
         WHERE date BETWEEN ?1 AND ?2 AND (?3 IS NULL OR category = ?3)
         ORDER BY date, start_time, id"
    ))?;

    let sessions = stmt.query_map(
        params![format_date(first), format_date(last), category],
        session_from_row,
    )?;

    sessions.collect()
}

/// Distinct category names across all sessions
pub fn get_categories(conn: &Connection) -> rusqlite::Result<BTreeSet<String>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT category FROM trainings
         WHERE category IS NOT NULL AND category <> ''",
    )?;

    let categories = stmt.query_map([], |row| row.get::<_, String>(0))?;

    categories.collect()
}

/// Session count and planned minutes per category within `[first, last]`
pub fn get_time_by_category(
    conn: &Connection,
    first: NaiveDate,
    last: NaiveDate,
) -> rusqlite::Result<Vec<CategoryStat>> {
    let mut stmt = conn.prepare(
        "SELECT category,
                COUNT(*) AS sessions,
                SUM(
                    (CAST(substr(end_time, 1, 2) AS INTEGER) * 60 + CAST(substr(end_time, 4, 2) AS INTEGER))
                  - (CAST(substr(start_time, 1, 2) AS INTEGER) * 60 + CAST(substr(start_time, 4, 2) AS INTEGER))
                ) AS total
         FROM trainings
         WHERE date BETWEEN ?1 AND ?2
         GROUP BY category
         ORDER BY total DESC, category",
    )?;

    let results = stmt.query_map(params![format_date(first), format_date(last)], |row| {
        Ok(CategoryStat {
            name: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
            session_count: row.get(1)?,
            total_minutes: row.get(2)?,
        })
    })?;

    results.collect()
}
