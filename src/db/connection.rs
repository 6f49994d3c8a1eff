use std::collections::BTreeSet;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};
use rusqlite::Connection;

use crate::calendar::{month_bounds, week_of};
use crate::config::get_db_path;
use crate::error::{PlannerError, Result, ValidationError};
use crate::models::{CategoryFilter, CategoryStat, Session, SessionId};

use super::schema::init_schema;
use super::{ScheduleStore, queries};

/// Database connection wrapper
pub struct Database {
    pub conn: Connection,
}

impl Database {
    /// Open the database in the data directory, creating it if necessary
    pub fn open() -> Result<Self> {
        let path = get_db_path()?;
        Self::open_at(&path)
    }

    /// Open the database at a specific path, creating it if necessary
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        info!("Opened database at {}", path.display());
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl ScheduleStore for Database {
    fn add(&self, mut session: Session) -> Result<Session> {
        if session.id.is_some() {
            return Err(ValidationError::AlreadyPersisted.into());
        }
        session.validate()?;

        let id = queries::insert_session(&self.conn, &session)?;
        info!("Added session {} ({} on {})", id, session.category, session.date);
        session.id = Some(id);
        Ok(session)
    }

    fn update(&self, session: &Session) -> Result<()> {
        let id = session.id.ok_or(ValidationError::MissingId)?;
        session.validate()?;

        match queries::update_session(&self.conn, id, session)? {
            0 => Err(PlannerError::NotFound(id)),
            _ => {
                info!("Updated session {}", id);
                Ok(())
            }
        }
    }

    fn delete(&self, id: SessionId) -> Result<usize> {
        let removed = queries::delete_session(&self.conn, id)?;
        if removed > 0 {
            info!("Deleted session {}", id);
        } else {
            debug!("Delete of missing session {} ignored", id);
        }
        Ok(removed)
    }

    fn get(&self, id: SessionId) -> Result<Option<Session>> {
        queries::get_session(&self.conn, id).map_err(Into::into)
    }

    fn query_week(&self, reference: NaiveDate) -> Result<Vec<Session>> {
        let (monday, sunday) = week_of(reference);
        debug!("Loading week {} to {}", monday, sunday);
        queries::get_sessions_between(&self.conn, monday, sunday, None).map_err(Into::into)
    }

    fn query_month(
        &self,
        year: i32,
        month: u32,
        filter: &CategoryFilter,
    ) -> Result<Vec<Session>> {
        let (first, last) = month_bounds(year, month).ok_or(ValidationError::InvalidMonth)?;
        let category = match filter {
            CategoryFilter::All => None,
            CategoryFilter::Only(name) => Some(name.as_str()),
        };
        debug!("Loading {}-{:02} for {}", year, month, filter);
        queries::get_sessions_between(&self.conn, first, last, category).map_err(Into::into)
    }

    fn list_categories(&self) -> Result<BTreeSet<String>> {
        queries::get_categories(&self.conn).map_err(Into::into)
    }

    fn category_stats(&self, first: NaiveDate, last: NaiveDate) -> Result<Vec<CategoryStat>> {
        queries::get_time_by_category(&self.conn, first, last).map_err(Into::into)
    }
}
