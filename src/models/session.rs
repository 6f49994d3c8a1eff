use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta};
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::config::{MAX_YEAR, MIN_YEAR};
use crate::error::ValidationError;

/// Identifier assigned by the store when a session is first saved
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(i64);

impl SessionId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl From<SessionId> for i64 {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl ToSql for SessionId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for SessionId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Self)
    }
}

/// A scheduled training session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Option<SessionId>,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl Session {
    /// Create a new, unsaved session.
    ///
    /// Category and description are trimmed. Fails if the category is blank
    /// or the session does not end after it starts.
    pub fn new(
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Self, ValidationError> {
        let session = Self {
            id: None,
            category: category.into().trim().to_string(),
            description: description.into().trim().to_string(),
            date,
            start_time,
            end_time,
        };
        session.validate()?;
        Ok(session)
    }

    /// Check the invariants every stored session must hold
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.category.trim().is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.date.year()) {
            return Err(ValidationError::YearOutOfRange(self.date.year()));
        }
        if self.end_time <= self.start_time {
            return Err(ValidationError::EndNotAfterStart);
        }
        Ok(())
    }

    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }

    /// Format duration as "Xh Ym" or "Xm"
    pub fn format_duration(&self) -> String {
        let minutes = self.duration().num_minutes();
        let hours = minutes / 60;
        let remaining_minutes = minutes % 60;

        if hours > 0 {
            format!("{}h {}m", hours, remaining_minutes)
        } else {
            format!("{}m", minutes)
        }
    }

    /// "18:00–19:30"
    pub fn time_range_label(&self) -> String {
        format!(
            "{}–{}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

/// Total planned time for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryStat {
    pub name: String,
    pub session_count: i64,
    pub total_minutes: i64,
}
