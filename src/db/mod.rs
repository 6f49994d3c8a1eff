mod connection;
pub mod queries;
mod schema;

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{CategoryFilter, CategoryStat, Session, SessionId};

pub use connection::Database;

/// Durable storage for training sessions.
///
/// Every operation is a single statement; validation failures never touch
/// stored data.
pub trait ScheduleStore {
    /// Save a new session and return it with its assigned ID
    fn add(&self, session: Session) -> Result<Session>;

    /// Replace every field of an existing session, keeping its ID
    fn update(&self, session: &Session) -> Result<()>;

    /// Remove a session; returns how many rows were removed (0 or 1)
    fn delete(&self, id: SessionId) -> Result<usize>;

    fn get(&self, id: SessionId) -> Result<Option<Session>>;

    /// Sessions in the Monday-Sunday week containing `reference`
    fn query_week(&self, reference: NaiveDate) -> Result<Vec<Session>>;

    /// Sessions in a calendar month, optionally for one category
    fn query_month(&self, year: i32, month: u32, filter: &CategoryFilter)
    -> Result<Vec<Session>>;

    fn list_categories(&self) -> Result<BTreeSet<String>>;

    /// Per-category totals for sessions dated within `[first, last]`
    fn category_stats(&self, first: NaiveDate, last: NaiveDate) -> Result<Vec<CategoryStat>>;
}
