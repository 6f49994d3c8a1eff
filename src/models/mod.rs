mod filter;
mod session;

pub use filter::CategoryFilter;
pub use session::{CategoryStat, Session, SessionId};
