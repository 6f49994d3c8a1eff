use thiserror::Error;

use crate::models::SessionId;

/// Input that cannot become a well-formed session or query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("End time must be after start time")]
    EndNotAfterStart,

    #[error("Category cannot be empty")]
    EmptyCategory,

    #[error("Invalid time '{0}', expected HH:MM")]
    MalformedTime(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    MalformedDate(String),

    #[error("Year {0} is out of range (1-9999)")]
    YearOutOfRange(i32),

    #[error("Invalid month")]
    InvalidMonth,

    #[error("Invalid number '{0}'")]
    MalformedNumber(String),

    #[error("Session has not been saved yet")]
    MissingId,

    #[error("Session has already been saved")]
    AlreadyPersisted,
}

/// Application-specific error type
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Session {0} no longer exists")]
    NotFound(SessionId),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Could not determine data directory")]
    NoDataDirectory,
}

impl PlannerError {
    /// Whether the user can fix the problem and try again
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}

impl From<printpdf::Error> for PlannerError {
    fn from(err: printpdf::Error) -> Self {
        Self::Pdf(format!("{:?}", err))
    }
}

/// Convenience type alias for Result with PlannerError
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_and_not_found_are_recoverable() {
        assert!(PlannerError::from(ValidationError::EndNotAfterStart).is_recoverable());
        assert!(PlannerError::NotFound(SessionId::new(4)).is_recoverable());
        assert!(!PlannerError::NoDataDirectory.is_recoverable());
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = PlannerError::from(ValidationError::MalformedTime("25:00".to_string()));
        assert_eq!(err.to_string(), "Invalid time '25:00', expected HH:MM");
    }
}
