use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::config::{MAX_YEAR, MIN_YEAR};
use crate::error::ValidationError;
use crate::models::{Session, SessionId};

/// Validation result for form input
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Raw text fields of the session form, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionForm {
    pub category: String,
    pub description: String,
    pub date: String,
    pub start: String,
    pub end: String,
}

/// A session whose fields parsed but whose invariants are not yet checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl SessionForm {
    /// Pre-fill the form for a new session in an empty slot
    pub fn for_slot(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            start: start.format("%H:%M").to_string(),
            end: end.format("%H:%M").to_string(),
            ..Self::default()
        }
    }

    /// Pre-fill the form from an existing session
    pub fn from_session(session: &Session) -> Self {
        Self {
            category: session.category.clone(),
            description: session.description.clone(),
            date: session.date.format("%Y-%m-%d").to_string(),
            start: session.start_time.format("%H:%M").to_string(),
            end: session.end_time.format("%H:%M").to_string(),
        }
    }

    /// Parse every field into its typed form
    pub fn parse(&self) -> ValidationResult<SessionDraft> {
        Ok(SessionDraft {
            category: self.category.clone(),
            description: self.description.clone(),
            date: parse_date(&self.date)?,
            start_time: parse_time_of_day(&self.start)?,
            end_time: parse_time_of_day(&self.end)?,
        })
    }
}

impl SessionDraft {
    /// Check invariants and produce a session carrying `id`
    pub fn validate(self, id: Option<SessionId>) -> ValidationResult<Session> {
        let mut session = Session::new(
            self.category,
            self.description,
            self.date,
            self.start_time,
            self.end_time,
        )?;
        session.id = id;
        Ok(session)
    }
}

/// Parse "HH:MM" (a single-digit hour or minute is accepted)
pub fn parse_time_of_day(input: &str) -> ValidationResult<NaiveTime> {
    let malformed = || ValidationError::MalformedTime(input.trim().to_string());
    let (hour, minute) = input.trim().split_once(':').ok_or_else(malformed)?;
    let hour: u32 = hour.trim().parse().map_err(|_| malformed())?;
    let minute: u32 = minute.trim().parse().map_err(|_| malformed())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(malformed)
}

/// Parse an ISO-8601 calendar date, "YYYY-MM-DD", with a four-digit year
pub fn parse_date(input: &str) -> ValidationResult<NaiveDate> {
    let trimmed = input.trim();
    let malformed = || ValidationError::MalformedDate(trimmed.to_string());
    if !trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(malformed());
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| malformed())?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(malformed());
    }
    Ok(date)
}

/// Parse the year and month fields of the export form
pub fn parse_year_month(year: &str, month: &str) -> ValidationResult<(i32, u32)> {
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| ValidationError::MalformedNumber(year.trim().to_string()))?;
    let month: u32 = month
        .trim()
        .parse()
        .map_err(|_| ValidationError::MalformedNumber(month.trim().to_string()))?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(ValidationError::YearOutOfRange(year));
    }
    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidMonth);
    }
    Ok((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn valid_form() -> SessionForm {
        SessionForm {
            category: "U15".to_string(),
            description: "Physical work".to_string(),
            date: "2025-04-07".to_string(),
            start: "18:00".to_string(),
            end: "19:30".to_string(),
        }
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(parse_time_of_day("18:30"), Ok(t(18, 30)));
        assert_eq!(parse_time_of_day(" 8:05 "), Ok(t(8, 5)));
        assert_eq!(parse_time_of_day("00:00"), Ok(t(0, 0)));
    }

    #[test]
    fn test_parse_time_of_day_rejects_garbage() {
        for input in ["", "18", "18h30", "24:00", "12:60", "ab:cd", "-1:00"] {
            assert!(
                matches!(parse_time_of_day(input), Err(ValidationError::MalformedTime(_))),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-04-07"), Ok(d(2025, 4, 7)));
        assert_eq!(
            parse_date("07/04/2025"),
            Err(ValidationError::MalformedDate("07/04/2025".to_string()))
        );
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_parse_date_rejects_years_outside_four_digits() {
        for input in ["-0001-01-01", "-262143-01-01", "0000-01-01", "10000-01-01", "+2025-04-07"] {
            assert_eq!(
                parse_date(input),
                Err(ValidationError::MalformedDate(input.to_string())),
                "{input}"
            );
        }
        assert_eq!(parse_date("0001-01-01"), Ok(d(1, 1, 1)));
        assert_eq!(parse_date(" 9999-12-31 "), Ok(d(9999, 12, 31)));
    }

    #[test]
    fn test_parse_year_month() {
        assert_eq!(parse_year_month("2025", "4"), Ok((2025, 4)));
        assert_eq!(parse_year_month("2025", "13"), Err(ValidationError::InvalidMonth));
        assert_eq!(
            parse_year_month("-1", "4"),
            Err(ValidationError::YearOutOfRange(-1))
        );
        assert_eq!(
            parse_year_month("twenty", "4"),
            Err(ValidationError::MalformedNumber("twenty".to_string()))
        );
    }

    #[test]
    fn test_form_to_session() {
        let session = valid_form().parse().unwrap().validate(None).unwrap();
        assert_eq!(session.category, "U15");
        assert_eq!(session.date, d(2025, 4, 7));
        assert_eq!(session.start_time, t(18, 0));
        assert_eq!(session.end_time, t(19, 30));
        assert_eq!(session.id, None);
    }

    #[test]
    fn test_form_keeps_id_on_edit() {
        let id = SessionId::new(12);
        let session = valid_form().parse().unwrap().validate(Some(id)).unwrap();
        assert_eq!(session.id, Some(id));
    }

    #[test]
    fn test_form_rejects_inverted_range() {
        let mut form = valid_form();
        form.end = "17:00".to_string();
        let draft = form.parse().unwrap();
        assert_eq!(draft.validate(None), Err(ValidationError::EndNotAfterStart));
    }

    #[test]
    fn test_form_rejects_bad_time_before_validation() {
        let mut form = valid_form();
        form.end = "7pm".to_string();
        assert_eq!(form.parse(), Err(ValidationError::MalformedTime("7pm".to_string())));
    }

    #[test]
    fn test_prefill_round_trips() {
        let session = valid_form().parse().unwrap().validate(None).unwrap();
        assert_eq!(SessionForm::from_session(&session), valid_form());

        let slot = SessionForm::for_slot(d(2025, 4, 7), t(8, 30), t(9, 30));
        assert_eq!(slot.date, "2025-04-07");
        assert_eq!(slot.start, "08:30");
        assert_eq!(slot.end, "09:30");
        assert!(slot.category.is_empty());
    }
}
