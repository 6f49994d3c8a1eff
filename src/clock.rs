use chrono::{Local, NaiveDate, NaiveDateTime};

/// Trait for abstracting the current date, enabling testability
pub trait Clock {
    /// Today's local calendar date
    fn today(&self) -> NaiveDate;

    /// The current local wall-clock time
    fn now(&self) -> NaiveDateTime;
}

/// System clock implementation using real time
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stuck at one moment
#[cfg(test)]
#[derive(Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0.date()
    }

    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_system_clock_today() {
        let clock = SystemClock;
        // Should be a reasonable year
        assert!(clock.today().year() >= 2024);
    }

    #[test]
    fn test_system_clock_now_matches_today() {
        let clock = SystemClock;
        let now = clock.now();
        let today = clock.today();
        // Allow for the test straddling midnight
        assert!(now.date() == today || now.date().succ_opt() == Some(today));
    }

    #[test]
    fn test_fixed_clock() {
        let at = NaiveDate::from_ymd_opt(2025, 4, 9)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.today(), at.date());
        assert_eq!(clock.now(), at);
    }
}
