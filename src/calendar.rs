use chrono::{Datelike, Days, NaiveDate};

/// Monday and Sunday of the week containing `date`.
///
/// At the ends of chrono's date range the week is cut short rather than
/// overflowing.
pub fn week_of(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = u64::from(date.weekday().num_days_from_monday());
    let monday = date
        .checked_sub_days(Days::new(offset))
        .unwrap_or(NaiveDate::MIN);
    let sunday = monday
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX);
    (monday, sunday)
}

/// The seven dates of the week containing `date`, Monday first
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let (monday, _) = week_of(date);
    std::array::from_fn(|i| {
        monday
            .checked_add_days(Days::new(i as u64))
            .unwrap_or(NaiveDate::MAX)
    })
}

/// First and last day of a calendar month, or `None` if the month is invalid
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}

/// Move `date` by a whole number of weeks, staying put past the end of the calendar
pub fn shift_weeks(date: NaiveDate, weeks: i64) -> NaiveDate {
    let days = Days::new(weeks.unsigned_abs().saturating_mul(7));
    let shifted = if weeks >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    };
    shifted.unwrap_or(date)
}

/// Move a (year, month) pair by a number of months
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// "Week 15, 2025" using ISO week numbering
pub fn iso_week_label(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("Week {}, {}", week.week(), week.year())
}
