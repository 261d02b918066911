//! Calendar arithmetic shared by the layout engine
//!
//! All helpers work on `NaiveDate` and saturate at chrono's date limits
//! instead of panicking.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, Weekday};

use crate::DateError;

/// Parse an item date string.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DDTHH:MM:SS[.fff]`;
/// only the calendar date is kept. Blank input is a missing date, not an error.
pub fn parse_item_date(raw: &str) -> Result<Option<NaiveDate>, DateError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(stamp.date_naive()));
    }
    if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(stamp.date()));
    }
    Err(DateError::Unparseable(trimmed.to_string()))
}

/// Signed number of days from `from` to `to`
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    shift_months(start_of_month(date), 1)
        .pred_opt()
        .unwrap_or(date)
}

/// Move a date by whole calendar months, clamping the day to the target month
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(if months >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Monday of the ISO week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `YYYY-MM`
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Number of calendar months touched by `[start, end]`, counting both ends
pub fn months_spanned(start: NaiveDate, end: NaiveDate) -> i32 {
    if start > end {
        return 0;
    }
    (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32 + 1
}
