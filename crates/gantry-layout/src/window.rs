//! Visible date window
//!
//! The window depends only on the item dates and today's date, never on the
//! zoom level, so switching zoom keeps the same date range on screen. Both
//! ends sit on month boundaries.

use chrono::NaiveDate;
use gantry_core::calendar::{end_of_month, months_spanned, shift_months, start_of_month};
use gantry_core::{TimeWindow, TimelineItem};

/// Months of padding before the earliest date
pub const LEAD_MONTHS: i32 = 1;

/// Months of padding after the latest date
pub const TRAIL_MONTHS: i32 = 1;

/// Shortest window, in calendar months; matches the default window
pub const MIN_SPAN_MONTHS: i32 = 5;

/// Window used when no item is scheduled: the month before the current one
/// through three months after it.
pub fn default_window(today: NaiveDate) -> TimeWindow {
    let month = start_of_month(today);
    TimeWindow::new(
        shift_months(month, -LEAD_MONTHS),
        end_of_month(shift_months(month, MIN_SPAN_MONTHS - LEAD_MONTHS - 1)),
    )
}

/// Derive the visible window from the item set.
///
/// Every date an item carries counts toward the extremes, including the lone
/// date of a half-scheduled item. Falls back to [`default_window`] when no
/// item has both dates.
pub fn resolve_window(items: &[TimelineItem], today: NaiveDate) -> TimeWindow {
    if !items.iter().any(|item| item.timing.is_scheduled()) {
        return default_window(today);
    }

    let bounds = items
        .iter()
        .flat_map(|item| item.timing.dates())
        .fold(None, |acc: Option<(NaiveDate, NaiveDate)>, date| match acc {
            Some((min, max)) => Some((min.min(date), max.max(date))),
            None => Some((date, date)),
        });
    let Some((earliest, latest)) = bounds else {
        return default_window(today);
    };

    let start = shift_months(start_of_month(earliest), -LEAD_MONTHS);
    let mut end = end_of_month(shift_months(start_of_month(latest), TRAIL_MONTHS));
    if months_spanned(start, end) < MIN_SPAN_MONTHS {
        end = end_of_month(shift_months(start, MIN_SPAN_MONTHS - 1));
    }
    TimeWindow::new(start, end)
}
