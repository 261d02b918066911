//! Display unit generation
//!
//! Produces the gap-free column sequence covering a window at the active zoom.

use chrono::{Duration, NaiveDate};
use gantry_core::calendar::{shift_months, start_of_month, week_start};
use gantry_core::{DisplayUnit, TimeWindow, ZoomLevel};

/// Start of the unit containing `date`
pub fn unit_start(date: NaiveDate, zoom: ZoomLevel) -> NaiveDate {
    match zoom {
        ZoomLevel::Day => date,
        ZoomLevel::Week => week_start(date),
        ZoomLevel::Month => start_of_month(date),
    }
}

/// Start of the unit following the one that begins at `start`
pub fn next_unit_start(start: NaiveDate, zoom: ZoomLevel) -> NaiveDate {
    match zoom {
        ZoomLevel::Day => start
            .checked_add_signed(Duration::days(1))
            .unwrap_or(NaiveDate::MAX),
        ZoomLevel::Week => start
            .checked_add_signed(Duration::days(7))
            .unwrap_or(NaiveDate::MAX),
        ZoomLevel::Month => shift_months(start, 1),
    }
}

/// Every unit overlapping the window, in order.
///
/// An inverted window yields no units.
pub fn generate_units(window: &TimeWindow, zoom: ZoomLevel) -> Vec<DisplayUnit> {
    let mut units = Vec::new();
    if window.is_inverted() {
        return units;
    }

    let mut current = unit_start(window.start, zoom);
    while current <= window.end {
        units.push(DisplayUnit::new(current, zoom));
        let next = next_unit_start(current, zoom);
        if next <= current {
            break;
        }
        current = next;
    }
    units
}
