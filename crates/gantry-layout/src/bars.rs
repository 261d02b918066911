//! Bar geometry
//!
//! Maps an item's date span to a pixel offset and width relative to the
//! window's left edge. Week and month zoom divide by fixed 7- and 30-day unit
//! lengths, so month bars drift slightly from calendar columns on long spans.

use chrono::NaiveDate;
use gantry_core::calendar::days_between;
use gantry_core::{Bar, TimeWindow, Timing, ZoomLevel};

/// Bar for an item, or `None` when it is not scheduled
pub fn map_bar(timing: &Timing, window: &TimeWindow, zoom: ZoomLevel, unit_width: f64) -> Option<Bar> {
    match *timing {
        Timing::Scheduled { start, end } => Some(span_bar(start, end, window, zoom, unit_width)),
        Timing::Unscheduled { .. } => None,
    }
}

/// Bar for an inclusive `[start, end]` span.
///
/// `left` is pinned at the window edge and `width` never drops below half a
/// unit.
pub fn span_bar(start: NaiveDate, end: NaiveDate, window: &TimeWindow, zoom: ZoomLevel, unit_width: f64) -> Bar {
    let offset_days = days_between(window.start, start) as f64;
    let duration_days = (days_between(start, end) + 1) as f64;
    let days_per_unit = zoom.days_per_unit();

    Bar {
        left: (offset_days / days_per_unit * unit_width).max(0.0),
        width: (duration_days / days_per_unit * unit_width).max(unit_width / 2.0),
    }
}

/// Horizontal position of the start of `date`, unclamped
pub fn date_offset(date: NaiveDate, window: &TimeWindow, zoom: ZoomLevel, unit_width: f64) -> f64 {
    days_between(window.start, date) as f64 / zoom.days_per_unit() * unit_width
}
