//! Column annotation and month bands

use chrono::NaiveDate;
use gantry_core::calendar::{is_weekend, month_key};
use gantry_core::{Column, DisplayUnit, MonthBand, ZoomLevel};

/// Short header label: `05` (day), `05/06` (week), `Jun 24` (month)
pub fn column_label(unit: &DisplayUnit) -> String {
    let format = match unit.zoom {
        ZoomLevel::Day => "%d",
        ZoomLevel::Week => "%d/%m",
        ZoomLevel::Month => "%b %y",
    };
    unit.start.format(format).to_string()
}

pub fn annotate_columns(units: &[DisplayUnit], today: NaiveDate) -> Vec<Column> {
    units
        .iter()
        .map(|unit| Column {
            unit: *unit,
            is_current_period: unit.contains(today),
            is_weekend: unit.zoom == ZoomLevel::Day && is_weekend(unit.start),
            label: column_label(unit),
        })
        .collect()
}

/// Group contiguous day columns into per-month super-headers.
///
/// Only day zoom has bands; any other zoom yields none.
pub fn month_bands(columns: &[Column], unit_width: f64) -> Vec<MonthBand> {
    let mut bands = Vec::new();
    if columns.iter().any(|c| c.unit.zoom != ZoomLevel::Day) {
        return bands;
    }

    let mut current: Option<(String, NaiveDate, usize)> = None;
    for column in columns {
        let key = month_key(column.unit.start);
        if let Some((band_key, _, count)) = current.as_mut() {
            if *band_key == key {
                *count += 1;
                continue;
            }
        }
        if let Some(done) = current.replace((key, column.unit.start, 1)) {
            bands.push(finish_band(done, unit_width));
        }
    }
    if let Some(done) = current {
        bands.push(finish_band(done, unit_width));
    }
    bands
}

fn finish_band((month_key, first, unit_count): (String, NaiveDate, usize), unit_width: f64) -> MonthBand {
    MonthBand {
        month_key,
        unit_count,
        width: unit_count as f64 * unit_width,
        label: first.format("%B %Y").to_string(),
    }
}
