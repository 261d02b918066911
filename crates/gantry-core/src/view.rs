//! Render model handed to renderers
//!
//! A `TimelineView` is a self-contained snapshot: every row already carries
//! its label, vertical position and bar geometry. The label column and the
//! grid are two projections of the same `rows` vector.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Bar, Column, GroupId, ItemId, MonthBand, SubGroupId, TimeWindow, ZoomLevel};

/// Everything a renderer needs to draw the timeline
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineView {
    pub zoom: ZoomLevel,
    pub unit_width: f64,
    pub today: NaiveDate,
    pub window: TimeWindow,
    pub columns: Vec<Column>,
    /// Only populated at day zoom
    pub month_bands: Vec<MonthBand>,
    /// Horizontal position of today, when it falls inside the window
    pub today_offset: Option<f64>,
    /// Distance from the left edge of the first column to `window.start`.
    /// Non-zero at week zoom when the window does not open on a Monday.
    pub grid_origin: f64,
    pub rows: Vec<RowView>,
}

/// A resolved row: hierarchy position plus geometry
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowView {
    /// Y offset of the row's top edge
    pub top: f64,
    pub height: u32,
    pub indent: usize,
    pub label: String,
    #[serde(flatten)]
    pub kind: RowViewKind,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RowViewKind {
    Group {
        group_id: GroupId,
        collapsed: bool,
        item_count: usize,
        color_index: usize,
        /// One bar per scheduled item; only filled while collapsed
        summary: Vec<Bar>,
    },
    #[serde(rename = "subgroup")]
    SubGroup {
        group_id: GroupId,
        sub_group_id: Option<SubGroupId>,
        accent_color: Option<String>,
        item_count: usize,
    },
    Task {
        item_id: ItemId,
        overdue: bool,
        accent_color: Option<String>,
        bar: Option<Bar>,
    },
}

/// One cell of the fixed label column
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabelCell {
    pub top: f64,
    pub height: u32,
    pub indent: usize,
    pub text: String,
    /// `Some(collapsed)` on group rows, which carry a collapse toggle
    pub toggle: Option<bool>,
    pub overdue: bool,
}

/// One row of the scrollable grid
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridRow {
    pub top: f64,
    pub height: u32,
    pub bars: Vec<Bar>,
    /// Bars are compressed summaries of a collapsed group
    pub summary: bool,
}

impl TimelineView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Convert a window-relative offset (bars, today) to a grid x position
    pub fn grid_x(&self, offset: f64) -> f64 {
        offset + self.grid_origin
    }

    /// Width of all columns, in grid coordinates
    pub fn grid_width(&self) -> f64 {
        self.columns.len() as f64 * self.unit_width
    }

    pub fn grid_height(&self) -> f64 {
        self.rows.iter().map(|row| f64::from(row.height)).sum()
    }

    pub fn label_column(&self) -> Vec<LabelCell> {
        self.rows
            .iter()
            .map(|row| LabelCell {
                top: row.top,
                height: row.height,
                indent: row.indent,
                text: row.label.clone(),
                toggle: match row.kind {
                    RowViewKind::Group { collapsed, .. } => Some(collapsed),
                    _ => None,
                },
                overdue: matches!(row.kind, RowViewKind::Task { overdue: true, .. }),
            })
            .collect()
    }

    pub fn grid(&self) -> Vec<GridRow> {
        self.rows
            .iter()
            .map(|row| {
                let (bars, summary) = match &row.kind {
                    RowViewKind::Group {
                        collapsed: true,
                        summary,
                        ..
                    } => (summary.clone(), true),
                    RowViewKind::Task { bar, .. } => (bar.iter().copied().collect(), false),
                    _ => (Vec::new(), false),
                };
                GridRow {
                    top: row.top,
                    height: row.height,
                    bars,
                    summary,
                }
            })
            .collect()
    }
}
