//! Timeline controller
//!
//! Owns the only mutable state of the engine (zoom level and collapsed
//! groups) plus the current item list, and recomputes the derived layout
//! from scratch whenever any of them changes. Bar geometry is not part of
//! the stored layout; it is computed on demand for the rows being drawn.

use chrono::NaiveDate;
use gantry_core::{
    Bar, CollapseState, Column, ConfigError, DisplayUnit, LayoutConfig, MonthBand, Row, RowKind,
    RowView, RowViewKind, TimeWindow, TimelineItem, TimelineView, WorkItem, ZoomLevel,
};

use crate::bars::{date_offset, map_bar};
use crate::columns::{annotate_columns, month_bands};
use crate::hierarchy::{build_rows, group_ids};
use crate::units::generate_units;
use crate::window::resolve_window;

/// Everything derived from items, zoom, collapse state and today
#[derive(Clone, Debug)]
struct Layout {
    window: TimeWindow,
    units: Vec<DisplayUnit>,
    columns: Vec<Column>,
    month_bands: Vec<MonthBand>,
    rows: Vec<Row>,
}

/// Single entry point of the layout engine
#[derive(Clone, Debug)]
pub struct TimelineController {
    config: LayoutConfig,
    today: NaiveDate,
    items: Vec<TimelineItem>,
    zoom: ZoomLevel,
    collapsed: CollapseState,
    layout: Layout,
}

impl TimelineController {
    /// Create an empty controller. `today` drives the current-period flags
    /// and the fallback window.
    pub fn new(config: LayoutConfig, today: NaiveDate) -> Self {
        let zoom = ZoomLevel::default();
        let collapsed = CollapseState::new();
        let layout = compute_layout(&[], zoom, &collapsed, &config, today);
        Self {
            config,
            today,
            items: Vec::new(),
            zoom,
            collapsed,
            layout,
        }
    }

    /// Like [`TimelineController::new`], rejecting an invalid configuration
    pub fn try_new(config: LayoutConfig, today: NaiveDate) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, today))
    }

    pub fn with_items(mut self, items: impl IntoIterator<Item = WorkItem>) -> Self {
        self.set_items(items);
        self
    }

    pub fn with_zoom(mut self, zoom: ZoomLevel) -> Self {
        self.set_zoom(zoom);
        self
    }

    // ------------------------------------------------------------------
    // State changes
    // ------------------------------------------------------------------

    /// Replace the item list. Collapse state is kept, including entries for
    /// groups that no longer exist.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = WorkItem>) {
        self.items = items.into_iter().map(TimelineItem::new).collect();
        self.recompute();
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        if self.today != today {
            self.today = today;
            self.recompute();
        }
    }

    /// Switch zoom level. The window is never affected.
    pub fn set_zoom(&mut self, zoom: ZoomLevel) {
        if self.zoom != zoom {
            tracing::trace!(from = %self.zoom, to = %zoom, "zoom changed");
            self.zoom = zoom;
            self.recompute();
        }
    }

    /// Flip one group; returns whether it is now collapsed
    pub fn toggle_collapse(&mut self, group_id: &str) -> bool {
        let now_collapsed = self.collapsed.toggle(group_id);
        tracing::trace!(group = group_id, collapsed = now_collapsed, "collapse toggled");
        self.recompute();
        now_collapsed
    }

    /// Returns `true` if this changed anything
    pub fn collapse(&mut self, group_id: &str) -> bool {
        let changed = self.collapsed.collapse(group_id);
        if changed {
            self.recompute();
        }
        changed
    }

    /// Returns `true` if this changed anything
    pub fn expand(&mut self, group_id: &str) -> bool {
        let changed = self.collapsed.expand(group_id);
        if changed {
            self.recompute();
        }
        changed
    }

    /// Collapse every group currently present in the item list
    pub fn collapse_all(&mut self) {
        let ids: Vec<String> = group_ids(&self.items).into_iter().map(String::from).collect();
        for id in ids {
            self.collapsed.collapse(id);
        }
        self.recompute();
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.layout = compute_layout(&self.items, self.zoom, &self.collapsed, &self.config, self.today);
        tracing::debug!(
            zoom = %self.zoom,
            items = self.items.len(),
            columns = self.layout.columns.len(),
            rows = self.layout.rows.len(),
            window_start = %self.layout.window.start,
            window_end = %self.layout.window.end,
            "timeline recomputed"
        );
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn collapse_state(&self) -> &CollapseState {
        &self.collapsed
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn window(&self) -> TimeWindow {
        self.layout.window
    }

    pub fn units(&self) -> &[DisplayUnit] {
        &self.layout.units
    }

    pub fn columns(&self) -> &[Column] {
        &self.layout.columns
    }

    pub fn month_bands(&self) -> &[MonthBand] {
        &self.layout.month_bands
    }

    pub fn rows(&self) -> &[Row] {
        &self.layout.rows
    }

    /// Pixel width of one column at the current zoom
    pub fn unit_width(&self) -> f64 {
        self.config.unit_widths.for_zoom(self.zoom)
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Bar of a task row; `None` for other rows and unscheduled items
    pub fn bar_for_row(&self, row: usize) -> Option<Bar> {
        let item = self.layout.rows.get(row)?.task_item()?;
        self.bar_for_item(item)
    }

    /// Bar of the item at `index` in [`TimelineController::items`]
    pub fn bar_for_item(&self, index: usize) -> Option<Bar> {
        let item = self.items.get(index)?;
        map_bar(&item.timing, &self.layout.window, self.zoom, self.unit_width())
    }

    /// Compressed bars of a collapsed group row, one per scheduled item
    pub fn summary_bars(&self, row: usize) -> Vec<Bar> {
        match self.layout.rows.get(row).map(|r| &r.kind) {
            Some(RowKind::Group {
                collapsed: true,
                items,
                ..
            }) => items.iter().filter_map(|&i| self.bar_for_item(i)).collect(),
            _ => Vec::new(),
        }
    }

    /// X position of today's marker, if today is inside the window
    pub fn today_offset(&self) -> Option<f64> {
        let window = &self.layout.window;
        window
            .contains(self.today)
            .then(|| date_offset(self.today, window, self.zoom, self.unit_width()))
    }

    /// How far `window.start` sits from the left edge of the first column.
    ///
    /// Bars and the today marker are measured from the window start, but
    /// week columns begin on the Monday before it.
    pub fn grid_origin(&self) -> f64 {
        self.layout.columns.first().map_or(0.0, |column| {
            -date_offset(column.unit.start, &self.layout.window, self.zoom, self.unit_width())
        })
    }

    /// Y offset of each row's top edge
    pub fn row_tops(&self) -> Vec<f64> {
        self.layout
            .rows
            .iter()
            .scan(0.0, |top, row| {
                let current = *top;
                *top += f64::from(row.height);
                Some(current)
            })
            .collect()
    }

    /// Snapshot of the current layout with geometry resolved for every
    /// visible row
    pub fn view(&self) -> TimelineView {
        let rows = self
            .layout
            .rows
            .iter()
            .zip(self.row_tops())
            .enumerate()
            .map(|(index, (row, top))| self.row_view(index, row, top))
            .collect();

        TimelineView {
            zoom: self.zoom,
            unit_width: self.unit_width(),
            today: self.today,
            window: self.layout.window,
            columns: self.layout.columns.clone(),
            month_bands: self.layout.month_bands.clone(),
            today_offset: self.today_offset(),
            grid_origin: self.grid_origin(),
            rows,
        }
    }

    fn row_view(&self, index: usize, row: &Row, top: f64) -> RowView {
        let (label, kind) = match &row.kind {
            RowKind::Group {
                group_id,
                name,
                collapsed,
                item_count,
                color_index,
                ..
            } => (
                name.clone(),
                RowViewKind::Group {
                    group_id: group_id.clone(),
                    collapsed: *collapsed,
                    item_count: *item_count,
                    color_index: *color_index,
                    summary: self.summary_bars(index),
                },
            ),
            RowKind::SubGroup {
                group_id,
                sub_group_id,
                name,
                accent_color,
                item_count,
            } => (
                name.clone(),
                RowViewKind::SubGroup {
                    group_id: group_id.clone(),
                    sub_group_id: sub_group_id.clone(),
                    accent_color: accent_color.clone(),
                    item_count: *item_count,
                },
            ),
            RowKind::Task { item } => {
                let work = &self.items[*item].item;
                let label = if work.label.trim().is_empty() {
                    work.id.clone()
                } else {
                    work.label.clone()
                };
                (
                    label,
                    RowViewKind::Task {
                        item_id: work.id.clone(),
                        overdue: work.is_overdue,
                        accent_color: work.accent_color.clone(),
                        bar: self.bar_for_item(*item),
                    },
                )
            }
        };

        RowView {
            top,
            height: row.height,
            indent: row.indent,
            label,
            kind,
        }
    }
}

fn compute_layout(
    items: &[TimelineItem],
    zoom: ZoomLevel,
    collapsed: &CollapseState,
    config: &LayoutConfig,
    today: NaiveDate,
) -> Layout {
    let window = resolve_window(items, today);
    let units = generate_units(&window, zoom);
    let columns = annotate_columns(&units, today);
    let month_bands = month_bands(&columns, config.unit_widths.for_zoom(zoom));
    let rows = build_rows(items, collapsed, config);
    Layout {
        window,
        units,
        columns,
        month_bands,
        rows,
    }
}
