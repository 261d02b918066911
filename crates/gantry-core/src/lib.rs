//! # gantry-core
//!
//! Core domain model and traits for the gantry timeline layout engine.
//!
//! This crate provides:
//! - Input types: `WorkItem` and its parsed form `TimelineItem`
//! - Geometry types: `TimeWindow`, `DisplayUnit`, `Column`, `MonthBand`, `Bar`
//! - Hierarchy types: `Row`, `RowKind`, `CollapseState`
//! - The render model `TimelineView` and the `Renderer` trait
//! - Layout configuration and error types
//!
//! ## Example
//!
//! ```rust
//! use gantry_core::{TimelineItem, Timing, WorkItem};
//!
//! let item = WorkItem::new("t1", "g1")
//!     .group_name("Website Relaunch")
//!     .sub_group("design")
//!     .label("Wireframes")
//!     .dates("2024-06-01", "2024-06-05");
//!
//! let parsed = TimelineItem::new(item);
//! assert!(matches!(parsed.timing, Timing::Scheduled { .. }));
//! ```

pub mod calendar;
pub mod config;
pub mod rows;
pub mod view;

pub use config::{LayoutConfig, RowHeights, UnitWidths};
pub use rows::{CollapseState, Row, RowKind};
pub use view::{GridRow, LabelCell, RowView, RowViewKind, TimelineView};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Unique identifier for a work item
pub type ItemId = String;

/// Unique identifier for a top-level group (e.g. a project)
pub type GroupId = String;

/// Unique identifier for a sub-group (e.g. a phase)
pub type SubGroupId = String;

// ============================================================================
// Zoom
// ============================================================================

/// Granularity of the time grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomLevel {
    /// One column per calendar day
    Day,
    /// One column per ISO week (Monday start)
    #[default]
    Week,
    /// One column per calendar month
    Month,
}

impl ZoomLevel {
    pub const ALL: [ZoomLevel; 3] = [ZoomLevel::Day, ZoomLevel::Week, ZoomLevel::Month];

    /// Number of days one unit stands for in bar geometry.
    ///
    /// Months are approximated as 30 days.
    pub fn days_per_unit(self) -> f64 {
        match self {
            ZoomLevel::Day => 1.0,
            ZoomLevel::Week => 7.0,
            ZoomLevel::Month => 30.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZoomLevel::Day => "day",
            ZoomLevel::Week => "week",
            ZoomLevel::Month => "month",
        }
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoomLevel {
    type Err = ParseZoomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "days" | "d" => Ok(ZoomLevel::Day),
            "week" | "weeks" | "w" => Ok(ZoomLevel::Week),
            "month" | "months" | "m" => Ok(ZoomLevel::Month),
            _ => Err(ParseZoomError(s.to_string())),
        }
    }
}

// ============================================================================
// Time Window & Units
// ============================================================================

/// Visible date range of the timeline, both ends inclusive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// True when `start > end`; such a window covers no days
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, counting both ends
    pub fn num_days(&self) -> i64 {
        if self.is_inverted() {
            0
        } else {
            calendar::days_between(self.start, self.end) + 1
        }
    }
}

/// One column of the time grid at a given granularity
///
/// `start` is the day itself, the Monday of the week, or the first of the month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayUnit {
    pub start: NaiveDate,
    pub zoom: ZoomLevel,
}

impl DisplayUnit {
    pub fn new(start: NaiveDate, zoom: ZoomLevel) -> Self {
        Self { start, zoom }
    }

    /// Last day covered by this unit
    pub fn end(&self) -> NaiveDate {
        match self.zoom {
            ZoomLevel::Day => self.start,
            ZoomLevel::Week => self.start + chrono::Duration::days(6),
            ZoomLevel::Month => calendar::end_of_month(self.start),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.zoom {
            ZoomLevel::Day => date == self.start,
            ZoomLevel::Week => calendar::week_start(date) == self.start,
            ZoomLevel::Month => date.year() == self.start.year() && date.month() == self.start.month(),
        }
    }
}

/// A display unit decorated for the header row
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub unit: DisplayUnit,
    pub is_current_period: bool,
    /// Only ever set at day zoom
    pub is_weekend: bool,
    pub label: String,
}

/// Super-header spanning the day columns of one month
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonthBand {
    /// `YYYY-MM`
    pub month_key: String,
    /// Number of day columns in the band
    pub unit_count: usize,
    /// `unit_count` times the unit width, in pixels
    pub width: f64,
    pub label: String,
}

/// Horizontal placement of an item bar, in pixels from the window's left edge
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub left: f64,
    pub width: f64,
}

impl Bar {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

// ============================================================================
// Work Items
// ============================================================================

/// A dated unit of work as delivered by the data layer
///
/// Dates arrive as strings and may be missing or malformed; see
/// [`TimelineItem`] for the parsed form the engine works on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: ItemId,
    pub group_id: GroupId,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub sub_group_id: Option<SubGroupId>,
    #[serde(default)]
    pub sub_group_name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub accent_color: Option<String>,
    #[serde(default)]
    pub is_overdue: bool,
}

impl WorkItem {
    pub fn new(id: impl Into<ItemId>, group_id: impl Into<GroupId>) -> Self {
        let group_id = group_id.into();
        Self {
            id: id.into(),
            group_name: group_id.clone(),
            group_id,
            sub_group_id: None,
            sub_group_name: None,
            start_date: None,
            end_date: None,
            label: String::new(),
            accent_color: None,
            is_overdue: false,
        }
    }

    pub fn group_name(mut self, name: impl Into<String>) -> Self {
        self.group_name = name.into();
        self
    }

    pub fn sub_group(mut self, id: impl Into<SubGroupId>) -> Self {
        self.sub_group_id = Some(id.into());
        self
    }

    pub fn sub_group_name(mut self, name: impl Into<String>) -> Self {
        self.sub_group_name = Some(name.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn start(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    pub fn end(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    pub fn dates(self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start(start).end(end)
    }

    pub fn accent_color(mut self, color: impl Into<String>) -> Self {
        self.accent_color = Some(color.into());
        self
    }

    pub fn overdue(mut self) -> Self {
        self.is_overdue = true;
        self
    }
}

/// Whether an item can be drawn as a bar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Timing {
    /// Both dates present and parsed
    Scheduled { start: NaiveDate, end: NaiveDate },
    /// At least one date missing or unparseable; whatever did parse is kept
    /// so it can still widen the time window
    Unscheduled {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl Timing {
    pub fn from_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => Timing::Scheduled { start, end },
            (start, end) => Timing::Unscheduled { start, end },
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, Timing::Scheduled { .. })
    }

    pub fn start(&self) -> Option<NaiveDate> {
        match *self {
            Timing::Scheduled { start, .. } => Some(start),
            Timing::Unscheduled { start, .. } => start,
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match *self {
            Timing::Scheduled { end, .. } => Some(end),
            Timing::Unscheduled { end, .. } => end,
        }
    }

    /// Every date that is present, start first
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.start().into_iter().chain(self.end())
    }
}

/// A work item with its dates parsed once, up front
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineItem {
    pub item: WorkItem,
    pub timing: Timing,
}

impl TimelineItem {
    /// Parse an item's dates. Unparseable dates are logged and treated as missing.
    pub fn new(item: WorkItem) -> Self {
        let start = parse_logged(&item.id, "startDate", item.start_date.as_deref());
        let end = parse_logged(&item.id, "endDate", item.end_date.as_deref());
        Self {
            timing: Timing::from_dates(start, end),
            item,
        }
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }

    pub fn group_id(&self) -> &str {
        &self.item.group_id
    }

    /// `None` buckets the item under the synthetic "ungrouped" sub-group
    pub fn sub_group_id(&self) -> Option<&str> {
        self.item
            .sub_group_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }
}

impl From<WorkItem> for TimelineItem {
    fn from(item: WorkItem) -> Self {
        Self::new(item)
    }
}

fn parse_logged(item_id: &str, field: &'static str, raw: Option<&str>) -> Option<NaiveDate> {
    match calendar::parse_item_date(raw?) {
        Ok(date) => date,
        Err(err) => {
            tracing::warn!(item = item_id, field, %err, "ignoring item date");
            None
        }
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering of a computed timeline
pub trait Renderer {
    type Output;

    /// Render a timeline view to the output format
    fn render(&self, view: &TimelineView) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Date string that is neither blank nor a recognised calendar format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Unparseable date: {0:?}")]
    Unparseable(String),
}

/// Unknown zoom level name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown zoom level: {0:?} (expected day, week or month)")]
pub struct ParseZoomError(pub String);

/// Layout configuration rejected by [`LayoutConfig::validate`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Unit width for {zoom} zoom must be a positive number, got {width}")]
    InvalidUnitWidth { zoom: ZoomLevel, width: f64 },

    #[error("Row height for {kind} rows must be at least 1 pixel")]
    InvalidRowHeight { kind: &'static str },

    #[error("Palette size must be at least 1")]
    EmptyPalette,
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn zoom_parses_common_spellings() {
        assert_eq!("day".parse::<ZoomLevel>().unwrap(), ZoomLevel::Day);
        assert_eq!("Weeks".parse::<ZoomLevel>().unwrap(), ZoomLevel::Week);
        assert_eq!(" m ".parse::<ZoomLevel>().unwrap(), ZoomLevel::Month);
        assert!("quarter".parse::<ZoomLevel>().is_err());
    }

    #[test]
    fn zoom_round_trips_through_display() {
        for zoom in ZoomLevel::ALL {
            assert_eq!(zoom.to_string().parse::<ZoomLevel>().unwrap(), zoom);
        }
    }

    #[test]
    fn window_day_count_is_inclusive() {
        let window = TimeWindow::new(date(2024, 6, 1), date(2024, 6, 30));
        assert_eq!(window.num_days(), 30);
        assert!(window.contains(date(2024, 6, 30)));

        let inverted = TimeWindow::new(date(2024, 7, 1), date(2024, 6, 1));
        assert!(inverted.is_inverted());
        assert_eq!(inverted.num_days(), 0);
    }

    #[test]
    fn display_unit_ends() {
        let week = DisplayUnit::new(date(2024, 6, 3), ZoomLevel::Week);
        assert_eq!(week.end(), date(2024, 6, 9));
        assert!(week.contains(date(2024, 6, 9)));
        assert!(!week.contains(date(2024, 6, 10)));

        let month = DisplayUnit::new(date(2024, 2, 1), ZoomLevel::Month);
        assert_eq!(month.end(), date(2024, 2, 29));
        assert!(month.contains(date(2024, 2, 15)));
        assert!(!month.contains(date(2025, 2, 15)));
    }

    #[test]
    fn timeline_item_with_both_dates_is_scheduled() {
        let item = TimelineItem::new(WorkItem::new("t1", "g").dates("2024-06-01", "2024-06-05"));
        assert_eq!(
            item.timing,
            Timing::Scheduled {
                start: date(2024, 6, 1),
                end: date(2024, 6, 5)
            }
        );
    }

    #[test]
    fn timeline_item_keeps_the_date_it_has() {
        let item = TimelineItem::new(WorkItem::new("t1", "g").start("2024-06-01"));
        assert!(!item.timing.is_scheduled());
        assert_eq!(item.timing.start(), Some(date(2024, 6, 1)));
        assert_eq!(item.timing.end(), None);
        assert_eq!(item.timing.dates().count(), 1);
    }

    #[test]
    fn timeline_item_unparseable_date_is_unscheduled() {
        let item = TimelineItem::new(WorkItem::new("t1", "g").dates("2024-06-01", "next week"));
        assert_eq!(
            item.timing,
            Timing::Unscheduled {
                start: Some(date(2024, 6, 1)),
                end: None
            }
        );
    }

    #[test]
    fn blank_sub_group_counts_as_ungrouped() {
        let item = TimelineItem::new(WorkItem::new("t1", "g").sub_group("  "));
        assert_eq!(item.sub_group_id(), None);
    }

    #[test]
    fn work_item_deserializes_from_camel_case() {
        let item: WorkItem = serde_json::from_str(
            r#"{
                "id": "t1",
                "groupId": "p1",
                "groupName": "Website Relaunch",
                "subGroupId": "phase-a",
                "startDate": "2024-06-01",
                "endDate": null,
                "label": "Kickoff",
                "isOverdue": true
            }"#,
        )
        .unwrap();
        assert_eq!(item.group_id, "p1");
        assert_eq!(item.sub_group_id.as_deref(), Some("phase-a"));
        assert_eq!(item.end_date, None);
        assert_eq!(item.accent_color, None);
        assert!(item.is_overdue);
    }

    /// Collects formatted log output written by a test subscriber
    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs.contents())
    }

    #[test]
    fn unparseable_date_is_logged_as_warning() {
        let (item, logs) = with_captured_logs(|| {
            TimelineItem::new(WorkItem::new("t7", "g1").dates("2024-06-01", "next week"))
        });
        assert!(!item.timing.is_scheduled());
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("ignoring item date"), "{logs}");
        assert!(logs.contains("t7"), "{logs}");
        assert!(logs.contains("endDate"), "{logs}");
    }

    #[test]
    fn blank_and_valid_dates_log_nothing() {
        let (item, logs) = with_captured_logs(|| {
            TimelineItem::new(WorkItem::new("t8", "g1").dates("2024-06-01", "  "))
        });
        assert_eq!(item.timing.start(), Some(date(2024, 6, 1)));
        assert!(logs.is_empty(), "{logs}");
    }
}
