//! Layout configuration
//!
//! Pixel sizes are chosen by the presentation layer; the engine only
//! multiplies by them. Every field has a default so a partial TOML file
//! is enough to override one value.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, RowKind, ZoomLevel};

/// Layout engine configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Pixel width of one column, per zoom level
    pub unit_widths: UnitWidths,
    /// Pixel height of each row kind
    pub row_heights: RowHeights,
    /// Number of accent colors groups are spread over
    pub palette_size: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            unit_widths: UnitWidths::default(),
            row_heights: RowHeights::default(),
            palette_size: 8,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the column width for one zoom level
    pub fn unit_width(mut self, zoom: ZoomLevel, width: f64) -> Self {
        self.unit_widths.set(zoom, width);
        self
    }

    pub fn row_heights(mut self, heights: RowHeights) -> Self {
        self.row_heights = heights;
        self
    }

    pub fn palette_size(mut self, size: usize) -> Self {
        self.palette_size = size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for zoom in ZoomLevel::ALL {
            let width = self.unit_widths.for_zoom(zoom);
            if !width.is_finite() || width <= 0.0 {
                return Err(ConfigError::InvalidUnitWidth { zoom, width });
            }
        }
        let heights = &self.row_heights;
        for (kind, height) in [
            ("group", heights.group),
            ("sub-group", heights.sub_group),
            ("task", heights.task),
        ] {
            if height == 0 {
                return Err(ConfigError::InvalidRowHeight { kind });
            }
        }
        if self.palette_size == 0 {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(())
    }
}

/// Column width in pixels for each zoom level
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitWidths {
    pub day: f64,
    pub week: f64,
    pub month: f64,
}

impl Default for UnitWidths {
    fn default() -> Self {
        Self {
            day: 36.0,
            week: 84.0,
            month: 120.0,
        }
    }
}

impl UnitWidths {
    pub fn for_zoom(&self, zoom: ZoomLevel) -> f64 {
        match zoom {
            ZoomLevel::Day => self.day,
            ZoomLevel::Week => self.week,
            ZoomLevel::Month => self.month,
        }
    }

    pub fn set(&mut self, zoom: ZoomLevel, width: f64) {
        match zoom {
            ZoomLevel::Day => self.day = width,
            ZoomLevel::Week => self.week = width,
            ZoomLevel::Month => self.month = width,
        }
    }
}

/// Row height in pixels for each row kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowHeights {
    pub group: u32,
    pub sub_group: u32,
    pub task: u32,
}

impl Default for RowHeights {
    fn default() -> Self {
        Self {
            group: 36,
            sub_group: 32,
            task: 32,
        }
    }
}

impl RowHeights {
    pub fn for_kind(&self, kind: &RowKind) -> u32 {
        match kind {
            RowKind::Group { .. } => self.group,
            RowKind::SubGroup { .. } => self.sub_group,
            RowKind::Task { .. } => self.task,
        }
    }
}
