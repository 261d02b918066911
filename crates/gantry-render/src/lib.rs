//! # gantry-render
//!
//! Rendering backends for gantry timeline views.
//!
//! This crate provides:
//! - Plain-text timeline rendering (fixed label column + character grid)
//! - JSON export of the full render model
//!
//! ## Example
//!
//! ```rust,ignore
//! use gantry_core::Renderer;
//! use gantry_render::{JsonRenderer, TextRenderer};
//!
//! let view = timeline.view();
//! let text = TextRenderer::new().label_width(32).render(&view)?;
//! let json = JsonRenderer::new().render(&view)?;
//! ```

pub mod json;

pub use json::JsonRenderer;

use gantry_core::{Bar, RenderError, Renderer, RowView, RowViewKind, TimelineView, ZoomLevel};

const TASK_FILL: char = '█';
const SUMMARY_FILL: char = '░';
const TODAY_MARK: char = '┆';
const WEEKEND_FILL: char = '·';
const SEPARATOR: char = '│';

/// Narrowest automatic cell, enough for a day-of-month label and a gap
const MIN_CELL_WIDTH: usize = 3;
/// Absorbs float noise when a position lands exactly on a cell boundary
const CELL_EPSILON: f64 = 1e-6;

/// Plain-text timeline renderer configuration
#[derive(Clone, Debug)]
pub struct TextRenderer {
    /// Width of the label column in characters
    pub label_width: usize,
    /// Characters per display unit; sized to fit the widest column label
    /// when unset
    pub cell_width: Option<usize>,
    /// Show the month band line at day zoom
    pub show_month_bands: bool,
    /// Draw the today marker
    pub show_today: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            label_width: 28,
            cell_width: None,
            show_month_bands: true,
            show_today: true,
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure label column width
    pub fn label_width(mut self, width: usize) -> Self {
        self.label_width = width;
        self
    }

    /// Configure characters per unit
    pub fn cell_width(mut self, width: usize) -> Self {
        self.cell_width = Some(width.max(1));
        self
    }

    /// Hide the month band line
    pub fn hide_month_bands(mut self) -> Self {
        self.show_month_bands = false;
        self
    }

    /// Hide the today marker
    pub fn hide_today(mut self) -> Self {
        self.show_today = false;
        self
    }

    fn resolve_cell_width(&self, view: &TimelineView) -> usize {
        self.cell_width.unwrap_or_else(|| {
            let widest = view
                .columns
                .iter()
                .map(|column| column.label.chars().count())
                .max()
                .unwrap_or(0);
            (widest + 1).max(MIN_CELL_WIDTH)
        })
    }

    fn blank_label(&self) -> String {
        " ".repeat(self.label_width)
    }

    fn render_bands(&self, view: &TimelineView, grid: &CharGrid) -> String {
        let mut line = self.blank_label();
        line.push(SEPARATOR);
        for band in &view.month_bands {
            let width = band.unit_count * grid.cell_width;
            line.push_str(&fit(&band.label, width));
        }
        line
    }

    fn render_header(&self, view: &TimelineView, grid: &CharGrid) -> String {
        let mut line = fit("", self.label_width);
        line.push(SEPARATOR);
        for column in &view.columns {
            line.push_str(&fit(&column.label, grid.cell_width));
        }
        line
    }

    fn render_label(&self, row: &RowView) -> String {
        let icon = match row.kind {
            RowViewKind::Group { collapsed: true, .. } => "▶ ",
            RowViewKind::Group { collapsed: false, .. } => "▼ ",
            RowViewKind::Task { overdue: true, .. } => "! ",
            _ => "",
        };
        let text = format!("{}{}{}", "  ".repeat(row.indent), icon, row.label);
        fit(&text, self.label_width)
    }

    /// Background cells: weekend shading at day zoom and the today marker
    fn background(&self, view: &TimelineView, grid: &CharGrid) -> Vec<char> {
        let mut cells = vec![' '; view.columns.len() * grid.cell_width];
        if view.zoom == ZoomLevel::Day {
            for (index, column) in view.columns.iter().enumerate() {
                if column.is_weekend {
                    let start = index * grid.cell_width;
                    cells[start..start + grid.cell_width].fill(WEEKEND_FILL);
                }
            }
        }
        if self.show_today {
            if let Some(offset) = view.today_offset {
                if let Some(cell) = cells.get_mut(grid.cell_at(offset)) {
                    *cell = TODAY_MARK;
                }
            }
        }
        cells
    }
}

/// Maps window-relative pixel offsets onto character cells.
///
/// Offsets are shifted by the grid origin first, so a date lands under the
/// column whose unit contains it.
struct CharGrid {
    cell_width: usize,
    unit_width: f64,
    origin: f64,
}

impl CharGrid {
    fn position(&self, px: f64) -> f64 {
        (px + self.origin) / self.unit_width * self.cell_width as f64
    }

    /// Cell containing the offset
    fn cell_at(&self, px: f64) -> usize {
        (self.position(px) + CELL_EPSILON).floor().max(0.0) as usize
    }

    /// First cell right of the offset
    fn cell_after(&self, px: f64) -> usize {
        (self.position(px) - CELL_EPSILON).ceil().max(0.0) as usize
    }

    fn paint(&self, cells: &mut [char], bar: &Bar, fill: char) {
        let start = self.cell_at(bar.left).min(cells.len());
        let end = self.cell_after(bar.right()).max(start + 1).min(cells.len());
        cells[start..end].fill(fill);
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, view: &TimelineView) -> Result<String, RenderError> {
        if view.columns.is_empty() {
            return Err(RenderError::InvalidData("Timeline has no columns".into()));
        }
        if !view.unit_width.is_finite() || view.unit_width <= 0.0 {
            return Err(RenderError::InvalidData(format!(
                "Unit width must be positive, got {}",
                view.unit_width
            )));
        }

        let grid = CharGrid {
            cell_width: self.resolve_cell_width(view),
            unit_width: view.unit_width,
            origin: view.grid_origin,
        };

        let mut lines = Vec::with_capacity(view.rows.len() + 2);
        if self.show_month_bands && !view.month_bands.is_empty() {
            lines.push(self.render_bands(view, &grid));
        }
        lines.push(self.render_header(view, &grid));

        let background = self.background(view, &grid);
        for (row, cell) in view.rows.iter().zip(view.grid()) {
            let fill = if cell.summary { SUMMARY_FILL } else { TASK_FILL };
            let mut cells = background.clone();
            for bar in &cell.bars {
                grid.paint(&mut cells, bar, fill);
            }

            let mut line = self.render_label(row);
            line.push(SEPARATOR);
            line.extend(cells);
            lines.push(line.trim_end().to_string());
        }

        let mut output = lines.join("\n");
        output.push('\n');
        Ok(output)
    }
}

/// Truncate with an ellipsis, then pad to exactly `width` characters
fn fit(s: &str, width: usize) -> String {
    let text = if s.chars().count() <= width {
        s.to_string()
    } else if width == 0 {
        String::new()
    } else {
        format!("{}…", s.chars().take(width - 1).collect::<String>())
    };
    format!("{:<width$}", text, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gantry_core::{Column, DisplayUnit, TimeWindow};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn week_view(rows: Vec<RowView>) -> TimelineView {
        let starts = [date(2024, 6, 3), date(2024, 6, 10), date(2024, 6, 17)];
        TimelineView {
            zoom: ZoomLevel::Week,
            unit_width: 10.0,
            today: date(2024, 6, 12),
            window: TimeWindow::new(starts[0], date(2024, 6, 23)),
            columns: starts
                .iter()
                .map(|&start| Column {
                    unit: DisplayUnit::new(start, ZoomLevel::Week),
                    is_current_period: false,
                    is_weekend: false,
                    label: start.format("%d/%m").to_string(),
                })
                .collect(),
            month_bands: Vec::new(),
            today_offset: None,
            grid_origin: 0.0,
            rows,
        }
    }

    fn task(label: &str, bar: Option<Bar>) -> RowView {
        RowView {
            top: 0.0,
            height: 32,
            indent: 2,
            label: label.into(),
            kind: RowViewKind::Task {
                item_id: label.into(),
                overdue: false,
                accent_color: None,
                bar,
            },
        }
    }

    #[test]
    fn long_labels_are_truncated() {
        let view = week_view(vec![task("Integration testing", None)]);
        let out = TextRenderer::new().label_width(10).render(&view).unwrap();
        assert_eq!(out.lines().nth(1).unwrap(), "    Integ…│");
    }

    #[test]
    fn fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 4), "abc…");
        assert_eq!(fit("abc", 0), "");
    }

    #[test]
    fn renders_header_and_one_line_per_row() {
        let view = week_view(vec![task("a", None), task("b", None)]);
        let out = TextRenderer::new().label_width(8).render(&view).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "        │03/06 10/06 17/06 ");
        assert_eq!(lines[1], "    a   │");
    }

    #[test]
    fn fixed_cell_width_truncates_labels() {
        let view = week_view(vec![]);
        let out = TextRenderer::new()
            .label_width(8)
            .cell_width(3)
            .render(&view)
            .unwrap();
        assert_eq!(out.lines().next().unwrap(), "        │03…10…17…");
    }

    #[test]
    fn grid_origin_shifts_bars_into_their_column() {
        // window opens on Wednesday 05/06, two sevenths into the first column
        let mut view = week_view(vec![task(
            "a",
            Some(Bar {
                left: 50.0 / 7.0,
                width: 5.0,
            }),
        )]);
        view.grid_origin = 20.0 / 7.0;
        view.today_offset = Some(120.0 / 7.0);
        let out = TextRenderer::new()
            .label_width(6)
            .cell_width(7)
            .hide_today()
            .render(&view)
            .unwrap();
        assert_eq!(out.lines().nth(1).unwrap(), "    a │       ████");

        let out = TextRenderer::new().label_width(6).cell_width(7).render(&view).unwrap();
        assert_eq!(out.lines().nth(1).unwrap(), "    a │       ████   ┆");
    }

    #[test]
    fn paints_bar_cells() {
        let bar = Bar {
            left: 10.0,
            width: 10.0,
        };
        let view = week_view(vec![task("a", Some(bar))]);
        let out = TextRenderer::new()
            .label_width(6)
            .cell_width(3)
            .render(&view)
            .unwrap();
        assert_eq!(out.lines().nth(1).unwrap(), "    a │   ███");
    }

    #[test]
    fn short_bar_paints_at_least_one_cell() {
        let bar = Bar {
            left: 0.0,
            width: 0.1,
        };
        let view = week_view(vec![task("a", Some(bar))]);
        let out = TextRenderer::new()
            .label_width(6)
            .cell_width(3)
            .render(&view)
            .unwrap();
        assert_eq!(out.lines().nth(1).unwrap(), "    a │█");
    }

    #[test]
    fn empty_columns_fail() {
        let mut view = week_view(vec![]);
        view.columns.clear();
        assert!(TextRenderer::new().render(&view).is_err());
    }
}
