//! JSON export of the render model
//!
//! Serializes a `TimelineView` as-is so a browser front end can draw the
//! label column and grid without re-running any layout.

use gantry_core::{RenderError, Renderer, TimelineView};

/// JSON renderer configuration
#[derive(Clone, Debug)]
pub struct JsonRenderer {
    /// Indent output for humans
    pub pretty: bool,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}

impl Renderer for JsonRenderer {
    type Output = String;

    fn render(&self, view: &TimelineView) -> Result<String, RenderError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(view)
        } else {
            serde_json::to_string(view)
        };
        result.map_err(|e| RenderError::Format(e.to_string()))
    }
}
