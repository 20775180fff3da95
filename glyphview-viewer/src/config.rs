//! Viewer configuration

use crate::widget::DEFAULT_VIEWER_HEIGHT;
use glyphview_algorithms::GlyphOptions;
use glyphview_core::{AxisAttributes, Error, Result};
use glyphview_io::ExportOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a [`ModelViewer`](crate::ModelViewer) needs besides its widget.
///
/// Missing keys take their defaults, so `{}` is a valid document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Columns holding the x/y/z coordinates
    pub axes: AxisAttributes,
    pub glyph: GlyphOptions,
    pub export: ExportOptions,
    /// CSS height of the widget
    pub viewer_height: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            axes: AxisAttributes::default(),
            glyph: GlyphOptions::default(),
            export: ExportOptions::default(),
            viewer_height: DEFAULT_VIEWER_HEIGHT.to_string(),
        }
    }
}

impl ViewerConfig {
    pub fn with_axes(mut self, axes: AxisAttributes) -> Self {
        self.axes = axes;
        self
    }

    pub fn with_glyph(mut self, glyph: GlyphOptions) -> Self {
        self.glyph = glyph;
        self
    }

    pub fn with_export(mut self, export: ExportOptions) -> Self {
        self.export = export;
        self
    }

    pub fn with_viewer_height<S: Into<String>>(mut self, height: S) -> Self {
        self.viewer_height = height.into();
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}
