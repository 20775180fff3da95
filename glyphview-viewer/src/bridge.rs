//! Pushing exported assets to the rendering widget

use crate::widget::ModelWidget;
use glyphview_core::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads exported assets from disk and hands their bytes to a [`ModelWidget`]
#[derive(Debug)]
pub struct ViewerBridge<W: ModelWidget> {
    widget: W,
    published: Option<PathBuf>,
}

impl<W: ModelWidget> ViewerBridge<W> {
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            published: None,
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    /// Path of the asset currently on display
    pub fn published(&self) -> Option<&Path> {
        self.published.as_deref()
    }

    /// Send the whole asset at `path` to the widget.
    ///
    /// Does nothing and returns `false` when there are no layers to display.
    /// A failed read leaves the current payload untouched.
    pub fn publish(&mut self, path: &Path, layer_count: usize) -> Result<bool> {
        if layer_count == 0 {
            tracing::debug!(path = %path.display(), "no layers, skipping publish");
            return Ok(false);
        }

        let bytes = fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "publishing asset");
        self.widget.set_model(bytes);
        self.published = Some(path.to_path_buf());
        Ok(true)
    }

    /// Remove the displayed asset
    pub fn clear(&mut self) {
        tracing::debug!("clearing display");
        self.published = None;
        self.widget.clear_model();
    }

    pub fn into_widget(self) -> W {
        self.widget
    }
}
