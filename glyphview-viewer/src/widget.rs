//! Rendering widget boundary

/// Default CSS height of the viewer widget
pub const DEFAULT_VIEWER_HEIGHT: &str = "500px";

/// A remote renderer that displays one binary 3D asset at a time.
///
/// Every `set_model` replaces the whole payload and makes the renderer reload.
pub trait ModelWidget {
    /// Replace the displayed asset
    fn set_model(&mut self, bytes: Vec<u8>);

    /// Remove the displayed asset
    fn clear_model(&mut self);

    /// Currently displayed asset, if any
    fn model(&self) -> Option<&[u8]>;

    fn set_height(&mut self, height: &str);

    fn height(&self) -> &str;
}

/// Widget that keeps its payload in memory
#[derive(Debug, Clone)]
pub struct MemoryWidget {
    payload: Option<Vec<u8>>,
    height: String,
    reloads: usize,
}

impl MemoryWidget {
    pub fn new() -> Self {
        Self {
            payload: None,
            height: DEFAULT_VIEWER_HEIGHT.to_string(),
            reloads: 0,
        }
    }

    /// Number of payload changes, clears included
    pub fn reload_count(&self) -> usize {
        self.reloads
    }
}

impl Default for MemoryWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelWidget for MemoryWidget {
    fn set_model(&mut self, bytes: Vec<u8>) {
        self.payload = Some(bytes);
        self.reloads += 1;
    }

    fn clear_model(&mut self) {
        if self.payload.take().is_some() {
            self.reloads += 1;
        }
    }

    fn model(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    fn set_height(&mut self, height: &str) {
        self.height = height.to_string();
    }

    fn height(&self) -> &str {
        &self.height
    }
}
