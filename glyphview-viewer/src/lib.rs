//! Interactive glyph viewer for point tables
//!
//! Ties the pipeline together: a [`ModelViewer`] holds layers of data tables
//! with their [`StyleState`](glyphview_core::StyleState), rebuilds the glyph
//! model whenever a relevant style field changes, exports it with
//! [`glyphview_io`] and pushes the asset bytes to a [`ModelWidget`].

pub mod widget;
pub mod bridge;
pub mod dispatcher;
pub mod config;
pub mod viewer;

pub use widget::{MemoryWidget, ModelWidget, DEFAULT_VIEWER_HEIGHT};
pub use bridge::ViewerBridge;
pub use dispatcher::{Callback, ChangeDispatcher, SubscriptionId, REBUILD_FIELDS};
pub use config::ViewerConfig;
pub use viewer::{Layer, ModelViewer, Pipeline, RedrawOutcome};
