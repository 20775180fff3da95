//! Layered model viewer
//!
//! [`ModelViewer`] owns the ordered layer list, the viewer bounds and the
//! build → export → publish pipeline. Only the first layer is rendered. Style
//! edits go through the [`ChangeDispatcher`], which redraws on any edit to a
//! [`REBUILD_FIELDS`] field; adding or removing a layer always redraws. A new
//! size attribute also redraws while sizes are mapped, since its column can
//! share the old column's limits.

use crate::bridge::ViewerBridge;
use crate::config::ViewerConfig;
use crate::dispatcher::{ChangeDispatcher, REBUILD_FIELDS};
use crate::widget::ModelWidget;
use glyphview_algorithms::MeshBuilder;
use glyphview_core::{DataTable, Error, Result, SizeMode, StyleField, StyleState, ViewerBounds};
use glyphview_io::AssetExporter;
use std::path::PathBuf;

/// One dataset shown by the viewer and its style
#[derive(Debug, Clone)]
pub struct Layer {
    label: String,
    data: Option<DataTable>,
    pub style: StyleState,
}

impl Layer {
    /// Layer over `data`, labelled with the table's label
    pub fn new(data: DataTable) -> Self {
        Self {
            label: data.label().to_string(),
            data: Some(data),
            style: StyleState::default(),
        }
    }

    /// Layer whose data is not available
    pub fn empty<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            data: None,
            style: StyleState::default(),
        }
    }

    pub fn with_style(mut self, style: StyleState) -> Self {
        self.style = style;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn data(&self) -> Option<&DataTable> {
        self.data.as_ref()
    }
}

/// Outcome of one redraw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedrawOutcome {
    /// The asset at this path is on display
    Published(PathBuf),
    /// The first layer has no data; the display was cleared
    Cleared,
    /// No layers; the display was left as it was
    Idle,
}

/// State the dispatcher callbacks operate on
pub struct Pipeline<W: ModelWidget> {
    builder: MeshBuilder,
    exporter: AssetExporter,
    bridge: ViewerBridge<W>,
    layers: Vec<Layer>,
    bounds: ViewerBounds,
    last_outcome: Option<RedrawOutcome>,
}

impl<W: ModelWidget> Pipeline<W> {
    fn position(&self, label: &str) -> Result<usize> {
        self.layers
            .iter()
            .position(|l| l.label == label)
            .ok_or_else(|| Error::UnknownLayer(label.to_string()))
    }

    /// Rebuild the first layer, export it and publish it to the widget.
    ///
    /// Clears the display when the first layer has no data. With no layers
    /// the widget is not touched. A failed build or write leaves the current
    /// display as it was.
    pub fn redraw(&mut self) -> Result<()> {
        let outcome = match self.layers.first() {
            None => RedrawOutcome::Idle,
            Some(layer) => match self.builder.build(layer.data(), &layer.style, &self.bounds)? {
                Some(model) => {
                    let path = self.exporter.export(&model)?;
                    self.bridge.publish(&path, self.layers.len())?;
                    RedrawOutcome::Published(path)
                }
                None => {
                    self.bridge.clear();
                    RedrawOutcome::Cleared
                }
            },
        };

        let labels: Vec<&str> = self.layers.iter().map(Layer::label).collect();
        self.exporter.release_except(&labels)?;

        tracing::debug!(outcome = ?outcome, layers = self.layers.len(), "redraw finished");
        self.last_outcome = Some(outcome);
        Ok(())
    }
}

/// Glyph viewer over a rendering widget
pub struct ModelViewer<W: ModelWidget + 'static> {
    pipeline: Pipeline<W>,
    dispatcher: ChangeDispatcher<Pipeline<W>>,
}

impl<W: ModelWidget + 'static> ModelViewer<W> {
    /// Create a viewer; the widget takes the configured height
    pub fn new(config: ViewerConfig, mut widget: W) -> Self {
        widget.set_height(&config.viewer_height);

        let mut dispatcher: ChangeDispatcher<Pipeline<W>> = ChangeDispatcher::new();
        dispatcher.subscribe(&REBUILD_FIELDS, Pipeline::<W>::redraw);

        Self {
            pipeline: Pipeline {
                builder: MeshBuilder::new(config.axes, config.glyph),
                exporter: AssetExporter::new(config.export),
                bridge: ViewerBridge::new(widget),
                layers: Vec::new(),
                bounds: ViewerBounds::default(),
                last_outcome: None,
            },
            dispatcher,
        }
    }

    pub fn widget(&self) -> &W {
        self.pipeline.bridge.widget()
    }

    pub fn builder(&self) -> &MeshBuilder {
        &self.pipeline.builder
    }

    /// Mutable access to the builder, e.g. to register colormaps
    pub fn builder_mut(&mut self) -> &mut MeshBuilder {
        &mut self.pipeline.builder
    }

    pub fn exporter(&self) -> &AssetExporter {
        &self.pipeline.exporter
    }

    pub fn bounds(&self) -> &ViewerBounds {
        &self.pipeline.bounds
    }

    pub fn layers(&self) -> &[Layer] {
        &self.pipeline.layers
    }

    pub fn layer(&self, label: &str) -> Option<&Layer> {
        self.pipeline.layers.iter().find(|l| l.label == label)
    }

    /// Result of the most recent redraw
    pub fn last_outcome(&self) -> Option<&RedrawOutcome> {
        self.pipeline.last_outcome.as_ref()
    }

    /// Add a layer and redraw.
    ///
    /// The first layer with data fits the bounds to its coordinates. Labels
    /// must be unique, including after sanitising into asset file names.
    pub fn add_layer(&mut self, layer: Layer) -> Result<()> {
        let exporter = &self.pipeline.exporter;
        let path = exporter.asset_path(&layer.label);
        let taken = self
            .pipeline
            .layers
            .iter()
            .any(|l| l.label == layer.label || exporter.asset_path(&l.label) == path);
        if taken {
            return Err(Error::DuplicateLayer(layer.label));
        }

        if self.pipeline.layers.is_empty() {
            if let Some(data) = &layer.data {
                self.pipeline.bounds = ViewerBounds::from_table(data, self.pipeline.builder.axes())?;
                tracing::debug!(bounds = ?self.pipeline.bounds, "fitted bounds to first layer");
            }
        }

        tracing::info!(label = %layer.label, "adding layer");
        self.pipeline.layers.push(layer);
        self.dispatcher.dispatch_all(&mut self.pipeline)?;
        Ok(())
    }

    /// Remove a layer, release its asset and redraw
    pub fn remove_layer(&mut self, label: &str) -> Result<Layer> {
        let index = self.pipeline.position(label)?;
        let layer = self.pipeline.layers.remove(index);
        tracing::info!(label, "removing layer");

        self.pipeline.exporter.release(label)?;
        self.dispatcher.dispatch_all(&mut self.pipeline)?;
        Ok(layer)
    }

    /// Edit a layer's style and redraw if a rebuild field changed.
    ///
    /// Returns the fields that changed.
    pub fn update_style<F>(&mut self, label: &str, edit: F) -> Result<Vec<StyleField>>
    where
        F: FnOnce(&mut StyleState),
    {
        let index = self.pipeline.position(label)?;
        let style = &mut self.pipeline.layers[index].style;
        let previous = style.clone();
        edit(style);
        let changed = style.changed_fields(&previous);

        self.dispatch_changes(index, &changed)?;
        Ok(changed)
    }

    /// Color a layer by `attribute`, resetting the color limits to its range
    pub fn set_color_attribute(&mut self, label: &str, attribute: &str) -> Result<Vec<StyleField>> {
        self.edit_with_data(label, |style, data| match data {
            Some(table) => style.set_color_attribute(table, attribute),
            None => {
                style.color_attribute = Some(attribute.to_string());
                Ok(())
            }
        })
    }

    /// Size a layer by `attribute`, resetting the size limits to its range
    pub fn set_size_attribute(&mut self, label: &str, attribute: &str) -> Result<Vec<StyleField>> {
        self.edit_with_data(label, |style, data| match data {
            Some(table) => style.set_size_attribute(table, attribute),
            None => {
                style.size_attribute = Some(attribute.to_string());
                Ok(())
            }
        })
    }

    fn edit_with_data<F>(&mut self, label: &str, edit: F) -> Result<Vec<StyleField>>
    where
        F: FnOnce(&mut StyleState, Option<&DataTable>) -> Result<()>,
    {
        let index = self.pipeline.position(label)?;
        let layer = &mut self.pipeline.layers[index];
        let previous = layer.style.clone();
        edit(&mut layer.style, layer.data.as_ref())?;
        let changed = layer.style.changed_fields(&previous);

        self.dispatch_changes(index, &changed)?;
        Ok(changed)
    }

    fn dispatch_changes(&mut self, index: usize, changed: &[StyleField]) -> Result<()> {
        let resized = changed.contains(&StyleField::SizeAttribute)
            && self.pipeline.layers[index].style.size_mode == SizeMode::Mapped;
        if resized {
            tracing::debug!(index, "mapped size attribute changed, rebuilding");
            self.dispatcher.dispatch_all(&mut self.pipeline)?;
        } else {
            self.dispatcher.dispatch(changed, &mut self.pipeline)?;
        }
        Ok(())
    }

    /// Replace the viewer bounds and redraw
    pub fn set_bounds(&mut self, bounds: ViewerBounds) -> Result<()> {
        self.pipeline.bounds = bounds;
        self.pipeline.redraw()
    }

    /// Force a full rebuild
    pub fn redraw(&mut self) -> Result<()> {
        self.pipeline.redraw()
    }
}
