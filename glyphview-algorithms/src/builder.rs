//! Data table + style state to colored glyph mesh

use crate::coloring::resolve_coloring;
use crate::glyph::instance_glyphs;
use crate::sizing::plan_sizes;
use crate::sphere::{points_per_glyph, SphereSource};
use glyphview_core::{
    AxisAttributes, ColormapRegistry, DataTable, GlyphModel, PointCloud3f, Result, StyleState,
    ViewerBounds,
};
use serde::{Deserialize, Serialize};

/// Tessellation of the sphere glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphOptions {
    pub phi_resolution: usize,
    pub theta_resolution: usize,
}

impl Default for GlyphOptions {
    fn default() -> Self {
        Self {
            phi_resolution: 15,
            theta_resolution: 15,
        }
    }
}

impl GlyphOptions {
    pub fn with_resolution(mut self, phi_resolution: usize, theta_resolution: usize) -> Self {
        self.phi_resolution = phi_resolution;
        self.theta_resolution = theta_resolution;
        self
    }

    /// Vertices generated per data point
    pub fn points_per_glyph(&self) -> usize {
        points_per_glyph(self.phi_resolution, self.theta_resolution)
    }
}

/// Builds glyph models from tables
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    axes: AxisAttributes,
    glyph: GlyphOptions,
    colormaps: ColormapRegistry,
}

impl MeshBuilder {
    pub fn new(axes: AxisAttributes, glyph: GlyphOptions) -> Self {
        Self {
            axes,
            glyph,
            colormaps: ColormapRegistry::default(),
        }
    }

    pub fn with_colormaps(mut self, colormaps: ColormapRegistry) -> Self {
        self.colormaps = colormaps;
        self
    }

    pub fn axes(&self) -> &AxisAttributes {
        &self.axes
    }

    pub fn glyph_options(&self) -> &GlyphOptions {
        &self.glyph
    }

    pub fn colormaps(&self) -> &ColormapRegistry {
        &self.colormaps
    }

    pub fn colormaps_mut(&mut self) -> &mut ColormapRegistry {
        &mut self.colormaps
    }

    /// Build the glyph model for `table` styled by `style`.
    ///
    /// `Ok(None)` means there is no data to display. Malformed numbers never
    /// fail the build; missing columns, an invalid style or an unknown
    /// colormap do.
    pub fn build(
        &self,
        table: Option<&DataTable>,
        style: &StyleState,
        bounds: &ViewerBounds,
    ) -> Result<Option<GlyphModel>> {
        let Some(table) = table else {
            tracing::debug!("no data table, nothing to build");
            return Ok(None);
        };
        style.validate()?;

        let cloud = PointCloud3f::from_table(table, &self.axes)?;
        let factor = bounds.normalization_factor();
        let sizes = plan_sizes(table, style, factor)?;

        let sphere = SphereSource::new(
            sizes.base_radius as f32,
            self.glyph.phi_resolution,
            self.glyph.theta_resolution,
        );
        let template = sphere.build();
        let mut mesh = instance_glyphs(&cloud, &template, sizes.base_radius as f32, &sizes.scaling);

        let coloring = resolve_coloring(table, style, &self.colormaps, sphere.points_per_glyph())?;
        if let Some(scalars) = coloring.scalars {
            mesh.set_scalars(scalars);
        }

        tracing::debug!(
            label = table.label(),
            glyphs = mesh.glyph_count(),
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            normalization_factor = factor,
            "built glyph mesh"
        );

        Ok(Some(GlyphModel {
            label: table.label().to_string(),
            mesh,
            coloring: coloring.directive,
        }))
    }
}
