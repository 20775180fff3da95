//! Glyph mesh data structures
//!
//! A [`GlyphMesh`] is one template glyph stamped at every data point. The
//! vertices of glyph `i` occupy the contiguous range
//! `i * points_per_glyph .. (i + 1) * points_per_glyph`, which is what lets a
//! per-point scalar be replicated into a per-vertex one.

use crate::color::Color;
use crate::colormap::Colormap;
use crate::point::*;
use serde::{Deserialize, Serialize};

/// Placement of one glyph copy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlyphInstance {
    pub center: Point3f,
    /// Multiplier applied to the template geometry
    pub scale: f32,
}

/// A triangle mesh made of instanced glyphs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlyphMesh {
    pub vertices: Vec<Point3f>,
    pub normals: Vec<Vector3f>,
    pub faces: Vec<[usize; 3]>,
    /// Per-vertex scalars used for colormapping
    pub scalars: Option<Vec<f32>>,
    pub instances: Vec<GlyphInstance>,
    pub points_per_glyph: usize,
    /// Radius of the template glyph before instance scaling
    pub base_radius: f32,
}

impl GlyphMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn glyph_count(&self) -> usize {
        self.instances.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Effective radius of glyph `index`
    pub fn instance_radius(&self, index: usize) -> Option<f32> {
        self.instances
            .get(index)
            .map(|instance| instance.scale * self.base_radius)
    }

    /// Attach per-vertex scalars; ignored unless there is one per vertex
    pub fn set_scalars(&mut self, scalars: Vec<f32>) {
        if scalars.len() == self.vertices.len() {
            self.scalars = Some(scalars);
        }
    }
}

/// How the exported mesh is to be colored
#[derive(Debug, Clone, PartialEq)]
pub enum ColoringDirective {
    /// One color for the whole mesh
    Fixed(Color),
    /// Per-vertex scalars mapped through a colormap over `[low, high]`
    Mapped {
        colormap: Colormap,
        low: f64,
        high: f64,
    },
}

impl ColoringDirective {
    /// Name of the colormap, if any
    pub fn colormap_name(&self) -> Option<&str> {
        match self {
            ColoringDirective::Fixed(_) => None,
            ColoringDirective::Mapped { colormap, .. } => Some(&colormap.name),
        }
    }
}

/// A glyph mesh together with its coloring, ready for export
#[derive(Debug, Clone)]
pub struct GlyphModel {
    /// Label of the dataset the model was built from
    pub label: String,
    pub mesh: GlyphMesh,
    pub coloring: ColoringDirective,
}
