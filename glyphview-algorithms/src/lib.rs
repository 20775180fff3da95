//! Glyph mesh generation for glyphview
//!
//! This crate turns a data table and a layer style into a colored, sized
//! point-glyph mesh:
//! - Sphere glyph tessellation
//! - Size mapping (fixed radius or attribute-driven scale factors)
//! - Color mapping (fixed color or colormapped per-vertex scalars)
//! - Glyph instancing and the [`MeshBuilder`] that ties them together

pub mod sphere;
pub mod sizing;
pub mod coloring;
pub mod glyph;
pub mod builder;

pub use sphere::*;
pub use sizing::*;
pub use coloring::*;
pub use glyph::*;
pub use builder::*;
