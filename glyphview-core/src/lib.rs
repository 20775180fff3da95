//! Core data structures and traits for glyphview
//!
//! This crate provides the data model shared by the glyph pipeline: columnar
//! tables, layer style state, viewer bounds, colors and colormaps, and the
//! glyph meshes built from them.

pub mod point;
pub mod point_cloud;
pub mod table;
pub mod style;
pub mod bounds;
pub mod color;
pub mod colormap;
pub mod mesh;
pub mod traits;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use table::*;
pub use style::*;
pub use bounds::*;
pub use color::*;
pub use colormap::{Colormap, ColormapRegistry, NAN_COLOR, REVERSED_SUFFIX};
pub use mesh::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
