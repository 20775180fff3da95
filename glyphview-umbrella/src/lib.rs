//! # glyphview
//!
//! Turns point tables into glyph meshes and streams them to a 3D viewer widget.
//!
//! This is the umbrella crate that re-exports the glyphview crates. Use the
//! individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: tables, style state, bounds, colors and colormaps, glyph meshes
//! - **Algorithms**: sphere tessellation, glyph sizing and coloring, the mesh builder
//! - **I/O**: `.gltf`/`.glb` export, asset retention, delimited table reader
//! - **Viewer**: layers, change dispatch and the widget bridge
//!
//! ## Quick Start
//!
//! ```rust
//! use glyphview::prelude::*;
//!
//! # fn main() -> glyphview::Result<()> {
//! let table = DataTable::new("stars")
//!     .with_column("x", vec![0.0, 1.0, 2.0])?
//!     .with_column("y", vec![0.0, 1.0, 2.0])?
//!     .with_column("z", vec![0.0, 1.0, 2.0])?;
//!
//! let style = StyleState::default().with_fixed_color("red").with_fixed_size(4.0);
//! let bounds = ViewerBounds::from_table(&table, &AxisAttributes::default())?;
//!
//! let model = MeshBuilder::default().build(Some(&table), &style, &bounds)?;
//! assert_eq!(model.map(|m| m.mesh.glyph_count()), Some(3));
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: algorithms, io and viewer
//! - `algorithms`: mesh building
//! - `io`: asset export and table loading
//! - `viewer`: the layered viewer (implies `algorithms` and `io`)
//! - `all`: everything

// Re-export core functionality
pub use glyphview_core::*;

// Re-export sub-crates
#[cfg(feature = "algorithms")]
pub use glyphview_algorithms as algorithms;

#[cfg(feature = "io")]
pub use glyphview_io as io;

#[cfg(feature = "viewer")]
pub use glyphview_viewer as viewer;

/// Convenient imports for common use cases
pub mod prelude {
    pub use glyphview_core::*;

    #[cfg(feature = "algorithms")]
    pub use glyphview_algorithms::{GlyphOptions, MeshBuilder, SphereSource};

    #[cfg(feature = "io")]
    pub use glyphview_io::{
        read_table, write_model, AssetExporter, AssetFormat, ExportOptions, RetentionPolicy,
        TableReader,
    };

    #[cfg(feature = "viewer")]
    pub use glyphview_viewer::{
        Layer, MemoryWidget, ModelViewer, ModelWidget, RedrawOutcome, ViewerConfig,
    };
}
