//! Asset export and table loading for glyphview
//!
//! This crate turns glyph models into self-contained glTF assets (`.gltf` with an
//! embedded buffer, or binary `.glb`), writes them to a deterministic path per
//! dataset label, manages their lifetime, and reads delimited text tables.

pub mod error;
pub mod format;
pub mod gltf;
pub mod glb;
pub mod encoder;
pub mod exporter;
pub mod retention;
pub mod table_csv;

pub use error::*;
pub use format::AssetFormat;
pub use encoder::{AssetEncoder, GlbEncoder, GltfEncoder};
pub use exporter::{sanitize_label, write_atomic, AssetExporter, ExportOptions, ASSET_PREFIX};
pub use retention::{AssetStore, RetentionPolicy};
pub use table_csv::{Delimiter, TableReadOptions, TableReader};

use glyphview_core::{DataTable, GlyphModel, Result};
use std::path::{Path, PathBuf};

/// Read a delimited table, labelled with the file stem
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<DataTable> {
    Ok(TableReader::read_table(path)?)
}

/// Write `model` to `path`, choosing the format from the extension
pub fn write_model<P: AsRef<Path>>(model: &GlyphModel, path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let format = AssetFormat::from_path(path)?;
    let bytes = format.encoder().encode(model)?;
    write_atomic(path, &bytes)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests;
