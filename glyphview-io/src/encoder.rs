//! Asset encoders

use crate::error::IoError;
use crate::format::AssetFormat;
use crate::glb::assemble_glb;
use crate::gltf::{build_document, BufferStorage};
use glyphview_core::GlyphModel;

/// Trait for turning a glyph model into asset bytes
pub trait AssetEncoder: Send + Sync {
    /// Encode the model
    fn encode(&self, model: &GlyphModel) -> Result<Vec<u8>, IoError>;

    /// Get the format this encoder produces
    fn format(&self) -> AssetFormat;
}

/// Self-contained `.gltf` JSON
pub struct GltfEncoder;

/// Binary `.glb`
pub struct GlbEncoder;

impl AssetEncoder for GltfEncoder {
    fn encode(&self, model: &GlyphModel) -> Result<Vec<u8>, IoError> {
        let parts = build_document(model, BufferStorage::Embedded)?;
        serde_json::to_vec(&parts.json).map_err(|e| IoError::Encode {
            message: e.to_string(),
        })
    }

    fn format(&self) -> AssetFormat {
        AssetFormat::Gltf
    }
}

impl AssetEncoder for GlbEncoder {
    fn encode(&self, model: &GlyphModel) -> Result<Vec<u8>, IoError> {
        assemble_glb(build_document(model, BufferStorage::BinaryChunk)?)
    }

    fn format(&self) -> AssetFormat {
        AssetFormat::Glb
    }
}

impl AssetFormat {
    /// Encoder producing this format
    pub fn encoder(&self) -> Box<dyn AssetEncoder> {
        match self {
            AssetFormat::Gltf => Box::new(GltfEncoder),
            AssetFormat::Glb => Box::new(GlbEncoder),
        }
    }
}
