//! GLB binary container

use crate::error::IoError;
use crate::gltf::GltfParts;

/// GLB magic number: "glTF"
pub const GLB_MAGIC: u32 = 0x46546C67;
/// GLB version 2
pub const GLB_VERSION: u32 = 2;
/// JSON chunk type
const CHUNK_TYPE_JSON: u32 = 0x4E4F534A;
/// BIN chunk type
const CHUNK_TYPE_BIN: u32 = 0x004E4942;

/// Assemble a GLB file from a document whose buffer is not embedded.
///
/// The BIN chunk is omitted when the buffer is empty.
pub fn assemble_glb(parts: GltfParts) -> Result<Vec<u8>, IoError> {
    let mut json_bytes = serde_json::to_vec(&parts.json).map_err(|e| IoError::Encode {
        message: e.to_string(),
    })?;
    // JSON chunk is padded with spaces, BIN chunk with zeros
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }

    let mut bin_data = parts.bin;
    while bin_data.len() % 4 != 0 {
        bin_data.push(0);
    }

    let bin_chunk = if bin_data.is_empty() { 0 } else { 8 + bin_data.len() };
    let total_length = 12 + 8 + json_bytes.len() + bin_chunk;
    let total = u32::try_from(total_length).map_err(|_| IoError::Encode {
        message: format!("GLB of {} bytes exceeds the 4 GiB container limit", total_length),
    })?;

    let mut glb = Vec::with_capacity(total_length);

    // Header
    glb.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
    glb.extend_from_slice(&total.to_le_bytes());

    // JSON chunk
    glb.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    glb.extend_from_slice(&CHUNK_TYPE_JSON.to_le_bytes());
    glb.extend_from_slice(&json_bytes);

    // BIN chunk
    if !bin_data.is_empty() {
        glb.extend_from_slice(&(bin_data.len() as u32).to_le_bytes());
        glb.extend_from_slice(&CHUNK_TYPE_BIN.to_le_bytes());
        glb.extend_from_slice(&bin_data);
    }

    Ok(glb)
}
