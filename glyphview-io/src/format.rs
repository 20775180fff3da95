//! Supported asset formats

use crate::error::IoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// glTF flavours the exporter can write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetFormat {
    /// JSON document with the buffer embedded as a base64 data URI
    #[default]
    Gltf,
    /// Binary container: JSON chunk followed by a BIN chunk
    Glb,
}

impl AssetFormat {
    /// Map a file extension (without the dot, any case) to a format
    pub fn from_extension(extension: &str) -> Result<Self, IoError> {
        match extension.trim_start_matches('.').to_lowercase().as_str() {
            "gltf" => Ok(AssetFormat::Gltf),
            "glb" => Ok(AssetFormat::Glb),
            _ => Err(IoError::UnsupportedExtension {
                extension: extension.to_string(),
            }),
        }
    }

    /// Detect the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        Self::from_extension(extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AssetFormat::Gltf => "gltf",
            AssetFormat::Glb => "glb",
        }
    }

    /// MIME type of the encoded asset
    pub fn mime_type(&self) -> &'static str {
        match self {
            AssetFormat::Gltf => "model/gltf+json",
            AssetFormat::Glb => "model/gltf-binary",
        }
    }
}

impl fmt::Display for AssetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(AssetFormat::from_extension("gltf").unwrap(), AssetFormat::Gltf);
        assert_eq!(AssetFormat::from_extension(".GLB").unwrap(), AssetFormat::Glb);
        assert!(matches!(
            AssetFormat::from_extension("obj"),
            Err(IoError::UnsupportedExtension { extension }) if extension == "obj"
        ));
        assert!(AssetFormat::from_extension("").is_err());
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            AssetFormat::from_path(Path::new("/tmp/model_a.gltf")).unwrap(),
            AssetFormat::Gltf
        );
        assert!(AssetFormat::from_path(Path::new("model_a")).is_err());
    }
}
