//! Writing glyph models to disk

use crate::encoder::AssetEncoder;
use crate::error::IoError;
use crate::format::AssetFormat;
use crate::retention::{AssetStore, RetentionPolicy};
use glyphview_core::{GlyphModel, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Prefix of every asset file name
pub const ASSET_PREFIX: &str = "model_";

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Directory assets are written into; must already exist
    pub output_dir: PathBuf,
    pub format: AssetFormat,
    pub retention: RetentionPolicy,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            format: AssetFormat::default(),
            retention: RetentionPolicy::default(),
        }
    }
}

impl ExportOptions {
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_format(mut self, format: AssetFormat) -> Self {
        self.format = format;
        self
    }

    /// Select the format by file extension; `.obj` and unknown extensions fail
    pub fn with_extension(self, extension: &str) -> std::result::Result<Self, IoError> {
        let format = AssetFormat::from_extension(extension)?;
        Ok(self.with_format(format))
    }

    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }
}

/// Replace characters that are not portable in file names with `_`
pub fn sanitize_label(label: &str) -> String {
    let sanitized: String = label
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();

    // "." and ".." would escape the file name pattern
    if sanitized.chars().all(|c| c == '.') {
        sanitized.replace('.', "_")
    } else {
        sanitized
    }
}

/// Encodes glyph models and writes them to `<output_dir>/model_<label>.<ext>`.
///
/// Each label owns one path. Re-exporting a label overwrites its file through a
/// sibling temporary file, so the previous asset survives a failed write.
pub struct AssetExporter {
    options: ExportOptions,
    encoder: Box<dyn AssetEncoder>,
    store: AssetStore,
}

impl AssetExporter {
    pub fn new(options: ExportOptions) -> Self {
        let encoder = options.format.encoder();
        let store = AssetStore::new(options.retention);
        Self {
            options,
            encoder,
            store,
        }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn format(&self) -> AssetFormat {
        self.encoder.format()
    }

    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    /// Path the asset for `label` is written to
    pub fn asset_path(&self, label: &str) -> PathBuf {
        self.options.output_dir.join(format!(
            "{}{}.{}",
            ASSET_PREFIX,
            sanitize_label(label),
            self.format().extension()
        ))
    }

    /// Encode `model` and write it to its asset path, returning the path
    pub fn export(&mut self, model: &GlyphModel) -> Result<PathBuf> {
        let path = self.asset_path(&model.label);
        if let Some(owner) = self.store.owner(&path) {
            if owner != model.label {
                return Err(IoError::PathConflict {
                    path,
                    owner: owner.to_string(),
                    label: model.label.clone(),
                }
                .into());
            }
        }

        let bytes = self.encoder.encode(model)?;
        write_atomic(&path, &bytes)?;

        tracing::info!(
            label = %model.label,
            path = %path.display(),
            bytes = bytes.len(),
            glyphs = model.mesh.glyph_count(),
            "exported glyph model"
        );

        self.store.record(model.label.clone(), path.clone())?;
        Ok(path)
    }

    /// Release the asset of `label` under the configured retention policy
    pub fn release(&mut self, label: &str) -> Result<Option<PathBuf>> {
        self.store.release(label)
    }

    /// Release every asset whose label is not in `keep`
    pub fn release_except(&mut self, keep: &[&str]) -> Result<Vec<PathBuf>> {
        self.store.release_except(keep)
    }
}

impl Default for AssetExporter {
    fn default() -> Self {
        Self::new(ExportOptions::default())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// Write `bytes` to a sibling temporary file, then rename it over `path`
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::result::Result<(), IoError> {
    let tmp = temp_path(path);
    let result = fs::File::create(&tmp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&tmp, path));

    result.map_err(|source| {
        let _ = fs::remove_file(&tmp);
        IoError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_label() {
        assert_eq!(sanitize_label("stars"), "stars");
        assert_eq!(sanitize_label("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_label("run 1.v2"), "run 1.v2");
        assert_eq!(sanitize_label(".."), "__");
        assert_eq!(sanitize_label(""), "");
    }

    #[test]
    fn test_asset_path() {
        let exporter = AssetExporter::new(ExportOptions::default().with_output_dir("/data/out"));
        assert_eq!(
            exporter.asset_path("stars"),
            PathBuf::from("/data/out/model_stars.gltf")
        );

        let exporter = AssetExporter::new(
            ExportOptions::default()
                .with_output_dir("out")
                .with_format(AssetFormat::Glb),
        );
        assert_eq!(exporter.asset_path("x/y"), PathBuf::from("out/model_x_y.glb"));
    }

    #[test]
    fn test_with_extension() {
        let options = ExportOptions::default().with_extension("glb").unwrap();
        assert_eq!(options.format, AssetFormat::Glb);
        assert!(ExportOptions::default().with_extension("obj").is_err());
    }

    #[test]
    fn test_options_deserialize_partial() {
        let options: ExportOptions =
            serde_json::from_str(r#"{"format": "glb", "retention": "keep_all"}"#).unwrap();
        assert_eq!(options.output_dir, PathBuf::from("."));
        assert_eq!(options.format, AssetFormat::Glb);
        assert_eq!(options.retention, RetentionPolicy::KeepAll);
    }

    #[test]
    fn test_write_atomic_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model_a.gltf");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert!(!temp_path(&path).exists());
    }
}
