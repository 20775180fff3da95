//! Exporter tests: deterministic paths, overwrite semantics, byte-identical
//! re-export, format rejection and retention.

use crate::{write_model, AssetExporter, AssetFormat, ExportOptions, RetentionPolicy};
use glyphview_algorithms::MeshBuilder;
use glyphview_core::{DataTable, GlyphModel, StyleState, ViewerBounds};
use std::fs;

fn create_test_table(label: &str) -> DataTable {
    DataTable::new(label)
        .with_column("x", vec![0.0, 1.0, 2.0])
        .unwrap()
        .with_column("y", vec![0.0, 1.0, 2.0])
        .unwrap()
        .with_column("z", vec![0.0, 1.0, 2.0])
        .unwrap()
        .with_column("mass", vec![1.0, f64::NAN, 3.0])
        .unwrap()
}

fn build_model(table: &DataTable, style: &StyleState) -> GlyphModel {
    let bounds = ViewerBounds::cube(0.0, 2.0);
    MeshBuilder::default()
        .build(Some(table), style, &bounds)
        .unwrap()
        .unwrap()
}

#[test]
fn test_export_writes_label_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut exporter = AssetExporter::new(ExportOptions::default().with_output_dir(dir.path()));

    let model = build_model(&create_test_table("stars"), &StyleState::default());
    let path = exporter.export(&model).unwrap();

    assert_eq!(path, dir.path().join("model_stars.gltf"));
    let bytes = fs::read(&path).unwrap();
    assert!(!bytes.is_empty());

    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["asset"]["version"], "2.0");
    assert!(json["buffers"][0]["uri"]
        .as_str()
        .unwrap()
        .starts_with("data:application/octet-stream;base64,"));
}

#[test]
fn test_reexport_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let mut exporter = AssetExporter::new(ExportOptions::default().with_output_dir(dir.path()));

    let style = StyleState::default().with_color_mapping("mass", "viridis", 1.0, 3.0);
    let model = build_model(&create_test_table("stars"), &style);

    let path = exporter.export(&model).unwrap();
    let first = fs::read(&path).unwrap();
    let again = exporter.export(&model).unwrap();
    let second = fs::read(&again).unwrap();

    assert_eq!(path, again);
    assert_eq!(first, second);
}

#[test]
fn test_export_overwrites_previous_asset() {
    let dir = tempfile::tempdir().unwrap();
    let mut exporter = AssetExporter::new(ExportOptions::default().with_output_dir(dir.path()));
    let table = create_test_table("stars");

    let small = build_model(&table, &StyleState::default());
    let large = build_model(&table, &StyleState::default().with_fixed_size(30.0));

    let path = exporter.export(&small).unwrap();
    let before = fs::read(&path).unwrap();
    exporter.export(&large).unwrap();
    let after = fs::read(&path).unwrap();

    assert_ne!(before, after);
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn test_missing_output_dir_fails_without_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let mut exporter = AssetExporter::new(ExportOptions::default().with_output_dir(&missing));

    let model = build_model(&create_test_table("stars"), &StyleState::default());
    assert!(exporter.export(&model).is_err());
    assert!(!missing.exists());
    assert!(exporter.store().path("stars").is_none());
}

#[test]
fn test_glb_export_has_binary_header() {
    let dir = tempfile::tempdir().unwrap();
    let mut exporter = AssetExporter::new(
        ExportOptions::default()
            .with_output_dir(dir.path())
            .with_format(AssetFormat::Glb),
    );

    let model = build_model(&create_test_table("stars"), &StyleState::default());
    let path = exporter.export(&model).unwrap();
    let bytes = fs::read(&path).unwrap();

    assert_eq!(path.extension().unwrap(), "glb");
    assert_eq!(&bytes[0..4], b"glTF");
    let total = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
    assert_eq!(total as usize, bytes.len());
}

#[test]
fn test_write_model_rejects_obj_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model_stars.obj");
    let model = build_model(&create_test_table("stars"), &StyleState::default());

    let err = write_model(&model, &path).unwrap_err();
    assert!(matches!(err, glyphview_core::Error::UnsupportedFormat(_)));
    assert!(!path.exists());
}

#[test]
fn test_retention_on_release() {
    let dir = tempfile::tempdir().unwrap();
    let model = build_model(&create_test_table("stars"), &StyleState::default());

    let mut deleting = AssetExporter::new(ExportOptions::default().with_output_dir(dir.path()));
    let path = deleting.export(&model).unwrap();
    assert_eq!(deleting.release("stars").unwrap(), Some(path.clone()));
    assert!(!path.exists());

    let mut keeping = AssetExporter::new(
        ExportOptions::default()
            .with_output_dir(dir.path())
            .with_retention(RetentionPolicy::KeepAll),
    );
    let path = keeping.export(&model).unwrap();
    assert_eq!(keeping.release("stars").unwrap(), None);
    assert!(path.exists());
}

#[test]
fn test_failed_overwrite_keeps_previous_asset() {
    let dir = tempfile::tempdir().unwrap();
    let mut exporter = AssetExporter::new(ExportOptions::default().with_output_dir(dir.path()));

    let table = create_test_table("stars");
    let path = exporter.export(&build_model(&table, &StyleState::default())).unwrap();
    let before = fs::read(&path).unwrap();

    // a directory squatting on the temporary file makes the write fail
    let blocker = dir.path().join(".model_stars.gltf.tmp");
    fs::create_dir(&blocker).unwrap();

    let bigger = build_model(&table, &StyleState::default().with_fixed_size(9.0));
    assert!(exporter.export(&bigger).is_err());

    assert_eq!(fs::read(&path).unwrap(), before);
    assert!(blocker.is_dir());
    assert_eq!(exporter.store().path("stars"), Some(path.as_path()));
}

#[test]
fn test_colliding_labels_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let mut exporter = AssetExporter::new(ExportOptions::default().with_output_dir(dir.path()));

    let slash = build_model(&create_test_table("a/b"), &StyleState::default());
    let path = exporter.export(&slash).unwrap();
    assert_eq!(path, dir.path().join("model_a_b.gltf"));
    let owned = fs::read(&path).unwrap();

    let underscore = build_model(
        &create_test_table("a_b"),
        &StyleState::default().with_fixed_size(9.0),
    );
    let err = exporter.export(&underscore).unwrap_err();
    assert!(matches!(err, glyphview_core::Error::InvalidData(_)));
    assert_eq!(fs::read(&path).unwrap(), owned);

    // once the owner is released the name is free again
    exporter.release("a/b").unwrap();
    assert_eq!(exporter.export(&underscore).unwrap(), path);
}

#[test]
fn test_non_finite_coordinates_export_finite_positions() {
    let dir = tempfile::tempdir().unwrap();
    let mut exporter = AssetExporter::new(ExportOptions::default().with_output_dir(dir.path()));

    let table = create_test_table("holes")
        .with_column("x", vec![0.5, f64::NAN, 2.0])
        .unwrap();
    let path = exporter.export(&build_model(&table, &StyleState::default())).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    let position = &json["accessors"][0];
    for bound in ["min", "max"] {
        let values = position[bound].as_array().unwrap();
        assert!(values.iter().all(|v| v.as_f64().is_some_and(f64::is_finite)));
    }
    assert_eq!(json["meshes"][0]["extras"]["glyphs"], 3);
}
