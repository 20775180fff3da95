//! Integration tests for glyphview-algorithms
//!
//! These tests drive the mesh builder end to end and check the sizing and
//! coloring guarantees over whole meshes.

use approx::assert_relative_eq;
use glyphview_algorithms::*;
use glyphview_core::{
    AxisAttributes, Color, ColoringDirective, DataTable, StyleState, ViewerBounds,
};

/// Three points on the diagonal of the unit-2 cube
fn create_diagonal_table() -> DataTable {
    DataTable::new("diagonal")
        .with_column("x", vec![0.0, 1.0, 2.0])
        .unwrap()
        .with_column("y", vec![0.0, 1.0, 2.0])
        .unwrap()
        .with_column("z", vec![0.0, 1.0, 2.0])
        .unwrap()
}

/// A table with an extra attribute column
fn create_table_with_attribute(values: Vec<f64>) -> DataTable {
    let n = values.len();
    let coords: Vec<f64> = (0..n).map(|i| i as f64).collect();
    DataTable::new("attr")
        .with_column("x", coords.clone())
        .unwrap()
        .with_column("y", coords.clone())
        .unwrap()
        .with_column("z", coords)
        .unwrap()
        .with_column("value", values)
        .unwrap()
}

#[test]
fn test_fixed_size_instances_share_one_scale() {
    let table = create_table_with_attribute(vec![1.0, 5.0, -2.0, 8.0, 0.5]);
    let builder = MeshBuilder::default();
    let style = StyleState::default().with_fixed_size(7.0);

    let model = builder
        .build(Some(&table), &style, &ViewerBounds::cube(0.0, 10.0))
        .unwrap()
        .unwrap();

    assert_eq!(model.mesh.glyph_count(), 5);
    let first = model.mesh.instances[0].scale;
    assert!(model.mesh.instances.iter().all(|i| i.scale == first));
}

#[test]
fn test_mapped_size_with_equal_limits_uses_constant() {
    let table = create_table_with_attribute(vec![4.0, 4.0, 4.0]);
    let mut style = StyleState::default().with_size_scaling(2.5);
    style.set_size_attribute(&table, "value").unwrap();
    style.size_mode = glyphview_core::SizeMode::Mapped;
    assert_eq!(style.size_value_min, style.size_value_max);

    let bounds = ViewerBounds::cube(0.0, 4.0);
    let model = MeshBuilder::default()
        .build(Some(&table), &style, &bounds)
        .unwrap()
        .unwrap();

    let expected = (2.5 / 4.0 * 10f64.sqrt()) as f32;
    for instance in &model.mesh.instances {
        assert!(!instance.scale.is_nan());
        assert_relative_eq!(instance.scale, expected, epsilon = 1e-6);
    }
}

#[test]
fn test_mapped_size_monotonic_in_attribute() {
    let values = vec![3.0, -1.0, 12.0, 7.5, 0.0, 9.0, f64::NAN, 5.0];
    let table = create_table_with_attribute(values.clone());
    let style = StyleState::default().with_size_mapping("value", 0.0, 10.0);

    let model = MeshBuilder::default()
        .build(Some(&table), &style, &ViewerBounds::cube(0.0, 1.0))
        .unwrap()
        .unwrap();

    let mut pairs: Vec<(f64, f32)> = values
        .iter()
        .zip(&model.mesh.instances)
        .filter(|(v, _)| v.is_finite())
        .map(|(v, i)| (v.clamp(0.0, 10.0), i.scale))
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    for pair in pairs.windows(2) {
        assert!(pair[0].1 <= pair[1].1, "{:?} then {:?}", pair[0], pair[1]);
    }

    // the malformed row is coerced, not propagated
    assert_eq!(model.mesh.instances[6].scale, 0.0);
}

#[test]
fn test_inverted_color_limits_reverse_colormap() {
    let table = create_table_with_attribute(vec![1.0, 2.0, 3.0]);
    let style = StyleState::default().with_color_mapping("value", "magma", 3.0, 1.0);

    let model = MeshBuilder::default()
        .build(Some(&table), &style, &ViewerBounds::default())
        .unwrap()
        .unwrap();

    match &model.coloring {
        ColoringDirective::Mapped { colormap, low, high } => {
            assert_eq!(colormap.name, "magma_r");
            assert!(colormap.is_reversed());
            assert!(low <= high);
            assert_eq!((*low, *high), (1.0, 3.0));
        }
        other => panic!("expected mapped coloring, got {:?}", other),
    }
}

#[test]
fn test_diagonal_scenario() {
    let table = create_diagonal_table();
    let style = StyleState::default()
        .with_fixed_color("red")
        .with_fixed_size(4.0)
        .with_size_scaling(1.0);
    let bounds = ViewerBounds::cube(0.0, 2.0);

    let builder = MeshBuilder::new(AxisAttributes::default(), GlyphOptions::default());
    let model = builder.build(Some(&table), &style, &bounds).unwrap().unwrap();

    assert_eq!(model.mesh.glyph_count(), 3);
    for index in 0..3 {
        assert_relative_eq!(model.mesh.instance_radius(index).unwrap(), 0.1, epsilon = 1e-6);
    }
    assert_eq!(model.coloring, ColoringDirective::Fixed(Color::rgb(1.0, 0.0, 0.0)));
    assert_eq!(
        model.mesh.vertex_count(),
        3 * GlyphOptions::default().points_per_glyph()
    );
}
