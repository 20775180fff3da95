//! Glyph instancing: one template copy per point, no rotation

use crate::sizing::GlyphScaling;
use crate::sphere::SphereTemplate;
use glyphview_core::{GlyphInstance, GlyphMesh, Point3f, PointCloud3f};

/// Stamp `template` at every point of `cloud`.
///
/// With [`GlyphScaling::PerPoint`] copy `i` is scaled by the `i`-th factor;
/// normals are left as the template's since the scaling is isotropic.
///
/// A point with a non-finite coordinate still gets its copy, collapsed to
/// size zero at the origin, so vertex positions stay finite and per-vertex
/// scalars stay aligned with the table rows.
pub fn instance_glyphs(
    cloud: &PointCloud3f,
    template: &SphereTemplate,
    base_radius: f32,
    scaling: &GlyphScaling,
) -> GlyphMesh {
    let per_glyph = template.vertices.len();
    let count = cloud.len();

    let mut mesh = GlyphMesh {
        vertices: Vec::with_capacity(count * per_glyph),
        normals: Vec::with_capacity(count * per_glyph),
        faces: Vec::with_capacity(count * template.faces.len()),
        scalars: None,
        instances: Vec::with_capacity(count),
        points_per_glyph: per_glyph,
        base_radius,
    };

    let mut collapsed = 0usize;
    for (index, point) in cloud.iter().enumerate() {
        let (center, scale) = if point.iter().all(|c| c.is_finite()) {
            let scale = match scaling {
                GlyphScaling::Uniform => 1.0,
                GlyphScaling::PerPoint(sizes) => sizes.get(index).copied().unwrap_or(0.0) as f32,
            };
            (*point, scale)
        } else {
            collapsed += 1;
            (Point3f::origin(), 0.0)
        };

        let offset = mesh.vertices.len();
        mesh.vertices.extend(
            template
                .vertices
                .iter()
                .map(|v| Point3f::from(center.coords + v.coords * scale)),
        );
        mesh.normals.extend_from_slice(&template.normals);
        mesh.faces.extend(
            template
                .faces
                .iter()
                .map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]),
        );
        mesh.instances.push(GlyphInstance { center, scale });
    }

    if collapsed > 0 {
        tracing::warn!(collapsed, "points with non-finite coordinates collapsed to the origin");
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::SphereSource;
    use approx::assert_relative_eq;

    fn cloud() -> PointCloud3f {
        PointCloud3f::from_points(vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(10.0, 0.0, 0.0)])
    }

    #[test]
    fn test_uniform_instancing() {
        let template = SphereSource::new(1.0, 5, 4).build();
        let mesh = instance_glyphs(&cloud(), &template, 1.0, &GlyphScaling::Uniform);

        assert_eq!(mesh.glyph_count(), 2);
        assert_eq!(mesh.vertex_count(), 2 * template.vertices.len());
        assert_eq!(mesh.face_count(), 2 * template.faces.len());
        assert_eq!(mesh.points_per_glyph, template.vertices.len());

        // second glyph is the template shifted to its center
        let first = mesh.vertices[mesh.points_per_glyph];
        assert_relative_eq!(first.x, 10.0);
        assert_relative_eq!(first.z, 1.0);
        let last_face = mesh.faces.last().unwrap();
        assert!(last_face.iter().all(|&i| i >= mesh.points_per_glyph));
    }

    #[test]
    fn test_per_point_scaling() {
        let template = SphereSource::new(0.5, 4, 4).build();
        let scaling = GlyphScaling::PerPoint(vec![2.0, 0.0]);
        let mesh = instance_glyphs(&cloud(), &template, 0.5, &scaling);

        assert_relative_eq!(mesh.instance_radius(0).unwrap(), 1.0);
        assert_relative_eq!(mesh.instance_radius(1).unwrap(), 0.0);
        assert_relative_eq!(mesh.vertices[0].z, 1.0);
        // a zero-size glyph collapses onto its center
        for v in &mesh.vertices[mesh.points_per_glyph..] {
            assert_eq!(*v, Point3f::new(10.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_empty_cloud() {
        let template = SphereSource::new(1.0, 5, 5).build();
        let mesh = instance_glyphs(&PointCloud3f::new(), &template, 1.0, &GlyphScaling::Uniform);
        assert!(mesh.is_empty());
        assert_eq!(mesh.glyph_count(), 0);
    }

    #[test]
    fn test_non_finite_center_collapses_to_origin() {
        let template = SphereSource::new(1.0, 4, 4).build();
        let cloud = PointCloud3f::from_points(vec![
            Point3f::new(f32::NAN, 1.0, 1.0),
            Point3f::new(2.0, 0.0, 0.0),
        ]);
        let mesh = instance_glyphs(&cloud, &template, 1.0, &GlyphScaling::Uniform);

        assert_eq!(mesh.glyph_count(), 2);
        assert!(mesh.vertices.iter().all(|v| v.iter().all(|c| c.is_finite())));
        assert_eq!(mesh.instances[0].center, Point3f::origin());
        assert_relative_eq!(mesh.instance_radius(0).unwrap(), 0.0);
        assert_relative_eq!(mesh.instance_radius(1).unwrap(), 1.0);
    }
}
