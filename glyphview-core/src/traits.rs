//! Core traits for glyphview

use crate::mesh::GlyphMesh;
use crate::point::Point3f;

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);
}

impl Drawable for GlyphMesh {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        if self.vertices.is_empty() {
            return (Point3f::origin(), Point3f::origin());
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for vertex in &self.vertices {
            min.x = min.x.min(vertex.x);
            min.y = min.y.min(vertex.y);
            min.z = min.z.min(vertex.z);

            max.x = max.x.max(vertex.x);
            max.y = max.y.max(vertex.y);
            max.z = max.z.max(vertex.z);
        }

        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_bounding_box() {
        let mut mesh = GlyphMesh::new();
        assert_eq!(mesh.bounding_box(), (Point3f::origin(), Point3f::origin()));

        mesh.vertices = vec![
            Point3f::new(1.0, -2.0, 0.5),
            Point3f::new(-1.0, 3.0, 0.0),
            Point3f::new(0.0, 0.0, 4.0),
        ];
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, Point3f::new(-1.0, -2.0, 0.0));
        assert_eq!(max, Point3f::new(1.0, 3.0, 4.0));
    }
}
