//! UV sphere tessellation used as the glyph template
//!
//! Vertex layout: north pole, south pole, then `theta_resolution` meridians of
//! `phi_resolution - 2` ring vertices each, walking from north to south.

use glyphview_core::{Point3f, Vector3f};
use std::f32::consts::PI;

/// Smallest resolution that still encloses a volume
pub const MIN_RESOLUTION: usize = 3;

/// Number of vertices in one sphere glyph.
///
/// Resolutions below [`MIN_RESOLUTION`] are raised to it, as [`SphereSource`]
/// does.
pub fn points_per_glyph(phi_resolution: usize, theta_resolution: usize) -> usize {
    let phi = phi_resolution.max(MIN_RESOLUTION);
    let theta = theta_resolution.max(MIN_RESOLUTION);
    2 + (phi - 2) * theta
}

/// Parameters of a sphere centered on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSource {
    pub radius: f32,
    pub phi_resolution: usize,
    pub theta_resolution: usize,
}

/// Tessellated sphere geometry
#[derive(Debug, Clone)]
pub struct SphereTemplate {
    pub vertices: Vec<Point3f>,
    pub normals: Vec<Vector3f>,
    pub faces: Vec<[usize; 3]>,
}

impl SphereSource {
    pub fn new(radius: f32, phi_resolution: usize, theta_resolution: usize) -> Self {
        Self {
            radius,
            phi_resolution: phi_resolution.max(MIN_RESOLUTION),
            theta_resolution: theta_resolution.max(MIN_RESOLUTION),
        }
    }

    pub fn points_per_glyph(&self) -> usize {
        points_per_glyph(self.phi_resolution, self.theta_resolution)
    }

    /// Generate vertices, outward unit normals and outward-wound triangles
    pub fn build(&self) -> SphereTemplate {
        let phi_res = self.phi_resolution;
        let theta_res = self.theta_resolution;
        let rings = phi_res - 2;
        let count = self.points_per_glyph();

        let mut normals = Vec::with_capacity(count);
        normals.push(Vector3f::new(0.0, 0.0, 1.0));
        normals.push(Vector3f::new(0.0, 0.0, -1.0));
        for i in 0..theta_res {
            let theta = 2.0 * PI * i as f32 / theta_res as f32;
            for j in 1..=rings {
                let phi = PI * j as f32 / (phi_res - 1) as f32;
                normals.push(Vector3f::new(
                    phi.sin() * theta.cos(),
                    phi.sin() * theta.sin(),
                    phi.cos(),
                ));
            }
        }

        let vertices = normals
            .iter()
            .map(|n| Point3f::from(n * self.radius))
            .collect();

        let ring = |i: usize, j: usize| 2 + (i % theta_res) * rings + (j - 1);
        let mut faces = Vec::with_capacity(2 * theta_res * (rings - 1) + 2 * theta_res);
        for i in 0..theta_res {
            let next = i + 1;
            faces.push([0, ring(i, 1), ring(next, 1)]);
            for j in 1..rings {
                let a = ring(i, j);
                let b = ring(i, j + 1);
                let c = ring(next, j + 1);
                let d = ring(next, j);
                faces.push([a, b, c]);
                faces.push([a, c, d]);
            }
            faces.push([1, ring(next, rings), ring(i, rings)]);
        }

        SphereTemplate {
            vertices,
            normals,
            faces,
        }
    }
}
