// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle mesh for previewing generated solids

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Flat-shaded triangle mesh (GPU-friendly f32 buffers)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions, xyz interleaved
    pub positions: Vec<f32>,
    /// Vertex normals, xyz interleaved
    pub normals: Vec<f32>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices * 3),
            normals: Vec::with_capacity(vertices * 3),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Append a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions
            .extend_from_slice(&[position.x as f32, position.y as f32, position.z as f32]);
        self.normals
            .extend_from_slice(&[normal.x as f32, normal.y as f32, normal.z as f32]);
        index
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of vertex `i`
    pub fn position(&self, i: usize) -> Point3<f64> {
        let p = &self.positions[i * 3..i * 3 + 3];
        Point3::new(p[0] as f64, p[1] as f64, p[2] as f64)
    }

    /// Axis-aligned bounds as (min, max), `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        if self.vertex_count() == 0 {
            return None;
        }
        let mut min = self.position(0);
        let mut max = min;
        for i in 1..self.vertex_count() {
            let p = self.position(i);
            min = min.inf(&p);
            max = max.sup(&p);
        }
        Some((min, max))
    }

    /// Enclosed volume by the divergence theorem (closed meshes only)
    pub fn volume(&self) -> f64 {
        self.indices
            .chunks_exact(3)
            .map(|t| {
                let a = self.position(t[0] as usize).coords;
                let b = self.position(t[1] as usize).coords;
                let c = self.position(t[2] as usize).coords;
                a.dot(&b.cross(&c))
            })
            .sum::<f64>()
            / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_vertex_and_triangle() {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), Vector3::z());
        let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0), Vector3::z());
        let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0), Vector3::z());
        mesh.add_triangle(a, b, c);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.is_empty());
        assert_eq!(mesh.bounds(), Some((Point3::origin(), Point3::new(1.0, 1.0, 0.0))));
    }

    #[test]
    fn test_empty_bounds() {
        assert!(Mesh::new().bounds().is_none());
        assert_eq!(Mesh::new().volume(), 0.0);
    }
}
