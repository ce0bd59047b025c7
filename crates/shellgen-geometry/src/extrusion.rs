// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Profile extrusion and the roof sweep

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::profile::Profile2D;
use crate::roof::RoofProfile;
use nalgebra::{Matrix4, Point2, Point3, Vector3};

/// Extrude a profile along local +Z by `depth`
///
/// The bottom cap sits at z = 0 and faces -Z. An optional transform maps the
/// result from profile space into model space.
pub fn extrude_profile(
    profile: &Profile2D,
    depth: f64,
    transform: Option<Matrix4<f64>>,
) -> Result<Mesh> {
    if !(depth.is_finite() && depth > 0.0) {
        return Err(Error::geometry(format!("Invalid extrusion depth {depth}")));
    }

    let tri = profile.triangulate()?;
    let ring_len = profile.outer.len();
    let mut mesh = Mesh::with_capacity(
        tri.points.len() * 2 + ring_len * 4,
        tri.indices.len() * 2 + ring_len * 6,
    );

    // Bottom cap, reversed winding
    let base = mesh.vertex_count() as u32;
    for p in &tri.points {
        mesh.add_vertex(Point3::new(p.x, p.y, 0.0), -Vector3::z());
    }
    for t in tri.indices.chunks_exact(3) {
        mesh.add_triangle(base + t[0] as u32, base + t[2] as u32, base + t[1] as u32);
    }

    // Top cap
    let base = mesh.vertex_count() as u32;
    for p in &tri.points {
        mesh.add_vertex(Point3::new(p.x, p.y, depth), Vector3::z());
    }
    for t in tri.indices.chunks_exact(3) {
        mesh.add_triangle(base + t[0] as u32, base + t[1] as u32, base + t[2] as u32);
    }

    add_side_walls(&mut mesh, &profile.outer, depth);

    if let Some(transform) = transform {
        apply_transform(&mut mesh, &transform);
    }

    Ok(mesh)
}

/// One quad per ring edge; outward normal is the edge rotated clockwise
fn add_side_walls(mesh: &mut Mesh, ring: &[Point2<f64>], depth: f64) {
    let n = ring.len();
    for i in 0..n {
        let p0 = ring[i];
        let p1 = ring[(i + 1) % n];
        let edge = p1 - p0;
        if edge.norm() < 1e-12 {
            continue;
        }
        let normal = Vector3::new(edge.y, -edge.x, 0.0).normalize();

        let a = mesh.add_vertex(Point3::new(p0.x, p0.y, 0.0), normal);
        let b = mesh.add_vertex(Point3::new(p1.x, p1.y, 0.0), normal);
        let c = mesh.add_vertex(Point3::new(p1.x, p1.y, depth), normal);
        let d = mesh.add_vertex(Point3::new(p0.x, p0.y, depth), normal);
        mesh.add_triangle(a, b, c);
        mesh.add_triangle(a, c, d);
    }
}

/// Apply a rigid transform to positions and normals in place
pub fn apply_transform(mesh: &mut Mesh, transform: &Matrix4<f64>) {
    for chunk in mesh.positions.chunks_exact_mut(3) {
        let p = transform.transform_point(&Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64));
        chunk[0] = p.x as f32;
        chunk[1] = p.y as f32;
        chunk[2] = p.z as f32;
    }
    for chunk in mesh.normals.chunks_exact_mut(3) {
        let n = transform
            .transform_vector(&Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64))
            .normalize();
        chunk[0] = n.x as f32;
        chunk[1] = n.y as f32;
        chunk[2] = n.z as f32;
    }
}

/// Sweep the closed gable profile across its reference plane extents
///
/// Profile space (u, v, w) maps to (span_direction, up, normal) of the plane;
/// the sweep starts `extrusion_start` along the normal from the plane.
pub fn sweep_roof(roof: &RoofProfile) -> Result<Mesh> {
    let plane = &roof.plane;
    let profile = roof.to_profile_2d();

    // Profile coordinates are already absolute (y, z); only the sweep axis
    // needs an offset.
    let start = plane.origin.coords.dot(&plane.normal) + plane.extrusion_start;
    let translation = plane.normal * start;

    #[rustfmt::skip]
    let transform = Matrix4::new(
        plane.span_direction.x, plane.up.x, plane.normal.x, translation.x,
        plane.span_direction.y, plane.up.y, plane.normal.y, translation.y,
        plane.span_direction.z, plane.up.z, plane.normal.z, translation.z,
        0.0, 0.0, 0.0, 1.0,
    );

    extrude_profile(&profile, plane.sweep_length(), Some(transform))
}
