// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gable roof profile
//!
//! The profile lies in the x = 0 plane: two slopes rising from the eaves at
//! `y = ±(depth/2 + overhang)` to a ridge on the y = 0 centreline. It is
//! swept along x across the full footprint width to form the roof solid.
//!
//! ```text
//!              apex (0, 0, rise + dl)
//!                 /\
//!        A      /    \      B
//!             /        \
//!  (0, -hy, dl)          (0, hy, dl)
//! ```

use crate::error::{ensure_positive, Error, Result};
use crate::profile::Profile2D;
use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Inputs of the roof builder, all in internal units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoofParameters {
    /// Footprint width (sweep length along x)
    pub width: f64,
    /// Footprint depth (profile span along y, before overhang)
    pub depth: f64,
    /// Ridge height above the eaves
    pub rise: f64,
    /// Eave projection beyond each long wall
    pub overhang: f64,
    /// Height of the eaves above the walls' base level
    pub level_offset: f64,
}

/// Bounded straight segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl LineSegment {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Plane the roof profile is drawn in
///
/// The plane is x = 0, the mid-plane the gable segments are drawn in, and
/// `origin` sits on the footprint's -y edge at the eave elevation. The
/// profile is swept along `normal` from `extrusion_start` to `extrusion_end`,
/// measured from the plane, so the sweep starts at the footprint's base
/// corner (see [`ReferencePlane::base_corner`]) and spans the full width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePlane {
    pub origin: Point3<f64>,
    /// Sweep direction
    pub normal: Vector3<f64>,
    /// In-plane direction across the roof span
    pub span_direction: Vector3<f64>,
    /// In-plane upward direction
    pub up: Vector3<f64>,
    pub extrusion_start: f64,
    pub extrusion_end: f64,
}

impl ReferencePlane {
    /// Length swept by the profile
    pub fn sweep_length(&self) -> f64 {
        self.extrusion_end - self.extrusion_start
    }

    /// Footprint corner at the eave elevation where the sweep starts
    pub fn base_corner(&self) -> Point3<f64> {
        self.origin + self.normal * self.extrusion_start
    }

    /// Signed distance of a point from the plane
    pub fn distance_to(&self, point: &Point3<f64>) -> f64 {
        (point - self.origin).dot(&self.normal)
    }
}

/// Symmetric two-segment gable profile and its sweep plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofProfile {
    /// Eave (-y) to apex
    pub slope_a: LineSegment,
    /// Apex to eave (+y)
    pub slope_b: LineSegment,
    pub plane: ReferencePlane,
}

impl RoofProfile {
    /// Build the gable profile for a footprint
    ///
    /// Width, depth, rise and overhang must be positive and finite; the level
    /// offset must be finite. Nothing is built when a parameter is rejected.
    pub fn new(params: &RoofParameters) -> Result<Self> {
        let width = ensure_positive("width", params.width)?;
        let depth = ensure_positive("depth", params.depth)?;
        let rise = ensure_positive("rise", params.rise)?;
        let overhang = ensure_positive("overhang", params.overhang)?;
        let dl = params.level_offset;
        if !dl.is_finite() {
            return Err(Error::invalid_parameter("level_offset", dl));
        }

        let hy = depth / 2.0 + overhang;
        let eave_a = Point3::new(0.0, -hy, dl);
        let apex = Point3::new(0.0, 0.0, rise + dl);
        let eave_b = Point3::new(0.0, hy, dl);

        let half_width = width / 2.0;
        let plane = ReferencePlane {
            origin: Point3::new(0.0, -depth / 2.0, dl),
            normal: Vector3::x(),
            span_direction: Vector3::y(),
            up: Vector3::z(),
            extrusion_start: -half_width,
            extrusion_end: half_width,
        };

        tracing::debug!(hy, ridge = rise + dl, sweep = width, "built gable roof profile");

        Ok(Self {
            slope_a: LineSegment::new(eave_a, apex),
            slope_b: LineSegment::new(apex, eave_b),
            plane,
        })
    }

    /// Ridge point of the profile
    pub fn apex(&self) -> Point3<f64> {
        self.slope_a.end
    }

    /// Eave points, -y side first
    pub fn eaves(&self) -> (Point3<f64>, Point3<f64>) {
        (self.slope_a.start, self.slope_b.end)
    }

    /// Horizontal span between the eaves
    pub fn span(&self) -> f64 {
        self.slope_b.end.y - self.slope_a.start.y
    }

    /// Check mirror symmetry across y = 0
    pub fn is_symmetric(&self) -> bool {
        let (a, b) = self.eaves();
        a.y == -b.y && a.z == b.z && self.apex().y == 0.0
    }

    /// Profile segments in drawing order
    pub fn segments(&self) -> [LineSegment; 2] {
        [self.slope_a, self.slope_b]
    }

    /// Close the gable into a counter-clockwise triangle in plane coordinates
    ///
    /// Plane coordinates are (y, z): across the span and up.
    pub fn to_profile_2d(&self) -> Profile2D {
        let (a, b) = self.eaves();
        let apex = self.apex();
        Profile2D::new(vec![
            Point2::new(a.y, a.z),
            Point2::new(b.y, b.z),
            Point2::new(apex.y, apex.z),
        ])
    }
}
