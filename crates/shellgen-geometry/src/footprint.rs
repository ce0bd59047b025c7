// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rectangular footprint loop
//!
//! The footprint is a closed loop of five points centred on the origin at
//! z = 0. Corners run counter-clockwise seen from above, starting at the
//! (-x, -y) corner, and the fifth point repeats the first. Wall segments
//! follow this order, so the first edge (along -y) is the door wall.

use crate::error::{ensure_positive, Result};
use crate::profile::Profile2D;
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

/// Number of points in a closed rectangular loop
pub const LOOP_LEN: usize = 5;

/// Closed rectangular loop in internal units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintLoop {
    points: [Point3<f64>; LOOP_LEN],
}

impl FootprintLoop {
    /// Build the loop of a `width` x `depth` rectangle centred at the origin
    ///
    /// Both dimensions must already be in internal units. Zero, negative and
    /// non-finite values are rejected before any point is produced.
    pub fn new(width: f64, depth: f64) -> Result<Self> {
        let width = ensure_positive("width", width)?;
        let depth = ensure_positive("depth", depth)?;

        let dx = width / 2.0;
        let dy = depth / 2.0;

        let points = [
            Point3::new(-dx, -dy, 0.0),
            Point3::new(dx, -dy, 0.0),
            Point3::new(dx, dy, 0.0),
            Point3::new(-dx, dy, 0.0),
            Point3::new(-dx, -dy, 0.0),
        ];

        tracing::debug!(dx, dy, "built footprint loop");
        Ok(Self { points })
    }

    /// All five points, first and last equal
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Consecutive point pairs, one per rectangle edge
    pub fn edges(&self) -> impl Iterator<Item = (Point3<f64>, Point3<f64>)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Half of the footprint width
    pub fn half_width(&self) -> f64 {
        self.points[1].x
    }

    /// Half of the footprint depth
    pub fn half_depth(&self) -> f64 {
        self.points[2].y
    }

    /// Full footprint width (x extent)
    pub fn width(&self) -> f64 {
        self.half_width() * 2.0
    }

    /// Full footprint depth (y extent)
    pub fn depth(&self) -> f64 {
        self.half_depth() * 2.0
    }

    /// Check that the loop is closed
    pub fn is_closed(&self) -> bool {
        self.points[0] == self.points[LOOP_LEN - 1]
    }

    /// Outline as an open 2D profile (four corners)
    pub fn to_profile(&self) -> Profile2D {
        Profile2D::new(
            self.points[..LOOP_LEN - 1]
                .iter()
                .map(|p| Point2::new(p.x, p.y))
                .collect(),
        )
    }
}
