// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar outlines (footprint, gable) and their cap triangulation

use crate::error::{Error, Result};
use nalgebra::Point2;

/// Simple closed polygon in its own plane
///
/// The last point connects back to the first; it is not repeated.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile2D {
    /// Boundary, counter-clockwise
    pub outer: Vec<Point2<f64>>,
}

impl Profile2D {
    pub fn new(outer: Vec<Point2<f64>>) -> Self {
        Self { outer }
    }

    /// Shoelace area, positive for counter-clockwise boundaries
    pub fn signed_area(&self) -> f64 {
        if self.outer.len() < 3 {
            return 0.0;
        }
        let next = self.outer.iter().cycle().skip(1);
        self.outer
            .iter()
            .zip(next)
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum::<f64>()
            / 2.0
    }

    /// Split the polygon into triangles with earcutr
    pub fn triangulate(&self) -> Result<Triangulation> {
        if self.outer.len() < 3 {
            return Err(Error::profile(format!(
                "outline has {} points, needs at least 3",
                self.outer.len()
            )));
        }

        let flat: Vec<f64> = self.outer.iter().flat_map(|p| [p.x, p.y]).collect();
        let indices = earcutr::earcut(&flat, &[], 2)
            .map_err(|e| Error::triangulation(format!("{e:?}")))?;
        if indices.is_empty() {
            return Err(Error::triangulation("outline is degenerate"));
        }

        Ok(Triangulation {
            points: self.outer.clone(),
            indices,
        })
    }
}

/// Cap triangles over a profile's points
#[derive(Debug, Clone)]
pub struct Triangulation {
    pub points: Vec<Point2<f64>>,
    /// Three indices into `points` per triangle
    pub indices: Vec<usize>,
}

impl Triangulation {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
