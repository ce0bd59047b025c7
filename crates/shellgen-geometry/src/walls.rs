// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall sequence derived from the footprint loop

use crate::footprint::FootprintLoop;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use shellgen_model::{ElementId, Level};

/// Index of the wall that hosts the door
pub const DOOR_WALL_INDEX: usize = 0;

/// Straight wall between two footprint corners, spanning base to top level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    /// Position in the wall sequence
    pub index: usize,
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    /// Level the wall stands on
    pub base_level: ElementId,
    /// Level that constrains the wall top
    pub top_level: ElementId,
}

impl WallSegment {
    /// Component-wise midpoint of the endpoints
    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.start, &self.end)
    }

    /// Wall length along its location line
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit direction from start to end
    pub fn direction(&self) -> Vector3<f64> {
        (self.end - self.start).normalize()
    }
}

/// Turn a footprint loop into its ordered wall sequence
///
/// Segment `i` spans `loop[i]` to `loop[i + 1]`; every segment shares the
/// same base and top level. The order is significant: segment
/// [`DOOR_WALL_INDEX`] hosts the door.
pub fn build_wall_sequence(footprint: &FootprintLoop, base: &Level, top: &Level) -> Vec<WallSegment> {
    let walls: Vec<WallSegment> = footprint
        .edges()
        .enumerate()
        .map(|(index, (start, end))| WallSegment {
            index,
            start,
            end,
            base_level: base.id,
            top_level: top.id,
        })
        .collect();

    for wall in &walls {
        tracing::debug!(
            index = wall.index,
            length = wall.length(),
            base = %base.name,
            top = %top.name,
            "planned wall"
        );
    }

    walls
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels() -> (Level, Level) {
        (
            Level::new(ElementId(1), "Level 1", 0.0),
            Level::new(ElementId(2), "Level 2", 13.0),
        )
    }

    #[test]
    fn test_four_walls_in_loop_order() {
        let (base, top) = levels();
        let footprint = FootprintLoop::new(10.0, 5.0).unwrap();
        let walls = build_wall_sequence(&footprint, &base, &top);

        assert_eq!(walls.len(), 4);
        for (i, wall) in walls.iter().enumerate() {
            assert_eq!(wall.index, i);
            assert_eq!(wall.start, footprint.points()[i]);
            assert_eq!(wall.end, footprint.points()[i + 1]);
        }
    }

    #[test]
    fn test_walls_retrace_loop() {
        let (base, top) = levels();
        for (w, d) in [(10.0, 5.0), (2.0, 9.0), (0.25, 0.25)] {
            let footprint = FootprintLoop::new(w, d).unwrap();
            let walls = build_wall_sequence(&footprint, &base, &top);
            for i in 0..walls.len() {
                let next = &walls[(i + 1) % walls.len()];
                assert_eq!(walls[i].end, next.start);
            }
        }
    }

    #[test]
    fn test_shared_levels() {
        let (base, top) = levels();
        let footprint = FootprintLoop::new(4.0, 3.0).unwrap();
        let walls = build_wall_sequence(&footprint, &base, &top);
        assert!(walls
            .iter()
            .all(|w| w.base_level == base.id && w.top_level == top.id));
    }

    #[test]
    fn test_lengths_and_door_wall() {
        let (base, top) = levels();
        let footprint = FootprintLoop::new(10.0, 5.0).unwrap();
        let walls = build_wall_sequence(&footprint, &base, &top);

        let lengths: Vec<f64> = walls.iter().map(WallSegment::length).collect();
        assert_eq!(lengths, vec![10.0, 5.0, 10.0, 5.0]);

        // Door wall runs along +x on the -y side
        let door_wall = &walls[DOOR_WALL_INDEX];
        assert_eq!(door_wall.direction(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(door_wall.midpoint(), Point3::new(0.0, -2.5, 0.0));
    }
}
