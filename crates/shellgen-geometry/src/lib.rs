// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # shellgen Geometry
//!
//! Pure geometric derivation of a rectangular building shell. Every function
//! here takes lengths already converted to the host's internal unit and
//! returns plain data; nothing touches a document.
//!
//! ## Overview
//!
//! - **Footprint**: closed five-point loop of a centred rectangle
//! - **Walls**: one segment per footprint edge, in loop order
//! - **Openings**: door and window anchors at wall midpoints
//! - **Roof**: symmetric gable profile and its sweep plane
//! - **Extrusion**: triangulated preview solids via earcutr
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shellgen_geometry::{build_wall_sequence, plan_openings, FootprintLoop, WindowPolicy};
//!
//! let footprint = FootprintLoop::new(32.8, 16.4)?;
//! let walls = build_wall_sequence(&footprint, &base, &top);
//! let openings = plan_openings(&walls, true, true, &WindowPolicy::default())?;
//! ```

pub mod error;
pub mod extrusion;
pub mod footprint;
pub mod mesh;
pub mod openings;
pub mod profile;
pub mod roof;
pub mod walls;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

// Re-export main types
pub use error::{ensure_positive, Error, Result};
pub use extrusion::{apply_transform, extrude_profile, sweep_roof};
pub use footprint::{FootprintLoop, LOOP_LEN};
pub use mesh::Mesh;
pub use openings::{place, plan_openings, Opening, OpeningCategory, WindowPolicy};
pub use profile::{Profile2D, Triangulation};
pub use roof::{LineSegment, ReferencePlane, RoofParameters, RoofProfile};
pub use walls::{build_wall_sequence, WallSegment, DOOR_WALL_INDEX};

#[cfg(test)]
mod tests {
    use super::*;
    use shellgen_model::{ElementId, Level};

    #[test]
    fn test_footprint_to_openings_pipeline() {
        let base = Level::new(ElementId(1), "Level 1", 0.0);
        let top = Level::new(ElementId(2), "Level 2", 10.0);

        let footprint = FootprintLoop::new(32.8, 16.4).unwrap();
        let walls = build_wall_sequence(&footprint, &base, &top);
        let openings = plan_openings(&walls, true, true, &WindowPolicy::default()).unwrap();

        assert_eq!(walls.len(), 4);
        assert_eq!(openings.len(), 3);
        assert_eq!(openings[0].wall_index, DOOR_WALL_INDEX);
    }

    #[test]
    fn test_footprint_extrusion() {
        let footprint = FootprintLoop::new(4.0, 2.0).unwrap();
        let mesh = extrude_profile(&footprint.to_profile(), 3.0, None).unwrap();
        assert!(mesh.vertex_count() > 0);
        assert!((mesh.volume() - 24.0).abs() < 1e-3);
    }
}
