// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door and window placement
//!
//! An opening is anchored at the midpoint of its host wall. Which walls get
//! which opening depends only on their position in the wall sequence: the
//! door always goes on [`DOOR_WALL_INDEX`], windows follow a [`WindowPolicy`].

use crate::error::{Error, Result};
use crate::walls::{WallSegment, DOOR_WALL_INDEX};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use shellgen_model::{ElementCategory, ElementId};

/// Kind of opening
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningCategory {
    Door,
    Window,
}

impl OpeningCategory {
    /// Catalogue category the opening's type is looked up in
    pub fn element_category(&self) -> ElementCategory {
        match self {
            OpeningCategory::Door => ElementCategory::Doors,
            OpeningCategory::Window => ElementCategory::Windows,
        }
    }
}

/// Placement request for a door or window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub category: OpeningCategory,
    /// Insertion point, midpoint of the host wall
    pub anchor: Point3<f64>,
    /// Index of the host wall in the sequence
    pub wall_index: usize,
    /// Level the opening is placed on (the host wall's base level)
    pub level: ElementId,
}

/// Anchor an opening at the midpoint of `wall`
///
/// The wall's length is not checked against the opening size; the host
/// decides whether the opening fits.
pub fn place(category: OpeningCategory, wall: &WallSegment) -> Opening {
    Opening {
        category,
        anchor: wall.midpoint(),
        wall_index: wall.index,
        level: wall.base_level,
    }
}

/// Rule selecting the window-hosting walls
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPolicy {
    /// Every wall except the door wall and the last wall of the sequence
    #[default]
    SkipDoorAndLast,
    /// Every wall except the door wall
    AllButDoorWall,
    /// Explicit wall indices
    Indices(Vec<usize>),
}

impl WindowPolicy {
    /// Wall indices receiving a window, for a sequence of `wall_count` walls
    pub fn window_walls(&self, wall_count: usize) -> Result<Vec<usize>> {
        match self {
            WindowPolicy::SkipDoorAndLast => {
                Ok((DOOR_WALL_INDEX + 1..wall_count.saturating_sub(1)).collect())
            }
            WindowPolicy::AllButDoorWall => Ok((DOOR_WALL_INDEX + 1..wall_count).collect()),
            WindowPolicy::Indices(indices) => {
                let mut walls = Vec::with_capacity(indices.len());
                for &index in indices {
                    if index == DOOR_WALL_INDEX {
                        return Err(Error::InvalidWallIndex {
                            index,
                            rule: "window placement (door wall)",
                        });
                    }
                    if index >= wall_count {
                        return Err(Error::InvalidWallIndex {
                            index,
                            rule: "window placement (out of range)",
                        });
                    }
                    if !walls.contains(&index) {
                        walls.push(index);
                    }
                }
                walls.sort_unstable();
                Ok(walls)
            }
        }
    }
}

/// Plan every opening for a wall sequence, in wall order
pub fn plan_openings(
    walls: &[WallSegment],
    with_door: bool,
    with_windows: bool,
    policy: &WindowPolicy,
) -> Result<Vec<Opening>> {
    let window_walls = if with_windows {
        policy.window_walls(walls.len())?
    } else {
        Vec::new()
    };

    let mut openings = Vec::with_capacity(window_walls.len() + 1);
    for wall in walls {
        let category = if wall.index == DOOR_WALL_INDEX {
            with_door.then_some(OpeningCategory::Door)
        } else if window_walls.contains(&wall.index) {
            Some(OpeningCategory::Window)
        } else {
            None
        };

        if let Some(category) = category {
            let opening = place(category, wall);
            tracing::debug!(?category, wall = wall.index, "planned opening");
            openings.push(opening);
        }
    }

    Ok(openings)
}
