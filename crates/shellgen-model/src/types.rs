// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core identifiers and document records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Host document element identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for ElementId {
    fn from(id: u32) -> Self {
        ElementId(id)
    }
}

impl From<ElementId> for u32 {
    fn from(id: ElementId) -> Self {
        id.0
    }
}

/// Built-in element category
///
/// Catalogue entries are filtered by category before they are matched by
/// family and type name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementCategory {
    Walls,
    Doors,
    Windows,
    Roofs,
}

impl ElementCategory {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementCategory::Walls => "wall",
            ElementCategory::Doors => "door",
            ElementCategory::Windows => "window",
            ElementCategory::Roofs => "roof",
        }
    }
}

impl fmt::Display for ElementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Named horizontal reference elevation
///
/// Levels are owned by the host document. The generator only reads the name
/// and elevation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Element ID
    pub id: ElementId,
    /// Level name as shown in the document
    pub name: String,
    /// Elevation in the host's internal unit
    pub elevation: f64,
}

impl Level {
    /// Create a new level
    pub fn new(id: ElementId, name: impl Into<String>, elevation: f64) -> Self {
        Self {
            id,
            name: name.into(),
            elevation,
        }
    }

    /// Vertical distance from `other` up to this level
    pub fn offset_from(&self, other: &Level) -> f64 {
        self.elevation - other.elevation
    }
}

/// Family and type name pair identifying a catalogue entry
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogKey {
    /// Family name (e.g. "Fixed")
    pub family: String,
    /// Type name within the family (e.g. "0915 x 1830 mm")
    pub type_name: String,
}

impl CatalogKey {
    /// Create a new catalogue key
    pub fn new(family: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.family, self.type_name)
    }
}

/// Family type available in the document's library
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Element ID of the type
    pub id: ElementId,
    /// Category the type belongs to
    pub category: ElementCategory,
    /// Family name
    pub family: String,
    /// Type name
    pub type_name: String,
    /// Whether the type is active; inactive types must be activated before placement
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CatalogEntry {
    /// Create a new active catalogue entry
    pub fn new(
        id: ElementId,
        category: ElementCategory,
        family: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            category,
            family: family.into(),
            type_name: type_name.into(),
            is_active: true,
        }
    }

    /// Mark the entry as inactive
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Check whether this entry matches a category and key
    pub fn matches(&self, category: ElementCategory, key: &CatalogKey) -> bool {
        self.category == category && self.family == key.family && self.type_name == key.type_name
    }
}
