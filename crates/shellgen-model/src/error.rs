// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for document lookups

use crate::ElementCategory;
use thiserror::Error;

/// Result type alias for lookup operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while reading from a host document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// No level carries the requested name
    #[error("Level '{0}' not found")]
    LevelNotFound(String),

    /// No catalogue entry matches category, family and type name
    #[error("No {category} type '{type_name}' in family '{family}'")]
    CatalogEntryNotFound {
        category: ElementCategory,
        family: String,
        type_name: String,
    },

    /// Two requested level names refer to the same level
    #[error("Levels '{0}' and '{1}' must be distinct")]
    DuplicateLevel(String, String),
}

impl ModelError {
    /// Create a level-not-found error
    pub fn level_not_found(name: impl Into<String>) -> Self {
        ModelError::LevelNotFound(name.into())
    }

    /// Create a catalogue-entry-not-found error
    pub fn catalog_entry_not_found(
        category: ElementCategory,
        family: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        ModelError::CatalogEntryNotFound {
            category,
            family: family.into(),
            type_name: type_name.into(),
        }
    }
}
