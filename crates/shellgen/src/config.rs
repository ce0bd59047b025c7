// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generation configuration
//!
//! One record selects the design parameters, the optional pipeline stages
//! and the document names (levels, family types) a pass works against.
//! Every field has a default, so a partial JSON document is a valid config.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use shellgen_geometry::WindowPolicy;
use shellgen_model::CatalogKey;
use std::path::Path;

/// Default base level name
pub const DEFAULT_BASE_LEVEL: &str = "Уровень 1";
/// Default top level name
pub const DEFAULT_TOP_LEVEL: &str = "Уровень 2";
/// Default transaction name
pub const DEFAULT_TRANSACTION_NAME: &str = "Построение стен";

/// Roof stage settings, lengths in millimetres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoofConfig {
    pub rise_mm: f64,
    pub overhang_mm: f64,
    /// Roof type; the host default is used when absent
    pub roof_type: Option<CatalogKey>,
}

impl Default for RoofConfig {
    fn default() -> Self {
        Self {
            rise_mm: 1500.0,
            overhang_mm: 400.0,
            roof_type: None,
        }
    }
}

/// Optional pipeline stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineStages {
    pub with_door: bool,
    pub with_windows: bool,
    pub with_roof: Option<RoofConfig>,
}

impl Default for PipelineStages {
    fn default() -> Self {
        Self {
            with_door: true,
            with_windows: true,
            with_roof: None,
        }
    }
}

impl PipelineStages {
    /// Walls only
    pub fn walls_only() -> Self {
        Self {
            with_door: false,
            with_windows: false,
            with_roof: None,
        }
    }

    /// Walls, door, windows and a default gable roof
    pub fn full() -> Self {
        Self {
            with_roof: Some(RoofConfig::default()),
            ..Self::default()
        }
    }
}

/// Complete configuration of one generation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub base_level: String,
    pub top_level: String,
    pub width_mm: f64,
    pub depth_mm: f64,
    pub stages: PipelineStages,
    /// Wall type; the host default is used when absent
    pub wall_type: Option<CatalogKey>,
    pub door_type: CatalogKey,
    pub window_type: CatalogKey,
    pub window_policy: WindowPolicy,
    pub transaction_name: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_level: DEFAULT_BASE_LEVEL.to_string(),
            top_level: DEFAULT_TOP_LEVEL.to_string(),
            width_mm: 10000.0,
            depth_mm: 5000.0,
            stages: PipelineStages::default(),
            wall_type: None,
            door_type: CatalogKey::new("Одиночные-Щитовые", "0915 x 2134 мм"),
            window_type: CatalogKey::new("Фиксированные", "0915 x 1830 мм"),
            window_policy: WindowPolicy::default(),
            transaction_name: DEFAULT_TRANSACTION_NAME.to_string(),
        }
    }
}

impl GenerationConfig {
    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check names and stage settings
    ///
    /// Numeric parameters are validated by the geometry core after unit
    /// conversion.
    pub fn validate(&self) -> Result<()> {
        if self.base_level.trim().is_empty() || self.top_level.trim().is_empty() {
            return Err(Error::config("level names must not be empty"));
        }
        if self.base_level == self.top_level {
            return Err(Error::config(format!(
                "base and top level are both '{}'",
                self.base_level
            )));
        }
        if self.transaction_name.trim().is_empty() {
            return Err(Error::config("transaction name must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.width_mm, 10000.0);
        assert_eq!(config.depth_mm, 5000.0);
        assert!(config.stages.with_door);
        assert!(config.stages.with_windows);
        assert!(config.stages.with_roof.is_none());
        assert_eq!(config.window_policy, WindowPolicy::SkipDoorAndLast);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = GenerationConfig::from_json_str(
            r#"{
                "base_level": "Level 1",
                "top_level": "Level 2",
                "width_mm": 12000,
                "stages": { "with_roof": { "rise_mm": 2000 } },
                "window_policy": "all_but_door_wall"
            }"#,
        )
        .unwrap();

        assert_eq!(config.width_mm, 12000.0);
        assert_eq!(config.depth_mm, 5000.0);
        assert!(config.stages.with_door);
        let roof = config.stages.with_roof.unwrap();
        assert_eq!(roof.rise_mm, 2000.0);
        assert_eq!(roof.overhang_mm, 400.0);
        assert_eq!(config.window_policy, WindowPolicy::AllButDoorWall);
    }

    #[test]
    fn test_explicit_window_indices() {
        let config =
            GenerationConfig::from_json_str(r#"{ "window_policy": { "indices": [1, 3] } }"#).unwrap();
        assert_eq!(config.window_policy, WindowPolicy::Indices(vec![1, 3]));
    }

    #[test]
    fn test_rejects_same_levels() {
        let err = GenerationConfig::from_json_str(r#"{ "base_level": "A", "top_level": "A" }"#)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            GenerationConfig::from_json_str("{ width_mm: }"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = GenerationConfig::from_path("/nonexistent/shellgen.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_stage_presets() {
        let walls = PipelineStages::walls_only();
        assert!(!walls.with_door && !walls.with_windows && walls.with_roof.is_none());
        assert_eq!(PipelineStages::full().with_roof, Some(RoofConfig::default()));
    }
}
