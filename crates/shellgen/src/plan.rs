// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planning pass
//!
//! Converts the design parameters once, then derives footprint, walls,
//! openings and roof. The resulting [`ShellPlan`] is plain data; nothing is
//! written to a document here.

use crate::config::GenerationConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use shellgen_geometry::{
    build_wall_sequence, ensure_positive, plan_openings, FootprintLoop, Opening, OpeningCategory,
    RoofParameters, RoofProfile, WallSegment, WindowPolicy,
};
use shellgen_model::{ElementId, Length, LengthUnit, Level, UnitConverter};

/// Design parameters of one shell, lengths in millimetres
#[derive(Debug, Clone, PartialEq)]
pub struct ShellParameters {
    pub width_mm: f64,
    pub depth_mm: f64,
    pub with_door: bool,
    pub with_windows: bool,
    pub window_policy: WindowPolicy,
    /// Roof rise and overhang, when the roof stage is enabled
    pub roof: Option<(f64, f64)>,
}

impl From<&GenerationConfig> for ShellParameters {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            width_mm: config.width_mm,
            depth_mm: config.depth_mm,
            with_door: config.stages.with_door,
            with_windows: config.stages.with_windows,
            window_policy: config.window_policy.clone(),
            roof: config
                .stages
                .with_roof
                .as_ref()
                .map(|roof| (roof.rise_mm, roof.overhang_mm)),
        }
    }
}

/// Design parameters after the single conversion into internal units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InternalDimensions {
    pub width: f64,
    pub depth: f64,
    pub rise: Option<f64>,
    pub overhang: Option<f64>,
}

impl InternalDimensions {
    fn convert(params: &ShellParameters, converter: &UnitConverter) -> Self {
        let to_internal = |mm: f64| converter.to_internal(Length::millimetres(mm)).value;
        Self {
            width: to_internal(params.width_mm),
            depth: to_internal(params.depth_mm),
            rise: params.roof.map(|(rise, _)| to_internal(rise)),
            overhang: params.roof.map(|(_, overhang)| to_internal(overhang)),
        }
    }
}

/// Complete shell description, ready to hand to a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellPlan {
    pub internal_unit: LengthUnit,
    pub dimensions: InternalDimensions,
    pub base_level: ElementId,
    pub top_level: ElementId,
    pub footprint: FootprintLoop,
    pub walls: Vec<WallSegment>,
    pub openings: Vec<Opening>,
    pub roof: Option<RoofProfile>,
}

impl ShellPlan {
    /// The planned door, if any
    pub fn door(&self) -> Option<&Opening> {
        self.openings
            .iter()
            .find(|o| o.category == OpeningCategory::Door)
    }

    /// Planned windows in wall order
    pub fn windows(&self) -> impl Iterator<Item = &Opening> {
        self.openings
            .iter()
            .filter(|o| o.category == OpeningCategory::Window)
    }

    /// Whether the plan needs a catalogue entry for `category`
    pub fn needs(&self, category: OpeningCategory) -> bool {
        self.openings.iter().any(|o| o.category == category)
    }
}

/// Derive the complete shell geometry
///
/// Every parameter is validated before the first point is built: a
/// non-positive or non-finite dimension, or a top level that is not above
/// the base level, fails with an invalid-parameter error.
pub fn plan_shell(
    params: &ShellParameters,
    converter: &UnitConverter,
    base: &Level,
    top: &Level,
) -> Result<ShellPlan> {
    let dims = InternalDimensions::convert(params, converter);
    let level_offset = ensure_positive("level_offset", top.offset_from(base))?;

    let footprint = FootprintLoop::new(dims.width, dims.depth)?;

    let roof_params = match (dims.rise, dims.overhang) {
        (Some(rise), Some(overhang)) => Some(RoofParameters {
            width: dims.width,
            depth: dims.depth,
            rise,
            overhang,
            level_offset,
        }),
        _ => None,
    };
    let roof = roof_params.as_ref().map(RoofProfile::new).transpose()?;

    let walls = build_wall_sequence(&footprint, base, top);
    let openings = plan_openings(
        &walls,
        params.with_door,
        params.with_windows,
        &params.window_policy,
    )?;

    tracing::debug!(
        walls = walls.len(),
        openings = openings.len(),
        roof = roof.is_some(),
        unit = converter.internal_unit().symbol(),
        "planned shell"
    );

    Ok(ShellPlan {
        internal_unit: converter.internal_unit(),
        dimensions: dims,
        base_level: base.id,
        top_level: top.id,
        footprint,
        walls,
        openings,
        roof,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use shellgen_geometry::Error as GeometryError;

    const MM_PER_FOOT: f64 = 304.8;

    fn levels() -> (Level, Level) {
        (
            Level::new(ElementId(1), "Level 1", 0.0),
            Level::new(ElementId(2), "Level 2", 4000.0 / MM_PER_FOOT),
        )
    }

    fn params() -> ShellParameters {
        ShellParameters {
            width_mm: 10000.0,
            depth_mm: 5000.0,
            with_door: true,
            with_windows: true,
            window_policy: WindowPolicy::default(),
            roof: Some((1500.0, 400.0)),
        }
    }

    #[test]
    fn test_reference_house() {
        let (base, top) = levels();
        let plan = plan_shell(&params(), &UnitConverter::default(), &base, &top).unwrap();

        let width = 10000.0 / MM_PER_FOOT;
        let depth = 5000.0 / MM_PER_FOOT;
        assert_relative_eq!(plan.footprint.half_width(), width / 2.0, epsilon = 1e-12);
        assert_relative_eq!(plan.footprint.half_depth(), depth / 2.0, epsilon = 1e-12);
        assert_eq!(plan.walls.len(), 4);

        assert_eq!(plan.door().map(|d| d.wall_index), Some(0));
        let windows: Vec<usize> = plan.windows().map(|w| w.wall_index).collect();
        assert_eq!(windows, vec![1, 2]);

        let roof = plan.roof.as_ref().unwrap();
        let dl = top.elevation - base.elevation;
        assert_relative_eq!(roof.apex().z, 1500.0 / MM_PER_FOOT + dl, epsilon = 1e-12);
        assert_relative_eq!(
            roof.eaves().1.y,
            depth / 2.0 + 400.0 / MM_PER_FOOT,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_metric_host() {
        let base = Level::new(ElementId(1), "L1", 0.0);
        let top = Level::new(ElementId(2), "L2", 3.0);
        let plan = plan_shell(&params(), &UnitConverter::new(LengthUnit::Metres), &base, &top).unwrap();
        assert_eq!(plan.internal_unit, LengthUnit::Metres);
        assert_relative_eq!(plan.dimensions.width, 10.0, epsilon = 1e-12);
        assert_relative_eq!(plan.roof.unwrap().apex().z, 4.5, epsilon = 1e-12);
    }

    #[test]
    fn test_roof_stage_optional() {
        let (base, top) = levels();
        let plan = plan_shell(
            &ShellParameters { roof: None, ..params() },
            &UnitConverter::default(),
            &base,
            &top,
        )
        .unwrap();
        assert!(plan.roof.is_none());
        assert!(plan.dimensions.rise.is_none());
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let (base, top) = levels();
        let converter = UnitConverter::default();
        for bad in [
            ShellParameters { width_mm: 0.0, ..params() },
            ShellParameters { depth_mm: -5000.0, ..params() },
            ShellParameters { roof: Some((0.0, 400.0)), ..params() },
            ShellParameters { roof: Some((1500.0, -1.0)), ..params() },
            ShellParameters { width_mm: f64::NAN, ..params() },
        ] {
            let err = plan_shell(&bad, &converter, &base, &top).unwrap_err();
            assert_eq!(err.kind(), crate::ErrorKind::InvalidParameter, "{bad:?}");
        }
    }

    #[test]
    fn test_rejects_inverted_levels() {
        let (base, top) = levels();
        let err = plan_shell(&params(), &UnitConverter::default(), &top, &base).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Geometry(GeometryError::InvalidParameter { name: "level_offset", .. })
        ));
    }

    #[test]
    fn test_from_config() {
        let config = GenerationConfig::default();
        let params = ShellParameters::from(&config);
        assert_eq!(params.width_mm, 10000.0);
        assert!(params.roof.is_none());
    }
}
