// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Length units and conversion into the host's internal unit
//!
//! Design parameters arrive in millimetres. Every geometric construction
//! works in the host's internal unit only, so each parameter is converted
//! exactly once, where it enters the generator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Common unit scales, expressed in metres
pub mod scales {
    /// Meters to meters (identity)
    pub const METRE: f64 = 1.0;
    /// Millimeters to meters
    pub const MILLIMETRE: f64 = 0.001;
    /// Centimeters to meters
    pub const CENTIMETRE: f64 = 0.01;
    /// Inches to meters
    pub const INCH: f64 = 0.0254;
    /// Feet to meters
    pub const FOOT: f64 = 0.3048;
}

/// Linear unit
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    #[default]
    Millimetres,
    Centimetres,
    Metres,
    Inches,
    /// Decimal feet, the internal unit of the reference host
    Feet,
}

impl LengthUnit {
    /// Size of one unit in metres
    pub fn metres_per_unit(&self) -> f64 {
        match self {
            LengthUnit::Millimetres => scales::MILLIMETRE,
            LengthUnit::Centimetres => scales::CENTIMETRE,
            LengthUnit::Metres => scales::METRE,
            LengthUnit::Inches => scales::INCH,
            LengthUnit::Feet => scales::FOOT,
        }
    }

    /// Unit symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Millimetres => "mm",
            LengthUnit::Centimetres => "cm",
            LengthUnit::Metres => "m",
            LengthUnit::Inches => "in",
            LengthUnit::Feet => "ft",
        }
    }
}

/// Scalar length tagged with its unit
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// Length in millimetres (the design unit)
    pub fn millimetres(value: f64) -> Self {
        Self::new(value, LengthUnit::Millimetres)
    }

    /// Re-express this length in another unit
    pub fn to_unit(self, unit: LengthUnit) -> Length {
        if self.unit == unit {
            return self;
        }
        let factor = self.unit.metres_per_unit() / unit.metres_per_unit();
        Length::new(self.value * factor, unit)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}

/// Converts design lengths into the host's internal unit
///
/// Stateless apart from the target unit; conversion is total for any
/// finite input and passes non-finite values through untouched.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct UnitConverter {
    internal: LengthUnit,
}

impl UnitConverter {
    /// Create a converter targeting `internal`
    pub fn new(internal: LengthUnit) -> Self {
        Self { internal }
    }

    /// The internal unit this converter targets
    pub fn internal_unit(&self) -> LengthUnit {
        self.internal
    }

    /// Convert a length into the internal unit
    pub fn to_internal(&self, length: Length) -> Length {
        length.to_unit(self.internal)
    }

    /// Convert a raw value given in `source` units, returning internal units
    pub fn value_to_internal(&self, value: f64, source: LengthUnit) -> f64 {
        self.to_internal(Length::new(value, source)).value
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new(LengthUnit::Feet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_prefix_scales() {
        assert!((scales::MILLIMETRE - 0.001).abs() < 1e-10);
        assert!((scales::INCH - 0.0254).abs() < 1e-10);
        assert!((scales::FOOT - 0.3048).abs() < 1e-10);
    }

    #[test]
    fn test_millimetres_to_feet() {
        let converter = UnitConverter::default();
        let width = converter.to_internal(Length::millimetres(10000.0));
        assert_eq!(width.unit, LengthUnit::Feet);
        assert_relative_eq!(width.value, 10.0 / 0.3048, epsilon = 1e-9);

        // 304.8 mm is exactly one foot
        assert_relative_eq!(
            converter.value_to_internal(304.8, LengthUnit::Millimetres),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_same_unit_is_identity() {
        let converter = UnitConverter::new(LengthUnit::Millimetres);
        let depth = converter.to_internal(Length::millimetres(5000.0));
        assert_eq!(depth, Length::millimetres(5000.0));
    }

    #[test]
    fn test_metric_internal_unit() {
        let converter = UnitConverter::new(LengthUnit::Metres);
        assert_relative_eq!(
            converter.value_to_internal(1500.0, LengthUnit::Millimetres),
            1.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_non_finite_passes_through() {
        let converter = UnitConverter::default();
        assert!(converter
            .value_to_internal(f64::NAN, LengthUnit::Millimetres)
            .is_nan());
        assert!(converter
            .value_to_internal(f64::INFINITY, LengthUnit::Millimetres)
            .is_infinite());
    }

    #[test]
    fn test_display() {
        assert_eq!(Length::millimetres(400.0).to_string(), "400 mm");
    }
}
