// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for geometry construction

use thiserror::Error;

/// Geometry construction result type
pub type Result<T> = std::result::Result<T, Error>;

/// Geometry construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A design parameter is non-positive or not finite
    #[error("Invalid parameter {name}: {value} (must be a positive finite length)")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A placement rule names a wall that cannot host an opening
    #[error("Invalid wall index {index} for {rule}")]
    InvalidWallIndex { index: usize, rule: &'static str },

    /// Geometry processing error
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// Profile processing error
    #[error("Profile error: {0}")]
    Profile(String),

    /// Triangulation error
    #[error("Triangulation error: {0}")]
    Triangulation(String),
}

impl Error {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: &'static str, value: f64) -> Self {
        Error::InvalidParameter { name, value }
    }

    /// Create a geometry error
    pub fn geometry(msg: impl Into<String>) -> Self {
        Error::Geometry(msg.into())
    }

    /// Create a profile error
    pub fn profile(msg: impl Into<String>) -> Self {
        Error::Profile(msg.into())
    }

    /// Create a triangulation error
    pub fn triangulation(msg: impl Into<String>) -> Self {
        Error::Triangulation(msg.into())
    }

    /// Whether this error is a rejected design parameter
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Error::InvalidParameter { .. } | Error::InvalidWallIndex { .. }
        )
    }
}

/// Reject zero, negative and non-finite lengths
#[inline]
pub fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::invalid_parameter(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("width", 2.5), Ok(2.5));
        assert!(ensure_positive("width", 0.0).is_err());
        assert!(ensure_positive("width", -1.0).is_err());
        assert!(ensure_positive("width", f64::NAN).is_err());
        assert!(ensure_positive("width", f64::INFINITY).is_err());
    }

    #[test]
    fn test_message_names_parameter() {
        let err = ensure_positive("depth", -3.0).unwrap_err();
        assert!(err.to_string().contains("depth"));
        assert!(err.is_invalid_parameter());
    }
}
