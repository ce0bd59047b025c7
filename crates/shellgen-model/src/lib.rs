// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! shellgen Model - Shared types and document lookup traits
//!
//! This crate provides the abstractions the shell generator uses to talk about
//! a host CAD document without depending on any particular host. It defines
//! the read-only lookup traits that a host implements, the identifiers and
//! records those lookups return, and the unit conversion that turns design
//! parameters into the host's internal length unit.
//!
//! # Architecture
//!
//! - [`LevelSource`] - Named elevation levels and the host's internal unit
//! - [`TypeCatalog`] - Family/type catalogue lookup by category and name
//! - [`UnitConverter`] - Design-unit to internal-unit conversion
//!
//! # Example
//!
//! ```ignore
//! use shellgen_model::{LevelSource, UnitConverter, Length};
//!
//! let levels = document.resolve_levels(&["Level 1", "Level 2"])?;
//! let converter = UnitConverter::new(document.internal_unit());
//! let width = converter.to_internal(Length::millimetres(10000.0));
//! ```

pub mod error;
pub mod traits;
pub mod types;
pub mod units;

// Re-export all public types
pub use error::*;
pub use traits::*;
pub use types::*;
pub use units::*;
