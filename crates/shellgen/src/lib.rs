// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # shellgen
//!
//! Generates the shell of a rectangular building (four walls between two
//! levels, a door, windows and an optional gable roof) inside a host CAD
//! document.
//!
//! ## Pipeline
//!
//! 1. [`GenerationConfig`] names the levels and family types and carries the
//!    design parameters in millimetres
//! 2. [`prepare`] resolves levels and catalogue entries, converts units once
//!    and derives a [`ShellPlan`] without mutating anything
//! 3. [`commit_plan`] writes the plan inside a single [`Transaction`]; any
//!    failure rolls the whole transaction back
//!
//! [`generate`] runs all three steps.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shellgen::{generate, GenerationConfig, MemoryDocument};
//!
//! let mut doc = MemoryDocument::with_default_library();
//! let shell = generate(&mut doc, &GenerationConfig::default())?;
//! assert_eq!(shell.walls.len(), 4);
//! ```
//!
//! A real host implements [`DocumentSession`] (plus the lookup traits from
//! `shellgen-model`) and passes itself to [`generate`].

pub mod config;
pub mod error;
pub mod generate;
pub mod memory;
pub mod plan;
pub mod session;

pub use config::{GenerationConfig, PipelineStages, RoofConfig};
pub use error::{Error, ErrorKind, Result};
pub use generate::{commit_plan, generate, prepare, GeneratedShell, ResolvedTypes};
pub use memory::{DocumentSeed, Element, MemoryDocument};
pub use plan::{plan_shell, InternalDimensions, ShellParameters, ShellPlan};
pub use session::{DocumentSession, Transaction, TxId};

pub use shellgen_geometry as geometry;
pub use shellgen_model as model;
