// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! shellgen command line
//!
//! Runs one generation pass against an in-memory document and prints the
//! result as JSON on stdout. Logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Default house: 10000 x 5000 mm, door and two windows
//! shellgen
//!
//! # Custom config and document seed, with a gable roof
//! shellgen --config house.json --document levels.json --roof
//!
//! # Only print the derived geometry
//! shellgen --plan-only --width 12000 --depth 6000
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shellgen::geometry::sweep_roof;
use shellgen::{commit_plan, prepare, GenerationConfig, MemoryDocument, RoofConfig};

/// Generate a rectangular building shell
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Generation config (JSON); defaults are used when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document seed with levels and catalogue (JSON).
    /// Defaults to a document in feet with two levels and the standard
    /// door, window and roof types.
    #[arg(short, long)]
    document: Option<PathBuf>,

    /// Footprint width in millimetres
    #[arg(long)]
    width: Option<f64>,

    /// Footprint depth in millimetres
    #[arg(long)]
    depth: Option<f64>,

    /// Add a gable roof
    #[arg(long)]
    roof: bool,

    /// Roof rise in millimetres (implies --roof)
    #[arg(long)]
    rise: Option<f64>,

    /// Roof overhang in millimetres (implies --roof)
    #[arg(long)]
    overhang: Option<f64>,

    /// Print the plan without committing anything
    #[arg(long)]
    plan_only: bool,

    /// Include a summary of the swept roof solid
    #[arg(long)]
    mesh: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut GenerationConfig) {
        if let Some(width) = self.width {
            config.width_mm = width;
        }
        if let Some(depth) = self.depth {
            config.depth_mm = depth;
        }
        if self.roof || self.rise.is_some() || self.overhang.is_some() {
            let roof = config.stages.with_roof.get_or_insert_with(RoofConfig::default);
            if let Some(rise) = self.rise {
                roof.rise_mm = rise;
            }
            if let Some(overhang) = self.overhang {
                roof.overhang_mm = overhang;
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GenerationConfig::default(),
    };
    args.apply_overrides(&mut config);

    let mut doc = match &args.document {
        Some(path) => MemoryDocument::from_path(path)
            .with_context(|| format!("Failed to load document {}", path.display()))?,
        None => MemoryDocument::with_default_library(),
    };

    let (plan, types) = prepare(&doc, &config)?;
    let roof_mesh = match (&plan.roof, args.mesh) {
        (Some(roof), true) => {
            let mesh = sweep_roof(roof)?;
            Some(json!({
                "vertices": mesh.vertex_count(),
                "triangles": mesh.triangle_count(),
                "volume": mesh.volume(),
                "bounds": mesh.bounds(),
            }))
        }
        _ => None,
    };

    let output = if args.plan_only {
        json!({ "plan": plan, "roof_mesh": roof_mesh })
    } else {
        let shell = commit_plan(&mut doc, &plan, &types, &config.transaction_name)?;
        info!(
            elements = shell.element_count(),
            transaction = %config.transaction_name,
            "committed"
        );
        let elements: Vec<_> = doc
            .elements()
            .into_iter()
            .map(|(id, element)| json!({ "id": id, "element": element }))
            .collect();
        json!({ "shell": shell, "elements": elements, "roof_mesh": roof_mesh })
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
