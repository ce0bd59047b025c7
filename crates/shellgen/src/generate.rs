// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generation pass
//!
//! Resolves every level and catalogue entry, plans the shell, then commits
//! it inside one transaction. All lookups and validation happen before the
//! transaction opens, so a failed pass leaves the document untouched.

use crate::config::GenerationConfig;
use crate::error::{Error, Result};
use crate::plan::{plan_shell, ShellParameters, ShellPlan};
use crate::session::{DocumentSession, Transaction};
use serde::Serialize;
use shellgen_geometry::OpeningCategory;
use shellgen_model::{
    CatalogEntry, CatalogKey, ElementCategory, ElementId, TypeCatalog, UnitConverter,
};

/// Catalogue entries a plan is committed with
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedTypes {
    pub wall: Option<CatalogEntry>,
    pub door: Option<CatalogEntry>,
    pub window: Option<CatalogEntry>,
    pub roof: Option<CatalogEntry>,
}

impl ResolvedTypes {
    /// Look up every entry the plan needs
    pub fn resolve<C: TypeCatalog + ?Sized>(
        catalog: &C,
        config: &GenerationConfig,
        plan: &ShellPlan,
    ) -> Result<Self> {
        let lookup = |category: ElementCategory, key: &CatalogKey| {
            catalog.resolve_catalog_entry(category, key)
        };

        let wall = config
            .wall_type
            .as_ref()
            .map(|key| lookup(ElementCategory::Walls, key))
            .transpose()?;
        let door = if plan.needs(OpeningCategory::Door) {
            Some(lookup(ElementCategory::Doors, &config.door_type)?)
        } else {
            None
        };
        let window = if plan.needs(OpeningCategory::Window) {
            Some(lookup(ElementCategory::Windows, &config.window_type)?)
        } else {
            None
        };
        let roof = match (&plan.roof, &config.stages.with_roof) {
            (Some(_), Some(roof)) => roof
                .roof_type
                .as_ref()
                .map(|key| lookup(ElementCategory::Roofs, key))
                .transpose()?,
            _ => None,
        };

        Ok(Self {
            wall,
            door,
            window,
            roof,
        })
    }

    /// Entries that must be activated before placement, without duplicates
    pub fn inactive(&self) -> Vec<&CatalogEntry> {
        let mut inactive: Vec<&CatalogEntry> = Vec::new();
        for entry in [&self.wall, &self.door, &self.window, &self.roof]
            .into_iter()
            .flatten()
        {
            if !entry.is_active && !inactive.iter().any(|e| e.id == entry.id) {
                inactive.push(entry);
            }
        }
        inactive
    }

    fn for_opening(&self, category: OpeningCategory) -> Option<&CatalogEntry> {
        match category {
            OpeningCategory::Door => self.door.as_ref(),
            OpeningCategory::Window => self.window.as_ref(),
        }
    }
}

/// IDs of the elements a pass created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedShell {
    /// Walls in footprint order
    pub walls: Vec<ElementId>,
    pub door: Option<ElementId>,
    /// Windows in wall order
    pub windows: Vec<ElementId>,
    pub roof: Option<ElementId>,
    /// Catalogue entries activated by this pass
    pub activated: Vec<ElementId>,
}

impl GeneratedShell {
    /// Total number of created elements
    pub fn element_count(&self) -> usize {
        self.walls.len()
            + usize::from(self.door.is_some())
            + self.windows.len()
            + usize::from(self.roof.is_some())
    }
}

/// Resolve, plan and validate without touching the document
pub fn prepare<D: DocumentSession + ?Sized>(
    doc: &D,
    config: &GenerationConfig,
) -> Result<(ShellPlan, ResolvedTypes)> {
    config.validate()?;

    let (base, top) = doc.resolve_level_pair(&config.base_level, &config.top_level)?;
    let converter = UnitConverter::new(doc.internal_unit());
    let plan = plan_shell(&ShellParameters::from(config), &converter, &base, &top)?;
    let types = ResolvedTypes::resolve(doc, config, &plan)?;

    Ok((plan, types))
}

/// Run a complete generation pass against `doc`
pub fn generate<D: DocumentSession + ?Sized>(
    doc: &mut D,
    config: &GenerationConfig,
) -> Result<GeneratedShell> {
    tracing::info!(
        base = %config.base_level,
        top = %config.top_level,
        width_mm = config.width_mm,
        depth_mm = config.depth_mm,
        "generating shell"
    );
    let (plan, types) = prepare(doc, config)?;
    let shell = commit_plan(doc, &plan, &types, &config.transaction_name)?;

    tracing::info!(
        walls = shell.walls.len(),
        windows = shell.windows.len(),
        door = shell.door.is_some(),
        roof = shell.roof.is_some(),
        "shell generated"
    );
    Ok(shell)
}

/// Commit a plan inside one named transaction
///
/// Every planned opening needs its type in `types`. On any failure the
/// transaction is rolled back and the error returned.
pub fn commit_plan<D: DocumentSession + ?Sized>(
    doc: &mut D,
    plan: &ShellPlan,
    types: &ResolvedTypes,
    transaction_name: &str,
) -> Result<GeneratedShell> {
    let mut tx = Transaction::start(doc, transaction_name)?;
    match write_shell(tx.doc(), plan, types) {
        Ok(shell) => {
            tx.commit()?;
            Ok(shell)
        }
        Err(e) => {
            tracing::warn!(tx = tx.id().0, name = tx.name(), error = %e, "shell not committed");
            if let Err(rollback) = tx.rollback() {
                tracing::error!(error = %rollback, "rollback failed");
            }
            Err(e)
        }
    }
}

/// Create every planned element; the caller owns the transaction
fn write_shell<D: DocumentSession + ?Sized>(
    doc: &mut D,
    plan: &ShellPlan,
    types: &ResolvedTypes,
) -> Result<GeneratedShell> {
    let mut shell = GeneratedShell::default();

    for entry in types.inactive() {
        doc.activate(entry)?;
        tracing::debug!(
            id = %entry.id,
            family = %entry.family,
            ty = %entry.type_name,
            "activated type"
        );
        shell.activated.push(entry.id);
    }

    for segment in &plan.walls {
        let id = doc.commit_wall_segment(segment, types.wall.as_ref())?;
        shell.walls.push(id);
    }

    for opening in &plan.openings {
        let entry = types.for_opening(opening.category).ok_or_else(|| {
            Error::document(format!(
                "no {} type resolved for wall {}",
                opening.category.element_category(),
                opening.wall_index
            ))
        })?;
        let host = shell.walls[opening.wall_index];
        let id = doc.commit_opening(opening, host, entry)?;
        tracing::debug!(
            id = %id,
            host = %host,
            wall = opening.wall_index,
            "placed {:?}",
            opening.category
        );
        match opening.category {
            OpeningCategory::Door => shell.door = Some(id),
            OpeningCategory::Window => shell.windows.push(id),
        }
    }

    if let Some(roof) = &plan.roof {
        let id = doc.commit_roof(roof, plan.top_level, types.roof.as_ref())?;
        shell.roof = Some(id);
    }

    Ok(shell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PipelineStages, RoofConfig};
    use crate::memory::{Element, MemoryDocument};
    use crate::ErrorKind;
    use shellgen_model::LevelSource;

    #[test]
    fn test_default_pass() {
        let mut doc = MemoryDocument::with_default_library();
        let shell = generate(&mut doc, &GenerationConfig::default()).unwrap();

        assert_eq!(shell.walls.len(), 4);
        assert!(shell.door.is_some());
        assert_eq!(shell.windows.len(), 2);
        assert!(shell.roof.is_none());
        assert_eq!(shell.element_count(), 7);
        assert_eq!(doc.elements().len(), 7);
        assert_eq!(doc.committed_transactions(), ["Построение стен".to_string()]);
    }

    #[test]
    fn test_openings_hosted_on_their_walls() {
        let mut doc = MemoryDocument::with_default_library();
        let shell = generate(&mut doc, &GenerationConfig::default()).unwrap();

        let Some(Element::Opening { host, opening, .. }) = doc.element(shell.door.unwrap()) else {
            panic!("door not committed");
        };
        assert_eq!(*host, shell.walls[0]);
        assert_eq!(opening.wall_index, 0);

        for (window, wall) in shell.windows.iter().zip([1, 2]) {
            let Some(Element::Opening { host, .. }) = doc.element(*window) else {
                panic!("window not committed");
            };
            assert_eq!(*host, shell.walls[wall]);
        }
    }

    #[test]
    fn test_inactive_window_type_activated_once() {
        let mut doc = MemoryDocument::with_default_library();
        let window = doc.entries(ElementCategory::Windows).remove(0);
        let shell = generate(&mut doc, &GenerationConfig::default()).unwrap();

        assert_eq!(shell.activated, vec![window.id]);
        assert!(doc.catalog_entry(window.id).unwrap().is_active);

        let again = generate(&mut doc, &GenerationConfig::default()).unwrap();
        assert!(again.activated.is_empty());
    }

    #[test]
    fn test_walls_only_skips_opening_lookups() {
        let mut doc = MemoryDocument::with_default_library();
        let config = GenerationConfig {
            stages: PipelineStages::walls_only(),
            door_type: CatalogKey::new("Missing", "Missing"),
            window_type: CatalogKey::new("Missing", "Missing"),
            ..GenerationConfig::default()
        };
        let shell = generate(&mut doc, &config).unwrap();
        assert_eq!(shell.element_count(), 4);
        assert!(shell.activated.is_empty());
    }

    #[test]
    fn test_roof_on_top_level() {
        let mut doc = MemoryDocument::with_default_library();
        let config = GenerationConfig {
            stages: PipelineStages {
                with_roof: Some(RoofConfig {
                    roof_type: Some(CatalogKey::new("Базовая крыша", "Типовой - 400мм")),
                    ..RoofConfig::default()
                }),
                ..PipelineStages::default()
            },
            ..GenerationConfig::default()
        };
        let shell = generate(&mut doc, &config).unwrap();
        let top = doc.level_by_name("Уровень 2").unwrap();

        let Some(Element::Roof { level, roof_type, profile }) = doc.element(shell.roof.unwrap()) else {
            panic!("roof not committed");
        };
        assert_eq!(*level, top.id);
        assert!(roof_type.is_some());
        assert!(profile.is_symmetric());
    }

    #[test]
    fn test_missing_roof_type_aborts_before_mutation() {
        let mut doc = MemoryDocument::with_default_library();
        let config = GenerationConfig {
            stages: PipelineStages {
                with_roof: Some(RoofConfig {
                    roof_type: Some(CatalogKey::new("Basic Roof", "Generic")),
                    ..RoofConfig::default()
                }),
                ..PipelineStages::default()
            },
            ..GenerationConfig::default()
        };
        let err = generate(&mut doc, &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CatalogEntryNotFound);
        assert!(doc.committed_transactions().is_empty());
        assert!(!doc.in_transaction());
    }

    #[test]
    fn test_commit_plan_requires_opening_types() {
        let mut doc = MemoryDocument::with_default_library();
        let (plan, types) = prepare(&doc, &GenerationConfig::default()).unwrap();
        let without_window = ResolvedTypes {
            window: None,
            ..types.clone()
        };

        for types in [ResolvedTypes::default(), without_window] {
            let err = commit_plan(&mut doc, &plan, &types, "walls").unwrap_err();
            assert!(matches!(err, Error::Document(_)), "{err}");
            assert!(doc.elements().is_empty());
            assert!(doc.committed_transactions().is_empty());
            assert!(!doc.in_transaction());
        }

        let shell = commit_plan(&mut doc, &plan, &types, "walls").unwrap();
        assert!(shell.door.is_some());
        assert_eq!(shell.windows.len(), 2);
    }

    #[test]
    fn test_prepare_is_read_only() {
        let doc = MemoryDocument::with_default_library();
        let (plan, types) = prepare(&doc, &GenerationConfig::default()).unwrap();
        assert_eq!(plan.walls.len(), 4);
        assert!(types.door.is_some() && types.window.is_some());
        assert_eq!(types.inactive().len(), 1);
        assert!(doc.elements().is_empty());
    }
}
