// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MemoryDocument - in-memory host document
//!
//! Reference implementation of [`DocumentSession`] used by the CLI and the
//! tests. Changes made inside a transaction are staged and only become
//! visible when the transaction commits.

use crate::error::{Error, Result};
use crate::session::{DocumentSession, TxId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use shellgen_geometry::{Opening, OpeningCategory, RoofProfile, WallSegment};
use shellgen_model::{
    CatalogEntry, CatalogKey, ElementCategory, ElementId, LengthUnit, Level, LevelSource,
    TypeCatalog, UnitConverter,
};
use std::path::Path;

/// Element created by a generation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Wall {
        segment: WallSegment,
        wall_type: Option<ElementId>,
    },
    Opening {
        opening: Opening,
        host: ElementId,
        type_id: ElementId,
    },
    Roof {
        profile: RoofProfile,
        level: ElementId,
        roof_type: Option<ElementId>,
    },
}

impl Element {
    pub fn category(&self) -> ElementCategory {
        match self {
            Element::Wall { .. } => ElementCategory::Walls,
            Element::Opening { opening, .. } => opening.category.element_category(),
            Element::Roof { .. } => ElementCategory::Roofs,
        }
    }
}

/// Levels and catalogue a [`MemoryDocument`] starts from
///
/// A seed without `internal_unit` is in feet, like any host that does not
/// report its unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSeed {
    pub internal_unit: LengthUnit,
    pub levels: Vec<Level>,
    pub catalog: Vec<CatalogEntry>,
}

impl Default for DocumentSeed {
    fn default() -> Self {
        Self {
            internal_unit: LengthUnit::Feet,
            levels: Vec::new(),
            catalog: Vec::new(),
        }
    }
}

/// Changes of the open transaction
#[derive(Debug)]
struct Staged {
    tx: TxId,
    name: String,
    elements: Vec<(ElementId, Element)>,
    activations: Vec<ElementId>,
}

/// In-memory host document
#[derive(Debug)]
pub struct MemoryDocument {
    internal_unit: LengthUnit,
    levels: Vec<Level>,
    catalog: Vec<CatalogEntry>,
    /// Committed elements
    elements: FxHashMap<ElementId, Element>,
    staged: Option<Staged>,
    committed_transactions: Vec<String>,
    next_id: u32,
    next_tx: u64,
    /// Category whose next commit is refused (failure injection)
    fail_on: Option<ElementCategory>,
}

impl MemoryDocument {
    /// Create a document from a seed
    pub fn from_seed(seed: DocumentSeed) -> Self {
        let max_id = seed
            .levels
            .iter()
            .map(|l| l.id.0)
            .chain(seed.catalog.iter().map(|e| e.id.0))
            .max()
            .unwrap_or(0);

        Self {
            internal_unit: seed.internal_unit,
            levels: seed.levels,
            catalog: seed.catalog,
            elements: FxHashMap::default(),
            staged: None,
            committed_transactions: Vec::new(),
            next_id: max_id + 1,
            next_tx: 1,
            fail_on: None,
        }
    }

    /// Parse a seed from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let seed: DocumentSeed = serde_json::from_str(json)?;
        Ok(Self::from_seed(seed))
    }

    /// Load a seed file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Document in feet with the default level names and family types
    ///
    /// Levels sit at 0 and 4000 mm. The window type starts inactive.
    pub fn with_default_library() -> Self {
        let feet = UnitConverter::new(LengthUnit::Feet);
        let level_2 = feet.value_to_internal(4000.0, LengthUnit::Millimetres);
        Self::from_seed(DocumentSeed {
            internal_unit: LengthUnit::Feet,
            levels: vec![
                Level::new(ElementId(1), crate::config::DEFAULT_BASE_LEVEL, 0.0),
                Level::new(ElementId(2), crate::config::DEFAULT_TOP_LEVEL, level_2),
            ],
            catalog: vec![
                CatalogEntry::new(
                    ElementId(10),
                    ElementCategory::Walls,
                    "Базовая стена",
                    "Типовой - 200мм",
                ),
                CatalogEntry::new(
                    ElementId(11),
                    ElementCategory::Doors,
                    "Одиночные-Щитовые",
                    "0915 x 2134 мм",
                ),
                CatalogEntry::new(
                    ElementId(12),
                    ElementCategory::Windows,
                    "Фиксированные",
                    "0915 x 1830 мм",
                )
                .inactive(),
                CatalogEntry::new(
                    ElementId(13),
                    ElementCategory::Roofs,
                    "Базовая крыша",
                    "Типовой - 400мм",
                ),
            ],
        })
    }

    /// Refuse the next commit of an element in `category`
    pub fn fail_on(mut self, category: ElementCategory) -> Self {
        self.fail_on = Some(category);
        self
    }

    /// Add a level
    pub fn add_level(&mut self, name: impl Into<String>, elevation: f64) -> ElementId {
        let id = self.allocate_id();
        self.levels.push(Level::new(id, name, elevation));
        id
    }

    /// Add a catalogue entry
    pub fn add_catalog_entry(
        &mut self,
        category: ElementCategory,
        key: &CatalogKey,
        active: bool,
    ) -> ElementId {
        let id = self.allocate_id();
        let mut entry = CatalogEntry::new(id, category, &key.family, &key.type_name);
        entry.is_active = active;
        self.catalog.push(entry);
        id
    }

    /// Committed element by ID
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Committed elements sorted by ID
    pub fn elements(&self) -> Vec<(ElementId, &Element)> {
        let mut all: Vec<_> = self.elements.iter().map(|(id, e)| (*id, e)).collect();
        all.sort_by_key(|(id, _)| *id);
        all
    }

    /// Number of committed elements in a category
    pub fn count(&self, category: ElementCategory) -> usize {
        self.elements.values().filter(|e| e.category() == category).count()
    }

    /// Committed catalogue entry by ID
    pub fn catalog_entry(&self, id: ElementId) -> Option<&CatalogEntry> {
        self.catalog.iter().find(|e| e.id == id)
    }

    /// Names of committed transactions, oldest first
    pub fn committed_transactions(&self) -> &[String] {
        &self.committed_transactions
    }

    /// Whether a transaction is open
    pub fn in_transaction(&self) -> bool {
        self.staged.is_some()
    }

    fn allocate_id(&mut self) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    fn staged_mut(&mut self) -> Result<&mut Staged> {
        self.staged
            .as_mut()
            .ok_or_else(|| Error::transaction("no open transaction"))
    }

    fn check_failure(&mut self, category: ElementCategory) -> Result<()> {
        if self.fail_on == Some(category) {
            self.fail_on = None;
            return Err(Error::document(format!("host refused to create {category}")));
        }
        Ok(())
    }

    /// Whether `id` is a wall visible inside the open transaction
    fn is_wall(&self, id: ElementId) -> bool {
        let committed = matches!(self.elements.get(&id), Some(Element::Wall { .. }));
        let staged = self.staged.as_ref().is_some_and(|s| {
            s.elements
                .iter()
                .any(|(sid, e)| *sid == id && matches!(e, Element::Wall { .. }))
        });
        committed || staged
    }

    /// Whether a type is active, counting staged activations
    fn is_active(&self, entry: &CatalogEntry) -> bool {
        let staged = self
            .staged
            .as_ref()
            .is_some_and(|s| s.activations.contains(&entry.id));
        staged || self.catalog_entry(entry.id).is_some_and(|e| e.is_active)
    }

    fn require_type(&self, entry: &CatalogEntry, category: ElementCategory) -> Result<()> {
        if entry.category != category {
            return Err(Error::document(format!(
                "type {} is a {} type, expected {}",
                entry.id, entry.category, category
            )));
        }
        if !self.is_active(entry) {
            return Err(Error::document(format!(
                "type '{}: {}' is not active",
                entry.family, entry.type_name
            )));
        }
        Ok(())
    }

    fn stage(&mut self, element: Element) -> Result<ElementId> {
        self.staged_mut()?;
        let id = self.allocate_id();
        self.staged_mut()?.elements.push((id, element));
        Ok(id)
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::with_default_library()
    }
}

impl LevelSource for MemoryDocument {
    fn levels(&self) -> Vec<Level> {
        self.levels.clone()
    }

    fn internal_unit(&self) -> LengthUnit {
        self.internal_unit
    }
}

impl TypeCatalog for MemoryDocument {
    fn entries(&self, category: ElementCategory) -> Vec<CatalogEntry> {
        self.catalog
            .iter()
            .filter(|e| e.category == category)
            .cloned()
            .collect()
    }
}

impl DocumentSession for MemoryDocument {
    fn begin_transaction(&mut self, name: &str) -> Result<TxId> {
        if let Some(open) = &self.staged {
            return Err(Error::transaction(format!(
                "transaction '{}' is already open",
                open.name
            )));
        }
        let tx = TxId(self.next_tx);
        self.next_tx += 1;
        self.staged = Some(Staged {
            tx,
            name: name.to_string(),
            elements: Vec::new(),
            activations: Vec::new(),
        });
        Ok(tx)
    }

    fn commit_transaction(&mut self, tx: TxId) -> Result<()> {
        match self.staged.take() {
            Some(staged) if staged.tx == tx => {
                for id in &staged.activations {
                    if let Some(entry) = self.catalog.iter_mut().find(|e| e.id == *id) {
                        entry.is_active = true;
                    }
                }
                self.elements.extend(staged.elements);
                self.committed_transactions.push(staged.name);
                Ok(())
            }
            other => {
                self.staged = other;
                Err(Error::transaction(format!("transaction {} is not open", tx.0)))
            }
        }
    }

    fn rollback_transaction(&mut self, tx: TxId) -> Result<()> {
        match self.staged.take() {
            Some(staged) if staged.tx == tx => Ok(()),
            other => {
                self.staged = other;
                Err(Error::transaction(format!("transaction {} is not open", tx.0)))
            }
        }
    }

    fn activate(&mut self, entry: &CatalogEntry) -> Result<()> {
        if self.catalog_entry(entry.id).is_none() {
            return Err(Error::document(format!("unknown type {}", entry.id)));
        }
        let staged = self.staged_mut()?;
        if !staged.activations.contains(&entry.id) {
            staged.activations.push(entry.id);
        }
        Ok(())
    }

    fn commit_wall_segment(
        &mut self,
        segment: &WallSegment,
        wall_type: Option<&CatalogEntry>,
    ) -> Result<ElementId> {
        if let Some(entry) = wall_type {
            self.require_type(entry, ElementCategory::Walls)?;
        }
        self.check_failure(ElementCategory::Walls)?;
        self.stage(Element::Wall {
            segment: segment.clone(),
            wall_type: wall_type.map(|e| e.id),
        })
    }

    fn commit_opening(
        &mut self,
        opening: &Opening,
        host: ElementId,
        entry: &CatalogEntry,
    ) -> Result<ElementId> {
        let category = match opening.category {
            OpeningCategory::Door => ElementCategory::Doors,
            OpeningCategory::Window => ElementCategory::Windows,
        };
        self.require_type(entry, category)?;
        if !self.is_wall(host) {
            return Err(Error::document(format!("host {host} is not a wall")));
        }
        self.check_failure(category)?;
        self.stage(Element::Opening {
            opening: opening.clone(),
            host,
            type_id: entry.id,
        })
    }

    fn commit_roof(
        &mut self,
        roof: &RoofProfile,
        level: ElementId,
        roof_type: Option<&CatalogEntry>,
    ) -> Result<ElementId> {
        if let Some(entry) = roof_type {
            self.require_type(entry, ElementCategory::Roofs)?;
        }
        if !self.levels.iter().any(|l| l.id == level) {
            return Err(Error::document(format!("unknown level {level}")));
        }
        self.check_failure(ElementCategory::Roofs)?;
        self.stage(Element::Roof {
            profile: roof.clone(),
            level,
            roof_type: roof_type.map(|e| e.id),
        })
    }
}
