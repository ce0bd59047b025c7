// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only lookup traits implemented by a host document
//!
//! These traits are the generator's view of the document before anything is
//! mutated. Lookups never create or change elements.

use crate::{CatalogEntry, CatalogKey, ElementCategory, Level, LengthUnit, ModelError, Result};
use std::collections::HashMap;

/// Access to the document's named elevation levels
///
/// # Example
///
/// ```ignore
/// use shellgen_model::LevelSource;
///
/// fn report(levels: &dyn LevelSource) -> shellgen_model::Result<()> {
///     let found = levels.resolve_levels(&["Level 1", "Level 2"])?;
///     for (name, level) in &found {
///         println!("{name} at {}", level.elevation);
///     }
///     Ok(())
/// }
/// ```
pub trait LevelSource {
    /// Get all levels in the document
    fn levels(&self) -> Vec<Level>;

    /// Get the document's internal length unit
    fn internal_unit(&self) -> LengthUnit {
        LengthUnit::Feet
    }

    /// Find the first level with exactly this name
    fn level_by_name(&self, name: &str) -> Option<Level> {
        self.levels().into_iter().find(|level| level.name == name)
    }

    /// Resolve a set of level names
    ///
    /// # Returns
    /// A map from each requested name to its level, or
    /// [`ModelError::LevelNotFound`] for the first name without a match
    fn resolve_levels(&self, names: &[&str]) -> Result<HashMap<String, Level>> {
        let all = self.levels();
        let mut resolved = HashMap::with_capacity(names.len());
        for name in names {
            let level = all
                .iter()
                .find(|level| level.name == *name)
                .ok_or_else(|| ModelError::level_not_found(*name))?;
            resolved.insert((*name).to_string(), level.clone());
        }
        Ok(resolved)
    }

    /// Resolve the base and top levels of a single-storey shell
    ///
    /// Both names must resolve and must refer to different levels.
    fn resolve_level_pair(&self, base: &str, top: &str) -> Result<(Level, Level)> {
        let mut resolved = self.resolve_levels(&[base, top])?;
        let base_level = resolved
            .remove(base)
            .ok_or_else(|| ModelError::level_not_found(base))?;
        let top_level = match resolved.remove(top) {
            Some(level) => level,
            // Same name requested twice
            None => return Err(ModelError::DuplicateLevel(base.into(), top.into())),
        };
        if base_level.id == top_level.id {
            return Err(ModelError::DuplicateLevel(base.into(), top.into()));
        }
        Ok((base_level, top_level))
    }
}

/// Access to the document's family/type catalogue
pub trait TypeCatalog {
    /// Get all catalogue entries of a category
    fn entries(&self, category: ElementCategory) -> Vec<CatalogEntry>;

    /// Find the first entry matching category, family and type name
    fn resolve_catalog_entry(
        &self,
        category: ElementCategory,
        key: &CatalogKey,
    ) -> Result<CatalogEntry> {
        self.entries(category)
            .into_iter()
            .find(|entry| entry.matches(category, key))
            .ok_or_else(|| {
                ModelError::catalog_entry_not_found(category, &key.family, &key.type_name)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementId;

    struct Fixture {
        levels: Vec<Level>,
        entries: Vec<CatalogEntry>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                levels: vec![
                    Level::new(ElementId(1), "Level 1", 0.0),
                    Level::new(ElementId(2), "Level 2", 10.0),
                ],
                entries: vec![
                    CatalogEntry::new(ElementId(10), ElementCategory::Doors, "Single-Flush", "0915 x 2134 mm"),
                    CatalogEntry::new(ElementId(11), ElementCategory::Windows, "Fixed", "0915 x 1830 mm")
                        .inactive(),
                ],
            }
        }
    }

    impl LevelSource for Fixture {
        fn levels(&self) -> Vec<Level> {
            self.levels.clone()
        }
    }

    impl TypeCatalog for Fixture {
        fn entries(&self, category: ElementCategory) -> Vec<CatalogEntry> {
            self.entries
                .iter()
                .filter(|entry| entry.category == category)
                .cloned()
                .collect()
        }
    }

    #[test]
    fn test_resolve_levels() {
        let doc = Fixture::new();
        let found = doc.resolve_levels(&["Level 1", "Level 2"]).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found["Level 2"].elevation, 10.0);
    }

    #[test]
    fn test_resolve_levels_missing() {
        let doc = Fixture::new();
        let err = doc.resolve_levels(&["Level 1", "Roof"]).unwrap_err();
        assert_eq!(err, ModelError::LevelNotFound("Roof".into()));
    }

    #[test]
    fn test_resolve_level_pair_rejects_same_name() {
        let doc = Fixture::new();
        let err = doc.resolve_level_pair("Level 1", "Level 1").unwrap_err();
        assert!(matches!(err, ModelError::DuplicateLevel(_, _)));
    }

    #[test]
    fn test_resolve_level_pair() {
        let doc = Fixture::new();
        let (base, top) = doc.resolve_level_pair("Level 1", "Level 2").unwrap();
        assert_eq!(base.id, ElementId(1));
        assert_eq!(top.id, ElementId(2));
    }

    #[test]
    fn test_resolve_catalog_entry() {
        let doc = Fixture::new();
        let window = doc
            .resolve_catalog_entry(ElementCategory::Windows, &CatalogKey::new("Fixed", "0915 x 1830 mm"))
            .unwrap();
        assert_eq!(window.id, ElementId(11));
        assert!(!window.is_active);
    }

    #[test]
    fn test_resolve_catalog_entry_wrong_category() {
        let doc = Fixture::new();
        let err = doc
            .resolve_catalog_entry(ElementCategory::Doors, &CatalogKey::new("Fixed", "0915 x 1830 mm"))
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::CatalogEntryNotFound { category: ElementCategory::Doors, .. }
        ));
    }
}
