// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Document mutation boundary
//!
//! A generation pass writes to the host only through [`DocumentSession`],
//! and only inside a [`Transaction`]. A transaction that is dropped without
//! being committed is rolled back, so no partial shell is ever committed.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use shellgen_geometry::{Opening, RoofProfile, WallSegment};
use shellgen_model::{CatalogEntry, ElementId, LevelSource, TypeCatalog};

/// Opaque transaction identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(pub u64);

/// Host document that can be mutated
///
/// Lookups come from the [`LevelSource`] and [`TypeCatalog`] supertraits;
/// the methods here all mutate and must be called inside an open
/// transaction.
pub trait DocumentSession: LevelSource + TypeCatalog {
    /// Open a named transaction
    fn begin_transaction(&mut self, name: &str) -> Result<TxId>;

    /// Make every change of the transaction permanent
    fn commit_transaction(&mut self, tx: TxId) -> Result<()>;

    /// Discard every change of the transaction
    fn rollback_transaction(&mut self, tx: TxId) -> Result<()>;

    /// Activate an inactive catalogue entry so it can be placed
    fn activate(&mut self, entry: &CatalogEntry) -> Result<()>;

    /// Create a wall along the segment, constrained from its base to its top level
    fn commit_wall_segment(
        &mut self,
        segment: &WallSegment,
        wall_type: Option<&CatalogEntry>,
    ) -> Result<ElementId>;

    /// Place a door or window in an existing wall
    fn commit_opening(
        &mut self,
        opening: &Opening,
        host: ElementId,
        entry: &CatalogEntry,
    ) -> Result<ElementId>;

    /// Create a roof by sweeping the profile on its reference plane
    fn commit_roof(
        &mut self,
        roof: &RoofProfile,
        level: ElementId,
        roof_type: Option<&CatalogEntry>,
    ) -> Result<ElementId>;
}

/// Scoped transaction guard
///
/// Rolls back on drop unless [`Transaction::commit`] succeeded.
pub struct Transaction<'a, D: DocumentSession + ?Sized> {
    doc: &'a mut D,
    id: TxId,
    name: String,
    finished: bool,
}

impl<'a, D: DocumentSession + ?Sized> Transaction<'a, D> {
    /// Open a transaction on `doc`
    pub fn start(doc: &'a mut D, name: &str) -> Result<Self> {
        let id = doc.begin_transaction(name)?;
        tracing::debug!(tx = id.0, name, "transaction started");
        Ok(Self {
            doc,
            id,
            name: name.to_string(),
            finished: false,
        })
    }

    pub fn id(&self) -> TxId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The document, for mutations inside this transaction
    pub fn doc(&mut self) -> &mut D {
        &mut *self.doc
    }

    /// Commit the transaction
    ///
    /// If the host refuses the commit, the guard still rolls back on drop.
    pub fn commit(mut self) -> Result<()> {
        self.doc.commit_transaction(self.id)?;
        self.finished = true;
        tracing::debug!(tx = self.id.0, name = %self.name, "transaction committed");
        Ok(())
    }

    /// Roll back explicitly
    pub fn rollback(mut self) -> Result<()> {
        self.finished = true;
        self.doc.rollback_transaction(self.id)
    }
}

impl<D: DocumentSession + ?Sized> Drop for Transaction<'_, D> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        tracing::warn!(tx = self.id.0, name = %self.name, "rolling back transaction");
        if let Err(e) = self.doc.rollback_transaction(self.id) {
            tracing::error!(tx = self.id.0, error = %e, "rollback failed");
        }
    }
}
