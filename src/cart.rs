//! Cart store: ordered (entry id, quantity) lines referencing the catalog
//!
//! Lines hold only the entry id, never a copy of the entry, so price edits
//! retroactively affect totals. The persisted form is the line sequence
//! itself; unit prices are always recomputed from the live catalog.

use super::entry::{CatalogEntry, EntryId};
use super::error::StorefrontError;
use super::persistence::PersistenceSlot;
use super::pricing::{self, CartSummary, LineTotals};
use tracing::{debug, warn};

#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    #[n(0)]
    pub entry_id: EntryId,
    #[n(1)]
    pub quantity: u32,
}

/// A cart line resolved against the live catalog for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineView {
    pub entry: CatalogEntry,
    pub quantity: u32,
    pub totals: LineTotals,
}

pub struct CartStore<S: PersistenceSlot> {
    lines: Vec<CartLine>,
    slot: S,
}

impl<S: PersistenceSlot> CartStore<S> {
    /// Restores a previous session's cart, silently dropping ids that no
    /// longer resolve against the catalog. Resulting line order follows the
    /// persisted order, not catalog order.
    pub fn rehydrate(slot: S, catalog: &[CatalogEntry]) -> Result<Self, StorefrontError> {
        let stored: Vec<CartLine> = match slot.read().map_err(StorefrontError::Storage)? {
            Some(payload) => match minicbor::decode(&payload) {
                Ok(lines) => lines,
                Err(err) => {
                    warn!("stored cart failed to decode, starting empty: {err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let lines: Vec<CartLine> = stored
            .into_iter()
            .filter(|line| {
                let known = catalog.iter().any(|entry| entry.id == line.entry_id);
                if !known {
                    debug!(id = line.entry_id, "dropping cart line for vanished entry");
                }
                known
            })
            .collect();

        let store = Self { lines, slot };
        store.persist()?;
        Ok(store)
    }

    /// Adds one unit of the given entry. At most one line exists per entry id:
    /// a repeated add increments the existing line. A vanished entry is a
    /// benign race and a silent no-op.
    pub fn add_item(
        &mut self,
        catalog: &[CatalogEntry],
        id: EntryId,
    ) -> Result<(), StorefrontError> {
        if !catalog.iter().any(|entry| entry.id == id) {
            return Ok(());
        }
        match self.lines.iter_mut().find(|line| line.entry_id == id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                entry_id: id,
                quantity: 1,
            }),
        }
        self.persist()
    }

    /// Sets the quantity exactly (not a delta); zero removes the line.
    /// Absent lines are a no-op.
    pub fn set_quantity(&mut self, id: EntryId, quantity: u32) -> Result<(), StorefrontError> {
        if quantity == 0 {
            return self.remove_item(id);
        }
        match self.lines.iter_mut().find(|line| line.entry_id == id) {
            Some(line) => {
                line.quantity = quantity;
                self.persist()
            }
            None => Ok(()),
        }
    }

    pub fn remove_item(&mut self, id: EntryId) -> Result<(), StorefrontError> {
        self.drop_references_to(id)
    }

    pub fn clear(&mut self) -> Result<(), StorefrontError> {
        self.lines.clear();
        self.persist()
    }

    /// Cascade target invoked by the catalog store when an entry is deleted.
    pub fn drop_references_to(&mut self, id: EntryId) -> Result<(), StorefrontError> {
        let before = self.lines.len();
        self.lines.retain(|line| line.entry_id != id);
        if self.lines.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// Drops every line whose id is absent from the given catalog, used after
    /// a reseed replaced the whole entry set.
    pub fn drop_missing(&mut self, catalog: &[CatalogEntry]) -> Result<(), StorefrontError> {
        let before = self.lines.len();
        self.lines
            .retain(|line| catalog.iter().any(|entry| entry.id == line.entry_id));
        if self.lines.len() == before {
            return Ok(());
        }
        self.persist()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_views(&self, catalog: &[CatalogEntry]) -> Vec<CartLineView> {
        self.lines
            .iter()
            .filter_map(|line| {
                catalog
                    .iter()
                    .find(|entry| entry.id == line.entry_id)
                    .map(|entry| CartLineView {
                        entry: entry.clone(),
                        quantity: line.quantity,
                        totals: pricing::line_totals(entry, line.quantity),
                    })
            })
            .collect()
    }

    /// Total and item count over the current lines, folded in line order.
    pub fn summary(&self, catalog: &[CatalogEntry]) -> CartSummary {
        pricing::summarize(self.lines.iter().filter_map(|line| {
            catalog
                .iter()
                .find(|entry| entry.id == line.entry_id)
                .map(|entry| (entry, line.quantity))
        }))
    }

    fn persist(&self) -> Result<(), StorefrontError> {
        let payload =
            minicbor::to_vec(&self.lines).map_err(|err| StorefrontError::Storage(err.into()))?;
        self.slot.write(&payload).map_err(StorefrontError::Storage)?;
        debug!(lines = self.lines.len(), "cart persisted");
        Ok(())
    }
}
