//! Catalog store: the source of truth for purchasable entries
use super::cart::CartStore;
use super::entry::{CatalogEntry, EntryDraft, EntryId};
use super::error::StorefrontError;
use super::persistence::PersistenceSlot;
use tracing::{debug, warn};

pub struct CatalogStore<S: PersistenceSlot> {
    entries: Vec<CatalogEntry>,
    slot: S,
}

impl<S: PersistenceSlot> CatalogStore<S> {
    /// Loads the persisted catalog, falling back to the seed set when the slot
    /// is empty, holds an empty sequence, or fails to decode. The corrupt-data
    /// branch is recovered locally and only logged, never surfaced.
    pub fn load_or_seed(slot: S) -> Result<Self, StorefrontError> {
        let loaded = match slot.read().map_err(StorefrontError::Storage)? {
            Some(payload) => match minicbor::decode::<Vec<CatalogEntry>>(&payload) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!("stored catalog failed to decode, reseeding: {err}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let mut store = Self {
            entries: loaded,
            slot,
        };
        if store.entries.is_empty() {
            store.entries = seed_entries();
            store.persist()?;
        }
        Ok(store)
    }

    /// Replaces the current entries with the seed set. Cart lines referencing
    /// ids that no longer resolve are dropped in the same turn.
    pub fn reseed<C: PersistenceSlot>(
        &mut self,
        cart: &mut CartStore<C>,
    ) -> Result<(), StorefrontError> {
        self.entries = seed_entries();
        self.persist()?;
        cart.drop_missing(&self.entries)
    }

    /// Validates the draft, assigns a fresh id and appends the entry
    pub fn add(&mut self, draft: EntryDraft) -> Result<CatalogEntry, StorefrontError> {
        let entry = draft.validate_and_finalise(self.next_id())?;
        self.entries.push(entry.clone());
        self.persist()?;
        Ok(entry)
    }

    /// Applies the draft over an existing entry; the id never changes
    pub fn update(
        &mut self,
        id: EntryId,
        draft: EntryDraft,
    ) -> Result<CatalogEntry, StorefrontError> {
        let index = self.position(id).ok_or(StorefrontError::NotFound(id))?;
        let entry = draft.validate_and_finalise(id)?;
        self.entries[index] = entry.clone();
        self.persist()?;
        Ok(entry)
    }

    /// Removes an entry and cascades into the cart within the same synchronous
    /// turn: remove, persist the catalog, drop dependent cart lines, persist
    /// the cart. No observer can see a cart line referencing a removed entry.
    pub fn remove<C: PersistenceSlot>(
        &mut self,
        id: EntryId,
        cart: &mut CartStore<C>,
    ) -> Result<CatalogEntry, StorefrontError> {
        let index = self.position(id).ok_or(StorefrontError::NotFound(id))?;
        let removed = self.entries.remove(index);
        self.persist()?;
        cart.drop_references_to(id)?;
        Ok(removed)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn next_id(&self) -> EntryId {
        1 + self.entries.iter().map(|entry| entry.id).max().unwrap_or(0)
    }

    // Wholesale overwrite of the slot after every mutation.
    fn persist(&self) -> Result<(), StorefrontError> {
        let payload =
            minicbor::to_vec(&self.entries).map_err(|err| StorefrontError::Storage(err.into()))?;
        self.slot.write(&payload).map_err(StorefrontError::Storage)?;
        debug!(entries = self.entries.len(), "catalog persisted");
        Ok(())
    }
}

/// The three example entries loaded into an empty shop.
pub fn seed_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry {
            id: 1,
            name: "Wireless Headphones".to_string(),
            description: "Bluetooth headphones with noise cancelling and a charging case."
                .to_string(),
            base_price: 45999.0,
            discount_percent: 10.0,
            image_ref: Some(
                "https://images.unsplash.com/photo-1505740420928-5e560c06d30e".to_string(),
            ),
        },
        CatalogEntry {
            id: 2,
            name: "RGB Mechanical Keyboard".to_string(),
            description: "Mechanical keyboard with red switches and RGB backlight.".to_string(),
            base_price: 79999.0,
            discount_percent: 5.0,
            image_ref: Some(
                "https://images.unsplash.com/photo-1517336714731-489689fd1ca8".to_string(),
            ),
        },
        CatalogEntry {
            id: 3,
            name: "7200 DPI Gaming Mouse".to_string(),
            description: "Ergonomic mouse with 7 programmable buttons.".to_string(),
            base_price: 25999.0,
            discount_percent: 0.0,
            image_ref: Some(
                "https://images.unsplash.com/photo-1527814050087-3793815479db".to_string(),
            ),
        },
    ]
}
