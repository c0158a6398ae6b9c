//! Service layer API over the catalog, cart and checkout simulator
use super::cart::{CartLineView, CartStore};
use super::catalog::CatalogStore;
use super::checkout::{CheckoutSimulator, CheckoutState, Receipt};
use super::entry::{CatalogEntry, EntryDraft, EntryId};
use super::error::StorefrontError;
use super::persistence::{CATALOG_KEY, MemorySlot, PersistenceSlot, SledSlot};
use super::pricing::CartSummary;
use std::sync::Arc;

pub struct StorefrontService<P: PersistenceSlot, Q: PersistenceSlot> {
    catalog: CatalogStore<P>,
    cart: CartStore<Q>,
    checkout: CheckoutSimulator,
}

impl StorefrontService<SledSlot, MemorySlot> {
    /// Standard wiring: durable catalog in sled, session-scoped cart in memory.
    pub fn open(instance: Arc<sled::Db>) -> Result<Self, StorefrontError> {
        Self::with_slots(
            SledSlot::new(instance, CATALOG_KEY),
            MemorySlot::new(),
        )
    }
}

impl<P: PersistenceSlot, Q: PersistenceSlot> StorefrontService<P, Q> {
    /// Wires explicit slots, then loads (or seeds) the catalog and rehydrates
    /// the cart against it.
    pub fn with_slots(catalog_slot: P, cart_slot: Q) -> Result<Self, StorefrontError> {
        let catalog = CatalogStore::load_or_seed(catalog_slot)?;
        let cart = CartStore::rehydrate(cart_slot, catalog.entries())?;
        Ok(Self {
            catalog,
            cart,
            checkout: CheckoutSimulator::new(),
        })
    }

    // Catalog operations

    pub fn add_entry(&mut self, draft: EntryDraft) -> Result<CatalogEntry, StorefrontError> {
        self.catalog.add(draft)
    }

    pub fn update_entry(
        &mut self,
        id: EntryId,
        draft: EntryDraft,
    ) -> Result<CatalogEntry, StorefrontError> {
        self.catalog.update(id, draft)
    }

    /// Removes an entry; any cart line referencing it is dropped in the same
    /// turn.
    pub fn remove_entry(&mut self, id: EntryId) -> Result<CatalogEntry, StorefrontError> {
        self.catalog.remove(id, &mut self.cart)
    }

    pub fn reseed(&mut self) -> Result<(), StorefrontError> {
        self.catalog.reseed(&mut self.cart)
    }

    pub fn list_catalog(&self) -> &[CatalogEntry] {
        self.catalog.entries()
    }

    pub fn entry(&self, id: EntryId) -> Option<&CatalogEntry> {
        self.catalog.get(id)
    }

    // Cart operations

    pub fn add_to_cart(&mut self, id: EntryId) -> Result<(), StorefrontError> {
        self.cart.add_item(self.catalog.entries(), id)
    }

    pub fn set_quantity(&mut self, id: EntryId, quantity: u32) -> Result<(), StorefrontError> {
        self.cart.set_quantity(id, quantity)
    }

    pub fn remove_from_cart(&mut self, id: EntryId) -> Result<(), StorefrontError> {
        self.cart.remove_item(id)
    }

    pub fn clear_cart(&mut self) -> Result<(), StorefrontError> {
        self.cart.clear()
    }

    pub fn list_cart_lines(&self) -> Vec<CartLineView> {
        self.cart.line_views(self.catalog.entries())
    }

    pub fn cart_summary(&self) -> CartSummary {
        self.cart.summary(self.catalog.entries())
    }

    // Checkout

    pub fn checkout_state(&self) -> CheckoutState {
        self.checkout.state()
    }

    /// Runs the simulated payment against the current summary. The cart is
    /// cleared only on confirmation; a rejected attempt leaves it intact for
    /// retry.
    pub async fn checkout(&mut self) -> Result<Receipt, StorefrontError> {
        let summary = self.cart_summary();
        let receipt = self.checkout.submit(summary).await?;
        self.cart.clear()?;
        Ok(receipt)
    }
}
