//! Persistence slots for the two stores
//!
//! Each store mirrors its full state into exactly one slot holding one CBOR
//! payload, overwritten wholesale on every mutation. The catalog lives in a
//! durable sled slot under a fixed key; the cart in a session-scoped
//! in-process slot that dies with the process.

use std::sync::{Arc, Mutex};

pub const CATALOG_KEY: &str = "storefront_catalog";

pub trait PersistenceSlot {
    /// Returns the current payload, or `None` if nothing was ever written.
    fn read(&self) -> anyhow::Result<Option<Vec<u8>>>;
    fn write(&self, payload: &[u8]) -> anyhow::Result<()>;
}

// Lets callers keep a handle on a slot a store has taken ownership of.
impl<S: PersistenceSlot> PersistenceSlot for Arc<S> {
    fn read(&self) -> anyhow::Result<Option<Vec<u8>>> {
        (**self).read()
    }

    fn write(&self, payload: &[u8]) -> anyhow::Result<()> {
        (**self).write(payload)
    }
}

/// Durable slot over an embedded sled database.
pub struct SledSlot {
    instance: Arc<sled::Db>,
    key: &'static str,
}

impl SledSlot {
    pub fn new(instance: Arc<sled::Db>, key: &'static str) -> Self {
        Self { instance, key }
    }
}

impl PersistenceSlot for SledSlot {
    fn read(&self) -> anyhow::Result<Option<Vec<u8>>> {
        let value = self.instance.get(self.key)?;
        Ok(value.map(|ivec| ivec.to_vec()))
    }

    fn write(&self, payload: &[u8]) -> anyhow::Result<()> {
        self.instance.insert(self.key, payload)?;
        Ok(())
    }
}

/// Session-scoped slot held in process memory.
#[derive(Default)]
pub struct MemorySlot {
    payload: Mutex<Option<Vec<u8>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the slot, used by tests to simulate a prior session.
    pub fn with_payload(payload: Vec<u8>) -> Self {
        Self {
            payload: Mutex::new(Some(payload)),
        }
    }
}

impl PersistenceSlot for MemorySlot {
    fn read(&self) -> anyhow::Result<Option<Vec<u8>>> {
        let guard = self
            .payload
            .lock()
            .map_err(|_| anyhow::Error::msg("session slot lock poisoned"))?;
        Ok(guard.clone())
    }

    fn write(&self, payload: &[u8]) -> anyhow::Result<()> {
        let mut guard = self
            .payload
            .lock()
            .map_err(|_| anyhow::Error::msg("session slot lock poisoned"))?;
        *guard = Some(payload.to_vec());
        Ok(())
    }
}
