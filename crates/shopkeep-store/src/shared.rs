//! # Shared Inventory
//!
//! A cloneable handle for callers that mutate the inventory from more than
//! one thread.
//!
//! ## Thread Safety
//! The inventory is wrapped in `Arc<Mutex<T>>`. Each mutation holds the lock
//! across the whole load-modify-save cycle, so two writers can never
//! interleave their saves and lose an update.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    SharedInventory                                      │
//! │                                                                         │
//! │  thread A ──► create() ──┐                                              │
//! │                          ├──► lock ──► Inventory::create ──► save       │
//! │  thread B ──► delete() ──┘     (B waits until A's save returns)         │
//! │                                                                         │
//! │  snapshot() ──► lock ──► clone items ──► unlock                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use shopkeep_core::{Item, ItemFields};

use crate::error::{StoreError, StoreResult};
use crate::file::StoreConfig;
use crate::inventory::Inventory;

/// Single-writer handle to an [`Inventory`].
#[derive(Debug, Clone)]
pub struct SharedInventory {
    inner: Arc<Mutex<Inventory>>,
}

impl SharedInventory {
    /// Wraps an open inventory.
    pub fn new(inventory: Inventory) -> Self {
        SharedInventory {
            inner: Arc::new(Mutex::new(inventory)),
        }
    }

    /// Opens the inventory at `config` for writing and wraps it.
    ///
    /// ## Errors
    /// Same as [`Inventory::try_open`]: an unreadable file is refused.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        Ok(Self::new(Inventory::try_open(config)?))
    }

    /// Runs `f` with exclusive access to the inventory.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = shared.with(|inv| inv.items().len())?;
    /// ```
    pub fn with<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut Inventory) -> R,
    {
        let mut inventory = self.inner.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&mut inventory))
    }

    /// Copy of the current collection.
    pub fn snapshot(&self) -> StoreResult<Vec<Item>> {
        self.with(|inv| inv.items().to_vec())
    }

    /// See [`Inventory::create`].
    pub fn create(&self, fields: ItemFields) -> StoreResult<Item> {
        self.with(|inv| inv.create(fields))?
    }

    /// See [`Inventory::update`].
    pub fn update(&self, id: u64, fields: ItemFields) -> StoreResult<Item> {
        self.with(|inv| inv.update(id, fields))?
    }

    /// See [`Inventory::delete`].
    pub fn delete(&self, id: u64) -> StoreResult<Option<Item>> {
        self.with(|inv| inv.delete(id))?
    }
}
