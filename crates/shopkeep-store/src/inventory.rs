//! # Inventory
//!
//! The session's authoritative collection plus the three mutations that
//! change it. Every successful mutation is followed by a full save.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create / update / delete                             │
//! │                                                                         │
//! │  fields ──► validate ──► lookup ──► change in memory ──► save           │
//! │               │             │                             │             │
//! │               ▼             ▼                             ▼             │
//! │        ValidationError  NotFound                  write failed?         │
//! │        (nothing done)   (nothing done)            roll back memory,     │
//! │                                                   return the error      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shopkeep_core::{next_id, CoreError, Item, ItemFields, Timestamp};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::file::{ItemStore, StoreConfig};

/// The authoritative in-memory collection, synchronized to its file.
///
/// ## Usage
/// ```rust,no_run
/// use shopkeep_core::ItemFields;
/// use shopkeep_store::{Inventory, StoreConfig};
///
/// let mut inventory = Inventory::open(StoreConfig::default());
/// let laptop = inventory.create(ItemFields::new("Laptop", 1_000_000.0, 5))?;
/// inventory.delete(laptop.id)?;
/// # Ok::<(), shopkeep_store::StoreError>(())
/// ```
#[derive(Debug)]
pub struct Inventory {
    store: ItemStore,
    items: Vec<Item>,
}

impl Inventory {
    /// Loads the collection from the configured file (soft: a missing or
    /// unreadable file opens an empty inventory).
    ///
    /// Suited to read-only sessions. A session that will write should use
    /// [`try_open`](Self::try_open), since saving over an unreadable file
    /// replaces every record in it.
    pub fn open(config: StoreConfig) -> Self {
        let store = ItemStore::new(config);
        let items = store.load();
        debug!(path = %store.path().display(), count = items.len(), "Inventory opened");
        Inventory { store, items }
    }

    /// Loads the collection, refusing a file that exists but cannot be read
    /// or parsed.
    ///
    /// A missing file still opens an empty inventory.
    ///
    /// ## Errors
    /// * `StoreError::Corrupt` - the file is not a valid item array
    /// * `StoreError::Io` - the file exists but could not be read
    pub fn try_open(config: StoreConfig) -> StoreResult<Self> {
        let store = ItemStore::new(config);
        let items = store.try_load()?;
        debug!(path = %store.path().display(), count = items.len(), "Inventory opened");
        Ok(Inventory { store, items })
    }

    /// Wraps an already loaded collection.
    pub fn with_items(store: ItemStore, items: Vec<Item>) -> Self {
        Inventory { store, items }
    }

    /// The collection, in storage order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The backing store.
    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Looks up an item by ID.
    pub fn get(&self, id: u64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Re-reads the file, replacing the in-memory collection.
    pub fn reload(&mut self) {
        self.items = self.store.load();
    }

    /// Creates an item stamped with the current time.
    ///
    /// ## Errors
    /// * `StoreError::Core(CoreError::Validation)` - nothing was changed
    /// * `StoreError::Io` - the write failed; the item was not kept
    pub fn create(&mut self, fields: ItemFields) -> StoreResult<Item> {
        self.create_at(fields, Timestamp::now())
    }

    /// [`create`](Self::create) with an explicit clock reading.
    pub fn create_at(&mut self, fields: ItemFields, now: Timestamp) -> StoreResult<Item> {
        let item = Item::from_fields(next_id(&self.items), fields, now)?;
        debug!(id = item.id, name = %item.name, "Creating item");

        self.items.push(item.clone());
        if let Err(err) = self.store.save(&self.items) {
            self.items.pop();
            return Err(err);
        }

        info!(id = item.id, name = %item.name, "Item created");
        Ok(item)
    }

    /// Replaces every editable field of item `id`.
    ///
    /// ## Errors
    /// * `StoreError::Core(CoreError::Validation)` - checked before the lookup
    /// * `StoreError::Core(CoreError::ItemNotFound)` - no such item
    /// * `StoreError::Io` - the write failed; the item keeps its old values
    pub fn update(&mut self, id: u64, fields: ItemFields) -> StoreResult<Item> {
        self.update_at(id, fields, Timestamp::now())
    }

    /// [`update`](Self::update) with an explicit clock reading.
    pub fn update_at(&mut self, id: u64, fields: ItemFields, now: Timestamp) -> StoreResult<Item> {
        let valid = fields.validate()?;
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(CoreError::ItemNotFound(id))?;
        debug!(id, "Updating item");

        let previous = self.items[index].clone();
        self.items[index].assign(valid, now);
        let updated = self.items[index].clone();

        if let Err(err) = self.store.save(&self.items) {
            self.items[index] = previous;
            return Err(err);
        }

        info!(id, name = %updated.name, "Item updated");
        Ok(updated)
    }

    /// Removes item `id`.
    ///
    /// Deleting an ID that does not exist is a no-op: `Ok(None)` and no
    /// write.
    pub fn delete(&mut self, id: u64) -> StoreResult<Option<Item>> {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            debug!(id, "Delete of unknown item ignored");
            return Ok(None);
        };

        let removed = self.items.remove(index);
        if let Err(err) = self.store.save(&self.items) {
            self.items.insert(index, removed);
            return Err(err);
        }

        info!(id, name = %removed.name, "Item deleted");
        Ok(Some(removed))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
