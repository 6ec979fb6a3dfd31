//! # shopkeep-store: Persistence Layer for Shopkeep
//!
//! Owns `items.json` and every operation that ends in a write.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Persistence Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 SharedInventory (optional)                       │   │
//! │  │          Arc<Mutex<Inventory>> for multi-threaded callers        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                        Inventory                                 │   │
//! │  │      Vec<Item> in memory + create / update / delete              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ full rewrite after each mutation       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                        ItemStore                                 │   │
//! │  │        load / try_load / save  (tmp file + rename)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                ▼                                        │
//! │                        data/items.json                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use shopkeep_core::ItemFields;
//! use shopkeep_store::{Inventory, StoreConfig};
//!
//! let mut inventory = Inventory::open(StoreConfig::new("./data"));
//! let item = inventory.create(ItemFields::new("Laptop", 1_000_000.0, 5).with_category("전자제품"))?;
//! println!("created #{}", item.id);
//! # Ok::<(), shopkeep_store::StoreError>(())
//! ```

pub mod error;
pub mod file;
pub mod inventory;
pub mod shared;

pub use error::{StoreError, StoreResult};
pub use file::{ItemStore, StoreConfig, DEFAULT_DATA_DIR, DEFAULT_FILE_NAME};
pub use inventory::Inventory;
pub use shared::SharedInventory;
