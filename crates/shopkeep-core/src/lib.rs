//! # shopkeep-core: Pure Inventory Logic for Shopkeep
//!
//! This crate is the **heart** of Shopkeep. It holds the item model and every
//! computation over a collection of items as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopkeep Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    shopkeep CLI (apps/cli)                      │   │
//! │  │    list ──► show ──► add ──► edit ──► delete ──► stats          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopkeep-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   query   │  │   stats   │  │ validation│  │   │
//! │  │   │   Item    │  │ ViewState │  │ Statistics│  │   rules   │  │   │
//! │  │   │ Timestamp │  │  SortKey  │  │ Category  │  │   checks  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO NETWORK • PURE FUNCTIONS                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               shopkeep-store (Persistence Layer)                │   │
//! │  │              items.json, create / update / delete               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Item, ItemFields, Timestamp
//! - [`ids`] - Monotonic ID assignment
//! - [`query`] - Search, category filter and sort over a collection
//! - [`stats`] - Aggregate statistics
//! - [`validation`] - Field rules for create/update
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shopkeep_core::{query, summarize, Item, ItemFields, Timestamp, ViewState};
//!
//! let now = Timestamp::now();
//! let laptop = Item::from_fields(1, ItemFields::new("Laptop", 1_000_000.0, 5), now).unwrap();
//! let mouse = Item::from_fields(2, ItemFields::new("Mouse", 20_000.0, 50), now).unwrap();
//! let items = vec![laptop, mouse];
//!
//! let view = ViewState::default().with_search("lap");
//! let hits = query(&items, &view);
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].name, "Laptop");
//!
//! let stats = summarize(&items);
//! assert_eq!(stats.total_value, 6_000_000.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ids;
pub mod query;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use ids::next_id;
pub use query::{categories, query, query_with, CategoryFilter, SortKey, ViewState};
pub use stats::{summarize, summarize_view, CategoryStats, Statistics, ViewSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Category assigned when an item is created or loaded without one.
pub const DEFAULT_CATEGORY: &str = "기타";

/// Items with fewer units than this are reported as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Number of most recently created items reported by [`summarize`].
pub const RECENT_LIMIT: usize = 5;
