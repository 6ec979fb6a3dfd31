//! # Item Commands
//!
//! Listing, inspecting and mutating items.
//!
//! ## Edit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    shopkeep edit 7 --price 25000                        │
//! │                                                                         │
//! │  look up item 7 ──► not there? NotFound (exit 3)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ItemFields::from(&item)      ← every field pre-filled                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  overlay the flags that were given (price = 25000)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Inventory::update ──► validate ──► save ──► print the new values       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;
use shopkeep_core::{query, summarize_view, CategoryFilter, Item, ItemFields, SortKey, ViewState, ViewSummary};
use shopkeep_store::Inventory;
use tracing::debug;

use super::Render;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{write_item_detail, write_item_table};

// =============================================================================
// Arguments
// =============================================================================

/// View criteria for `list`.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive text matched against name and description.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact category to show; "All" or "전체" shows every category.
    #[arg(short, long)]
    pub category: Option<CategoryFilter>,

    /// Sort order: id, name, price_asc, price_desc, stock_asc, stock_desc.
    #[arg(long, default_value_t = SortKey::Id)]
    pub sort: SortKey,
}

impl ListArgs {
    /// The view these flags describe.
    pub fn view(&self) -> ViewState {
        ViewState {
            search: self.search.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            sort: self.sort,
        }
    }
}

/// Fields for `add`.
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Item name (required, non-blank).
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Category; defaults to "기타".
    #[arg(long)]
    pub category: Option<String>,

    /// Unit price.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub price: f64,

    /// Units on hand.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub stock: i64,
}

impl From<AddArgs> for ItemFields {
    fn from(args: AddArgs) -> Self {
        ItemFields {
            name: args.name,
            description: args.description,
            category: args.category,
            price: args.price,
            stock: args.stock,
        }
    }
}

/// Fields for `edit`. Every flag left out keeps the item's current value.
#[derive(Debug, Clone, Default, Args)]
pub struct EditArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// New description; an empty string clears it.
    #[arg(long)]
    pub description: Option<String>,

    /// New category; an empty string resets it to "기타".
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub price: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub stock: Option<i64>,
}

impl EditArgs {
    /// Overlays the given flags on `item`'s current values.
    pub fn merge(self, item: &Item) -> ItemFields {
        let mut fields = ItemFields::from(item);
        if let Some(name) = self.name {
            fields.name = name;
        }
        if let Some(description) = self.description {
            fields.description = Some(description);
        }
        if let Some(category) = self.category {
            fields.category = Some(category);
        }
        if let Some(price) = self.price {
            fields.price = price;
        }
        if let Some(stock) = self.stock {
            fields.stock = stock;
        }
        fields
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Output of `list`.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub summary: ViewSummary,
    pub items: Vec<Item>,
}

impl Render for ListResponse {
    fn write_text<W: Write>(&self, writer: &mut W, config: &CliConfig) -> io::Result<()> {
        writeln!(
            writer,
            "Items: {} (showing {})   Total value: {}   Total stock: {}",
            self.summary.total_count,
            self.summary.filtered_count,
            config.format_money(self.summary.total_value),
            self.summary.total_stock,
        )?;
        writeln!(writer)?;
        let refs: Vec<&Item> = self.items.iter().collect();
        write_item_table(writer, &refs, config)
    }
}

/// Output of `show`.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ShowResponse {
    pub item: Item,
}

impl Render for ShowResponse {
    fn write_text<W: Write>(&self, writer: &mut W, config: &CliConfig) -> io::Result<()> {
        write_item_detail(writer, &self.item, config)
    }
}

/// What a mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Created,
    Updated,
}

/// Output of `add` and `edit`.
#[derive(Debug, Clone, Serialize)]
pub struct MutationResponse {
    pub action: Action,
    pub item: Item,
}

impl Render for MutationResponse {
    fn write_text<W: Write>(&self, writer: &mut W, config: &CliConfig) -> io::Result<()> {
        let verb = match self.action {
            Action::Created => "Created",
            Action::Updated => "Updated",
        };
        writeln!(writer, "{} item #{}", verb, self.item.id)?;
        write_item_detail(writer, &self.item, config)
    }
}

/// Output of `delete`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub id: u64,
    /// The removed item; `None` when no item had this ID.
    pub deleted: Option<Item>,
}

impl Render for DeleteResponse {
    fn write_text<W: Write>(&self, writer: &mut W, _config: &CliConfig) -> io::Result<()> {
        match &self.deleted {
            Some(item) => writeln!(writer, "Deleted item #{} ({})", item.id, item.name),
            None => writeln!(writer, "No item with ID {}; nothing deleted", self.id),
        }
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Filtered, sorted view plus header metrics.
pub fn list(inventory: &Inventory, args: &ListArgs) -> ListResponse {
    let view = args.view();
    debug!(search = %view.search, category = %view.category, sort = %view.sort, "Listing items");

    ListResponse {
        summary: summarize_view(inventory.items(), &view),
        items: query(inventory.items(), &view).into_iter().cloned().collect(),
    }
}

/// One item by ID.
pub fn show(inventory: &Inventory, id: u64) -> CliResult<ShowResponse> {
    let item = inventory.get(id).cloned().ok_or_else(|| CliError::not_found(id))?;
    Ok(ShowResponse { item })
}

/// Creates an item.
pub fn add(inventory: &mut Inventory, args: AddArgs) -> CliResult<MutationResponse> {
    let item = inventory.create(args.into())?;
    Ok(MutationResponse {
        action: Action::Created,
        item,
    })
}

/// Edits an item, keeping the values of flags that were not given.
pub fn edit(inventory: &mut Inventory, id: u64, args: EditArgs) -> CliResult<MutationResponse> {
    let current = inventory.get(id).ok_or_else(|| CliError::not_found(id))?;
    let fields = args.merge(current);
    let item = inventory.update(id, fields)?;
    Ok(MutationResponse {
        action: Action::Updated,
        item,
    })
}

/// Deletes an item; an unknown ID is reported, not treated as an error.
pub fn delete(inventory: &mut Inventory, id: u64) -> CliResult<DeleteResponse> {
    let deleted = inventory.delete(id)?;
    Ok(DeleteResponse { id, deleted })
}
