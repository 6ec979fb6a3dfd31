//! # Aggregator
//!
//! Summary statistics over the whole collection.
//!
//! ## What Gets Computed
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      summarize(items)                                   │
//! │                                                                         │
//! │  total_count      number of items                                      │
//! │  total_value      Σ price × stock                                      │
//! │  total_stock      Σ stock                                              │
//! │  average_price    Σ price / count   (0 for an empty collection)        │
//! │  by_category      category → { count, total_value, total_stock }       │
//! │  low_stock        stock < 10, source order                             │
//! │  recent           5 newest by created_at, newest first                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::query::{query, ViewState};
use crate::types::Item;
use crate::{LOW_STOCK_THRESHOLD, RECENT_LIMIT};

// =============================================================================
// Statistics
// =============================================================================

/// Per-category totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryStats {
    pub count: usize,
    pub total_value: f64,
    pub total_stock: u64,
}

/// Aggregate summary of a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_count: usize,
    pub total_value: f64,
    pub total_stock: u64,
    pub average_price: f64,
    /// Every distinct category present; key order is unspecified.
    pub by_category: HashMap<String, CategoryStats>,
    /// Items below [`LOW_STOCK_THRESHOLD`], in source order.
    pub low_stock: Vec<Item>,
    /// At most [`RECENT_LIMIT`] items, newest `created_at` first.
    pub recent: Vec<Item>,
}

impl Statistics {
    /// Category rows sorted by name, for stable display.
    pub fn categories_sorted(&self) -> Vec<(&str, &CategoryStats)> {
        let mut rows: Vec<_> = self
            .by_category
            .iter()
            .map(|(name, stats)| (name.as_str(), stats))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        rows
    }
}

/// Computes the summary of `items`.
///
/// ## Example
/// ```rust
/// use shopkeep_core::summarize;
///
/// let stats = summarize(&[]);
/// assert_eq!(stats.total_count, 0);
/// assert_eq!(stats.average_price, 0.0);
/// ```
pub fn summarize(items: &[Item]) -> Statistics {
    let mut total_value = 0.0;
    let mut total_stock = 0u64;
    let mut price_sum = 0.0;
    let mut by_category: HashMap<String, CategoryStats> = HashMap::new();

    for item in items {
        let value = item.value();
        total_value += value;
        total_stock += u64::from(item.stock);
        price_sum += item.price;

        let bucket = by_category.entry(item.category.clone()).or_default();
        bucket.count += 1;
        bucket.total_value += value;
        bucket.total_stock += u64::from(item.stock);
    }

    let average_price = if items.is_empty() {
        0.0
    } else {
        price_sum / items.len() as f64
    };

    let low_stock = items
        .iter()
        .filter(|item| item.stock < LOW_STOCK_THRESHOLD)
        .cloned()
        .collect();

    Statistics {
        total_count: items.len(),
        total_value,
        total_stock,
        average_price,
        by_category,
        low_stock,
        recent: most_recent(items, RECENT_LIMIT),
    }
}

/// Up to `limit` items with the latest `created_at`, newest first.
/// Items created in the same second keep their source order.
fn most_recent(items: &[Item], limit: usize) -> Vec<Item> {
    let mut sorted: Vec<&Item> = items.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.into_iter().take(limit).cloned().collect()
}

// =============================================================================
// View Summary
// =============================================================================

/// Header metrics shown above a list view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewSummary {
    /// Items in the whole collection.
    pub total_count: usize,
    /// Items that survive the view's filters.
    pub filtered_count: usize,
    /// Σ price × stock over the whole collection.
    pub total_value: f64,
    /// Σ stock over the whole collection.
    pub total_stock: u64,
}

/// Whole-collection totals plus the size of the filtered view.
pub fn summarize_view(items: &[Item], view: &ViewState) -> ViewSummary {
    ViewSummary {
        total_count: items.len(),
        filtered_count: query(items, view).len(),
        total_value: items.iter().map(Item::value).sum(),
        total_stock: items.iter().map(|item| u64::from(item.stock)).sum(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
