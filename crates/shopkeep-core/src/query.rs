//! # Query Engine
//!
//! Derives an ordered view of the collection from a search text, a category
//! filter and a sort key. The source collection is only borrowed.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      query(items, view)                                 │
//! │                                                                         │
//! │  &[Item] ──► search filter ──► category filter ──► stable sort ──► view │
//! │               (name or           (exact match,      (SortKey,           │
//! │                description,      "All" = keep)      ties keep           │
//! │                case-folded)                          source order)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The view state is owned by the caller and passed in on every call; this
//! module keeps nothing between calls.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::Item;

// =============================================================================
// Sort Key
// =============================================================================

/// Display order of a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Ascending by ID.
    #[default]
    Id,
    /// Ascending by name.
    Name,
    PriceAsc,
    PriceDesc,
    StockAsc,
    StockDesc,
}

impl SortKey {
    /// Every key, in the order a picker would list them.
    pub const ALL: [SortKey; 6] = [
        SortKey::Id,
        SortKey::Name,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::StockAsc,
        SortKey::StockDesc,
    ];

    /// Wire name of the key.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::StockAsc => "stock_asc",
            SortKey::StockDesc => "stock_desc",
        }
    }

    /// Total order between two items under this key.
    ///
    /// Returning `Equal` for ties is what lets the stable sort keep source
    /// order.
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        match self {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::PriceAsc => a.price.total_cmp(&b.price),
            SortKey::PriceDesc => b.price.total_cmp(&a.price),
            SortKey::StockAsc => a.stock.cmp(&b.stock),
            SortKey::StockDesc => b.stock.cmp(&a.stock),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "sort".to_string(),
                reason: format!(
                    "expected one of: {}",
                    SortKey::ALL.map(|k| k.as_str()).join(", ")
                ),
            })
    }
}

// =============================================================================
// Category Filter
// =============================================================================

/// Category restriction of a view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// No restriction.
    #[default]
    All,
    /// Only items whose category equals this text exactly.
    Only(String),
}

impl CategoryFilter {
    /// Sentinel text that selects every category.
    pub const ALL_SENTINEL: &'static str = "All";

    /// Korean spelling of the sentinel.
    pub const ALL_SENTINEL_KO: &'static str = "전체";

    /// Whether an item passes this filter.
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => item.category == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(Self::ALL_SENTINEL),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(s: &str) -> Self {
        if s == Self::ALL_SENTINEL || s == Self::ALL_SENTINEL_KO {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(s: String) -> Self {
        CategoryFilter::from(s.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CategoryFilter::from(s))
    }
}

// =============================================================================
// View State
// =============================================================================

/// Caller-owned view criteria for one operator session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Case-insensitive substring matched against name and description.
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

impl ViewState {
    /// Sets the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Sets the category filter.
    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the sort key.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

// =============================================================================
// Query
// =============================================================================

/// Returns the filtered, sorted view of `items` described by `view`.
///
/// ## Example
/// ```rust
/// use shopkeep_core::{query, Item, ItemFields, SortKey, Timestamp, ViewState};
///
/// let now = Timestamp::now();
/// let items = vec![
///     Item::from_fields(1, ItemFields::new("Mouse", 20_000.0, 50), now).unwrap(),
///     Item::from_fields(2, ItemFields::new("Laptop", 1_000_000.0, 5), now).unwrap(),
/// ];
///
/// let view = ViewState::default().with_sort(SortKey::PriceDesc);
/// let ids: Vec<u64> = query(&items, &view).iter().map(|i| i.id).collect();
/// assert_eq!(ids, vec![2, 1]);
/// ```
pub fn query<'a>(items: &'a [Item], view: &ViewState) -> Vec<&'a Item> {
    let needle = view.search.to_lowercase();

    let mut result: Vec<&Item> = items
        .iter()
        .filter(|item| needle.is_empty() || matches_search(item, &needle))
        .filter(|item| view.category.matches(item))
        .collect();

    // slice::sort_by is stable
    result.sort_by(|a, b| view.sort.compare(a, b));
    result
}

/// Positional form of [`query`].
pub fn query_with<'a>(
    items: &'a [Item],
    search_text: &str,
    category_filter: &CategoryFilter,
    sort_key: SortKey,
) -> Vec<&'a Item> {
    let view = ViewState {
        search: search_text.to_string(),
        category: category_filter.clone(),
        sort: sort_key,
    };
    query(items, &view)
}

/// Sorted distinct categories present in the collection.
pub fn categories(items: &[Item]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// `needle` must already be lowercased.
fn matches_search(item: &Item, needle: &str) -> bool {
    item.name.to_lowercase().contains(needle)
        || item.description_text().to_lowercase().contains(needle)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemFields, Timestamp};

    fn item(id: u64, name: &str, category: &str, price: f64, stock: i64) -> Item {
        Item::from_fields(
            id,
            ItemFields::new(name, price, stock).with_category(category),
            Timestamp::epoch(),
        )
        .unwrap()
    }

    fn sample() -> Vec<Item> {
        vec![
            item(3, "Keyboard", "전자제품", 50_000.0, 20),
            item(1, "Laptop", "전자제품", 1_000_000.0, 5),
            item(4, "Notebook", "문구", 3_000.0, 20),
            item(2, "Mouse", "전자제품", 20_000.0, 50),
            item(5, "Pen", "문구", 3_000.0, 100),
        ]
    }

    fn ids(view: &[&Item]) -> Vec<u64> {
        view.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_default_view_sorts_by_id() {
        let items = sample();
        assert_eq!(ids(&query(&items, &ViewState::default())), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let items = sample();
        let view = ViewState::default().with_search("LAP");
        assert_eq!(ids(&query(&items, &view)), vec![1]);
    }

    #[test]
    fn test_search_matches_description() {
        let mut items = sample();
        items.push(
            Item::from_fields(
                6,
                ItemFields::new("Cable", 1_000.0, 3).with_description("USB-C for laptops"),
                Timestamp::epoch(),
            )
            .unwrap(),
        );
        let view = ViewState::default().with_search("laptop");
        assert_eq!(ids(&query(&items, &view)), vec![1, 6]);
    }

    #[test]
    fn test_category_filter_exact() {
        let items = sample();
        let view = ViewState::default().with_category("문구");
        assert_eq!(ids(&query(&items, &view)), vec![4, 5]);

        let view = ViewState::default().with_category("문");
        assert!(query(&items, &view).is_empty());
    }

    #[test]
    fn test_all_sentinels() {
        assert_eq!(CategoryFilter::from("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from("전체"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::from("all"),
            CategoryFilter::Only("all".to_string())
        );
    }

    #[test]
    fn test_search_then_category() {
        let items = sample();
        let view = ViewState::default().with_search("o").with_category("문구");
        assert_eq!(ids(&query(&items, &view)), vec![4]);
    }

    #[test]
    fn test_sort_by_name() {
        let items = sample();
        let view = ViewState::default().with_sort(SortKey::Name);
        assert_eq!(ids(&query(&items, &view)), vec![3, 1, 2, 4, 5]);
    }

    #[test]
    fn test_price_sorts_are_stable() {
        let items = sample();
        // Notebook (4) and Pen (5) tie at 3000; source order puts 4 first.
        let asc = query(&items, &ViewState::default().with_sort(SortKey::PriceAsc));
        assert_eq!(ids(&asc), vec![4, 5, 2, 3, 1]);

        let desc = query(&items, &ViewState::default().with_sort(SortKey::PriceDesc));
        assert_eq!(ids(&desc), vec![1, 3, 2, 4, 5]);
    }

    #[test]
    fn test_stock_sorts_are_stable() {
        let items = sample();
        // Keyboard (3) and Notebook (4) tie at 20; source order puts 3 first.
        let asc = query(&items, &ViewState::default().with_sort(SortKey::StockAsc));
        assert_eq!(ids(&asc), vec![1, 3, 4, 2, 5]);

        let desc = query(&items, &ViewState::default().with_sort(SortKey::StockDesc));
        assert_eq!(ids(&desc), vec![5, 2, 3, 4, 1]);
    }

    #[test]
    fn test_query_does_not_mutate_input() {
        let items = sample();
        let before = items.clone();
        for key in SortKey::ALL {
            let _ = query(&items, &ViewState::default().with_sort(key));
        }
        assert_eq!(items, before);
    }

    #[test]
    fn test_every_sort_is_a_permutation() {
        let items = sample();
        let mut expected: Vec<u64> = items.iter().map(|i| i.id).collect();
        expected.sort_unstable();

        for key in SortKey::ALL {
            let mut got = ids(&query(&items, &ViewState::default().with_sort(key)));
            got.sort_unstable();
            assert_eq!(got, expected, "sort key {key}");
        }
    }

    #[test]
    fn test_every_sort_is_ordered() {
        let items = sample();
        for key in SortKey::ALL {
            let view = query(&items, &ViewState::default().with_sort(key));
            assert!(
                view.windows(2).all(|w| key.compare(w[0], w[1]) != Ordering::Greater),
                "sort key {key}"
            );
        }
    }

    #[test]
    fn test_sort_key_parse() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("price".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_query_with_matches_query() {
        let items = sample();
        let filter = CategoryFilter::Only("전자제품".to_string());
        let got = query_with(&items, "", &filter, SortKey::StockDesc);
        assert_eq!(ids(&got), vec![2, 3, 1]);
    }

    #[test]
    fn test_categories_sorted_distinct() {
        let items = sample();
        assert_eq!(categories(&items), vec!["문구".to_string(), "전자제품".to_string()]);
        assert!(categories(&[]).is_empty());
    }
}
