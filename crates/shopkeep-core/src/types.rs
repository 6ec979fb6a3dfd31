//! # Domain Types
//!
//! Core domain types used throughout Shopkeep.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │   ItemFields    │   │   Timestamp     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │   │  name           │   │  NaiveDateTime  │       │
//! │  │  name           │   │  description    │   │  "YYYY-MM-DD    │       │
//! │  │  category       │   │  category       │   │   HH:MM:SS"     │       │
//! │  │  price, stock   │   │  price, stock   │   │  totally ordered│       │
//! │  │  created/updated│   │  (unvalidated)  │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Shape
//! Every item is stored as a flat object with exactly eight fields:
//! ```json
//! {
//!   "id": 1,
//!   "name": "Laptop",
//!   "description": "",
//!   "category": "전자제품",
//!   "price": 1000000.0,
//!   "stock": 5,
//!   "created_at": "2024-03-01 09:30:00",
//!   "updated_at": "2024-03-01 09:30:00"
//! }
//! ```
//! Missing optional fields are resolved to their defaults once, when the file
//! is read, so no read site ever deals with an absent value.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;
use crate::validation::{self, ValidationResult};
use crate::DEFAULT_CATEGORY;

// =============================================================================
// Timestamp
// =============================================================================

/// Wire format of every timestamp: zero-padded local time, second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats accepted when reading. Hand-edited files may carry an ISO `T`
/// separator or fractional seconds; both are truncated to whole seconds.
const ACCEPTED_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// A local wall-clock instant with second precision.
///
/// Ordering is chronological, so "most recent" never depends on how the
/// value happens to be rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Current local time, truncated to whole seconds.
    pub fn now() -> Self {
        let now = Local::now().naive_local();
        Timestamp(now.with_nanosecond(0).unwrap_or(now))
    }

    /// `1970-01-01 00:00:00`, used for records stored without a timestamp.
    pub fn epoch() -> Self {
        Timestamp(NaiveDateTime::default())
    }

    /// Builds a timestamp from calendar parts; `None` if any part is out of range.
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, min, sec))
            .map(Timestamp)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut last_error = None;
        for format in ACCEPTED_FORMATS {
            match NaiveDateTime::parse_from_str(s, format) {
                Ok(parsed) => return Ok(Timestamp(parsed.with_nanosecond(0).unwrap_or(parsed))),
                Err(e) => last_error = Some(e),
            }
        }

        Err(ValidationError::InvalidFormat {
            field: "timestamp".to_string(),
            reason: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Item
// =============================================================================

/// One product record in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredItem", into = "StoredItem")]
pub struct Item {
    /// Unique, monotonically assigned identifier. Never reassigned.
    pub id: u64,

    /// Display name. Non-empty for every item created through validation.
    pub name: String,

    /// Free-form description; `None` when left blank.
    pub description: Option<String>,

    /// Category label, [`crate::DEFAULT_CATEGORY`] when none was given.
    pub category: String,

    /// Unit price, finite and `>= 0`.
    pub price: f64,

    /// Units on hand.
    pub stock: u32,

    /// When the item was created. Immutable.
    pub created_at: Timestamp,

    /// When the item was last written. Never earlier than `created_at`.
    pub updated_at: Timestamp,
}

impl Item {
    /// Builds a new item from unvalidated fields.
    ///
    /// Both timestamps are set to `now`.
    ///
    /// ## Errors
    /// Any [`ValidationError`] raised by [`ItemFields::validate`].
    pub fn from_fields(id: u64, fields: ItemFields, now: Timestamp) -> ValidationResult<Item> {
        let valid = fields.validate()?;
        Ok(Item {
            id,
            name: valid.name,
            description: valid.description,
            category: valid.category,
            price: valid.price,
            stock: valid.stock,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces every editable field with already-validated values and bumps
    /// `updated_at`.
    ///
    /// `updated_at` is clamped so it never precedes `created_at`, even if the
    /// wall clock moved backwards since creation.
    pub fn assign(&mut self, valid: ValidFields, now: Timestamp) {
        self.name = valid.name;
        self.description = valid.description;
        self.category = valid.category;
        self.price = valid.price;
        self.stock = valid.stock;
        self.updated_at = now.max(self.created_at);
    }

    /// Inventory value of this line: `price * stock`.
    #[inline]
    pub fn value(&self) -> f64 {
        self.price * f64::from(self.stock)
    }

    /// Description text, empty when absent.
    #[inline]
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

// =============================================================================
// Item Fields
// =============================================================================

/// Editable input for create and update.
///
/// `stock` is signed so that a negative request can be represented and
/// rejected by validation instead of by the type system of the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub stock: i64,
}

impl ItemFields {
    /// Fields with the required values set and everything else defaulted.
    pub fn new(name: impl Into<String>, price: f64, stock: i64) -> Self {
        ItemFields {
            name: name.into(),
            description: None,
            category: None,
            price,
            stock,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Checks every rule and resolves defaults.
    ///
    /// ## Rules
    /// - `name` non-empty after trimming
    /// - `price` finite and `>= 0`
    /// - `stock` `>= 0` and representable as `u32`
    /// - blank `description` becomes `None`, blank `category` becomes
    ///   [`crate::DEFAULT_CATEGORY`]
    pub fn validate(self) -> ValidationResult<ValidFields> {
        Ok(ValidFields {
            name: validation::validate_item_name(&self.name)?,
            price: validation::validate_price(self.price)?,
            stock: validation::validate_stock(self.stock)?,
            description: validation::normalize_description(self.description.as_deref()),
            category: validation::normalize_category(self.category.as_deref()),
        })
    }
}

impl From<&Item> for ItemFields {
    /// Pre-fills an edit with the item's current values.
    fn from(item: &Item) -> Self {
        ItemFields {
            name: item.name.clone(),
            description: item.description.clone(),
            category: Some(item.category.clone()),
            price: item.price,
            stock: i64::from(item.stock),
        }
    }
}

/// Output of [`ItemFields::validate`]; every value already satisfies the
/// item invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidFields {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    pub stock: u32,
}

// =============================================================================
// Stored Form
// =============================================================================

/// On-disk form of an [`Item`]. Optional fields carry their load defaults.
///
/// Text that is present is kept byte for byte; only absent or blank values
/// are resolved, so a save followed by a load returns the same item.
#[derive(Debug, Serialize, Deserialize)]
struct StoredItem {
    id: u64,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    stock: u32,
    #[serde(default = "Timestamp::epoch")]
    created_at: Timestamp,
    #[serde(default = "Timestamp::epoch")]
    updated_at: Timestamp,
}

impl TryFrom<StoredItem> for Item {
    type Error = ValidationError;

    fn try_from(stored: StoredItem) -> Result<Self, Self::Error> {
        Ok(Item {
            id: stored.id,
            name: stored.name,
            description: stored.description.filter(|d| !d.trim().is_empty()),
            category: stored
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            price: validation::validate_price(stored.price)?,
            stock: stored.stock,
            created_at: stored.created_at,
            updated_at: stored.updated_at.max(stored.created_at),
        })
    }
}

impl From<Item> for StoredItem {
    fn from(item: Item) -> Self {
        StoredItem {
            id: item.id,
            name: item.name,
            description: Some(item.description.unwrap_or_default()),
            category: Some(item.category),
            price: item.price,
            stock: item.stock,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(h: u32, m: u32, s: u32) -> Timestamp {
        Timestamp::from_ymd_hms(2024, 3, 1, h, m, s).unwrap()
    }

    #[test]
    fn test_timestamp_format() {
        let t = ts(9, 5, 7);
        assert_eq!(t.to_string(), "2024-03-01 09:05:07");
        assert_eq!("2024-03-01 09:05:07".parse::<Timestamp>().unwrap(), t);
    }

    #[test]
    fn test_timestamp_accepts_iso_and_fractions() {
        assert_eq!("2024-03-01T09:05:07".parse::<Timestamp>().unwrap(), ts(9, 5, 7));
        assert_eq!("2024-03-01 09:05:07.250".parse::<Timestamp>().unwrap(), ts(9, 5, 7));
        assert_eq!("2024-03-01T09:05:07.999999".parse::<Timestamp>().unwrap(), ts(9, 5, 7));
    }

    #[test]
    fn test_timestamp_rejects_other_formats() {
        assert!("yesterday".parse::<Timestamp>().is_err());
        assert!("2024-03-01".parse::<Timestamp>().is_err());
        assert!("01/03/2024 09:05:07".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_timestamp_ordering_is_chronological() {
        assert!(ts(9, 0, 0) < ts(10, 0, 0));
        assert!(Timestamp::epoch() < ts(0, 0, 0));
    }

    #[test]
    fn test_timestamp_now_has_whole_seconds() {
        assert_eq!(Timestamp::now().0.nanosecond(), 0);
    }

    #[test]
    fn test_from_fields_applies_defaults() {
        let item = Item::from_fields(1, ItemFields::new("  Laptop ", 1000.0, 5), ts(9, 0, 0)).unwrap();
        assert_eq!(item.name, "Laptop");
        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert_eq!(item.description, None);
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn test_from_fields_rejects_invalid() {
        assert!(Item::from_fields(1, ItemFields::new("", 1.0, 1), ts(9, 0, 0)).is_err());
        assert!(Item::from_fields(1, ItemFields::new("a", -1.0, 1), ts(9, 0, 0)).is_err());
        assert!(Item::from_fields(1, ItemFields::new("a", 1.0, -1), ts(9, 0, 0)).is_err());
    }

    #[test]
    fn test_assign_keeps_id_and_created_at() {
        let mut item = Item::from_fields(7, ItemFields::new("Mouse", 100.0, 1), ts(9, 0, 0)).unwrap();
        let fields = ItemFields::new("Wireless Mouse", 150.0, 3).with_category("전자제품");
        item.assign(fields.validate().unwrap(), ts(10, 0, 0));

        assert_eq!(item.id, 7);
        assert_eq!(item.name, "Wireless Mouse");
        assert_eq!(item.category, "전자제품");
        assert_eq!(item.created_at, ts(9, 0, 0));
        assert_eq!(item.updated_at, ts(10, 0, 0));
    }

    #[test]
    fn test_assign_clamps_updated_at() {
        let mut item = Item::from_fields(1, ItemFields::new("Mouse", 1.0, 1), ts(10, 0, 0)).unwrap();
        item.assign(ItemFields::new("Mouse", 2.0, 1).validate().unwrap(), ts(9, 0, 0));
        assert_eq!(item.updated_at, item.created_at);
    }

    #[test]
    fn test_serialized_shape() {
        let item = Item::from_fields(1, ItemFields::new("Laptop", 1000.0, 5), ts(9, 0, 0)).unwrap();
        let value = serde_json::to_value(&item).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 8);
        assert_eq!(object["description"], "");
        assert_eq!(object["category"], DEFAULT_CATEGORY);
        assert_eq!(object["created_at"], "2024-03-01 09:00:00");
    }

    #[test]
    fn test_deserialize_resolves_missing_fields() {
        let item: Item = serde_json::from_str(r#"{"id": 3, "name": "Cable"}"#).unwrap();
        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert_eq!(item.description, None);
        assert_eq!(item.price, 0.0);
        assert_eq!(item.stock, 0);
        assert_eq!(item.created_at, Timestamp::epoch());
    }

    #[test]
    fn test_deserialize_keeps_padded_text() {
        let item: Item = serde_json::from_str(
            r#"{"id": 3, "name": " Cable ", "description": " 2 pack ", "category": " 전자제품 "}"#,
        )
        .unwrap();
        assert_eq!(item.name, " Cable ");
        assert_eq!(item.description.as_deref(), Some(" 2 pack "));
        assert_eq!(item.category, " 전자제품 ");

        let blank: Item =
            serde_json::from_str(r#"{"id": 4, "name": "Cable", "description": "  ", "category": " "}"#).unwrap();
        assert_eq!(blank.description, None);
        assert_eq!(blank.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_deserialize_accepts_iso_timestamps() {
        let item: Item = serde_json::from_str(
            r#"{"id": 3, "name": "Cable", "created_at": "2024-03-01T09:00:00", "updated_at": "2024-03-01T10:00:00.5"}"#,
        )
        .unwrap();
        assert_eq!(item.created_at, ts(9, 0, 0));
        assert_eq!(item.updated_at, ts(10, 0, 0));
    }

    #[test]
    fn test_deserialize_rejects_negative_price() {
        let result: Result<Item, _> = serde_json::from_str(r#"{"id": 3, "name": "Cable", "price": -5.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_value() {
        let item = Item::from_fields(1, ItemFields::new("Mouse", 20_000.0, 50), ts(9, 0, 0)).unwrap();
        assert_eq!(item.value(), 1_000_000.0);
    }

    #[test]
    fn test_fields_from_item_round_trip() {
        let item = Item::from_fields(
            1,
            ItemFields::new("Mouse", 20_000.0, 50).with_description("usb"),
            ts(9, 0, 0),
        )
        .unwrap();
        let fields = ItemFields::from(&item);
        assert_eq!(fields.stock, 50);
        assert_eq!(fields.description.as_deref(), Some("usb"));
    }
}
