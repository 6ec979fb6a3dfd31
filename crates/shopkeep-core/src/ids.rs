//! # ID Assignment
//!
//! Items carry small positive integers as IDs. A new ID is always one past
//! the largest ID currently in the collection, so an ID freed by a delete is
//! never handed out again while a larger one is still present.

use crate::types::Item;

/// Returns the ID the next created item should receive.
///
/// `1` for an empty collection, otherwise `max(id) + 1`.
///
/// ## Example
/// ```rust
/// use shopkeep_core::next_id;
///
/// assert_eq!(next_id(&[]), 1);
/// ```
pub fn next_id(items: &[Item]) -> u64 {
    items.iter().map(|item| item.id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemFields, Timestamp};

    fn item(id: u64) -> Item {
        Item::from_fields(id, ItemFields::new("x", 0.0, 0), Timestamp::epoch()).unwrap()
    }

    #[test]
    fn test_next_id_empty() {
        assert_eq!(next_id(&[]), 1);
    }

    #[test]
    fn test_next_id_is_max_plus_one() {
        let items = vec![item(3), item(7), item(5)];
        assert_eq!(next_id(&items), 8);
    }

    #[test]
    fn test_next_id_exceeds_every_id() {
        let items = vec![item(1), item(2), item(10), item(4)];
        let next = next_id(&items);
        assert!(items.iter().all(|i| next > i.id));
    }

    #[test]
    fn test_next_id_skips_gaps_left_by_deletes() {
        // 2..=4 were deleted; the gap is never refilled.
        let items = vec![item(1), item(5)];
        assert_eq!(next_id(&items), 6);
    }
}
