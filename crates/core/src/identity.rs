//! Composite storage keys for items
//!
//! Items are unique per collection, not globally, so the store key is the
//! composite `item_id|collection_id`. The separator is never permitted inside
//! either id (the attribute schema rejects it before a request gets here).
//!
//! ## Contract
//!
//! These rules are FROZEN: stored items must stay addressable across
//! restarts and redeploys.
//! - No randomness, no clock dependence
//! - Distinct `(item_id, collection_id)` pairs yield distinct keys

/// Separator between the item id and the collection id
pub const KEY_SEPARATOR: char = '|';

/// Derive the store key for an item
///
/// # Examples
///
/// ```
/// use geocatalog_core::identity::make_item_key;
///
/// assert_eq!(make_item_key("i1", "c1"), "i1|c1");
/// assert_ne!(make_item_key("dup", "c1"), make_item_key("dup", "c2"));
/// ```
pub fn make_item_key(item_id: &str, collection_id: &str) -> String {
    let mut key = String::with_capacity(item_id.len() + collection_id.len() + 1);
    key.push_str(item_id);
    key.push(KEY_SEPARATOR);
    key.push_str(collection_id);
    key
}

/// Split a key produced by [`make_item_key`] back into `(item_id, collection_id)`
///
/// Returns `None` if the key carries no separator.
pub fn split_item_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(KEY_SEPARATOR)
}
