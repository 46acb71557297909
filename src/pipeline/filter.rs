//! Ingestion filter.
//!
//! Selects the freshly read items whose identifier has not been recorded by
//! an earlier run. Pure: no network or disk access.

use crate::models::{Item, SeenSet};

/// Items not present in `seen`, in their original order.
///
/// Duplicate identifiers within `items` are each checked against `seen`
/// only, so both copies pass when the identifier is new.
pub fn filter_new(items: Vec<Item>, seen: &SeenSet) -> Vec<Item> {
    items
        .into_iter()
        .filter(|item| !seen.contains(&item.identifier))
        .collect()
}

/// Identifiers of a batch, in batch order.
pub fn identifiers(items: &[Item]) -> Vec<String> {
    items.iter().map(|item| item.identifier.clone()).collect()
}
