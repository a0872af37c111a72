//! List rules for the cart contents.
//!
//! Every function takes the current items and mutates them in place:
//! - ids stay unique (lookup is a linear scan by id)
//! - quantities never drop below 1; an item at 1 that is decremented is removed
//! - new items go to the front, existing items never move

use tracing::warn;

use crate::dto::{LineItem, NewLineItem};

fn position(items: &[LineItem], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id == id)
}

/// Adds one unit to `item`, leaving it untouched at `u32::MAX`.
/// Returns whether the quantity changed.
fn bump(item: &mut LineItem) -> bool {
    match item.quantity.checked_add(1) {
        Some(quantity) => {
            item.quantity = quantity;
            true
        }
        None => {
            warn!(
                id = %item.id,
                quantity = item.quantity,
                "quantity at maximum, not incremented"
            );
            false
        }
    }
}

/// Adds one unit of `product`.
///
/// An unknown id is prepended with quantity 1. A known id has its quantity
/// bumped in place; the stored title, image and price are kept and the ones
/// on `product` are discarded. Returns whether the items changed.
pub fn add_item(items: &mut Vec<LineItem>, product: NewLineItem) -> bool {
    match position(items, &product.id) {
        Some(index) => bump(&mut items[index]),
        None => {
            items.insert(0, product.into_line_item());
            true
        }
    }
}

/// Bumps the quantity of `id`. Returns `false` if the id is not in the cart
/// or its quantity is already at the maximum.
pub fn increment_item(items: &mut [LineItem], id: &str) -> bool {
    match position(items, id) {
        Some(index) => bump(&mut items[index]),
        None => false,
    }
}

/// Drops one unit of `id`, removing the item when it was the last one.
/// Returns `false` if the id is not in the cart.
pub fn decrement_item(items: &mut Vec<LineItem>, id: &str) -> bool {
    let Some(index) = position(items, id) else {
        return false;
    };
    if items[index].quantity > 1 {
        items[index].quantity -= 1;
    } else {
        items.remove(index);
    }
    true
}

/// Total number of units across all items.
pub fn item_count(items: &[LineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}
