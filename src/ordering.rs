//! Dense display-order bookkeeping for drag-and-drop reordering.

use std::collections::HashSet;

use uuid::Uuid;

/// Anything that carries a display `order` and a stable id.
pub trait DisplayOrdered {
    fn key(&self) -> Uuid;
    fn order(&self) -> u32;
    fn set_order(&mut self, order: u32);
}

/// Moves one item to `new_order` (1-based, clamped to the sequence length),
/// shifting the items between the old and new position by one so orders stay
/// dense and unique. Returns false when `id` is not in `items`.
///
/// Assumes `items` already carries dense unique orders 1..=len.
pub fn move_to_order<T: DisplayOrdered>(items: &mut [T], id: Uuid, new_order: u32) -> bool {
    let Some(position) = items.iter().position(|item| item.key() == id) else {
        return false;
    };
    let old_order = items[position].order();
    let new_order = new_order.clamp(1, items.len() as u32);
    if new_order != old_order {
        for (i, item) in items.iter_mut().enumerate() {
            if i == position {
                continue;
            }
            let order = item.order();
            if new_order < old_order && (new_order..old_order).contains(&order) {
                item.set_order(order + 1);
            } else if new_order > old_order && (old_order + 1..=new_order).contains(&order) {
                item.set_order(order - 1);
            }
        }
        items[position].set_order(new_order);
    }
    items.sort_by_key(|item| item.order());
    true
}

/// Repairs a sequence whose orders may collide after concurrent edits: items
/// are placed in input order, a colliding order takes the next unused integer
/// scanning upward, duplicate ids are dropped (first occurrence wins). The
/// result is sorted by order, which is then unique across the sequence.
///
/// Incoming orders are clamped to the sequence length, same as
/// [`move_to_order`], so the upward scan stays within `2 * len` and cannot
/// overflow on client-supplied orders near `u32::MAX`.
pub fn resolve_collisions<T: DisplayOrdered>(items: Vec<T>) -> Vec<T> {
    let cap = (items.len() as u32).max(1);
    let mut seen_ids = HashSet::new();
    let mut used_orders = HashSet::new();
    let mut resolved = Vec::with_capacity(items.len());

    for mut item in items {
        if !seen_ids.insert(item.key()) {
            continue;
        }
        let mut order = item.order().clamp(1, cap);
        while !used_orders.insert(order) {
            order += 1;
        }
        item.set_order(order);
        resolved.push(item);
    }

    resolved.sort_by_key(|item| item.order());
    resolved
}
