//! # Cart State
//!
//! The in-memory shopping cart: an ordered list of line items, unique by
//! product id, plus the selectors the UI renders from.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action               Cart Method              State Change          │
//! │  ─────────               ───────────              ────────────          │
//! │                                                                         │
//! │  Add to cart ──────────► add(item) ─────────────► merge by id / push    │
//! │                                                                         │
//! │  +/- buttons ──────────► update_quantity(id, q) ► qty = max(1, q)      │
//! │                                                                         │
//! │  Remove ───────────────► remove(id) ────────────► retain(id != ..)     │
//! │                                                                         │
//! │  Order placed ─────────► clear() ───────────────► items.clear()        │
//! │                                                                         │
//! │  Render ───────────────► items() / total() / count()  (read only)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these operations can fail. Ids that are not in the cart make
//! `remove` and `update_quantity` no-ops, and nothing is validated here;
//! see [`crate::validation`] for the boundary checks.

use serde::{Deserialize, Deserializer, Serialize};

use crate::money::Money;
use crate::types::{CartLineItem, ProductId};
use crate::MIN_ITEM_QUANTITY;

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same product increases quantity)
/// - Every quantity is at least 1 (updates below 1 are floored, not removed)
/// - Items keep first-insertion order, which is also display order
///
/// Serializes as a bare JSON array of line items. Deserializing goes
/// through [`Cart::from_items`], so the invariants hold for any input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from items that came from outside, e.g. a stored slot.
    ///
    /// Replays every item through [`Cart::add`] after flooring its quantity,
    /// so duplicate ids collapse into one entry (first occurrence wins for
    /// every field but quantity) and no entry is left below 1.
    pub fn from_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Cart::new();
        for mut item in items {
            item.quantity = item.quantity.max(MIN_ITEM_QUANTITY);
            cart.add(item);
        }
        cart
    }

    /// Adds an item, or merges it into the entry with the same id.
    ///
    /// ## Behavior
    /// - Same id already in cart: only its quantity grows by `item.quantity`;
    ///   the existing name, price, image and extras are kept
    /// - Otherwise: the item is appended at the end
    pub fn add(&mut self, item: CartLineItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            return;
        }

        self.items.push(item);
    }

    /// Removes the entry with this id. Returns whether anything was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() != initial_len
    }

    /// Sets the quantity of an entry, floored at 1.
    ///
    /// Returns whether an entry with this id exists.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.quantity = quantity.max(MIN_ITEM_QUANTITY);
                true
            }
            None => false,
        }
    }

    /// Removes every item. The cart stays usable.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    // -------------------------------------------------------------------------
    // Selectors
    // -------------------------------------------------------------------------

    /// Line items in display order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Σ price × quantity. Zero for an empty cart; never rounded.
    pub fn total(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// Σ quantity: total units, not distinct products.
    pub fn count(&self) -> i64 {
        self.items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartLineItem>::deserialize(deserializer).map(Cart::from_items)
    }
}
