//! # Cart Store
//!
//! The authoritative cart of a session, written through to a durable slot.
//!
//! ## Ownership
//! There is no global cart. The host creates one `CartStore` at its root
//! and passes it by reference to whatever needs it; tests create as many
//! independent stores as they like.
//!
//! ## Write-Through
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Mutation Lifecycle                                   │
//! │                                                                         │
//! │  add_to_cart(item)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart::add (merge by id / append)          ← in-memory, cannot fail    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  persist(): encode whole cart → slot.save  ← may fail                  │
//! │       │                                                                 │
//! │       ├── Ok  → last_persist_ok = true                                  │
//! │       └── Err → tracing::warn!, last_persist_ok = false, carry on       │
//! │                                                                         │
//! │  Every mutation persists, including no-ops on unknown ids, so the      │
//! │  slot always mirrors memory after a call returns.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use butterfly_core::{Cart, CartLineItem, Money, ProductId};
use tracing::{debug, info, warn};

use crate::codec;
use crate::slot::DurableSlot;

/// A cart bound to a durable slot.
///
/// None of the methods return errors. A slot that cannot be read starts the
/// session with an empty cart; a slot that cannot be written leaves the
/// in-memory cart as the only copy for the rest of the session.
#[derive(Debug)]
pub struct CartStore<S: DurableSlot> {
    cart: Cart,
    slot: S,
    last_persist_ok: bool,
}

impl<S: DurableSlot> CartStore<S> {
    /// Creates a store over `slot` and hydrates it.
    pub fn open(slot: S) -> Self {
        let mut store = CartStore {
            cart: Cart::new(),
            slot,
            last_persist_ok: true,
        };
        store.hydrate();
        store
    }

    /// Replaces the in-memory cart with what the slot holds.
    ///
    /// ## Degradation
    /// - Slot absent → empty cart
    /// - Slot unreadable → empty cart, logged
    /// - Contents not a line item list → empty cart, logged
    ///
    /// Stored duplicates and quantities below 1 are normalized through
    /// [`Cart::from_items`]. Nothing is written back until the next mutation.
    pub fn hydrate(&mut self) {
        self.cart = match self.slot.load() {
            Ok(None) => {
                debug!(key = self.slot.key(), "cart slot empty, starting with empty cart");
                Cart::new()
            }
            Ok(Some(bytes)) => match codec::decode(&bytes) {
                Ok(items) => Cart::from_items(items),
                Err(e) => {
                    warn!(key = self.slot.key(), error = %e, "discarding unreadable stored cart");
                    Cart::new()
                }
            },
            Err(e) => {
                warn!(
                    key = self.slot.key(),
                    error = %e,
                    "cart slot unavailable, starting with empty cart"
                );
                Cart::new()
            }
        };

        info!(
            key = self.slot.key(),
            lines = self.cart.len(),
            units = self.cart.count(),
            "cart hydrated"
        );
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds an item, merging into an existing entry with the same id.
    ///
    /// On merge only the quantity changes; see [`Cart::add`].
    pub fn add_to_cart(&mut self, item: CartLineItem) {
        debug!(id = %item.id, quantity = item.quantity, "add to cart");
        self.cart.add(item);
        self.persist();
    }

    /// Removes the entry with `id`, if any.
    pub fn remove_from_cart(&mut self, id: &ProductId) {
        let removed = self.cart.remove(id);
        debug!(id = %id, removed, "remove from cart");
        self.persist();
    }

    /// Sets the quantity of the entry with `id` to `max(1, quantity)`.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        let found = self.cart.update_quantity(id, quantity);
        debug!(id = %id, quantity, found, "update quantity");
        self.persist();
    }

    /// Empties the cart. The store stays usable.
    pub fn clear_cart(&mut self) {
        debug!(lines = self.cart.len(), "clear cart");
        self.cart.clear();
        self.persist();
    }

    // -------------------------------------------------------------------------
    // Selectors
    // -------------------------------------------------------------------------

    pub fn select_items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    pub fn select_total(&self) -> Money {
        self.cart.total()
    }

    pub fn select_count(&self) -> i64 {
        self.cart.count()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Whether the most recent write reached the slot.
    ///
    /// Informational only: hosts may use it to show "your cart could not be
    /// saved", the store itself ignores it.
    pub fn last_persist_ok(&self) -> bool {
        self.last_persist_ok
    }

    fn persist(&mut self) {
        let result = codec::encode(self.cart.items())
            .map_err(|e| e.to_string())
            .and_then(|bytes| self.slot.save(&bytes).map_err(|e| e.to_string()));

        match result {
            Ok(()) => self.last_persist_ok = true,
            Err(error) => {
                warn!(
                    key = self.slot.key(),
                    %error,
                    "failed to persist cart, keeping it in memory"
                );
                self.last_persist_ok = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SlotError, SlotResult};
    use crate::slot::{FileSlot, MemorySlot};
    use serde_json::json;
    use std::cell::Cell;

    fn item(id: impl Into<ProductId>, price: i64, quantity: i64) -> CartLineItem {
        let id = id.into();
        CartLineItem::new(
            id.clone(),
            format!("Product {}", id),
            Money::from_minor(price),
            quantity,
            format!("{}.jpg", id),
        )
    }

    fn stored_items(slot: &MemorySlot) -> Vec<CartLineItem> {
        codec::decode(&slot.contents().unwrap()).unwrap()
    }

    /// Slot whose reads and/or writes fail on demand.
    struct FlakySlot {
        inner: MemorySlot,
        fail_load: bool,
        fail_save: Cell<bool>,
    }

    impl DurableSlot for FlakySlot {
        fn key(&self) -> &str {
            self.inner.key()
        }

        fn load(&self) -> SlotResult<Option<Vec<u8>>> {
            if self.fail_load {
                return Err(SlotError::Unavailable {
                    key: "cart".to_string(),
                    reason: "storage disabled".to_string(),
                });
            }
            self.inner.load()
        }

        fn save(&self, bytes: &[u8]) -> SlotResult<()> {
            if self.fail_save.get() {
                return Err(SlotError::Unavailable {
                    key: "cart".to_string(),
                    reason: "quota exceeded".to_string(),
                });
            }
            self.inner.save(bytes)
        }
    }

    #[test]
    fn test_open_absent_slot_is_empty() {
        let store = CartStore::open(MemorySlot::new());
        assert!(store.select_items().is_empty());
        assert!(store.select_total().is_zero());
        assert_eq!(store.select_count(), 0);
        // Hydration alone never writes.
        assert_eq!(store.slot().contents(), None);
    }

    #[test]
    fn test_hydrate_twice_is_idempotent() {
        let slot = MemorySlot::new();
        let mut writer = CartStore::open(slot.clone());
        writer.add_to_cart(item(1, 100, 2));
        writer.add_to_cart(item("b", 50, 1));

        let mut reader = CartStore::open(slot);
        let first = reader.select_items().to_vec();
        reader.hydrate();
        assert_eq!(reader.select_items(), first.as_slice());
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_add_merges_by_id_and_keeps_original_price() {
        let mut store = CartStore::open(MemorySlot::new());
        store.add_to_cart(item(1, 10, 1));
        store.add_to_cart(item(1, 999, 2));

        assert_eq!(store.select_items().len(), 1);
        assert_eq!(store.select_items()[0].quantity, 3);
        assert_eq!(store.select_items()[0].price.minor(), 10);
    }

    #[test]
    fn test_update_quantity_is_floored() {
        let mut store = CartStore::open(MemorySlot::new());
        store.add_to_cart(item(1, 10, 4));
        store.update_quantity(&ProductId::from(1), -5);

        assert_eq!(store.select_items()[0].quantity, 1);
        assert_eq!(stored_items(store.slot())[0].quantity, 1);
    }

    #[test]
    fn test_remove_unknown_id_leaves_items_unchanged() {
        let mut store = CartStore::open(MemorySlot::new());
        store.add_to_cart(item(1, 10, 1));
        let before = store.select_items().to_vec();

        store.remove_from_cart(&ProductId::from(999));
        assert_eq!(store.select_items(), before.as_slice());
        assert_eq!(stored_items(store.slot()), before);
    }

    #[test]
    fn test_total_and_count() {
        let mut store = CartStore::open(MemorySlot::new());
        store.add_to_cart(item(1, 100, 2));
        store.add_to_cart(item(2, 50, 3));

        assert_eq!(store.select_total().minor(), 350);
        assert_eq!(store.select_count(), 5);
    }

    #[test]
    fn test_clear_then_reuse() {
        let mut store = CartStore::open(MemorySlot::new());
        store.add_to_cart(item(1, 100, 2));
        store.clear_cart();

        assert!(store.select_items().is_empty());
        assert!(store.select_total().is_zero());
        assert_eq!(store.select_count(), 0);
        assert_eq!(store.slot().contents(), Some(b"[]".to_vec()));

        store.add_to_cart(item(2, 5, 1));
        assert_eq!(store.select_count(), 1);
        assert_eq!(stored_items(store.slot()).len(), 1);
    }

    #[test]
    fn test_persistence_round_trip() {
        let slot = MemorySlot::new();
        let mut store = CartStore::open(slot.clone());
        store.add_to_cart(item(1, 100, 2).with_color("rose"));
        store.add_to_cart(item("serum", 250_000, 1).with_size("30ml"));
        let before = store.select_items().to_vec();

        let reopened = CartStore::open(slot);
        assert_eq!(reopened.select_items(), before.as_slice());
    }

    #[test]
    fn test_extra_named_like_a_field_does_not_corrupt_slot() {
        let slot = MemorySlot::new();
        let mut store = CartStore::open(slot.clone());
        store.add_to_cart(item(1, 100, 1).with_extra("price", json!(5)));

        let reopened = CartStore::open(slot);
        assert_eq!(reopened.select_count(), 1);
        assert_eq!(reopened.select_total().minor(), 100);
    }

    #[test]
    fn test_corrupt_slot_hydrates_empty() {
        let cases: [&[u8]; 5] = [b"{not json", b"null", b"42", b"{\"items\":[]}", b"[{\"id\":1}]"];
        for raw in cases {
            let store = CartStore::open(MemorySlot::with_contents(raw));
            assert!(store.select_items().is_empty());
        }
    }

    #[test]
    fn test_corrupt_slot_is_overwritten_on_next_mutation() {
        let mut store = CartStore::open(MemorySlot::with_contents("garbage"));
        store.add_to_cart(item(1, 10, 1));
        assert_eq!(stored_items(store.slot()).len(), 1);
    }

    #[test]
    fn test_unreadable_slot_hydrates_empty_and_still_works() {
        let slot = FlakySlot {
            inner: MemorySlot::with_contents(codec::encode(&[item(1, 10, 1)]).unwrap()),
            fail_load: true,
            fail_save: Cell::new(false),
        };
        let mut store = CartStore::open(slot);
        assert!(store.select_items().is_empty());

        store.add_to_cart(item(2, 20, 1));
        assert!(store.last_persist_ok());
        assert_eq!(stored_items(&store.slot().inner).len(), 1);
    }

    #[test]
    fn test_failed_save_keeps_memory_authoritative() {
        let slot = FlakySlot {
            inner: MemorySlot::new(),
            fail_load: false,
            fail_save: Cell::new(true),
        };
        let mut store = CartStore::open(slot);

        store.add_to_cart(item(1, 100, 2));
        store.update_quantity(&ProductId::from(1), 5);

        assert!(!store.last_persist_ok());
        assert_eq!(store.select_count(), 5);
        assert_eq!(store.slot().inner.contents(), None);

        store.slot().fail_save.set(false);
        store.add_to_cart(item(2, 1, 1));
        assert!(store.last_persist_ok());
        assert_eq!(stored_items(&store.slot().inner).len(), 2);
    }

    #[test]
    fn test_pass_through_fields_survive_mutations() {
        let raw = json!([
            {
                "id": 7, "name": "Mask", "price": 85000, "quantity": 1, "image": "m.jpg",
                "promo": "TET"
            }
        ]);
        let slot = MemorySlot::with_contents(serde_json::to_vec(&raw).unwrap());
        let mut store = CartStore::open(slot.clone());

        store.update_quantity(&ProductId::from(7), 3);

        let stored: serde_json::Value = serde_json::from_slice(&slot.contents().unwrap()).unwrap();
        assert_eq!(stored[0]["promo"], json!("TET"));
        assert_eq!(stored[0]["quantity"], json!(3));
    }

    #[test]
    fn test_hydrate_normalizes_stored_duplicates_and_quantities() {
        let raw = json!([
            {"id": 1, "name": "A", "price": 10, "quantity": 2, "image": ""},
            {"id": 2, "name": "B", "price": 20, "quantity": 0, "image": ""},
            {"id": 1, "name": "A2", "price": 99, "quantity": 1, "image": ""}
        ]);
        let store = CartStore::open(MemorySlot::with_contents(serde_json::to_vec(&raw).unwrap()));

        assert_eq!(store.select_items().len(), 2);
        assert_eq!(store.select_items()[0].quantity, 3);
        assert_eq!(store.select_items()[0].name, "A");
        assert_eq!(store.select_items()[1].quantity, 1);
    }

    #[test]
    fn test_last_writer_wins_across_stores() {
        let slot = MemorySlot::new();
        let mut tab_a = CartStore::open(slot.clone());
        let mut tab_b = CartStore::open(slot.clone());

        tab_a.add_to_cart(item(1, 10, 1));
        tab_b.add_to_cart(item(2, 20, 1));

        let reloaded = CartStore::open(slot);
        assert_eq!(reloaded.select_items().len(), 1);
        assert_eq!(reloaded.select_items()[0].id, ProductId::from(2));
    }

    #[test]
    fn test_file_backed_store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = CartStore::open(FileSlot::in_dir(dir.path(), "cart"));
        store.add_to_cart(item("a", 120_000, 1));
        store.add_to_cart(item("b", 250_000, 2));
        drop(store);

        let store = CartStore::open(FileSlot::in_dir(dir.path(), "cart"));
        assert_eq!(store.select_count(), 3);
        assert_eq!(store.select_total().minor(), 620_000);
    }

    #[test]
    fn test_storefront_scenario() {
        let mut store = CartStore::open(MemorySlot::new());
        store.add_to_cart(CartLineItem::new("a", "Toner", Money::from_minor(120_000), 1, "x.jpg"));
        store.add_to_cart(CartLineItem::new("b", "Serum", Money::from_minor(250_000), 2, "y.jpg"));
        assert_eq!(store.select_count(), 3);
        assert_eq!(store.select_total().minor(), 620_000);

        store.update_quantity(&ProductId::from("a"), 0);
        assert_eq!(store.select_items()[0].quantity, 1);
        assert_eq!(store.select_total().minor(), 620_000);

        store.remove_from_cart(&ProductId::from("b"));
        let expected = vec![CartLineItem::new(
            "a",
            "Toner",
            Money::from_minor(120_000),
            1,
            "x.jpg",
        )];
        assert_eq!(store.select_items(), expected.as_slice());
        assert_eq!(store.select_total().minor(), 120_000);
        assert_eq!(stored_items(store.slot()), expected);
    }
}
