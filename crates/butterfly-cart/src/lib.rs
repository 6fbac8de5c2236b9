//! # butterfly-cart: Persisted Cart Store
//!
//! Keeps the storefront cart alive across sessions by writing it through to
//! a durable slot after every change.
//!
//! ## Module Organization
//! ```text
//! butterfly_cart/
//! ├── lib.rs      ◄─── You are here (exports)
//! ├── store.rs    ◄─── CartStore: hydrate, mutations, selectors
//! ├── slot.rs     ◄─── DurableSlot trait, MemorySlot, FileSlot
//! ├── codec.rs    ◄─── JSON slot format
//! ├── config.rs   ◄─── CartConfig (env + defaults)
//! └── error.rs    ◄─── SlotError, CodecError
//! ```
//!
//! ## Usage
//! ```rust
//! use butterfly_cart::{CartStore, MemorySlot};
//! use butterfly_core::{CartLineItem, Money, ProductId};
//!
//! let slot = MemorySlot::new();
//! let mut store = CartStore::open(slot.clone());
//! store.add_to_cart(CartLineItem::new(1, "Toner", Money::from_minor(120_000), 1, "x.jpg"));
//! store.update_quantity(&ProductId::from(1), 0); // floored to 1
//!
//! // A second store over the same slot sees the persisted cart.
//! let reopened = CartStore::open(slot);
//! assert_eq!(reopened.select_count(), 1);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod slot;
pub mod store;

pub use config::CartConfig;
pub use error::{CodecError, SlotError, SlotResult};
pub use slot::{DurableSlot, FileSlot, MemorySlot, DEFAULT_CART_KEY};
pub use store::CartStore;
