//! # butterfly-core: Pure Cart Logic for the Ocean & Butterfly Storefront
//!
//! This crate is the **heart** of the storefront cart. It contains the cart
//! state, its merge and clamp rules, and checkout math as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Ocean & Butterfly Cart                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              UI host (storefront / cart-cli)                    │   │
//! │  │   Product page ──► Cart page ──► Checkout form                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          butterfly-cart (CartStore + DurableSlot)               │   │
//! │  │          write-through persistence of every mutation            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ butterfly-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ checkout  │  │   │
//! │  │   │ LineItem  │  │   Money   │  │   Cart    │  │ OrderDraft│  │   │
//! │  │   │ ProductId │  │           │  │ selectors │  │  Summary  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Boundary types (ProductId, CartLineItem, PaymentMethod, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart state, its four mutations and its selectors
//! - [`checkout`] - Checkout summary and order-placement payload
//! - [`error`] - Domain error types
//! - [`validation`] - Validation used at the API/UI boundary
//!
//! ## Example Usage
//!
//! ```rust
//! use butterfly_core::{Cart, CartLineItem, Money};
//!
//! let mut cart = Cart::new();
//! cart.add(CartLineItem::new("a", "Toner", Money::from_minor(120_000), 1, "x.jpg"));
//! cart.add(CartLineItem::new("b", "Serum", Money::from_minor(250_000), 2, "y.jpg"));
//!
//! assert_eq!(cart.count(), 3);
//! assert_eq!(cart.total().minor(), 620_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use checkout::{CheckoutSummary, OrderDraft, OrderItemDraft, ShippingDetails};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum quantity a line item can hold once it is in the cart.
///
/// Quantity updates below this are floored, never treated as removal.
pub const MIN_ITEM_QUANTITY: i64 = 1;

/// Maximum quantity the UI boundary accepts for a single line.
///
/// The store itself does not enforce this; see [`validation::validate_quantity`].
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Flat shipping fee charged by the storefront, in dong.
pub const DEFAULT_SHIPPING_FEE: Money = Money::from_minor(30_000);
