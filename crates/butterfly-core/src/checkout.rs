//! # Checkout
//!
//! Turns a cart into what the checkout page shows and what the order
//! endpoint receives.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart ──► CheckoutSummary::new(cart, shipping)                          │
//! │             subtotal = Σ price × qty                                    │
//! │             total    = subtotal + shipping                              │
//! │                                                                         │
//! │  Cart + ShippingDetails ──► OrderDraft::from_cart(..)                   │
//! │             ├── cart empty?              → CoreError::EmptyCart         │
//! │             ├── phone not 10-11 digits?  → ValidationError              │
//! │             ├── address blank/too long?  → ValidationError              │
//! │             ├── product id not numeric?  → CoreError::InvalidProductId  │
//! │             └── OK → JSON body for POST /api/v1/orders                  │
//! │                                                                         │
//! │  The cart is NOT cleared here; the host clears it once the backend     │
//! │  accepts the order.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{OrderStatus, PaymentMethod};
use crate::validation::{validate_shipping_address, validate_shipping_phone};

/// Totals displayed on the cart and checkout pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub item_count: i64,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl CheckoutSummary {
    pub fn new(cart: &Cart, shipping: Money) -> Self {
        let subtotal = cart.total();
        CheckoutSummary {
            item_count: cart.count(),
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

/// What the customer typed into the checkout form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub address: String,
    pub city: String,
    pub phone: String,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

impl ShippingDetails {
    /// The single-line address the order stores: `"{address}, {city}"`.
    pub fn combined_address(&self) -> String {
        format!("{}, {}", self.address.trim(), self.city.trim())
    }
}

/// One `orderItems[]` entry of the order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDraft {
    pub product_id: i64,
    pub item_quantity: i64,
    /// Price at time of purchase. Same as `unit_price`; the endpoint asks
    /// for both.
    pub item_price: Money,
    pub unit_price: Money,
}

/// Request body for placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub order_status: OrderStatus,
    /// Subtotal plus shipping.
    pub order_amount: Money,
    pub shipping_address: String,
    pub shipping_phone: String,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    pub order_items: Vec<OrderItemDraft>,
}

impl OrderDraft {
    /// Builds the order request for the current cart.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] when there is nothing to order
    /// - [`CoreError::Validation`] for a bad phone or address
    /// - [`CoreError::InvalidProductId`] when a line item id is not numeric
    pub fn from_cart(cart: &Cart, details: &ShippingDetails, shipping: Money) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        validate_shipping_phone(&details.phone)?;

        let shipping_address = details.combined_address();
        validate_shipping_address(&details.address, &shipping_address)?;

        let order_items = cart
            .items()
            .iter()
            .map(|item| {
                let product_id = item
                    .id
                    .as_integer()
                    .ok_or_else(|| CoreError::InvalidProductId(item.id.to_string()))?;
                Ok(OrderItemDraft {
                    product_id,
                    item_quantity: item.quantity,
                    item_price: item.price,
                    unit_price: item.price,
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        let summary = CheckoutSummary::new(cart, shipping);

        Ok(OrderDraft {
            order_status: OrderStatus::New,
            order_amount: summary.total,
            shipping_address,
            shipping_phone: details.phone.clone(),
            payment_method: details.payment_method,
            payment_date: None,
            order_items,
        })
    }

    /// Sets the payment date (bank transfers record when they were paid).
    pub fn with_payment_date(mut self, date: NaiveDate) -> Self {
        self.payment_date = Some(date);
        self
    }
}
