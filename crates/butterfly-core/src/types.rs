//! # Domain Types
//!
//! Types shared between the cart, the checkout flow and the UI host.
//!
//! ## Where the Data Comes From
//! ```text
//! Product API (ProductSummary) ──to_line_item()──► CartLineItem ──► Cart
//!                                                                    │
//!          Checkout form (PaymentMethod) ──────────────► OrderDraft ◄┘
//! ```
//!
//! Line items are the only records that are persisted, so their field names
//! (`id`, `name`, `price`, `quantity`, `image`) are part of the slot format
//! and must not be renamed.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Identifier
// =============================================================================

/// Identifier of a product, as the storefront hands it to the cart.
///
/// The product API uses integers, but older carts (and tests) carry string
/// ids, so both are accepted. Comparison is strict: `1` and `"1"` are two
/// different products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl ProductId {
    /// Returns the id as an integer, parsing numeric strings.
    ///
    /// The order endpoint only accepts integer product ids.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ProductId::Number(n) => Some(*n),
            ProductId::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId::Number(id)
    }
}

impl From<i32> for ProductId {
    fn from(id: i32) -> Self {
        ProductId::Number(i64::from(id))
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::Text(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId::Text(id)
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// JSON names of the fields [`CartLineItem`] owns.
pub const LINE_ITEM_FIELDS: [&str; 7] =
    ["id", "name", "price", "quantity", "image", "color", "size"];

/// One row of the cart: a product and how many of it were selected.
///
/// ## Identity
/// Only `id` identifies an entry. `color` and `size` are descriptive and do
/// not split a product into separate rows.
///
/// ## Pass-through Fields
/// Any JSON field not listed here is kept in `extra` and written back
/// unchanged, so hosts can attach their own data without the cart losing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,

    #[serde(default)]
    pub name: String,

    /// Unit price. Older carts may hold it as a JSON float; see
    /// [`deserialize_lenient_money`].
    #[serde(deserialize_with = "deserialize_lenient_money")]
    pub price: Money,

    pub quantity: i64,

    #[serde(default)]
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CartLineItem {
    /// Creates a line item with no descriptive or pass-through fields.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        image: impl Into<String>,
    ) -> Self {
        CartLineItem {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            image: image.into(),
            color: None,
            size: None,
            extra: Map::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Attaches an arbitrary pass-through field.
    ///
    /// Keys that name a known field (see [`LINE_ITEM_FIELDS`]) are ignored:
    /// `extra` is flattened, so they would be written twice and the stored
    /// cart would no longer decode.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if !LINE_ITEM_FIELDS.contains(&key.as_str()) {
            self.extra.insert(key, value);
        }
        self
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price.saturating_mul_qty(self.quantity)
    }
}

/// Accepts a price written as a JSON integer or as a finite float.
///
/// The product API returns decimals (`120000.00`) and the storefront used to
/// copy them straight into the cart, so a float must not make the whole
/// stored cart unreadable. Floats are rounded to the nearest minor unit.
pub fn deserialize_lenient_money<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    struct MoneyVisitor;

    impl<'de> Visitor<'de> for MoneyVisitor {
        type Value = Money;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a price as an integer or a finite number")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
            Ok(Money::from_minor(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
            i64::try_from(v)
                .map(Money::from_minor)
                .map_err(|_| E::custom("price out of range"))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
            let rounded = v.round();
            if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded <= i64::MAX as f64 {
                Ok(Money::from_minor(rounded as i64))
            } else {
                Err(E::custom("price out of range"))
            }
        }
    }

    deserializer.deserialize_any(MoneyVisitor)
}

// =============================================================================
// Product (API view)
// =============================================================================

/// A product image as returned by the product API.
///
/// Older endpoints spell the field `imageURL`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    #[serde(alias = "imageURL")]
    pub image_url: String,
}

/// Sales state of a product in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    NotSold,
    Selling,
    OutOfStock,
    Discontinued,
}

/// The subset of a product API response the cart needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub product_id: i64,
    pub product_name: String,

    #[serde(deserialize_with = "deserialize_lenient_money")]
    pub product_price: Money,

    /// Units left in the warehouse. `None` when the response omits it.
    #[serde(default)]
    pub quantity_stock: Option<i64>,

    /// `None` when the response omits it; such a product cannot be bought.
    #[serde(default)]
    pub product_status: Option<ProductStatus>,

    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl ProductSummary {
    /// Builds the line item the product page adds to the cart.
    ///
    /// ## Image Selection
    /// - First image, prefixed with `api_base_url` unless already absolute
    /// - No images: `{api_base_url}/uploads/placeholder.jpg`
    pub fn to_line_item(&self, quantity: i64, api_base_url: &str) -> CartLineItem {
        let base = api_base_url.trim_end_matches('/');
        let image = match self.images.first() {
            Some(img) if img.image_url.starts_with("http") => img.image_url.clone(),
            Some(img) => format!("{}{}", base, img.image_url),
            None => format!("{}/uploads/placeholder.jpg", base),
        };

        CartLineItem::new(
            self.product_id,
            self.product_name.clone(),
            self.product_price,
            quantity,
            image,
        )
    }
}

// =============================================================================
// Checkout Enums
// =============================================================================

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Cash on delivery (the checkout form's default)
    #[default]
    Cash,
    BankTransfer,
    Card,
}

impl PaymentMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::Card => "CARD",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CASH" => Ok(PaymentMethod::Cash),
            "BANK_TRANSFER" => Ok(PaymentMethod::BankTransfer),
            "CARD" => Ok(PaymentMethod::Card),
            _ => Err(ValidationError::NotAllowed {
                field: "paymentMethod".to_string(),
                allowed: vec![
                    "CASH".to_string(),
                    "BANK_TRANSFER".to_string(),
                    "CARD".to_string(),
                ],
            }),
        }
    }
}

/// Lifecycle of an order on the backend.
///
/// The cart only ever creates `New` orders; the other states are owned by
/// the backend and listed so order payloads round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    New,
    Processing,
    Delivered,
    Cancelled,
}

// =============================================================================
// Unit Tests
// =============================================================================
