//! # Validation Module
//!
//! Input validation for data entering the cart from the outside world.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI host / API client                                          │
//! │  ├── THIS MODULE: quantity typed by the user, product fields, stock,   │
//! │  │   checkout form (phone, address)                                     │
//! │  └── Rejects bad input before it reaches the cart                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart (butterfly-core::cart)                                   │
//! │  ├── Never rejects: unknown ids are no-ops                             │
//! │  └── Only floors quantities at 1                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend order endpoint (external)                             │
//! │  └── Re-validates the order payload                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use butterfly_core::validation::{validate_quantity, validate_shipping_phone};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_shipping_phone("0912345678").is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CartLineItem, ProductStatus, ProductSummary};
use crate::{MAX_ITEM_QUANTITY, MIN_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest shipping address the order endpoint stores.
pub const MAX_SHIPPING_ADDRESS_LEN: usize = 200;

/// Longest product name accepted at the boundary.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

// =============================================================================
// Line Item Validators
// =============================================================================

/// Validates a quantity typed by the user.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// The cart would floor a 0 to 1 anyway; this exists so the UI can tell
/// the user instead.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(MIN_ITEM_QUANTITY..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: MIN_ITEM_QUANTITY,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (free samples are allowed)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a product display name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a line item before the API client hands it to the cart.
///
/// Checks name, price and quantity. `image` and pass-through fields are
/// opaque and never checked.
pub fn validate_line_item(item: &CartLineItem) -> ValidationResult<()> {
    validate_product_name(&item.name)?;
    validate_price(item.price)?;
    validate_quantity(item.quantity)?;
    Ok(())
}

/// Validates that `quantity` units of a product page's product can be added.
///
/// ## Rules
/// - Quantity within 1..=999
/// - Product status must be `SELLING` (a missing status is not selling)
/// - Quantity must not exceed `quantityStock` when the API reports it
pub fn validate_purchasable(product: &ProductSummary, quantity: i64) -> ValidationResult<()> {
    validate_quantity(quantity)?;

    if product.product_status != Some(ProductStatus::Selling) {
        return Err(ValidationError::NotAllowed {
            field: "productStatus".to_string(),
            allowed: vec!["SELLING".to_string()],
        });
    }

    if let Some(stock) = product.quantity_stock {
        if quantity > stock {
            return Err(ValidationError::InsufficientStock {
                product: product.product_name.clone(),
                available: stock.max(0),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Checkout Validators
// =============================================================================

/// Validates the receiver phone number on the checkout form.
///
/// ## Rules
/// - 10 or 11 characters
/// - ASCII digits only (no spaces, no `+84`)
pub fn validate_shipping_phone(phone: &str) -> ValidationResult<()> {
    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "shippingPhone".to_string(),
        });
    }

    let digits_only = phone.bytes().all(|b| b.is_ascii_digit());
    if !digits_only || !(10..=11).contains(&phone.len()) {
        return Err(ValidationError::InvalidFormat {
            field: "shippingPhone".to_string(),
            reason: "must be 10 or 11 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates the combined `"{address}, {city}"` shipping address.
///
/// ## Rules
/// - Street part must not be blank
/// - Whole address at most 200 characters
pub fn validate_shipping_address(address: &str, combined: &str) -> ValidationResult<()> {
    if address.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "shippingAddress".to_string(),
        });
    }

    if combined.chars().count() > MAX_SHIPPING_ADDRESS_LEN {
        return Err(ValidationError::TooLong {
            field: "shippingAddress".to_string(),
            max: MAX_SHIPPING_ADDRESS_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-5).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_minor(0)).is_ok());
        assert!(validate_price(Money::from_minor(120_000)).is_ok());
        assert!(validate_price(Money::from_minor(-1)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Hydrating Toner").is_ok());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_line_item() {
        let good = CartLineItem::new(1, "Toner", Money::from_minor(120_000), 1, "x.jpg");
        assert!(validate_line_item(&good).is_ok());

        let zero_qty = CartLineItem::new(1, "Toner", Money::from_minor(120_000), 0, "x.jpg");
        assert!(matches!(
            validate_line_item(&zero_qty),
            Err(ValidationError::OutOfRange { .. })
        ));

        let unnamed = CartLineItem::new(1, "", Money::from_minor(1), 1, "");
        assert!(matches!(
            validate_line_item(&unnamed),
            Err(ValidationError::Required { .. })
        ));
    }

    fn product(status: Option<ProductStatus>, stock: Option<i64>) -> ProductSummary {
        ProductSummary {
            product_id: 12,
            product_name: "Sunscreen".to_string(),
            product_price: Money::from_minor(180_000),
            quantity_stock: stock,
            product_status: status,
            images: vec![],
        }
    }

    #[test]
    fn test_validate_purchasable() {
        let selling = product(Some(ProductStatus::Selling), Some(5));
        assert!(validate_purchasable(&selling, 1).is_ok());
        assert!(validate_purchasable(&selling, 5).is_ok());
        assert!(validate_purchasable(&selling, 0).is_err());

        let unknown_stock = product(Some(ProductStatus::Selling), None);
        assert!(validate_purchasable(&unknown_stock, 20).is_ok());
    }

    #[test]
    fn test_validate_purchasable_rejects_out_of_stock() {
        let sold_out = product(Some(ProductStatus::Selling), Some(0));
        assert!(matches!(
            validate_purchasable(&sold_out, 1),
            Err(ValidationError::InsufficientStock { available: 0, .. })
        ));
    }

    #[test]
    fn test_validate_purchasable_rejects_over_stock() {
        let few_left = product(Some(ProductStatus::Selling), Some(3));
        assert!(matches!(
            validate_purchasable(&few_left, 4),
            Err(ValidationError::InsufficientStock { available: 3, .. })
        ));
    }

    #[test]
    fn test_validate_purchasable_rejects_not_selling() {
        for status in [
            Some(ProductStatus::NotSold),
            Some(ProductStatus::OutOfStock),
            Some(ProductStatus::Discontinued),
            None,
        ] {
            assert!(matches!(
                validate_purchasable(&product(status, Some(10)), 1),
                Err(ValidationError::NotAllowed { .. })
            ));
        }
    }

    #[test]
    fn test_validate_shipping_phone() {
        assert!(validate_shipping_phone("0912345678").is_ok());
        assert!(validate_shipping_phone("09123456789").is_ok());
        assert!(validate_shipping_phone("").is_err());
        assert!(validate_shipping_phone("091234567").is_err());
        assert!(validate_shipping_phone("091234567890").is_err());
        assert!(validate_shipping_phone("+84912345678").is_err());
        assert!(validate_shipping_phone("0912 345 678").is_err());
    }

    #[test]
    fn test_validate_shipping_address() {
        assert!(validate_shipping_address("12 Le Loi", "12 Le Loi, Hue").is_ok());
        assert!(validate_shipping_address("  ", " , Hue").is_err());

        let long = "x".repeat(195);
        let combined = format!("{}, Ho Chi Minh City", long);
        assert!(matches!(
            validate_shipping_address(&long, &combined),
            Err(ValidationError::TooLong { .. })
        ));
    }
}
