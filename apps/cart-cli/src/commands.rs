//! # Cart Commands
//!
//! One subcommand per cart operation. Each command runs against an open
//! [`CartStore`] and writes its result to the given writer.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐   add    ┌──────────┐  checkout  ┌──────────┐            │
//! │  │  Empty   │────────►│ In Cart  │──────────►│  Order   │            │
//! │  │  Cart    │         │          │  order     │  Draft   │            │
//! │  └──────────┘         └──────────┘            └────┬─────┘            │
//! │       ▲                │  inc / dec / set-qty      │ --clear           │
//! │       │                │  remove                   │                   │
//! │       └──── clear ─────┴───────────────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use butterfly_cart::{CartConfig, CartStore, DurableSlot};
use butterfly_core::validation::{validate_line_item, validate_purchasable, validate_quantity};
use butterfly_core::{
    CartLineItem, CheckoutSummary, Money, OrderDraft, PaymentMethod, ProductId, ProductSummary,
    ShippingDetails, ValidationError, LINE_ITEM_FIELDS,
};
use chrono::NaiveDate;
use clap::Subcommand;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::CliResult;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a product to the cart (merges with an existing line)
    Add {
        /// Product id; numeric ids are stored as numbers
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// Unit price in dong
        #[arg(long)]
        price: i64,
        #[arg(long, default_value_t = 1)]
        qty: i64,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        size: Option<String>,
        /// Extra field stored with the line; VALUE is JSON or plain text
        #[arg(long = "extra", value_name = "KEY=VALUE")]
        extra: Vec<String>,
    },

    /// Add a product from a product API response saved as JSON
    ///
    /// Refused unless the product is SELLING and has enough stock.
    AddProduct {
        /// File holding one product object (`productId`, `productName`, ...)
        file: PathBuf,
        #[arg(long, default_value_t = 1)]
        qty: i64,
    },

    /// Remove a product from the cart
    Remove { id: String },

    /// Set the quantity of a line (1..=999)
    SetQty { id: String, qty: i64 },

    /// Increase a line's quantity by one
    Inc { id: String },

    /// Decrease a line's quantity by one (never below 1)
    Dec { id: String },

    /// Empty the cart
    Clear,

    /// Print the cart
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Print subtotal, shipping and total
    Checkout {
        #[arg(long)]
        json: bool,
    },

    /// Print the order request for the current cart
    Order {
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        phone: String,
        /// CASH, BANK_TRANSFER or CARD
        #[arg(long, default_value = "CASH")]
        payment: PaymentMethod,
        /// YYYY-MM-DD
        #[arg(long)]
        payment_date: Option<NaiveDate>,
        /// Empty the cart once the order has been produced
        #[arg(long)]
        clear: bool,
    },

    /// Print the effective configuration as JSON
    Config,
}

/// `show --json` payload: the lines and their totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CartView<'a> {
    items: &'a [CartLineItem],
    totals: CheckoutSummary,
}

/// Numeric ids become `ProductId::Number`, everything else stays text.
///
/// The product API hands out integer ids, so `--id 12` must match a line
/// that was added from a product page.
pub fn parse_product_id(raw: &str) -> ProductId {
    match raw.trim().parse::<i64>() {
        Ok(n) => ProductId::Number(n),
        Err(_) => ProductId::Text(raw.to_string()),
    }
}

/// Splits `KEY=VALUE`, reading VALUE as JSON when it parses and as a
/// string otherwise.
pub fn parse_extra(raw: &str) -> Result<(String, Value), ValidationError> {
    let (key, value) = raw.split_once('=').ok_or_else(|| ValidationError::InvalidFormat {
        field: "extra".to_string(),
        reason: "expected KEY=VALUE".to_string(),
    })?;

    let key = key.trim();
    if key.is_empty() || LINE_ITEM_FIELDS.contains(&key) {
        return Err(ValidationError::InvalidFormat {
            field: "extra".to_string(),
            reason: format!("'{}' is not a free field name", key),
        });
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Runs one command against the store.
pub fn execute<S: DurableSlot>(
    command: Command,
    store: &mut CartStore<S>,
    config: &CartConfig,
    out: &mut impl Write,
) -> CliResult<()> {
    debug!(?command, "executing command");

    match command {
        Command::Add {
            id,
            name,
            price,
            qty,
            image,
            color,
            size,
            extra,
        } => {
            let price = Money::from_minor(price);
            let mut item = CartLineItem::new(parse_product_id(&id), name, price, qty, image);
            item.color = color;
            item.size = size;
            for raw in &extra {
                let (key, value) = parse_extra(raw)?;
                item = item.with_extra(key, value);
            }
            validate_line_item(&item)?;

            let added = format!("Added {} x {}", item.quantity, item.name);
            store.add_to_cart(item);
            writeln!(out, "{}", added)?;
        }

        Command::AddProduct { file, qty } => {
            let product: ProductSummary = serde_json::from_slice(&fs::read(&file)?)?;
            validate_purchasable(&product, qty)?;
            let item = product.to_line_item(qty, &config.api_base_url);
            validate_line_item(&item)?;

            let added = format!("Added {} x {}", item.quantity, item.name);
            store.add_to_cart(item);
            writeln!(out, "{}", added)?;
        }

        Command::Remove { id } => {
            store.remove_from_cart(&parse_product_id(&id));
        }

        Command::SetQty { id, qty } => {
            validate_quantity(qty)?;
            store.update_quantity(&parse_product_id(&id), qty);
        }

        Command::Inc { id } => step_quantity(store, &parse_product_id(&id), 1),

        Command::Dec { id } => step_quantity(store, &parse_product_id(&id), -1),

        Command::Clear => {
            store.clear_cart();
            writeln!(out, "Cart cleared")?;
        }

        Command::Show { json } => {
            let totals = CheckoutSummary::new(store.cart(), config.shipping_fee);
            if json {
                let view = CartView {
                    items: store.select_items(),
                    totals,
                };
                writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            } else {
                render_cart(store.select_items(), &totals, config, out)?;
            }
        }

        Command::Checkout { json } => {
            let summary = CheckoutSummary::new(store.cart(), config.shipping_fee);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
            } else {
                render_summary(&summary, config, out)?;
            }
        }

        Command::Order {
            address,
            city,
            phone,
            payment,
            payment_date,
            clear,
        } => {
            let details = ShippingDetails {
                address,
                city,
                phone,
                payment_method: payment,
            };
            let mut draft = OrderDraft::from_cart(store.cart(), &details, config.shipping_fee)?;
            if let Some(date) = payment_date {
                draft = draft.with_payment_date(date);
            }

            writeln!(out, "{}", serde_json::to_string_pretty(&draft)?)?;
            info!(
                lines = draft.order_items.len(),
                amount = draft.order_amount.minor(),
                payment = %draft.payment_method,
                "order draft produced"
            );

            if clear {
                store.clear_cart();
            }
        }

        Command::Config => {
            let mut effective = config.clone();
            effective.data_dir = Some(config.resolve_data_dir());
            writeln!(out, "{}", serde_json::to_string_pretty(&effective)?)?;
        }
    }

    if !store.last_persist_ok() {
        writeln!(out, "warning: cart could not be saved, changes are kept for this run only")?;
    }

    Ok(())
}

/// The +/- buttons of the cart page: current quantity plus `delta`,
/// floored at 1 by the store.
fn step_quantity<S: DurableSlot>(store: &mut CartStore<S>, id: &ProductId, delta: i64) {
    let current = store
        .select_items()
        .iter()
        .find(|item| &item.id == id)
        .map(|item| item.quantity);

    if let Some(quantity) = current {
        store.update_quantity(id, quantity.saturating_add(delta));
    }
}

fn render_cart(
    items: &[CartLineItem],
    totals: &CheckoutSummary,
    config: &CartConfig,
    out: &mut impl Write,
) -> CliResult<()> {
    if items.is_empty() {
        writeln!(out, "Cart is empty")?;
        return Ok(());
    }

    for item in items {
        let mut details = Vec::new();
        if let Some(color) = &item.color {
            details.push(format!("color: {}", color));
        }
        if let Some(size) = &item.size {
            details.push(format!("size: {}", size));
        }
        let details = if details.is_empty() {
            String::new()
        } else {
            format!(" ({})", details.join(", "))
        };

        writeln!(
            out,
            "[{}] {}{} x{} @ {} = {}",
            item.id,
            item.name,
            details,
            item.quantity,
            config.format_currency(item.price),
            config.format_currency(item.line_total()),
        )?;
    }

    render_summary(totals, config, out)
}

fn render_summary(
    summary: &CheckoutSummary,
    config: &CartConfig,
    out: &mut impl Write,
) -> CliResult<()> {
    writeln!(out, "Items:    {}", summary.item_count)?;
    writeln!(out, "Subtotal: {}", config.format_currency(summary.subtotal))?;
    writeln!(out, "Shipping: {}", config.format_currency(summary.shipping))?;
    writeln!(out, "Total:    {}", config.format_currency(summary.total))?;
    Ok(())
}
