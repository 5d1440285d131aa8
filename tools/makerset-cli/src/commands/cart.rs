//! Cart commands and the cart file format.

use anyhow::{bail, Result};
use makerset_commerce::cart::{CartStore, KitMetadata};
use makerset_commerce::checkout::{StockCheckRequest, StockValidationReport};
use makerset_commerce::SetId;
use serde::{Deserialize, Serialize};

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// One line of a cart file.
///
/// ```json
/// [{"set_id": 3, "quantity": 2, "unit_price": 24.5, "display_name": "Weather Station"}]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartFileEntry {
    pub set_id: SetId,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(flatten)]
    pub metadata: KitMetadata,
}

fn default_quantity() -> i64 {
    1
}

/// Build a cart from file entries.
///
/// Repeated set IDs add up; entries with a quantity of zero or less are
/// dropped.
pub fn build_cart(entries: Vec<CartFileEntry>, ctx: &Context) -> Result<CartStore> {
    let mut cart = CartStore::with_currency(ctx.config.shipping.currency()?);
    for entry in entries {
        if entry.quantity <= 0 {
            ctx.output
                .warn(&format!("Skipping set {}: quantity {}", entry.set_id, entry.quantity));
            continue;
        }
        let existing = cart.get(entry.set_id).map(|l| l.quantity).unwrap_or(0);
        cart.add_or_increment(entry.set_id, entry.unit_price, entry.metadata);
        cart.set_quantity(entry.set_id, existing.saturating_add(entry.quantity));
    }
    Ok(cart)
}

/// Load and build the cart from a JSON file.
pub fn load_cart(path: &str, ctx: &Context) -> Result<CartStore> {
    let entries: Vec<CartFileEntry> = ctx.read_json(path)?;
    build_cart(entries, ctx)
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CartCommand::Quote { file } => quote(&file, ctx),
        CartCommand::Check { file } => check(&file, ctx).await,
    }
}

fn quote(file: &str, ctx: &Context) -> Result<()> {
    let cart = load_cart(file, ctx)?;
    let shipping = cart.shipping_info(&ctx.config.shipping.policy);
    let subtotal = cart.total_price();
    let total = subtotal.saturating_add(&shipping.cost);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "lines": cart.lines(),
            "total_items": cart.total_items(),
            "subtotal": subtotal.to_decimal(),
            "shipping": {
                "description": shipping.description,
                "cost": shipping.cost.to_decimal(),
            },
            "total": total.to_decimal(),
            "currency": cart.currency().code(),
        }));
        return Ok(());
    }

    print_lines(&cart, ctx);
    ctx.output.text("");
    ctx.output.kv("Items", &cart.total_items().to_string());
    ctx.output.kv("Subtotal", &subtotal.display());
    ctx.output.kv(
        "Shipping",
        &format!("{} ({})", shipping.cost.display(), shipping.description),
    );
    ctx.output.kv("Total", &total.display());
    Ok(())
}

async fn check(file: &str, ctx: &Context) -> Result<()> {
    let cart = load_cart(file, ctx)?;
    if cart.is_empty() {
        bail!("The cart is empty");
    }

    let spinner = ctx.output.spinner("Checking stock...");
    let result = ctx
        .api()
        .validate_stock(&StockCheckRequest::from_cart(&cart))
        .await;
    spinner.finish_and_clear();
    let report: StockValidationReport = result?;

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    match report.blocking_message(&cart) {
        None => ctx.output.success("Every kit in the cart can be fulfilled"),
        Some(message) => {
            for line in message.lines() {
                ctx.output.warn(line);
            }
        }
    }
    Ok(())
}

/// Print the cart as a table.
pub fn print_lines(cart: &CartStore, ctx: &Context) {
    ctx.output.header("Cart");
    ctx.output
        .table_row(&["SET", "KIT", "QTY", "PRICE", "TOTAL"], &[6, 28, 4, 10, 10]);
    for line in cart.lines() {
        let set_id = line.set_id.to_string();
        let label = line.label();
        let quantity = line.quantity.to_string();
        let price = line.unit_price.display();
        let total = line.line_total().display();
        ctx.output.table_row(
            &[set_id.as_str(), label.as_str(), quantity.as_str(), price.as_str(), total.as_str()],
            &[6, 28, 4, 10, 10],
        );
    }
}
