//! Place an order for a cart.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use makerset_commerce::checkout::{load_customer_info, Checkout, CustomerInfo};

use super::cart::{load_cart, print_lines};
use super::CheckoutArgs;
use crate::context::Context;
use crate::output::status_badge;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut cart = load_cart(&args.cart, ctx)?;
    if cart.is_empty() {
        bail!("The cart is empty");
    }

    let store = ctx.store()?;
    let customer: CustomerInfo = match &args.customer {
        Some(path) => ctx.read_json(path)?,
        None => load_customer_info(&store)
            .context("Failed to read saved customer details")?
            .context(
                "No customer details: pass --customer <file> or run `makerset customer save`",
            )?,
    };

    let policy = &ctx.config.shipping.policy;
    let shipping = cart.shipping_info(policy);
    let total = cart.total_price().saturating_add(&shipping.cost);

    if !ctx.output.is_json() {
        print_lines(&cart, ctx);
        ctx.output.text("");
        ctx.output.kv("Customer", &customer.full_name());
        ctx.output.kv("Email", &customer.customer_email);
        ctx.output.kv("Ship to", &customer.shipping_address);
        ctx.output.kv(
            "Shipping",
            &format!("{} ({})", shipping.cost.display(), shipping.description),
        );
        ctx.output.kv("Total", &total.display());
    }

    if !args.yes && !ctx.output.is_json() {
        ctx.output.text("");
        let confirmed = Confirm::new()
            .with_prompt("Place this order?")
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let api = ctx.api();
    let mut checkout = Checkout::new(&mut cart, &api, policy).with_saved_info(&store);

    let spinner = ctx.output.spinner("Checking stock...");
    let validation = checkout.validate_stock().await;
    spinner.finish_and_clear();
    validation?;
    ctx.output.success("All kits are in stock");

    let spinner = ctx.output.spinner("Placing order...");
    let placed = checkout.place_order(&customer, args.remember).await;
    spinner.finish_and_clear();
    let receipt = placed?;

    if ctx.output.is_json() {
        ctx.output.json(&receipt);
        return Ok(());
    }

    ctx.output
        .success(&format!("Order {} placed", receipt.reference()));
    ctx.output.kv("Status", &status_badge(receipt.status.as_str()));
    if args.remember {
        ctx.output.info("Customer details saved for next time");
    }
    Ok(())
}
