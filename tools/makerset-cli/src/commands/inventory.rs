//! Part inventory admin commands.

use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate};
use makerset_commerce::catalog::{AdjustmentType, InventoryAdjustment, InventoryIncome};
use makerset_commerce::PartId;

use super::{InventoryArgs, InventoryCommand};
use crate::context::Context;

/// Run the inventory command.
pub async fn run(args: InventoryArgs, ctx: &Context) -> Result<()> {
    match args.command {
        InventoryCommand::Adjust {
            part_id,
            adjustment_type,
            quantity,
            notes,
        } => {
            let adjustment_type = AdjustmentType::parse(&adjustment_type).with_context(|| {
                format!("Unknown adjustment type {adjustment_type:?}; use add, remove or set")
            })?;
            let mut adjustment = InventoryAdjustment::new(adjustment_type, quantity);
            if let Some(notes) = notes {
                adjustment = adjustment.with_notes(notes);
            }
            adjust(PartId::new(part_id), &adjustment, ctx).await
        }
        InventoryCommand::Income {
            part_id,
            quantity,
            supplier,
            cost_per_unit,
            purchase_date,
            notes,
        } => {
            let purchase_date = match purchase_date {
                Some(date) => parse_date(&date)?,
                None => Local::now().date_naive(),
            };
            let income = InventoryIncome {
                quantity,
                supplier,
                cost_per_unit,
                purchase_date,
                notes,
            };
            record_income(PartId::new(part_id), &income, ctx).await
        }
    }
}

async fn adjust(part_id: PartId, adjustment: &InventoryAdjustment, ctx: &Context) -> Result<()> {
    let spinner = ctx.output.spinner("Adjusting stock...");
    let result = ctx.api().adjust_part_stock(part_id, adjustment).await;
    spinner.finish_and_clear();
    let data = result?;

    if ctx.output.is_json() {
        ctx.output.json(&data);
        return Ok(());
    }
    ctx.output.success(&format!(
        "Part {}: {} {}",
        part_id,
        adjustment.adjustment_type.as_str(),
        adjustment.quantity
    ));
    Ok(())
}

async fn record_income(part_id: PartId, income: &InventoryIncome, ctx: &Context) -> Result<()> {
    let currency = ctx.config.shipping.currency()?;

    let spinner = ctx.output.spinner("Recording delivery...");
    let result = ctx.api().record_part_income(part_id, income).await;
    spinner.finish_and_clear();
    let data = result?;

    if ctx.output.is_json() {
        ctx.output.json(&data);
        return Ok(());
    }
    ctx.output.success(&format!(
        "Part {}: received {} from {}",
        part_id, income.quantity, income.supplier
    ));
    ctx.output
        .kv("Total cost", &income.total_cost(currency).display());
    ctx.output.kv("Purchased", &income.purchase_date.to_string());
    Ok(())
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid purchase date {value:?}; expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
        assert!(parse_date("28/02/2026").is_err());
    }
}
