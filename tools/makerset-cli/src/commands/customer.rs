//! Saved customer details.

use anyhow::Result;
use makerset_commerce::checkout::{
    clear_customer_info, load_customer_info, save_customer_info, CustomerInfo,
};

use super::{CustomerArgs, CustomerCommand};
use crate::context::Context;

/// Run the customer command.
pub async fn run(args: CustomerArgs, ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    match args.command {
        CustomerCommand::Show => match load_customer_info(&store)? {
            Some(info) if ctx.output.is_json() => ctx.output.json(&info),
            Some(info) => {
                ctx.output.header("Saved customer details");
                print_info(&info, ctx);
            }
            None => ctx.output.info("No saved customer details"),
        },
        CustomerCommand::Save { file } => {
            let info: CustomerInfo = ctx.read_json(&file)?;
            info.validate()?;
            save_customer_info(&store, &info)?;
            ctx.output.success("Customer details saved");
        }
        CustomerCommand::Clear => {
            clear_customer_info(&store)?;
            ctx.output.success("Saved customer details cleared");
        }
    }
    Ok(())
}

fn print_info(info: &CustomerInfo, ctx: &Context) {
    let fields = [
        ("Company", &info.company_name),
        ("Name", &info.full_name()),
        ("Email", &info.customer_email),
        ("Phone", &info.customer_phone),
        ("Address", &info.shipping_address),
        ("Notes", &info.notes),
    ];
    for (label, value) in fields {
        if !value.trim().is_empty() {
            ctx.output.kv(label, value);
        }
    }
}
