//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_dir {
        Some(dir) => ctx.output.kv("loaded from", &dir.display().to_string()),
        None => ctx.output.kv("loaded from", "(defaults)"),
    }

    let config = &ctx.config;
    ctx.output.text("");
    ctx.output.text("[api]");
    ctx.output.kv("base_url", &config.api.base_url);
    ctx.output.kv(
        "token",
        if config.api.token.is_some() { "(set)" } else { "(none)" },
    );
    ctx.output.kv("timeout_ms", &config.api.timeout_ms.to_string());
    ctx.output.kv("max_retries", &config.api.max_retries.to_string());

    let shipping = &config.shipping;
    ctx.output.text("");
    ctx.output.text("[shipping]");
    ctx.output.kv("currency", &shipping.currency);
    ctx.output.kv(
        "base",
        &format!("{:.2} ({})", shipping.policy.base_cost, shipping.policy.base_description),
    );
    for tier in &shipping.policy.tiers {
        ctx.output.kv(
            &format!("from {} items", tier.min_items),
            &format!("{:.2} ({})", tier.cost, tier.description),
        );
    }
    if let Some(free_over) = shipping.policy.free_over {
        ctx.output.kv("free_over", &format!("{free_over:.2}"));
    }
    if let Some(per_kg) = shipping.policy.per_kg {
        ctx.output.kv("per_kg", &format!("{per_kg:.2}"));
    }

    ctx.output.text("");
    ctx.output.text("[storage]");
    ctx.output.kv("dir", &config.storage.dir);
    ctx.output.text("");
    ctx.output.text("[log]");
    ctx.output.kv("level", &config.log.level);
    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join("makerset.toml");
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    std::fs::write(&path, generate_default_config())?;
    ctx.output.success(&format!("Wrote {}", path.display()));
    Ok(())
}
