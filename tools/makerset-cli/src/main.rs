//! MakerSet CLI - command line client for the MakerSet kit shop.
//!
//! Commands:
//! - `makerset manual` - Parse and render build manuals
//! - `makerset cart` - Quote and stock-check a cart file
//! - `makerset checkout` - Place an order
//! - `makerset customer` - Manage saved customer details
//! - `makerset ratings` - Show kit ratings
//! - `makerset inventory` - Adjust part stock and record deliveries
//! - `makerset visibility` - Publish or unpublish a kit
//! - `makerset content` - Learning outcomes and progress messages
//! - `makerset config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    CartArgs, CheckoutArgs, ConfigArgs, ContentArgs, CustomerArgs, InventoryArgs, ManualArgs,
    RatingsArgs, VisibilityArgs,
};

/// MakerSet CLI - shop, check out and author build manuals for maker kits
#[derive(Parser)]
#[command(name = "makerset")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and render build manuals
    Manual(ManualArgs),

    /// Quote or stock-check a cart file
    Cart(CartArgs),

    /// Validate stock and place an order
    Checkout(CheckoutArgs),

    /// Manage saved customer details
    Customer(CustomerArgs),

    /// Show ratings and reviews for a kit
    Ratings(RatingsArgs),

    /// Adjust part stock or record a delivery
    Inventory(InventoryArgs),

    /// Publish or unpublish a kit
    Visibility(VisibilityArgs),

    /// Learning outcomes and progress messages
    Content(ContentArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    init_logging(cli.verbose, &ctx.config.log.level);
    ctx.output.debug(&format!("API: {}", ctx.config.api.base_url));

    // Execute command
    let result = match cli.command {
        Commands::Manual(args) => commands::manual::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Customer(args) => commands::customer::run(args, &ctx).await,
        Commands::Ratings(args) => commands::ratings::run(args, &ctx).await,
        Commands::Inventory(args) => commands::inventory::run(args, &ctx).await,
        Commands::Visibility(args) => commands::visibility::run(args, &ctx).await,
        Commands::Content(args) => commands::content::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr. `RUST_LOG` wins over the config level; `--verbose` wins
/// over both.
fn init_logging(verbose: bool, level: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
