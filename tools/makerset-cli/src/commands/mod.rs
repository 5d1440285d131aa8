//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod content;
pub mod customer;
pub mod inventory;
pub mod manual;
pub mod ratings;
pub mod visibility;

use clap::{Args, Subcommand};

/// Arguments for the manual command.
#[derive(Args)]
pub struct ManualArgs {
    #[command(subcommand)]
    pub command: ManualCommand,
}

#[derive(Subcommand)]
pub enum ManualCommand {
    /// Parse a free-text manual into numbered steps.
    Parse {
        /// Manual text file.
        file: String,

        /// Comma-separated tools, used for generic steps when nothing parses.
        #[arg(long)]
        tools: Option<String>,

        /// Comma-separated parts, used for generic steps when nothing parses.
        #[arg(long)]
        parts: Option<String>,
    },
    /// Render a JSON step list back into manual text.
    Render {
        /// JSON file holding an array of steps.
        file: String,

        /// Number steps by position instead of keeping stored numbers.
        #[arg(long)]
        renumber: bool,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart totals and the shipping quote.
    Quote {
        /// JSON file holding an array of cart lines.
        file: String,
    },
    /// Ask the backend whether the cart can be fulfilled.
    Check {
        /// JSON file holding an array of cart lines.
        file: String,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// JSON file holding an array of cart lines.
    pub cart: String,

    /// JSON file with the customer form. Defaults to the saved details.
    #[arg(long)]
    pub customer: Option<String>,

    /// Save the customer details for the next checkout.
    #[arg(long)]
    pub remember: bool,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the customer command.
#[derive(Args)]
pub struct CustomerArgs {
    #[command(subcommand)]
    pub command: CustomerCommand,
}

#[derive(Subcommand)]
pub enum CustomerCommand {
    /// Show the saved customer details.
    Show,
    /// Save customer details from a JSON file.
    Save {
        /// JSON file with the customer form.
        file: String,
    },
    /// Forget the saved customer details.
    Clear,
}

/// Arguments for the ratings command.
#[derive(Args)]
pub struct RatingsArgs {
    /// Kit set ID.
    pub set_id: i64,

    /// Show at most this many reviews.
    #[arg(short, long, default_value = "5")]
    pub limit: usize,
}

/// Arguments for the inventory command.
#[derive(Args)]
pub struct InventoryArgs {
    #[command(subcommand)]
    pub command: InventoryCommand,
}

#[derive(Subcommand)]
pub enum InventoryCommand {
    /// Adjust the stock level of a part.
    Adjust {
        /// Part ID.
        part_id: i64,

        /// One of add, remove, set.
        #[arg(long = "type")]
        adjustment_type: String,

        /// Quantity to add, remove or set.
        #[arg(long)]
        quantity: i64,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Record a delivery of a part.
    Income {
        /// Part ID.
        part_id: i64,

        #[arg(long)]
        quantity: i64,

        #[arg(long)]
        supplier: String,

        /// Price of one unit.
        #[arg(long)]
        cost_per_unit: f64,

        /// Purchase date as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        purchase_date: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
}

/// Arguments for the visibility command.
#[derive(Args)]
pub struct VisibilityArgs {
    /// Kit set ID.
    pub set_id: i64,

    /// Publish the kit.
    #[arg(long, conflicts_with = "hidden", required_unless_present = "hidden")]
    pub visible: bool,

    /// Unpublish the kit.
    #[arg(long)]
    pub hidden: bool,
}

/// Arguments for the content command.
#[derive(Args)]
pub struct ContentArgs {
    #[command(subcommand)]
    pub command: ContentCommand,
}

#[derive(Subcommand)]
pub enum ContentCommand {
    /// Learning outcomes for a kit.
    Outcomes {
        /// Kit category, e.g. electronics.
        category: String,
        /// beginner, intermediate or advanced.
        #[arg(default_value = "beginner")]
        difficulty: String,
    },
    /// Progress message for a builder.
    Motivation {
        /// Completed steps.
        completed: u32,
        /// Total steps.
        total: u32,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default makerset.toml in the current directory.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
