//! Tableside CLI - admin, customer, and cashier tools against a Tableside API.
//!
//! # Usage
//!
//! ```bash
//! # Load the default menu
//! tbs seed
//!
//! # Add table 5 and print its QR link
//! tbs tables add 5
//!
//! # Order two of an item for table 5
//! tbs order --table 5 --item "Nasi Goreng Special:2" --name Budi --payment Cash
//!
//! # Follow the cashier board
//! tbs watch
//! ```
//!
//! # Commands
//!
//! - `seed` - Create the default menu, or items from a JSON file
//! - `tables` - List and manage tables
//! - `menu` - List and manage menu items
//! - `order` - Place an order as a customer
//! - `orders` - List orders and move them through the lifecycle
//! - `watch` - Keep the stores in sync and log the cashier board

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tableside_client::{ClientConfig, Tableside};
use tableside_core::{CategoryFilter, OrderStatus, PaymentType, TableStatus};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

mod commands;

use commands::ItemSpec;

#[derive(Parser)]
#[command(name = "tbs")]
#[command(author, version, about = "Tableside CLI tools")]
struct Cli {
    /// Base URL of the REST API (overrides `TABLESIDE_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<Url>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create menu items, skipping names that already exist
    Seed {
        /// JSON array of menu items; the built-in menu when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Manage tables
    Tables {
        #[command(subcommand)]
        action: TablesAction,
    },
    /// Manage menu items
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },
    /// Place an order for a table
    Order {
        /// Table slug from the QR link
        #[arg(long, conflicts_with = "table", required_unless_present = "table")]
        table_slug: Option<String>,

        /// Table number
        #[arg(long)]
        table: Option<String>,

        /// Menu item id or name, optionally followed by `:quantity`
        #[arg(short, long = "item", required = true)]
        items: Vec<ItemSpec>,

        /// Name the order is placed under
        #[arg(short, long, default_value = "")]
        name: String,

        /// Payment method (`QRIS` or `Cash`)
        #[arg(short, long, default_value = "QRIS")]
        payment: PaymentType,
    },
    /// Manage orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Keep the stores in sync and log the cashier board each cycle
    Watch,
}

#[derive(Subcommand)]
enum TablesAction {
    /// List tables with their menu links
    List,
    /// Create a table
    Add {
        /// Table number
        number: String,
    },
    /// Mark a table available or occupied
    SetStatus {
        /// Table number
        number: String,
        /// `available` or `occupied`
        status: TableStatus,
    },
    /// Change a table's number; its slug and QR code stay the same
    Rename {
        /// Current table number
        number: String,
        /// New table number
        new_number: String,
    },
    /// Delete a table
    Remove {
        /// Table number
        number: String,
    },
}

#[derive(Subcommand)]
enum MenuAction {
    /// List the menu by category
    List {
        /// Case-insensitive text to look for in names and descriptions
        #[arg(short, long)]
        search: Option<String>,

        /// Category name, or `All`
        #[arg(short, long, default_value = "All")]
        category: CategoryFilter,

        /// Include unavailable items
        #[arg(long)]
        all: bool,
    },
    /// Create a menu item
    Add {
        #[arg(short, long)]
        name: String,

        /// Price in rupiah
        #[arg(short, long)]
        price: String,

        /// `Appetizers`, `Main Course`, `Desserts`, or `Beverages`
        #[arg(short, long)]
        category: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        image_url: String,
    },
    /// Flip an item between available and sold out
    Toggle {
        /// Menu item id or name
        item: String,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders, as a board or for one table
    List {
        /// Only this table's orders, newest first
        #[arg(short, long)]
        table: Option<String>,
    },
    /// Acknowledge a pending order
    Ack {
        /// Order id
        id: String,
    },
    /// Mark an order processed
    Complete {
        /// Order id
        id: String,
    },
    /// Set any status, including moving an order back
    Force {
        /// Order id
        id: String,
        /// `pending`, `acknowledged`, or `processed`
        status: OrderStatus,
    },
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tableside_cli=info,tableside_client=warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = cli.api_url {
        config = config.with_api_url(api_url);
    }
    let client = Tableside::connect(&config)?;

    if matches!(cli.command, Commands::Watch) {
        return commands::watch::run(&client).await;
    }

    // One-shot commands work against a single snapshot.
    client.sync.refresh().await;

    match cli.command {
        Commands::Seed { file } => commands::seed::run(&client, file.as_deref()).await?,
        Commands::Tables { action } => match action {
            TablesAction::List => commands::tables::list(&client).await,
            TablesAction::Add { number } => commands::tables::add(&client, &number).await?,
            TablesAction::SetStatus { number, status } => {
                commands::tables::set_status(&client, &number, status).await?;
            }
            TablesAction::Rename { number, new_number } => {
                commands::tables::rename(&client, &number, &new_number).await?;
            }
            TablesAction::Remove { number } => commands::tables::remove(&client, &number).await?,
        },
        Commands::Menu { action } => match action {
            MenuAction::List {
                search,
                category,
                all,
            } => commands::menu::list(&client, search, category, all).await,
            MenuAction::Add {
                name,
                price,
                category,
                description,
                image_url,
            } => {
                let form = tableside_core::MenuItemForm {
                    name,
                    description,
                    price,
                    category,
                    image_url,
                    available: None,
                };
                commands::menu::add(&client, form).await?;
            }
            MenuAction::Toggle { item } => commands::menu::toggle(&client, &item).await?,
        },
        Commands::Order {
            table_slug,
            table,
            items,
            name,
            payment,
        } => {
            let lookup = commands::order::lookup(table_slug, table)?;
            commands::order::run(&client, lookup, &items, &name, payment).await?;
        }
        Commands::Orders { action } => match action {
            OrdersAction::List { table } => commands::orders::list(&client, table.as_deref()).await,
            OrdersAction::Ack { id } => commands::orders::acknowledge(&client, &id).await?,
            OrdersAction::Complete { id } => commands::orders::complete(&client, &id).await?,
            OrdersAction::Force { id, status } => {
                commands::orders::force(&client, &id, status).await?;
            }
        },
        Commands::Watch => {}
    }
    Ok(())
}
