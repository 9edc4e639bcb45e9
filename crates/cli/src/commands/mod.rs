//! Subcommand implementations.
//!
//! Every command receives a [`Tableside`] whose stores hold a fresh snapshot
//! of the backend, and reports through `tracing`.

pub mod menu;
pub mod order;
pub mod orders;
pub mod seed;
pub mod tables;
pub mod watch;

use std::str::FromStr;

use tableside_client::Tableside;
use tableside_core::{MenuItem, MenuItemId, OrderId, Table};
use thiserror::Error;

/// Lookup and argument errors raised by the commands themselves.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Either --table-slug or --table is required")]
    MissingTable,

    #[error("No table numbered {0:?}")]
    UnknownTable(String),

    #[error("No menu item matches {0:?}")]
    UnknownMenuItem(String),

    #[error("{0:?} is not an order id")]
    InvalidOrderId(String),

    #[error("{0} is sold out")]
    Unavailable(String),

    #[error("Invalid item {0:?}: expected <id or name>[:quantity]")]
    InvalidItemSpec(String),
}

/// One `--item` argument: a menu item reference and how many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub item: String,
    pub quantity: u32,
}

impl FromStr for ItemSpec {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (item, quantity) = match s.rsplit_once(':') {
            Some((item, qty)) => match qty.trim().parse::<u32>() {
                Ok(0) => return Err(CommandError::InvalidItemSpec(s.to_string())),
                Ok(quantity) => (item, quantity),
                Err(_) => (s, 1),
            },
            None => (s, 1),
        };
        let item = item.trim();
        if item.is_empty() {
            return Err(CommandError::InvalidItemSpec(s.to_string()));
        }
        Ok(Self {
            item: item.to_string(),
            quantity,
        })
    }
}

/// The table with this exact (trimmed) number.
async fn table_by_number(client: &Tableside, number: &str) -> Result<Table, CommandError> {
    let number = number.trim();
    client
        .catalog
        .tables()
        .await
        .into_iter()
        .find(|t| t.table_number == number)
        .ok_or_else(|| CommandError::UnknownTable(number.to_string()))
}

/// A menu item by id, or else by case-insensitive name.
async fn menu_item_by_ref(client: &Tableside, reference: &str) -> Result<MenuItem, CommandError> {
    if let Ok(id) = reference.parse::<MenuItemId>()
        && let Some(item) = client.catalog.menu_item(id).await
    {
        return Ok(item);
    }
    let wanted = reference.trim().to_lowercase();
    client
        .catalog
        .menu_items()
        .await
        .into_iter()
        .find(|i| i.name.to_lowercase() == wanted)
        .ok_or_else(|| CommandError::UnknownMenuItem(reference.to_string()))
}

fn parse_order_id(id: &str) -> Result<OrderId, CommandError> {
    id.trim()
        .parse()
        .map_err(|_| CommandError::InvalidOrderId(id.to_string()))
}
