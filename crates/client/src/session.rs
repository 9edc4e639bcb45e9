//! Table sessions: the customer's view of one table.

use tableside_core::{Order, OrderStatus, PaymentType, Table, TableLookup};
use tracing::{info, instrument, warn};

use crate::cart::Cart;
use crate::catalog::CatalogStore;
use crate::error::SessionError;
use crate::orders::OrderStore;

/// A customer link resolved against the known tables.
///
/// An unresolved session can still browse the menu but cannot check out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSession {
    lookup: TableLookup,
    table: Option<Table>,
}

impl TableSession {
    /// Resolve `lookup` against the catalog's current tables.
    pub async fn resolve(catalog: &CatalogStore, lookup: TableLookup) -> Self {
        let table = catalog.resolve_table(&lookup).await;
        if table.is_none() {
            warn!(lookup = %lookup, "Invalid table; checkout disabled");
        }
        Self { lookup, table }
    }

    #[must_use]
    pub const fn lookup(&self) -> &TableLookup {
        &self.lookup
    }

    #[must_use]
    pub const fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// Whether the link named a known table.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.table.is_some()
    }

    /// Whether `cart` could be submitted from this session.
    #[must_use]
    pub fn can_checkout(&self, cart: &Cart) -> bool {
        self.is_valid() && !cart.is_empty()
    }

    /// Submit the cart as an order for this table.
    ///
    /// The cart is cleared only after the order is confirmed; on failure it is
    /// left untouched so the customer can retry.
    ///
    /// # Errors
    ///
    /// - `InvalidTable` if the session did not resolve
    /// - `EmptyCart` if there is nothing to order
    /// - `Store` if creating the order fails
    #[instrument(skip(self, cart, orders), fields(lookup = %self.lookup))]
    pub async fn checkout(
        &self,
        cart: &mut Cart,
        orders: &OrderStore,
        payment_type: PaymentType,
    ) -> Result<Order, SessionError> {
        let Some(table) = &self.table else {
            return Err(SessionError::InvalidTable(self.lookup.clone()));
        };
        if cart.is_empty() {
            return Err(SessionError::EmptyCart);
        }

        let order = orders
            .create_order(
                &table.table_number,
                cart.lines(),
                cart.customer_name(),
                payment_type,
            )
            .await?;
        cart.clear();

        info!(order_id = %order.id, table_number = %table.table_number, "Checked out");
        Ok(order)
    }

    /// Pending and acknowledged orders for this table, newest first.
    ///
    /// Empty for an unresolved session.
    pub async fn active_orders(&self, orders: &OrderStore) -> Vec<Order> {
        match &self.table {
            Some(table) => {
                orders
                    .list_orders_for_table(&table.table_number, &OrderStatus::ACTIVE)
                    .await
            }
            None => Vec::new(),
        }
    }
}
