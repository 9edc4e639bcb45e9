//! In-memory repository.
//!
//! Each collection is a `Vec` behind its own `tokio::sync::RwLock`, so lists
//! come back in insertion order. Uniqueness is checked under the write lock
//! that performs the insert, so concurrent creates of the same table number
//! cannot both succeed. Nothing survives a restart.

use async_trait::async_trait;
use tableside_core::{
    MenuItem, MenuItemId, MenuItemPatch, Order, OrderId, OrderStatus, Table, TableId, TablePatch,
};
use tokio::sync::RwLock;

use super::{Repository, RepositoryError, RepositoryResult};

#[derive(Debug, Default)]
pub struct MemoryRepository {
    tables: RwLock<Vec<Table>>,
    menu_items: RwLock<Vec<MenuItem>>,
    orders: RwLock<Vec<Order>>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(what: &str, id: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::NotFound(format!("{what} {id}"))
}

#[async_trait]
impl Repository for MemoryRepository {
    // =========================================================================
    // Tables
    // =========================================================================

    async fn list_tables(&self) -> RepositoryResult<Vec<Table>> {
        Ok(self.tables.read().await.clone())
    }

    async fn insert_table(&self, table: Table) -> RepositoryResult<Table> {
        let mut tables = self.tables.write().await;
        if tables.iter().any(|t| t.id == table.id) {
            return Err(RepositoryError::Conflict(format!(
                "Table {} already exists",
                table.id
            )));
        }
        if tables.iter().any(|t| t.table_number == table.table_number) {
            return Err(RepositoryError::Conflict(format!(
                "Table number {} already exists",
                table.table_number
            )));
        }
        if tables.iter().any(|t| t.slug == table.slug) {
            return Err(RepositoryError::Conflict(format!(
                "Slug {} already in use",
                table.slug
            )));
        }
        tables.push(table.clone());
        Ok(table)
    }

    async fn update_table(&self, id: TableId, patch: &TablePatch) -> RepositoryResult<Table> {
        let mut tables = self.tables.write().await;
        if let Some(number) = &patch.table_number
            && tables
                .iter()
                .any(|t| t.id != id && &t.table_number == number)
        {
            return Err(RepositoryError::Conflict(format!(
                "Table number {number} already exists"
            )));
        }
        let table = tables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("Table", id))?;
        table.apply(patch);
        Ok(table.clone())
    }

    async fn delete_table(&self, id: TableId) -> RepositoryResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.len();
        tables.retain(|t| t.id != id);
        if tables.len() == before {
            return Err(not_found("Table", id));
        }
        Ok(())
    }

    // =========================================================================
    // Menu items
    // =========================================================================

    async fn list_menu_items(&self) -> RepositoryResult<Vec<MenuItem>> {
        Ok(self.menu_items.read().await.clone())
    }

    async fn insert_menu_item(&self, item: MenuItem) -> RepositoryResult<MenuItem> {
        let mut items = self.menu_items.write().await;
        if items.iter().any(|i| i.id == item.id) {
            return Err(RepositoryError::Conflict(format!(
                "Menu item {} already exists",
                item.id
            )));
        }
        items.push(item.clone());
        Ok(item)
    }

    async fn update_menu_item(
        &self,
        id: MenuItemId,
        patch: &MenuItemPatch,
    ) -> RepositoryResult<MenuItem> {
        let mut items = self.menu_items.write().await;
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| not_found("Menu item", id))?;
        item.apply(patch);
        Ok(item.clone())
    }

    async fn delete_menu_item(&self, id: MenuItemId) -> RepositoryResult<()> {
        let mut items = self.menu_items.write().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(not_found("Menu item", id));
        }
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    async fn list_orders(&self) -> RepositoryResult<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }

    async fn insert_order(&self, order: Order) -> RepositoryResult<Order> {
        let mut orders = self.orders.write().await;
        if orders.iter().any(|o| o.id == order.id) {
            return Err(RepositoryError::Conflict(format!(
                "Order {} already exists",
                order.id
            )));
        }
        orders.push(order.clone());
        Ok(order)
    }

    async fn set_order_status(&self, id: OrderId, status: OrderStatus) -> RepositoryResult<Order> {
        let mut orders = self.orders.write().await;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| not_found("Order", id))?;
        order.status = status;
        Ok(order.clone())
    }
}
