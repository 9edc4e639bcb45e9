//! The backing store the client stores read from and write to.
//!
//! [`Backend`] is the REST contract expressed as a trait. [`HttpBackend`]
//! speaks it over HTTP; tests substitute an in-memory fake.

mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpBackend;

use async_trait::async_trait;
use tableside_core::{
    MenuItem, MenuItemId, MenuItemPatch, NewOrder, Order, OrderId, OrderStatus, Table, TableId,
    TablePatch,
};

use crate::error::BackendError;

pub type BackendResult<T> = Result<T, BackendError>;

/// Authoritative storage for tables, menu items, and orders.
///
/// Deletes are idempotent: removing a record that does not exist succeeds.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_tables(&self) -> BackendResult<Vec<Table>>;
    async fn create_table(&self, table: &Table) -> BackendResult<Table>;
    async fn update_table(&self, id: TableId, patch: &TablePatch) -> BackendResult<Table>;
    async fn delete_table(&self, id: TableId) -> BackendResult<()>;

    async fn list_menu_items(&self) -> BackendResult<Vec<MenuItem>>;
    async fn create_menu_item(&self, item: &MenuItem) -> BackendResult<MenuItem>;
    async fn update_menu_item(
        &self,
        id: MenuItemId,
        patch: &MenuItemPatch,
    ) -> BackendResult<MenuItem>;
    async fn delete_menu_item(&self, id: MenuItemId) -> BackendResult<()>;

    async fn list_orders(&self) -> BackendResult<Vec<Order>>;
    async fn create_order(&self, order: &NewOrder) -> BackendResult<Order>;
    async fn update_order_status(&self, id: OrderId, status: OrderStatus)
    -> BackendResult<Order>;
}
