//! Storage behind the REST routes.
//!
//! Routes only see the [`Repository`] trait. [`MemoryRepository`] keeps the
//! three collections in process memory and is what the binary runs with.

mod memory;

use async_trait::async_trait;
use tableside_core::{
    MenuItem, MenuItemId, MenuItemPatch, Order, OrderId, OrderStatus, Table, TableId, TablePatch,
};
use thiserror::Error;

pub use memory::MemoryRepository;

/// Repository operation errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No record with the given id.
    #[error("{0} not found")]
    NotFound(String),

    /// The write would break a uniqueness rule.
    #[error("{0}")]
    Conflict(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persistent home of tables, menu items, and orders.
///
/// Records arrive already validated; the repository only enforces identity
/// and uniqueness.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn list_tables(&self) -> RepositoryResult<Vec<Table>>;
    /// Fails with `Conflict` on a reused id, table number, or slug.
    async fn insert_table(&self, table: Table) -> RepositoryResult<Table>;
    /// Fails with `Conflict` when renumbering onto another table's number.
    async fn update_table(&self, id: TableId, patch: &TablePatch) -> RepositoryResult<Table>;
    async fn delete_table(&self, id: TableId) -> RepositoryResult<()>;

    async fn list_menu_items(&self) -> RepositoryResult<Vec<MenuItem>>;
    async fn insert_menu_item(&self, item: MenuItem) -> RepositoryResult<MenuItem>;
    async fn update_menu_item(
        &self,
        id: MenuItemId,
        patch: &MenuItemPatch,
    ) -> RepositoryResult<MenuItem>;
    async fn delete_menu_item(&self, id: MenuItemId) -> RepositoryResult<()>;

    async fn list_orders(&self) -> RepositoryResult<Vec<Order>>;
    async fn insert_order(&self, order: Order) -> RepositoryResult<Order>;
    /// Any status may be written; lifecycle rules live with the caller.
    async fn set_order_status(&self, id: OrderId, status: OrderStatus) -> RepositoryResult<Order>;
}
