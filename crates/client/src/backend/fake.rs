//! In-memory backend for store and sync tests.

#![allow(clippy::unwrap_used)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tableside_core::{
    MenuItem, MenuItemId, MenuItemPatch, NewOrder, Order, OrderId, OrderStatus, Table, TableId,
    TablePatch,
};

use super::{Backend, BackendResult};
use crate::error::BackendError;

#[derive(Default)]
pub struct FakeBackend {
    pub tables: Mutex<Vec<Table>>,
    pub menu_items: Mutex<Vec<MenuItem>>,
    pub orders: Mutex<Vec<Order>>,
    /// When set, every call fails with a 500.
    pub offline: AtomicBool,
    /// When set, only `list_orders` fails.
    pub orders_offline: AtomicBool,
    pub writes: AtomicUsize,
}

impl FakeBackend {
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> BackendResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(BackendError::Status {
                status: 500,
                message: "backend offline".into(),
            })
        } else {
            Ok(())
        }
    }

    fn write(&self) -> BackendResult<()> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_tables(&self) -> BackendResult<Vec<Table>> {
        self.check()?;
        Ok(self.tables.lock().unwrap().clone())
    }

    async fn create_table(&self, table: &Table) -> BackendResult<Table> {
        self.write()?;
        self.tables.lock().unwrap().push(table.clone());
        Ok(table.clone())
    }

    async fn update_table(&self, id: TableId, patch: &TablePatch) -> BackendResult<Table> {
        self.write()?;
        let mut tables = self.tables.lock().unwrap();
        let table = tables
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| BackendError::NotFound("Table not found".into()))?;
        table.apply(patch);
        Ok(table.clone())
    }

    async fn delete_table(&self, id: TableId) -> BackendResult<()> {
        self.write()?;
        self.tables.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }

    async fn list_menu_items(&self) -> BackendResult<Vec<MenuItem>> {
        self.check()?;
        Ok(self.menu_items.lock().unwrap().clone())
    }

    async fn create_menu_item(&self, item: &MenuItem) -> BackendResult<MenuItem> {
        self.write()?;
        self.menu_items.lock().unwrap().push(item.clone());
        Ok(item.clone())
    }

    async fn update_menu_item(
        &self,
        id: MenuItemId,
        patch: &MenuItemPatch,
    ) -> BackendResult<MenuItem> {
        self.write()?;
        let mut items = self.menu_items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| BackendError::NotFound("Menu item not found".into()))?;
        item.apply(patch);
        Ok(item.clone())
    }

    async fn delete_menu_item(&self, id: MenuItemId) -> BackendResult<()> {
        self.write()?;
        self.menu_items.lock().unwrap().retain(|i| i.id != id);
        Ok(())
    }

    async fn list_orders(&self) -> BackendResult<Vec<Order>> {
        self.check()?;
        if self.orders_offline.load(Ordering::SeqCst) {
            return Err(BackendError::Timeout);
        }
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn create_order(&self, order: &NewOrder) -> BackendResult<Order> {
        self.write()?;
        let created = order.clone().into_order(Utc::now());
        self.orders.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> BackendResult<Order> {
        self.write()?;
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| BackendError::NotFound("Order not found".into()))?;
        order.status = status;
        Ok(order.clone())
    }
}
