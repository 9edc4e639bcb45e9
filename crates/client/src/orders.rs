//! Order store: creation, status changes, and per-table views.

use std::sync::Arc;

use tableside_core::{
    CartLine, NewOrder, Order, OrderBoard, OrderId, OrderStatus, PaymentType, orders_for_table,
    sort_by_newest,
};
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::backend::Backend;
use crate::catalog::upsert;
use crate::error::StoreError;

/// Owns the local copy of orders.
pub struct OrderStore {
    backend: Arc<dyn Backend>,
    orders: RwLock<Vec<Order>>,
}

impl std::fmt::Debug for OrderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStore").finish_non_exhaustive()
    }
}

impl OrderStore {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            orders: RwLock::new(Vec::new()),
        }
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.orders.read().await.clone()
    }

    pub async fn order(&self, id: OrderId) -> Option<Order> {
        self.orders.read().await.iter().find(|o| o.id == id).cloned()
    }

    /// Submit an order built from `lines`.
    ///
    /// The total is computed here from the line snapshots. The table number is
    /// not checked against known tables; gating checkout on a valid table is
    /// the job of [`crate::TableSession`].
    ///
    /// # Errors
    ///
    /// Returns `Backend` if the write fails.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn create_order(
        &self,
        table_number: &str,
        lines: &[CartLine],
        customer_name: &str,
        payment_type: PaymentType,
    ) -> Result<Order, StoreError> {
        let new_order = NewOrder::from_lines(
            table_number,
            lines.to_vec(),
            customer_name.trim(),
            payment_type,
        );

        let created = self.backend.create_order(&new_order).await?;
        upsert(&mut *self.orders.write().await, created.clone(), |o| o.id);

        info!(order_id = %created.id, total = %created.total, "Order created");
        Ok(created)
    }

    /// Move an order forward through its lifecycle.
    ///
    /// Setting the status it already has is a no-op.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the order is unknown
    /// - `InvalidTransition` for a backwards move
    /// - `Backend` if the write fails
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, StoreError> {
        let current = self
            .order(id)
            .await
            .ok_or_else(|| StoreError::NotFound(format!("order {id}")))?;

        if current.status == status {
            return Ok(current);
        }
        if !current.status.can_transition_to(status) {
            return Err(StoreError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        self.write_status(id, status).await
    }

    /// Set any status, bypassing the lifecycle check.
    ///
    /// For a cashier undoing a mistaken click.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the order is unknown
    /// - `Backend` if the write fails
    #[instrument(skip(self))]
    pub async fn force_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, StoreError> {
        if self.order(id).await.is_none() {
            return Err(StoreError::NotFound(format!("order {id}")));
        }
        tracing::warn!(order_id = %id, status = %status, "Forcing order status");
        self.write_status(id, status).await
    }

    /// The cashier's "process" action.
    ///
    /// # Errors
    ///
    /// See [`Self::update_order_status`].
    pub async fn acknowledge(&self, id: OrderId) -> Result<Order, StoreError> {
        self.update_order_status(id, OrderStatus::Acknowledged).await
    }

    /// The cashier's "complete" action.
    ///
    /// # Errors
    ///
    /// See [`Self::update_order_status`].
    pub async fn complete(&self, id: OrderId) -> Result<Order, StoreError> {
        self.update_order_status(id, OrderStatus::Processed).await
    }

    async fn write_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, StoreError> {
        let updated = self.backend.update_order_status(id, status).await?;
        upsert(&mut *self.orders.write().await, updated.clone(), |o| o.id);
        Ok(updated)
    }

    /// Orders for `table_number` in any of `statuses`, newest first.
    pub async fn list_orders_for_table(
        &self,
        table_number: &str,
        statuses: &[OrderStatus],
    ) -> Vec<Order> {
        let mut orders = orders_for_table(&self.orders.read().await, table_number, statuses);
        sort_by_newest(&mut orders);
        orders
    }

    /// All orders in cashier board columns.
    pub async fn board(&self) -> OrderBoard {
        OrderBoard::from_orders(&self.orders.read().await)
    }

    pub(crate) async fn replace_orders(&self, orders: Vec<Order>) {
        *self.orders.write().await = orders;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;
    use tableside_core::MenuItemId;

    use super::*;
    use crate::backend::fake::FakeBackend;

    fn store() -> (Arc<FakeBackend>, OrderStore) {
        let backend = Arc::new(FakeBackend::default());
        let store = OrderStore::new(backend.clone());
        (backend, store)
    }

    fn line(price: i64, quantity: u32) -> CartLine {
        CartLine {
            menu_item_id: MenuItemId::generate(),
            name: "Sate Ayam".into(),
            price: Decimal::from(price),
            quantity,
            notes: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_order_computes_total() {
        let (_, store) = store();
        let order = store
            .create_order("5", &[line(50_000, 2)], "Budi", PaymentType::Cash)
            .await
            .unwrap();
        assert_eq!(order.total, Decimal::from(100_000));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_type, PaymentType::Cash);
        assert_eq!(store.orders().await.len(), 1);
    }

    #[tokio::test]
    async fn test_create_order_for_unknown_table_is_allowed() {
        let (_, store) = store();
        let order = store
            .create_order("no-such-table", &[line(1_000, 1)], "", PaymentType::Qris)
            .await
            .unwrap();
        assert_eq!(order.table_number, "no-such-table");
    }

    #[tokio::test]
    async fn test_forward_transitions() {
        let (_, store) = store();
        let order = store
            .create_order("5", &[line(1_000, 1)], "", PaymentType::Qris)
            .await
            .unwrap();

        let acked = store.acknowledge(order.id).await.unwrap();
        assert_eq!(acked.status, OrderStatus::Acknowledged);
        let done = store.complete(order.id).await.unwrap();
        assert_eq!(done.status, OrderStatus::Processed);

        // Same status again is a no-op.
        let again = store.complete(order.id).await.unwrap();
        assert_eq!(again.status, OrderStatus::Processed);
    }

    #[tokio::test]
    async fn test_backward_transition_rejected_without_write() {
        let (backend, store) = store();
        let order = store
            .create_order("5", &[line(1_000, 1)], "", PaymentType::Qris)
            .await
            .unwrap();
        store.complete(order.id).await.unwrap();
        let writes = backend.write_count();

        let err = store
            .update_order_status(order.id, OrderStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidTransition {
                from: OrderStatus::Processed,
                to: OrderStatus::Pending
            }
        ));
        assert_eq!(backend.write_count(), writes);
    }

    #[tokio::test]
    async fn test_force_status_allows_undo() {
        let (_, store) = store();
        let order = store
            .create_order("5", &[line(1_000, 1)], "", PaymentType::Qris)
            .await
            .unwrap();
        store.complete(order.id).await.unwrap();
        let undone = store
            .force_status(order.id, OrderStatus::Pending)
            .await
            .unwrap();
        assert_eq!(undone.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_unknown_order_not_found_and_unchanged() {
        let (_, store) = store();
        store
            .create_order("5", &[line(1_000, 1)], "", PaymentType::Qris)
            .await
            .unwrap();
        let before = store.orders().await;

        let err = store
            .update_order_status(OrderId::generate(), OrderStatus::Processed)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(matches!(
            store
                .force_status(OrderId::generate(), OrderStatus::Processed)
                .await,
            Err(StoreError::NotFound(_))
        ));
        assert_eq!(store.orders().await, before);
    }

    #[tokio::test]
    async fn test_active_orders_for_table() {
        let (_, store) = store();
        let pending = store
            .create_order("5", &[line(1_000, 1)], "", PaymentType::Qris)
            .await
            .unwrap();
        let processed = store
            .create_order("5", &[line(2_000, 1)], "", PaymentType::Qris)
            .await
            .unwrap();
        store.complete(processed.id).await.unwrap();
        store
            .create_order("6", &[line(3_000, 1)], "", PaymentType::Qris)
            .await
            .unwrap();

        let active = store.list_orders_for_table("5", &OrderStatus::ACTIVE).await;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, pending.id);
    }

    #[tokio::test]
    async fn test_board() {
        let (_, store) = store();
        let a = store
            .create_order("1", &[line(1_000, 1)], "", PaymentType::Qris)
            .await
            .unwrap();
        store
            .create_order("2", &[line(1_000, 1)], "", PaymentType::Qris)
            .await
            .unwrap();
        store.acknowledge(a.id).await.unwrap();

        let board = store.board().await;
        assert_eq!(board.pending.len(), 1);
        assert_eq!(board.acknowledged[0].id, a.id);
        assert!(board.processed.is_empty());
    }

    #[tokio::test]
    async fn test_failed_create_leaves_orders_untouched() {
        let (backend, store) = store();
        backend.set_offline(true);
        assert!(
            store
                .create_order("5", &[line(1_000, 1)], "", PaymentType::Qris)
                .await
                .is_err()
        );
        assert!(store.orders().await.is_empty());
    }
}
