//! Submitted orders and the cashier board.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{CartLine, checked_order_total, order_total};
use crate::types::{OrderId, OrderStatus, PaymentType};
use crate::validation::{ValidationError, ValidationErrors};

/// A submitted order.
///
/// The items are a snapshot of the cart at checkout and `total` is fixed at
/// creation. Only `status` changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Table the order was placed from. A weak reference; the table may since
    /// have been renamed or deleted.
    pub table_number: String,
    pub items: Vec<CartLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub payment_type: PaymentType,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total quantity across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

/// Order creation request: everything but the fields the store assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub id: OrderId,
    pub table_number: String,
    pub items: Vec<CartLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub payment_type: PaymentType,
}

impl NewOrder {
    /// Build a request from cart lines, computing the total.
    #[must_use]
    pub fn from_lines(
        table_number: impl Into<String>,
        items: Vec<CartLine>,
        customer_name: impl Into<String>,
        payment_type: PaymentType,
    ) -> Self {
        let total = order_total(&items);
        Self {
            id: OrderId::generate(),
            table_number: table_number.into(),
            items,
            total,
            customer_name: customer_name.into(),
            payment_type,
        }
    }

    /// Whether `total` equals the sum of the item lines.
    ///
    /// False when the sum overflows.
    #[must_use]
    pub fn total_matches(&self) -> bool {
        checked_order_total(&self.items) == Some(self.total)
    }

    /// Check the lines of a request received from another session.
    ///
    /// # Errors
    ///
    /// Returns `ItemsRequired` for an empty order, and every failing field of
    /// every line.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.items.is_empty() {
            errors.push(ValidationError::ItemsRequired);
        }
        for line in &self.items {
            if let Err(line_errors) = line.validate() {
                for e in line_errors.errors() {
                    errors.push(e.clone());
                }
            }
        }
        errors.into_result(())
    }

    /// The pending order this request creates at `created_at`.
    #[must_use]
    pub fn into_order(self, created_at: DateTime<Utc>) -> Order {
        Order {
            id: self.id,
            table_number: self.table_number,
            items: self.items,
            total: self.total,
            customer_name: self.customer_name,
            payment_type: self.payment_type,
            status: OrderStatus::Pending,
            created_at,
        }
    }
}

/// Orders for `table_number` whose status is in `statuses`, in input order.
#[must_use]
pub fn orders_for_table(
    orders: &[Order],
    table_number: &str,
    statuses: &[OrderStatus],
) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| o.table_number == table_number && statuses.contains(&o.status))
        .cloned()
        .collect()
}

/// Sort newest first. Orders created at the same instant keep their order.
pub fn sort_by_newest(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Orders split into the cashier's three columns, each newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBoard {
    pub pending: Vec<Order>,
    pub acknowledged: Vec<Order>,
    pub processed: Vec<Order>,
}

impl OrderBoard {
    /// Build the board from an unordered list of orders.
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut board = Self::default();
        for order in orders {
            board.column_mut(order.status).push(order.clone());
        }
        for status in OrderStatus::ALL {
            sort_by_newest(board.column_mut(status));
        }
        board
    }

    /// The column for `status`.
    #[must_use]
    pub fn column(&self, status: OrderStatus) -> &[Order] {
        match status {
            OrderStatus::Pending => &self.pending,
            OrderStatus::Acknowledged => &self.acknowledged,
            OrderStatus::Processed => &self.processed,
        }
    }

    fn column_mut(&mut self, status: OrderStatus) -> &mut Vec<Order> {
        match status {
            OrderStatus::Pending => &mut self.pending,
            OrderStatus::Acknowledged => &mut self.acknowledged,
            OrderStatus::Processed => &mut self.processed,
        }
    }

    /// Number of orders on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len() + self.acknowledged.len() + self.processed.len()
    }

    /// Returns true when there are no orders at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::types::MenuItemId;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn line(price: i64, quantity: u32) -> CartLine {
        CartLine {
            menu_item_id: MenuItemId::generate(),
            name: "Nasi Goreng".into(),
            price: Decimal::from(price),
            quantity,
            notes: String::new(),
        }
    }

    fn order(table: &str, status: OrderStatus, secs: i64) -> Order {
        let mut o = NewOrder::from_lines(table, vec![line(10_000, 1)], "Budi", PaymentType::Cash)
            .into_order(at(secs));
        o.status = status;
        o
    }

    #[test]
    fn test_new_order_computes_total() {
        let new = NewOrder::from_lines("5", vec![line(50_000, 2)], "Budi", PaymentType::Cash);
        assert_eq!(new.total, Decimal::from(100_000));
        assert!(new.total_matches());

        let created = new.into_order(at(0));
        assert_eq!(created.status, OrderStatus::Pending);
        assert_eq!(created.total, Decimal::from(100_000));
        assert_eq!(created.item_count(), 2);
    }

    #[test]
    fn test_validate_new_order() {
        let ok = NewOrder::from_lines("5", vec![line(50_000, 2)], "", PaymentType::Qris);
        assert!(ok.validate().is_ok());

        let empty = NewOrder::from_lines("5", vec![], "", PaymentType::Qris);
        assert_eq!(
            empty.validate().unwrap_err().errors(),
            &[ValidationError::ItemsRequired]
        );

        let bad = NewOrder::from_lines(
            "5",
            vec![line(50_000, 0), line(-5_000, 1)],
            "",
            PaymentType::Qris,
        );
        let errors = bad.validate().unwrap_err();
        assert_eq!(
            errors.errors(),
            &[
                ValidationError::QuantityNotPositive,
                ValidationError::PriceNotPositive
            ]
        );
    }

    #[test]
    fn test_item_count_does_not_overflow() {
        let created = NewOrder::from_lines(
            "5",
            vec![line(1, u32::MAX), line(1, u32::MAX)],
            "",
            PaymentType::Qris,
        )
        .into_order(at(0));
        assert_eq!(created.item_count(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_total_mismatch_detected() {
        let mut new = NewOrder::from_lines("5", vec![line(50_000, 2)], "", PaymentType::Qris);
        new.total = Decimal::from(1);
        assert!(!new.total_matches());
    }

    #[test]
    fn test_orders_for_table_filters_status() {
        let orders = vec![
            order("5", OrderStatus::Pending, 0),
            order("5", OrderStatus::Processed, 1),
            order("6", OrderStatus::Pending, 2),
        ];
        let active = orders_for_table(&orders, "5", &OrderStatus::ACTIVE);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, orders[0].id);
    }

    #[test]
    fn test_sort_by_newest_is_stable() {
        let mut orders = vec![
            order("1", OrderStatus::Pending, 10),
            order("2", OrderStatus::Pending, 30),
            order("3", OrderStatus::Pending, 10),
            order("4", OrderStatus::Pending, 20),
        ];
        sort_by_newest(&mut orders);
        let tables: Vec<&str> = orders.iter().map(|o| o.table_number.as_str()).collect();
        assert_eq!(tables, ["2", "4", "1", "3"]);
    }

    #[test]
    fn test_board_columns() {
        let orders = vec![
            order("1", OrderStatus::Pending, 0),
            order("2", OrderStatus::Acknowledged, 1),
            order("3", OrderStatus::Pending, 2),
            order("4", OrderStatus::Processed, 3),
        ];
        let board = OrderBoard::from_orders(&orders);
        assert_eq!(board.len(), 4);
        assert_eq!(board.pending[0].table_number, "3");
        assert_eq!(board.column(OrderStatus::Acknowledged).len(), 1);
        assert_eq!(board.column(OrderStatus::Processed)[0].table_number, "4");
        assert!(OrderBoard::default().is_empty());
    }

    #[test]
    fn test_wire_shape() {
        let o = order("5", OrderStatus::Pending, 0);
        let json = serde_json::to_value(&o).unwrap();
        assert_eq!(json["tableNumber"], "5");
        assert_eq!(json["paymentType"], "Cash");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["customerName"], "Budi");
        assert!(json["total"].is_number());
        assert!(json["createdAt"].as_str().unwrap().starts_with("2023-11-14T"));
    }
}
