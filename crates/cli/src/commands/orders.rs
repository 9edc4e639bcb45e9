//! `tbs orders` - the cashier's side of the order lifecycle.

use tableside_client::Tableside;
use tableside_core::{Order, OrderBoard, OrderStatus, format_rupiah};
use tracing::info;

use super::parse_order_id;

pub(crate) fn log_order(order: &Order) {
    let name = if order.customer_name.is_empty() {
        "-"
    } else {
        order.customer_name.as_str()
    };
    info!(
        "  {}  table {:<6} {:<14} {:>12}  {:<5} {}  {}",
        order.created_at.format("%H:%M:%S"),
        order.table_number,
        order.status.as_str(),
        format_rupiah(order.total),
        order.payment_type.as_str(),
        name,
        order.id
    );
}

pub(crate) fn log_board(board: &OrderBoard) {
    for status in OrderStatus::ALL {
        let column = board.column(status);
        info!("{} ({})", status, column.len());
        for order in column {
            log_order(order);
        }
    }
}

/// Log the cashier board, or one table's orders newest first.
pub async fn list(client: &Tableside, table_number: Option<&str>) {
    match table_number {
        Some(number) => {
            let orders = client
                .orders
                .list_orders_for_table(number.trim(), &OrderStatus::ALL)
                .await;
            info!("Table {} ({} orders)", number.trim(), orders.len());
            for order in &orders {
                log_order(order);
            }
        }
        None => log_board(&client.orders.board().await),
    }
}

/// Acknowledge a pending order.
///
/// # Errors
///
/// Returns an error for an unknown order, a backwards move, or a failed write.
pub async fn acknowledge(client: &Tableside, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let order = client.orders.acknowledge(parse_order_id(id)?).await?;
    log_order(&order);
    Ok(())
}

/// Mark an order processed.
///
/// # Errors
///
/// Returns an error for an unknown order or a failed write.
pub async fn complete(client: &Tableside, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let order = client.orders.complete(parse_order_id(id)?).await?;
    log_order(&order);
    Ok(())
}

/// Set any status, bypassing the forward-only rule.
///
/// # Errors
///
/// Returns an error for an unknown order or a failed write.
pub async fn force(
    client: &Tableside,
    id: &str,
    status: OrderStatus,
) -> Result<(), Box<dyn std::error::Error>> {
    let order = client
        .orders
        .force_status(parse_order_id(id)?, status)
        .await?;
    log_order(&order);
    Ok(())
}
