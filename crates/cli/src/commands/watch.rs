//! `tbs watch` - run the sync loop and log the cashier board.

use std::collections::HashSet;

use tableside_client::Tableside;
use tableside_core::{Order, OrderBoard, OrderId, OrderStatus};
use tokio::time::MissedTickBehavior;
use tracing::info;

use super::orders::{log_board, log_order};

/// Poll until Ctrl+C, logging the full board once and then every new order.
///
/// # Errors
///
/// Returns an error if the Ctrl+C handler cannot be installed. Refresh
/// failures are logged by the sync layer, not returned.
pub async fn run(client: &Tableside) -> Result<(), Box<dyn std::error::Error>> {
    let interval = client.config.poll_interval;
    let handle = client.sync.start(interval);
    client.sync.wait_initialized().await;

    let board = client.orders.board().await;
    log_board(&board);
    let mut seen = HashSet::new();
    take_new_pending(&board, &mut seen);

    info!(
        api_url = %client.config.api_url,
        ?interval,
        "Watching for orders (Ctrl+C to stop)"
    );

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result?;
                break;
            }
            _ = ticker.tick() => {
                let board = client.orders.board().await;
                for order in take_new_pending(&board, &mut seen) {
                    info!("New order");
                    log_order(order);
                }
                info!(
                    pending = board.pending.len(),
                    acknowledged = board.acknowledged.len(),
                    processed = board.processed.len(),
                    "Board"
                );
            }
        }
    }

    handle.stop().await;
    info!("Stopped");
    Ok(())
}

/// Pending orders on `board` not yet in `seen`. Every order on the board is
/// then marked seen.
fn take_new_pending<'a>(board: &'a OrderBoard, seen: &mut HashSet<OrderId>) -> Vec<&'a Order> {
    let fresh: Vec<&Order> = board
        .pending
        .iter()
        .filter(|o| !seen.contains(&o.id))
        .collect();
    seen.extend(
        OrderStatus::ALL
            .into_iter()
            .flat_map(|status| board.column(status))
            .map(|o| o.id),
    );
    fresh
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;

    fn order(status: &str) -> Order {
        serde_json::from_value(json!({
            "id": OrderId::generate(),
            "tableNumber": "5",
            "items": [],
            "total": 0,
            "status": status,
            "createdAt": "2026-01-01T12:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_take_new_pending_uses_one_snapshot() {
        let first = order("pending");
        let served = order("processed");
        let mut seen = HashSet::new();

        let board = OrderBoard::from_orders(&[first.clone(), served.clone()]);
        assert_eq!(take_new_pending(&board, &mut seen), vec![&first]);
        assert!(seen.contains(&served.id));

        // An order that shows up later is reported exactly once.
        let late = order("pending");
        let board = OrderBoard::from_orders(&[first.clone(), served, late.clone()]);
        assert_eq!(take_new_pending(&board, &mut seen), vec![&late]);
        assert!(take_new_pending(&board, &mut seen).is_empty());
        assert_eq!(seen.len(), 3);
    }
}
