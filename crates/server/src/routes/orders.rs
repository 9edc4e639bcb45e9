//! Order routes.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use tableside_core::{
    NewOrder, normalize_table_number,
    api::{OrderResponse, OrdersResponse, UpdateOrderStatusRequest},
};
use tracing::{info, instrument};

use super::ApiJson;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// GET /api/orders
///
/// # Errors
///
/// Returns `AppError` if the repository fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<OrdersResponse>> {
    let orders = state.repository().list_orders().await?;
    Ok(Json(OrdersResponse { orders }))
}

/// POST /api/orders
///
/// The order starts `pending` and is stamped with the server's clock. The
/// table number is not checked against known tables.
///
/// # Errors
///
/// 400 for a blank table number, an empty order, a line with a zero
/// quantity or out-of-range price, or a total that disagrees with the items.
#[instrument(
    skip(state, new_order),
    fields(order_id = %new_order.id, table_number = %new_order.table_number)
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(mut new_order): ApiJson<NewOrder>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    new_order.table_number = normalize_table_number(&new_order.table_number)?;
    new_order.validate()?;
    if !new_order.total_matches() {
        return Err(AppError::BadRequest(
            "Order total does not match its items".to_string(),
        ));
    }

    let order = state
        .repository()
        .insert_order(new_order.into_order(Utc::now()))
        .await?;
    info!(total = %order.total, items = order.item_count(), "Order created");
    Ok((StatusCode::CREATED, Json(OrderResponse { order })))
}

/// PATCH /api/orders
///
/// Writes whatever status it is given; forward-only rules belong to the
/// order store.
///
/// # Errors
///
/// 404 for an unknown id.
#[instrument(skip(state, request), fields(order_id = %request.id, status = %request.status))]
pub async fn update_status(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateOrderStatusRequest>,
) -> Result<Json<OrderResponse>> {
    let order = state
        .repository()
        .set_order_status(request.id, request.status)
        .await?;
    info!("Order status updated");
    Ok(Json(OrderResponse { order }))
}
