//! Menu item routes.

use axum::{Json, extract::State, http::StatusCode};
use tableside_core::{
    MenuItem, MenuItemId,
    api::{DeleteQuery, DeleteResponse, MenuItemResponse, MenuItemsResponse, UpdateMenuItemRequest},
};
use tracing::{info, instrument};

use super::{ApiJson, ApiQuery, parse_delete_id};
use crate::error::Result;
use crate::state::AppState;

/// GET /api/menu
///
/// Every item, available or not; filtering is the reader's job.
///
/// # Errors
///
/// Returns `AppError` if the repository fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<MenuItemsResponse>> {
    let menu_items = state.repository().list_menu_items().await?;
    Ok(Json(MenuItemsResponse { menu_items }))
}

/// POST /api/menu
///
/// # Errors
///
/// 400 if the name, price, or image URL is invalid.
#[instrument(skip(state, item), fields(name = %item.name))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(item): ApiJson<MenuItem>,
) -> Result<(StatusCode, Json<MenuItemResponse>)> {
    item.validate()?;
    let menu_item = state.repository().insert_menu_item(item).await?;
    info!(menu_item_id = %menu_item.id, "Menu item created");
    Ok((StatusCode::CREATED, Json(MenuItemResponse { menu_item })))
}

/// PUT /api/menu
///
/// # Errors
///
/// 400 if a changed field is invalid, 404 for an unknown id.
#[instrument(skip(state, request), fields(menu_item_id = %request.id))]
pub async fn update(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateMenuItemRequest>,
) -> Result<Json<MenuItemResponse>> {
    request.patch.validate()?;
    let menu_item = state
        .repository()
        .update_menu_item(request.id, &request.patch)
        .await?;
    info!("Menu item updated");
    Ok(Json(MenuItemResponse { menu_item }))
}

/// DELETE /api/menu?id=
///
/// # Errors
///
/// 400 for a missing or malformed id, 404 for an unknown one.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DeleteQuery>,
) -> Result<Json<DeleteResponse>> {
    let id: MenuItemId = parse_delete_id(query.id.as_deref())?;
    state.repository().delete_menu_item(id).await?;
    info!(menu_item_id = %id, "Menu item deleted");
    Ok(Json(DeleteResponse { success: true }))
}
