//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health              - Health check
//!
//! # Tables
//! GET    /api/tables          - { tables }
//! POST   /api/tables          - Create from a full table (201 { table })
//! PUT    /api/tables          - { id, ...patch } -> { table }
//! DELETE /api/tables?id=      - { success: true }
//!
//! # Menu
//! GET    /api/menu            - { menuItems }
//! POST   /api/menu            - Create from a full item (201 { menuItem })
//! PUT    /api/menu            - { id, ...patch } -> { menuItem }
//! DELETE /api/menu?id=        - { success: true }
//!
//! # Orders
//! GET    /api/orders          - { orders }
//! POST   /api/orders          - Create; server assigns createdAt and status (201 { order })
//! PATCH  /api/orders          - { id, status } -> { order }
//! ```

pub mod menu;
pub mod orders;
pub mod tables;

use std::str::FromStr;

use axum::{
    Router,
    extract::{FromRequest, FromRequestParts},
    routing::get,
};

use crate::error::AppError;
use crate::state::AppState;

/// JSON body extractor whose rejections are `{ error }` 400s.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query extractor whose rejections are `{ error }` 400s.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Parse the `?id=` of a `DELETE`.
fn parse_delete_id<T: FromStr>(id: Option<&str>) -> Result<T, AppError> {
    let raw = id
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing id".to_string()))?;
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid id: {raw}")))
}

/// Create the REST API router, to be nested under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tables",
            get(tables::list)
                .post(tables::create)
                .put(tables::update)
                .delete(tables::delete),
        )
        .route(
            "/menu",
            get(menu::list)
                .post(menu::create)
                .put(menu::update)
                .delete(menu::delete),
        )
        .route(
            "/orders",
            get(orders::list)
                .post(orders::create)
                .patch(orders::update_status),
        )
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tableside_core::TableId;

    use super::*;

    #[test]
    fn test_parse_delete_id() {
        let id = TableId::generate();
        let parsed: TableId = parse_delete_id(Some(&id.to_string())).unwrap();
        assert_eq!(parsed, id);

        assert!(matches!(
            parse_delete_id::<TableId>(None),
            Err(AppError::BadRequest(msg)) if msg == "Missing id"
        ));
        assert!(matches!(
            parse_delete_id::<TableId>(Some("  ")),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            parse_delete_id::<TableId>(Some("table-5")),
            Err(AppError::BadRequest(msg)) if msg.starts_with("Invalid id")
        ));
    }
}
