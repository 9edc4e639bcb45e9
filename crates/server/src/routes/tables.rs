//! Table routes.

use axum::{Json, extract::State, http::StatusCode};
use tableside_core::{
    Table, TableId, normalize_table_number,
    api::{DeleteQuery, DeleteResponse, TableResponse, TablesResponse, UpdateTableRequest},
};
use tracing::{info, instrument};

use super::{ApiJson, ApiQuery, parse_delete_id};
use crate::error::Result;
use crate::state::AppState;

/// GET /api/tables
///
/// # Errors
///
/// Returns `AppError` if the repository fails.
pub async fn list(State(state): State<AppState>) -> Result<Json<TablesResponse>> {
    let tables = state.repository().list_tables().await?;
    Ok(Json(TablesResponse { tables }))
}

/// POST /api/tables
///
/// The id and slug are the caller's; only the table number is normalized.
///
/// # Errors
///
/// 400 for a blank or duplicate table number.
#[instrument(skip(state, table), fields(table_number = %table.table_number))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(mut table): ApiJson<Table>,
) -> Result<(StatusCode, Json<TableResponse>)> {
    table.table_number = normalize_table_number(&table.table_number)?;
    let table = state.repository().insert_table(table).await?;
    info!(table_id = %table.id, slug = %table.slug, "Table created");
    Ok((StatusCode::CREATED, Json(TableResponse { table })))
}

/// PUT /api/tables
///
/// # Errors
///
/// 400 for a blank or duplicate table number, 404 for an unknown id.
#[instrument(skip(state, request), fields(table_id = %request.id))]
pub async fn update(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateTableRequest>,
) -> Result<Json<TableResponse>> {
    let patch = request.patch.normalized()?;
    let table = state.repository().update_table(request.id, &patch).await?;
    info!("Table updated");
    Ok(Json(TableResponse { table }))
}

/// DELETE /api/tables?id=
///
/// # Errors
///
/// 400 for a missing or malformed id, 404 for an unknown one.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DeleteQuery>,
) -> Result<Json<DeleteResponse>> {
    let id: TableId = parse_delete_id(query.id.as_deref())?;
    state.repository().delete_table(id).await?;
    info!(table_id = %id, "Table deleted");
    Ok(Json(DeleteResponse { success: true }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use tableside_core::{Slug, TableStatus, generate_slug};

    use crate::routes::test_support::{app, field, send, send_json};

    use super::*;

    #[tokio::test]
    async fn test_create_and_list() {
        let app = app();
        let table = Table::new(" 5 ", generate_slug());
        let (status, body) = send_json(&app, "POST", "/api/tables", &table).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Table = field(&body, "table");
        assert_eq!(created.id, table.id);
        assert_eq!(created.slug, table.slug);
        assert_eq!(created.table_number, "5");

        let (status, body) = send(&app, "GET", "/api/tables", None).await;
        assert_eq!(status, StatusCode::OK);
        let tables: Vec<Table> = field(&body, "tables");
        assert_eq!(tables, vec![created]);
    }

    #[tokio::test]
    async fn test_duplicate_number_rejected() {
        let app = app();
        send_json(&app, "POST", "/api/tables", &Table::new("5", generate_slug())).await;
        let (status, body) =
            send_json(&app, "POST", "/api/tables", &Table::new("5", generate_slug())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("already exists"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_400() {
        let app = app();
        let truncated = Some("{\"tableNumber\":".to_string());
        let (status, body) = send(&app, "POST", "/api/tables", truncated).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, _) = send_json(
            &app,
            "POST",
            "/api/tables",
            &json!({ "tableNumber": "5", "slug": "BAD SLUG", "id": TableId::generate() }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_merges_patch_and_keeps_slug() {
        let app = app();
        let table = Table::new("5", Slug::parse("k3x9p2aa").unwrap());
        send_json(&app, "POST", "/api/tables", &table).await;

        let (status, body) = send_json(
            &app,
            "PUT",
            "/api/tables",
            &json!({ "id": table.id, "status": "occupied" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let updated: Table = field(&body, "table");
        assert_eq!(updated.status, TableStatus::Occupied);
        assert_eq!(updated.table_number, "5");
        assert_eq!(updated.slug.as_str(), "k3x9p2aa");

        let (status, _) = send_json(
            &app,
            "PUT",
            "/api/tables",
            &json!({ "id": table.id, "tableNumber": "  " }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send_json(
            &app,
            "PUT",
            "/api/tables",
            &json!({ "id": TableId::generate(), "tableNumber": "9" }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete() {
        let app = app();
        let table = Table::new("5", generate_slug());
        send_json(&app, "POST", "/api/tables", &table).await;

        let (status, _) = send(&app, "DELETE", "/api/tables", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let uri = format!("/api/tables?id={}", table.id);
        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }
}
