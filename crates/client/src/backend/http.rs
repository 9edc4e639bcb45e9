//! REST implementation of [`Backend`].

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tableside_core::api::{
    DeleteResponse, ErrorResponse, MenuItemResponse, MenuItemsResponse, OrderResponse,
    OrdersResponse, TableResponse, TablesResponse, UpdateMenuItemRequest, UpdateOrderStatusRequest,
    UpdateTableRequest,
};
use tableside_core::{
    MenuItem, MenuItemId, MenuItemPatch, NewOrder, Order, OrderId, OrderStatus, Table, TableId,
    TablePatch,
};
use tracing::{debug, instrument};

use super::{Backend, BackendResult};
use crate::config::ClientConfig;
use crate::error::BackendError;

/// Longest slice of a response body kept in errors and logs.
const BODY_PREVIEW_CHARS: usize = 200;

/// Client for the Tableside REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct HttpBackend {
    inner: Arc<HttpBackendInner>,
}

struct HttpBackendInner {
    client: reqwest::Client,
    /// API base without a trailing slash, e.g. `http://127.0.0.1:3000/api`.
    base: String,
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("base", &self.inner.base)
            .finish_non_exhaustive()
    }
}

impl HttpBackend {
    /// Create a client for `config.api_url` with `config.request_timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpBackendInner {
                client,
                base: config.api_url.as_str().trim_end_matches('/').to_string(),
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base)
    }

    /// Send a request and decode a 2xx body as `T`.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> BackendResult<T> {
        let response = request.send().await.map_err(BackendError::from_reqwest)?;
        let status = response.status();
        let body = response.text().await.map_err(BackendError::from_reqwest)?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %preview(&body),
                "Failed to parse API response"
            );
            BackendError::Decode(e)
        })
    }

    /// `DELETE <path>?id=<id>`, treating a missing record as already deleted.
    async fn delete(&self, path: &str, id: String) -> BackendResult<()> {
        let request = self
            .inner
            .client
            .delete(self.url(path))
            .query(&[("id", id.as_str())]);

        match self.execute::<DeleteResponse>(request).await {
            Ok(_) => Ok(()),
            Err(BackendError::NotFound(_)) => {
                debug!(path, id = %id, "delete target already gone");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

/// Turn a non-2xx response into an error, preferring the `{ error }` message.
fn status_error(status: StatusCode, body: &str) -> BackendError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map_or_else(|_| preview(body), |e| e.error);

    if status == StatusCode::NOT_FOUND {
        return BackendError::NotFound(message);
    }

    if status.is_server_error() {
        tracing::error!(status = %status, message = %message, "API returned server error");
    } else {
        tracing::warn!(status = %status, message = %message, "API rejected request");
    }
    BackendError::Status {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl Backend for HttpBackend {
    #[instrument(skip(self))]
    async fn list_tables(&self) -> BackendResult<Vec<Table>> {
        let request = self.inner.client.get(self.url("tables"));
        let response: TablesResponse = self.execute(request).await?;
        Ok(response.tables)
    }

    #[instrument(skip(self, table), fields(table_number = %table.table_number))]
    async fn create_table(&self, table: &Table) -> BackendResult<Table> {
        let request = self.inner.client.post(self.url("tables")).json(table);
        let response: TableResponse = self.execute(request).await?;
        Ok(response.table)
    }

    #[instrument(skip(self, patch))]
    async fn update_table(&self, id: TableId, patch: &TablePatch) -> BackendResult<Table> {
        let body = UpdateTableRequest {
            id,
            patch: patch.clone(),
        };
        let request = self.inner.client.put(self.url("tables")).json(&body);
        let response: TableResponse = self.execute(request).await?;
        Ok(response.table)
    }

    #[instrument(skip(self))]
    async fn delete_table(&self, id: TableId) -> BackendResult<()> {
        self.delete("tables", id.to_string()).await
    }

    #[instrument(skip(self))]
    async fn list_menu_items(&self) -> BackendResult<Vec<MenuItem>> {
        let request = self.inner.client.get(self.url("menu"));
        let response: MenuItemsResponse = self.execute(request).await?;
        Ok(response.menu_items)
    }

    #[instrument(skip(self, item), fields(name = %item.name))]
    async fn create_menu_item(&self, item: &MenuItem) -> BackendResult<MenuItem> {
        let request = self.inner.client.post(self.url("menu")).json(item);
        let response: MenuItemResponse = self.execute(request).await?;
        Ok(response.menu_item)
    }

    #[instrument(skip(self, patch))]
    async fn update_menu_item(
        &self,
        id: MenuItemId,
        patch: &MenuItemPatch,
    ) -> BackendResult<MenuItem> {
        let body = UpdateMenuItemRequest {
            id,
            patch: patch.clone(),
        };
        let request = self.inner.client.put(self.url("menu")).json(&body);
        let response: MenuItemResponse = self.execute(request).await?;
        Ok(response.menu_item)
    }

    #[instrument(skip(self))]
    async fn delete_menu_item(&self, id: MenuItemId) -> BackendResult<()> {
        self.delete("menu", id.to_string()).await
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> BackendResult<Vec<Order>> {
        let request = self.inner.client.get(self.url("orders"));
        let response: OrdersResponse = self.execute(request).await?;
        Ok(response.orders)
    }

    #[instrument(skip(self, order), fields(order_id = %order.id, table_number = %order.table_number))]
    async fn create_order(&self, order: &NewOrder) -> BackendResult<Order> {
        let request = self.inner.client.post(self.url("orders")).json(order);
        let response: OrderResponse = self.execute(request).await?;
        Ok(response.order)
    }

    #[instrument(skip(self))]
    async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> BackendResult<Order> {
        let body = UpdateOrderStatusRequest { id, status };
        let request = self.inner.client.patch(self.url("orders")).json(&body);
        let response: OrderResponse = self.execute(request).await?;
        Ok(response.order)
    }
}
