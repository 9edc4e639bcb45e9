//! Request and response envelopes of the REST contract.
//!
//! Every collection endpoint wraps its payload in a named field
//! (`{ "tables": [...] }`, `{ "order": {...} }`). Errors are `{ "error": "..." }`.

use serde::{Deserialize, Serialize};

use crate::models::{MenuItem, MenuItemPatch, Order, Table, TablePatch};
use crate::types::{MenuItemId, OrderId, OrderStatus, TableId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablesResponse {
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableResponse {
    pub table: Table,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemsResponse {
    pub menu_items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemResponse {
    pub menu_item: MenuItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order: Order,
}

/// Body of a successful `DELETE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `PUT /tables` body: the id plus the changed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTableRequest {
    pub id: TableId,
    #[serde(flatten)]
    pub patch: TablePatch,
}

/// `PUT /menu` body: the id plus the changed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMenuItemRequest {
    pub id: MenuItemId,
    #[serde(flatten)]
    pub patch: MenuItemPatch,
}

/// `PATCH /orders` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub id: OrderId,
    pub status: OrderStatus,
}

/// `?id=` query of a `DELETE`. Missing ids are a 400, so the field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}
