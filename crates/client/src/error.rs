//! Error types for the client stores.

use tableside_core::{OrderStatus, TableLookup, ValidationError, ValidationErrors};
use thiserror::Error;

/// Errors talking to the backing store.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connection refused, TLS, body read...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not finish within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The backing store has no such record.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backing store answered with a non-success status.
    #[error("backing store returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response body, or the raw body.
        message: String,
    },

    /// The response body was not what the contract promises.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BackendError {
    /// Map a `reqwest` error, keeping timeouts distinguishable.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

/// Errors from catalog and order store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input failed validation; nothing was sent.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    /// Another table already uses this number.
    #[error("table number {0:?} is already in use")]
    DuplicateTableNumber(String),

    /// No record with this id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The order lifecycle does not allow this status change.
    #[error("cannot move order from {from} to {to}")]
    InvalidTransition {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },

    /// The backing store failed or rejected the write.
    #[error("backing store error: {0}")]
    Backend(BackendError),
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.into())
    }
}

impl From<BackendError> for StoreError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound(what) => Self::NotFound(what),
            other => Self::Backend(other),
        }
    }
}

/// Errors from checking out a table session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The slug or table number does not name a known table.
    #[error("invalid table: no table matches {0}")]
    InvalidTable(TableLookup),

    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// Creating the order failed; the cart is left as it was.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors reading or writing a persisted cart.
#[derive(Debug, Error)]
pub enum CartFileError {
    #[error("cart file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cart file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_not_found_maps_to_store_not_found() {
        let err: StoreError = BackendError::NotFound("order 42".into()).into();
        assert!(matches!(err, StoreError::NotFound(ref what) if what == "order 42"));
    }

    #[test]
    fn test_backend_status_stays_backend_error() {
        let err: StoreError = BackendError::Status {
            status: 500,
            message: "boom".into(),
        }
        .into();
        assert!(matches!(err, StoreError::Backend(BackendError::Status { status: 500, .. })));
    }

    #[test]
    fn test_single_validation_error_converts() {
        let err: StoreError = ValidationError::TableNumberRequired.into();
        let StoreError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert_eq!(errors.errors(), &[ValidationError::TableNumberRequired]);
    }
}
