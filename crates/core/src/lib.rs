//! Tableside Core - Shared domain types.
//!
//! This crate provides the types used across all Tableside components:
//! - `client` - Catalog/order stores, cart, and the sync loop
//! - `server` - Reference REST backing store
//! - `cli` - Operator tooling (seeding, tables, orders)
//!
//! # Architecture
//!
//! The core crate contains only types, validation, and pure functions - no I/O,
//! no HTTP clients, no storage. This keeps it lightweight and allows the same
//! validation rules to run on both sides of the REST contract.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money helpers, statuses, and table slugs
//! - [`models`] - Tables, menu items, cart lines, and orders
//! - [`validation`] - Field-level validation errors
//! - [`api`] - Request/response envelopes of the REST contract

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::{ValidationError, ValidationErrors};
