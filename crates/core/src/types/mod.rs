//! Core types for Tableside.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod slug;
pub mod status;

pub use id::*;
pub use price::{MAX_PRICE, format_rupiah, parse_price, validate_price};
pub use slug::{
    SLUG_ALPHABET, SLUG_LENGTH, Slug, SlugError, generate_slug, generate_slug_with,
    generate_unique_slug,
};
pub use status::*;
