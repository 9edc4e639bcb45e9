//! Field-level validation errors.
//!
//! Validation runs before anything is sent to the backing store. Forms show
//! one message per field, so validators collect every failing field into
//! [`ValidationErrors`] instead of stopping at the first one.

use core::fmt;

use rust_decimal::Decimal;

/// A single invalid field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Menu item name is empty.
    #[error("name is required")]
    NameRequired,
    /// Price field is blank.
    #[error("price is required")]
    PriceRequired,
    /// Price input does not parse as a number.
    #[error("price must be a valid number (got {0:?})")]
    PriceNotANumber(String),
    /// Price is zero or negative.
    #[error("price must be greater than 0")]
    PriceNotPositive,
    /// Price exceeds the allowed maximum.
    #[error("price must be at most {max}")]
    PriceTooHigh {
        /// Maximum allowed price.
        max: Decimal,
    },
    /// Category field is blank.
    #[error("category is required")]
    CategoryRequired,
    /// Category is not one of the menu categories.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    /// Image URL is not a well-formed URL.
    #[error("image URL is not a valid URL: {0}")]
    InvalidImageUrl(String),
    /// Table number is empty.
    #[error("table number is required")]
    TableNumberRequired,
    /// Order line quantity is zero.
    #[error("quantity must be at least 1")]
    QuantityNotPositive,
    /// Order has no lines.
    #[error("an order needs at least one item")]
    ItemsRequired,
}

impl ValidationError {
    /// Name of the form field this error belongs to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NameRequired => "name",
            Self::PriceRequired
            | Self::PriceNotANumber(_)
            | Self::PriceNotPositive
            | Self::PriceTooHigh { .. } => "price",
            Self::CategoryRequired | Self::UnknownCategory(_) => "category",
            Self::InvalidImageUrl(_) => "imageUrl",
            Self::TableNumberRequired => "tableNumber",
            Self::QuantityNotPositive => "quantity",
            Self::ItemsRequired => "items",
        }
    }
}

/// One or more invalid fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Create an empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a failing field.
    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Record the error of `result`, if any, and pass its value through.
    pub fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(e);
                None
            }
        }
    }

    /// Returns true when no field failed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The recorded errors, in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Returns the first error recorded for `field`.
    #[must_use]
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field() == field)
    }

    /// Returns `Ok(value)` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "no validation errors");
        }
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}
