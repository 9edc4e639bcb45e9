//! Cart lines: menu items a customer has chosen, with quantities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::MenuItem;
use crate::types::{MenuItemId, validate_price};
use crate::validation::{ValidationError, ValidationErrors};

/// One menu item in a cart or an order.
///
/// `name` and `price` are copied from the menu item when it is added, so an
/// order keeps the price the customer saw even if the menu changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub menu_item_id: MenuItemId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
    #[serde(default)]
    pub notes: String,
}

impl CartLine {
    /// Snapshot `item` with the given quantity.
    #[must_use]
    pub fn from_menu_item(item: &MenuItem, quantity: u32) -> Self {
        Self {
            menu_item_id: item.id,
            name: item.name.clone(),
            price: item.price,
            quantity,
            notes: String::new(),
        }
    }

    /// `price * quantity`, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// `price * quantity`, or `None` if it does not fit in a `Decimal`.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    /// Check a line received from another session.
    ///
    /// # Errors
    ///
    /// Returns the failing fields: a zero quantity, an out-of-range price.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.quantity == 0 {
            errors.push(ValidationError::QuantityNotPositive);
        }
        errors.check(validate_price(self.price));
        errors.into_result(())
    }
}

/// Sum of every line total, saturating at `Decimal::MAX`.
#[must_use]
pub fn order_total(lines: &[CartLine]) -> Decimal {
    lines
        .iter()
        .fold(Decimal::ZERO, |sum, line| sum.saturating_add(line.line_total()))
}

/// Sum of every line total, or `None` on overflow.
#[must_use]
pub fn checked_order_total(lines: &[CartLine]) -> Option<Decimal> {
    lines.iter().try_fold(Decimal::ZERO, |sum, line| {
        sum.checked_add(line.checked_line_total()?)
    })
}
