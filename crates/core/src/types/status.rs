//! Status enums for tables and orders, and the payment label.

use serde::{Deserialize, Serialize};

/// Whether a table currently has guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
}

impl TableStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
        }
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TableStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            _ => Err(format!("invalid table status: {s}")),
        }
    }
}

/// Order progress as seen by the cashier.
///
/// The normal lifecycle only moves forward:
///
/// ```text
/// pending ──► acknowledged ──► processed
///    └──────────────────────────▲
/// ```
///
/// `processed` is terminal. Orders are never removed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Submitted by the customer, not yet seen by the cashier.
    #[default]
    Pending,
    /// Cashier has started working on the order.
    Acknowledged,
    /// Order is done.
    Processed,
}

impl OrderStatus {
    /// Statuses that make an order "active" for its table.
    pub const ACTIVE: [Self; 2] = [Self::Pending, Self::Acknowledged];

    /// All statuses in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Acknowledged, Self::Processed];

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Acknowledged => "acknowledged",
            Self::Processed => "processed",
        }
    }

    /// Whether the forward-only lifecycle allows moving to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Acknowledged | Self::Processed)
                | (Self::Acknowledged, Self::Processed)
        )
    }

    /// Returns true for statuses in [`Self::ACTIVE`].
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Acknowledged)
    }

    /// Returns true when no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Processed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "acknowledged" => Ok(Self::Acknowledged),
            "processed" => Ok(Self::Processed),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// How the customer intends to pay. A label only; no payment is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentType {
    #[default]
    #[serde(rename = "QRIS")]
    Qris,
    #[serde(rename = "Cash")]
    Cash,
}

impl PaymentType {
    /// Wire name of the payment type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Qris => "QRIS",
            Self::Cash => "Cash",
        }
    }
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QRIS" | "qris" => Ok(Self::Qris),
            "Cash" | "cash" => Ok(Self::Cash),
            _ => Err(format!("invalid payment type: {s}")),
        }
    }
}
