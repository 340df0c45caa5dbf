//! Status and payment enums for orders.
//!
//! The wire format uses lowercase strings (`"pending"`, `"cod"`, ...) to stay
//! compatible with the storefront client.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown order status string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct OrderStatusError(pub String);

/// Lifecycle status of an order.
///
/// Orders start out `Pending` and are advanced by admins. There is no
/// enforced transition graph; any status may be set from any other (matching
/// the admin panel, which offers the full list at every step).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Lowercase wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = OrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(OrderStatusError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an unknown payment method string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct PaymentMethodError(pub String);

/// Payment method selected at checkout.
///
/// Payment is never processed; the method is recorded on the order for the
/// fulfillment team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    Cod,
    /// Credit or debit card.
    Card,
    /// Unified Payments Interface.
    Upi,
}

impl PaymentMethod {
    /// Lowercase wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cod => "cod",
            Self::Card => "card",
            Self::Upi => "upi",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = PaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cod" => Ok(Self::Cod),
            "card" => Ok(Self::Card),
            "upi" => Ok(Self::Upi),
            other => Err(PaymentMethodError(other.to_owned())),
        }
    }
}
