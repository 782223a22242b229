//! Order lifecycle status.

use serde::{Deserialize, Serialize};

/// Delivery lifecycle stage of an order.
///
/// Defined and advanced entirely by the remote backend; the client only
/// reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created, not yet claimed by a driver.
    #[default]
    Pending,
    /// A driver has accepted the order.
    Accepted,
    /// The driver has collected the package.
    PickedUp,
    /// The package is on its way to the delivery address.
    InTransit,
    /// The package has been handed over.
    Delivered,
    /// The order was cancelled before delivery.
    Cancelled,
}

impl OrderStatus {
    /// Whether the order has reached a final state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::PickedUp => "picked_up",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "picked_up" => Ok(Self::PickedUp),
            "in_transit" => Ok(Self::InTransit),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}
