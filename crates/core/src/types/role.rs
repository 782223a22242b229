//! User roles.

use serde::{Deserialize, Serialize};

/// Account role gating which screens and data a user may access.
///
/// The role is stored on the profile document and never changes after
/// registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Places orders and tracks their delivery.
    #[default]
    Customer,
    /// Picks up and delivers assigned orders.
    Driver,
}

impl Role {
    /// Whether this role is the ordering side of the marketplace.
    #[must_use]
    pub const fn is_customer(self) -> bool {
        matches!(self, Self::Customer)
    }

    /// Whether this role is the delivering side of the marketplace.
    #[must_use]
    pub const fn is_driver(self) -> bool {
        matches!(self, Self::Driver)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Driver => write!(f, "driver"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "driver" => Ok(Self::Driver),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}
