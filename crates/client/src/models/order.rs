//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use swiftdrop_core::{OrderId, OrderStatus, Price, UserId};

/// Package metadata attached to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// What is being shipped (e.g., "documents", "groceries").
    pub kind: String,
    /// Package weight in kilograms.
    pub weight_kg: f64,
    /// Photo of the package taken at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A delivery order.
///
/// Owned by the remote database; read-only from this client. Status is
/// advanced entirely by the backend as the driver progresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Remote document identifier.
    pub id: OrderId,
    /// Where the driver collects the package.
    pub pickup_address: String,
    /// Where the package is delivered.
    pub delivery_address: String,
    /// Package metadata.
    pub package: PackageInfo,
    /// Quoted delivery price.
    pub price: Price,
    /// Current lifecycle stage.
    pub status: OrderStatus,
    /// Driver assigned to the order, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<UserId>,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
}
