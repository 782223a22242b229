//! Order list provider.
//!
//! Fetches a user's visible orders from the remote database and exposes them
//! as an in-memory list plus loading/error state. No pagination, no caching
//! beyond the list itself, no retry on failure - the screen retriggers the
//! fetch manually.

use thiserror::Error;

use swiftdrop_core::{OrderStatus, Role, UserId};

use crate::access::{self, Screen};
use crate::backend::{ApiError, OrderStore};
use crate::models::Order;

/// Errors that can occur while loading the order list.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// The role may not view the requested screen.
    #[error("this account is not allowed to view this screen")]
    AccessDenied,

    /// Backend read failed.
    #[error("backend error: {0}")]
    Api(#[from] ApiError),
}

/// Reactive order collection backing the order screens.
pub struct OrderListProvider<O> {
    store: O,
    orders: Vec<Order>,
    loading: bool,
    last_error: Option<String>,
}

impl<O: OrderStore> OrderListProvider<O> {
    /// Create an empty provider.
    #[must_use]
    pub const fn new(store: O) -> Self {
        Self {
            store,
            orders: Vec::new(),
            loading: false,
            last_error: None,
        }
    }

    /// The orders from the last successful fetch, in backend order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Whether a fetch is currently in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed fetch, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetch the orders visible to a screen for the given user and role.
    ///
    /// A role that may not view the screen gets `OrdersError::AccessDenied`
    /// before any backend call is made; the screen renders its unauthorized
    /// view and nothing is fetched.
    ///
    /// # Errors
    ///
    /// Returns `OrdersError::AccessDenied` or any backend failure. A failed
    /// fetch leaves the previously fetched list untouched.
    pub async fn fetch_for_screen(
        &mut self,
        screen: Screen,
        uid: &UserId,
        role: Role,
    ) -> Result<&[Order], OrdersError> {
        if !access::can_view(role, screen) {
            tracing::warn!(%uid, %role, ?screen, "screen access denied");
            self.last_error = Some(OrdersError::AccessDenied.to_string());
            return Err(OrdersError::AccessDenied);
        }

        self.fetch(uid, role).await
    }

    /// Fetch the orders visible to the given user.
    ///
    /// Customers see the orders they created; drivers see the orders
    /// assigned to them.
    ///
    /// # Errors
    ///
    /// Returns `OrdersError::Api` if the backend read fails.
    pub async fn fetch(&mut self, uid: &UserId, role: Role) -> Result<&[Order], OrdersError> {
        self.loading = true;
        let result = match role {
            Role::Customer => self.store.orders_for_customer(uid).await,
            Role::Driver => self.store.orders_for_driver(uid).await,
        };
        self.loading = false;

        match result {
            Ok(orders) => {
                tracing::debug!(%uid, count = orders.len(), "order list fetched");
                self.orders = orders;
                self.last_error = None;
                Ok(&self.orders)
            }
            Err(e) => {
                tracing::warn!(%uid, error = %e, "order list fetch failed");
                let err = OrdersError::Api(e);
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// The fetched orders whose status equals `status`, preserving the
    /// original order of the list.
    #[must_use]
    pub fn filter_by_status(&self, status: OrderStatus) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|order| order.status == status)
            .collect()
    }
}
