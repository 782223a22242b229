//! Document reads and writes against the backend database.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Deserialize;

use swiftdrop_core::UserId;

use super::{ApiError, decode, decode_empty};
use crate::config::ClientConfig;
use crate::models::{Order, User};

/// Profile document operations consumed by the session manager.
#[allow(async_fn_in_trait)]
pub trait ProfileStore {
    /// Fetch the profile document keyed by the credential identifier.
    async fn get_profile(&self, uid: &UserId) -> Result<Option<User>, ApiError>;

    /// Create or replace the profile document.
    async fn put_profile(&self, user: &User) -> Result<(), ApiError>;
}

/// Order document reads consumed by the order list provider.
#[allow(async_fn_in_trait)]
pub trait OrderStore {
    /// Orders created by the given customer, newest first.
    async fn orders_for_customer(&self, uid: &UserId) -> Result<Vec<Order>, ApiError>;

    /// Orders assigned to the given driver, newest first.
    async fn orders_for_driver(&self, uid: &UserId) -> Result<Vec<Order>, ApiError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct OrdersResponse {
    orders: Vec<Order>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Document Client
// ─────────────────────────────────────────────────────────────────────────────

/// Client for the backend's document endpoints.
#[derive(Clone)]
pub struct DocumentClient {
    inner: Arc<DocumentClientInner>,
}

struct DocumentClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl DocumentClient {
    /// Create a new document client.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            inner: Arc::new(DocumentClientInner {
                client: reqwest::Client::new(),
                base_url: config
                    .api_base_url
                    .as_str()
                    .trim_end_matches('/')
                    .to_owned(),
                api_key: config.api_key.expose_secret().to_owned(),
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{path}?key={}",
            self.inner.base_url, self.inner.api_key
        )
    }

    fn endpoint_with(&self, path: &str, param: &str, value: &UserId) -> String {
        format!(
            "{}/{path}?key={}&{param}={value}",
            self.inner.base_url, self.inner.api_key
        )
    }
}

impl ProfileStore for DocumentClient {
    async fn get_profile(&self, uid: &UserId) -> Result<Option<User>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint(&format!("v1/profiles/{uid}")))
            .send()
            .await?;

        match decode::<User>(response).await {
            Ok(user) => Ok(Some(user)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(other) => Err(other),
        }
    }

    async fn put_profile(&self, user: &User) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .put(self.endpoint(&format!("v1/profiles/{}", user.id)))
            .json(user)
            .send()
            .await?;

        decode_empty(response).await
    }
}

impl OrderStore for DocumentClient {
    async fn orders_for_customer(&self, uid: &UserId) -> Result<Vec<Order>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint_with("v1/orders", "customer", uid))
            .send()
            .await?;

        let body: OrdersResponse = decode(response).await?;
        Ok(body.orders)
    }

    async fn orders_for_driver(&self, uid: &UserId) -> Result<Vec<Order>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint_with("v1/orders", "driver", uid))
            .send()
            .await?;

        let body: OrdersResponse = decode(response).await?;
        Ok(body.orders)
    }
}
