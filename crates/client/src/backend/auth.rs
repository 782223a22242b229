//! Credential authentication against the backend's account endpoints.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use swiftdrop_core::{Email, UserId};

use super::{ApiError, decode, decode_empty};
use crate::config::ClientConfig;

/// A remote credential, as returned by sign-in and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// The credential's identifier; also keys the profile document.
    pub uid: UserId,
    /// Canonical email on record with the auth provider.
    pub email: Email,
}

/// Remote credential operations consumed by the session manager.
///
/// Implemented by [`IdentityClient`] in production and by in-memory doubles
/// in tests. Callers run on the single-threaded UI executor, so no `Send`
/// bound is required on the returned futures.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// Check an email/password pair and return the matching credential.
    async fn authenticate(&self, email: &Email, password: &str) -> Result<Credential, ApiError>;

    /// Create a new credential for the given email/password pair.
    async fn register(&self, email: &Email, password: &str) -> Result<Credential, ApiError>;

    /// Set the display name stored alongside the credential.
    async fn set_display_name(&self, uid: &UserId, display_name: &str) -> Result<(), ApiError>;

    /// Invalidate the remote session for the given credential.
    async fn revoke(&self, uid: &UserId) -> Result<(), ApiError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CredentialRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateAccountRequest<'a> {
    display_name: &'a str,
}

// ─────────────────────────────────────────────────────────────────────────────
// Identity Client
// ─────────────────────────────────────────────────────────────────────────────

/// Client for the backend's account endpoints.
#[derive(Clone)]
pub struct IdentityClient {
    inner: Arc<IdentityClientInner>,
}

struct IdentityClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl IdentityClient {
    /// Create a new identity client.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            inner: Arc::new(IdentityClientInner {
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
}

impl AuthApi for IdentityClient {
    async fn authenticate(&self, email: &Email, password: &str) -> Result<Credential, ApiError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("v1/sessions"))
            .json(&CredentialRequest {
                email: email.as_str(),
                password,
            })
            .send()
            .await?;

        decode(response).await
    }

    async fn register(&self, email: &Email, password: &str) -> Result<Credential, ApiError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("v1/accounts"))
            .json(&CredentialRequest {
                email: email.as_str(),
                password,
            })
            .send()
            .await?;

        decode(response).await
    }

    async fn set_display_name(&self, uid: &UserId, display_name: &str) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .patch(self.endpoint(&format!("v1/accounts/{uid}")))
            .json(&UpdateAccountRequest { display_name })
            .send()
            .await?;

        decode_empty(response).await
    }

    async fn revoke(&self, uid: &UserId) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .delete(self.endpoint(&format!("v1/sessions/{uid}")))
            .send()
            .await?;

        decode_empty(response).await
    }
}
