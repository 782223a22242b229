//! Managed backend API clients.
//!
//! # Architecture
//!
//! The backend owns authentication and every document this app reads or
//! writes - the backend is source of truth, NO local sync, direct API calls.
//! Consumers depend on the traits here ([`AuthApi`], [`ProfileStore`],
//! [`OrderStore`]) so the session and order flows can run against in-memory
//! doubles; [`IdentityClient`] and [`DocumentClient`] are the production
//! implementations speaking JSON over HTTPS.
//!
//! # Example
//!
//! ```rust,ignore
//! use swiftdrop_client::backend::{DocumentClient, IdentityClient, AuthApi};
//!
//! let auth = IdentityClient::new(&config);
//! let documents = DocumentClient::new(&config);
//!
//! let credential = auth.authenticate(&email, "hunter2hunter2").await?;
//! let profile = documents.get_profile(&credential.uid).await?;
//! ```

mod auth;
mod documents;

pub use auth::{AuthApi, Credential, IdentityClient};
pub use documents::{DocumentClient, OrderStore, ProfileStore};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when talking to the managed backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credential check rejected the email/password pair.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Registration attempted with an email that already has a credential.
    #[error("email is already registered")]
    EmailInUse,

    /// Any other error reported by the backend.
    #[error("backend error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },
}

/// Structured error body returned by every backend endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Decode a JSON response, mapping error bodies onto [`ApiError`].
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }
    Err(decode_error(status, response).await)
}

/// Check a response that carries no body on success.
async fn decode_empty(response: reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(decode_error(status, response).await)
}

async fn decode_error(status: reqwest::StatusCode, response: reqwest::Response) -> ApiError {
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_owned(),
    };

    match message.as_str() {
        "INVALID_CREDENTIALS" | "INVALID_PASSWORD" | "ACCOUNT_NOT_FOUND" => {
            ApiError::InvalidCredentials
        }
        "EMAIL_IN_USE" | "EMAIL_EXISTS" => ApiError::EmailInUse,
        _ if status == reqwest::StatusCode::NOT_FOUND => ApiError::NotFound(message),
        _ => ApiError::Api {
            status: status.as_u16(),
            message,
        },
    }
}
