//! Session error types.

use thiserror::Error;

use crate::backend::ApiError;
use crate::storage::StoreError;

/// Errors that can occur during session operations.
///
/// Every failure a session operation can hit is converted into one of these
/// values before it crosses back to the UI; `Display` supplies the message
/// shown inline on the form.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] swiftdrop_core::EmailError),

    /// Invalid credentials (wrong password or no such account).
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Registration attempted with an email that already has an account.
    #[error("an account with this email already exists")]
    EmailAlreadyRegistered,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Backend call failed.
    #[error("backend error: {0}")]
    Api(#[from] ApiError),

    /// Local snapshot storage failed.
    #[error("local storage error: {0}")]
    Storage(#[from] StoreError),
}
