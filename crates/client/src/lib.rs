//! SwiftDrop client core.
//!
//! This crate is the non-visual core of the SwiftDrop courier marketplace
//! app: session management, order listing, and the thin data shaping around
//! the managed backend that owns authentication and all documents. The UI
//! shell renders screens and calls into [`session::SessionManager`] and
//! [`orders::OrderListProvider`]; every success/failure result here drives
//! conditional navigation or inline error display there.
//!
//! # Architecture
//!
//! - The backend is reached through the traits in [`backend`]
//!   ([`backend::AuthApi`], [`backend::ProfileStore`],
//!   [`backend::OrderStore`]), so the flows can run against test doubles.
//! - [`storage::SnapshotStore`] persists at most one serialized [`models::User`]
//!   snapshot on the device; it is replaced wholesale on sign-in and deleted
//!   wholesale on sign-out.
//! - No retries, no request cancellation, no caching beyond the in-memory
//!   order list. The backend is the sole arbiter of consistency.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod access;
pub mod backend;
pub mod config;
pub mod models;
pub mod orders;
pub mod session;
pub mod storage;

pub use config::{ClientConfig, ConfigError};
pub use orders::{OrderListProvider, OrdersError};
pub use session::{SessionError, SessionManager};
