//! SwiftDrop Core - Shared types library.
//!
//! This crate provides common types used across all SwiftDrop components:
//! - `client` - Session and order-list core consumed by the UI shell
//! - `integration-tests` - End-to-end flow tests against backend doubles
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no local
//! storage. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, roles, order
//!   statuses, and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
