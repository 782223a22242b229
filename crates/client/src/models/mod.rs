//! Domain models for the SwiftDrop client.
//!
//! These types represent validated domain objects owned by the remote
//! document database and read (mostly read-only) by this client.

pub mod order;
pub mod user;

pub use order::{Order, PackageInfo};
pub use user::User;
