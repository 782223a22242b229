//! Role-based screen gating.
//!
//! The UI shell asks `can_view` before rendering a screen or triggering its
//! data fetch; a denied screen renders its unauthorized view instead.

use swiftdrop_core::Role;

/// Screens the client can navigate to after sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Customer order history list.
    Orders,
    /// Single order with status and driver details.
    OrderDetail,
    /// Profile editing.
    Profile,
    /// App settings.
    Settings,
}

/// Whether the given role may view the given screen.
///
/// Orders and Profile are customer surfaces; drivers get their own home
/// screen fed by [`crate::backend::OrderStore::orders_for_driver`] and must
/// not reach the customer screens. Settings is open to both roles.
#[must_use]
pub const fn can_view(role: Role, screen: Screen) -> bool {
    match screen {
        Screen::Orders | Screen::OrderDetail | Screen::Profile => role.is_customer(),
        Screen::Settings => true,
    }
}
