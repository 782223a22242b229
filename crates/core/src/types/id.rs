//! Newtype IDs for type-safe entity references.
//!
//! The remote backend issues opaque string identifiers for both credentials
//! and documents. Use the `define_id!` macro to create type-safe wrappers
//! that prevent accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper around an opaque backend string.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use swiftdrop_core::define_id;
/// define_id!(UserId);
/// define_id!(OrderId);
///
/// let user_id = UserId::new("uid_8f2c");
/// let order_id = OrderId::new("ord_0051");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId);
define_id!(OrderId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        let id = UserId::new("uid_123");
        assert_eq!(id.as_str(), "uid_123");
        assert_eq!(id.to_string(), "uid_123");
        assert_eq!(id.clone().into_inner(), "uid_123");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = OrderId::new("ord_42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ord_42\"");
        let back: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
