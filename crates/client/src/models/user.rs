//! User domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use swiftdrop_core::{Email, Role, UserId};

use crate::backend::Credential;

/// A SwiftDrop user profile.
///
/// The profile document lives in the remote database under the credential's
/// identifier; the same shape is persisted locally as the session snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Remote credential identifier (also the profile document key).
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Name shown on orders and in the app header.
    pub display_name: String,
    /// Account role, fixed at registration.
    pub role: Role,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Default pickup/delivery address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Profile photo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Drivers this customer has starred.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub favorite_drivers: Vec<UserId>,
}

impl User {
    /// Build a fresh profile for a credential that has none yet.
    ///
    /// Used when sign-in succeeds against the auth provider but no profile
    /// document exists. The display name falls back to the email local part
    /// and the role defaults to customer.
    #[must_use]
    pub fn from_credential(credential: Credential) -> Self {
        let display_name = credential.email.local_part().to_owned();
        Self {
            id: credential.uid,
            email: credential.email,
            display_name,
            role: Role::Customer,
            created_at: Utc::now(),
            phone: None,
            address: None,
            photo_url: None,
            favorite_drivers: Vec::new(),
        }
    }

    /// Build a profile for a newly registered credential.
    #[must_use]
    pub fn new_registered(credential: Credential, display_name: &str, role: Role) -> Self {
        Self {
            id: credential.uid,
            email: credential.email,
            display_name: display_name.to_owned(),
            role,
            created_at: Utc::now(),
            phone: None,
            address: None,
            photo_url: None,
            favorite_drivers: Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn credential() -> Credential {
        Credential {
            uid: UserId::new("uid_77"),
            email: Email::parse("maya@example.com").unwrap(),
        }
    }

    #[test]
    fn test_from_credential_defaults() {
        let user = User::from_credential(credential());
        assert_eq!(user.id, UserId::new("uid_77"));
        assert_eq!(user.display_name, "maya");
        assert_eq!(user.role, Role::Customer);
        assert!(user.phone.is_none());
        assert!(user.favorite_drivers.is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let user = User::new_registered(credential(), "Maya R", Role::Driver);
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_optional_fields_omitted_from_snapshot() {
        let user = User::from_credential(credential());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("phone"));
        assert!(!json.contains("favorite_drivers"));
    }
}
