//! Integration test support for the SwiftDrop client.
//!
//! Provides in-memory doubles of the managed backend and of device storage
//! so the session and order flows can be driven end to end without a
//! network. The doubles are cheap cloneable handles over shared state, so a
//! test can hand one clone to the component under test and keep another for
//! assertions.
//!
//! # Test Categories
//!
//! - `session_flows` - restore/sign-in/sign-up/sign-out against the doubles
//! - `order_flows` - order listing, filtering, and screen gating

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use swiftdrop_client::backend::{ApiError, AuthApi, Credential, OrderStore, ProfileStore};
use swiftdrop_client::models::{Order, PackageInfo, User};
use swiftdrop_client::storage::{SnapshotStore, StoreError};
use swiftdrop_core::{CurrencyCode, Email, OrderId, OrderStatus, Price, UserId};

/// A registered credential inside the fake backend.
#[derive(Debug, Clone)]
struct AccountRecord {
    uid: UserId,
    password: String,
    display_name: Option<String>,
}

#[derive(Debug, Default)]
struct BackendState {
    accounts: HashMap<String, AccountRecord>,
    profiles: HashMap<UserId, User>,
    orders: Vec<Order>,
    revoked: Vec<UserId>,
    order_fetches: usize,
    fail_revoke: bool,
    fail_orders: bool,
}

/// In-memory double of the managed backend.
///
/// Implements [`AuthApi`], [`ProfileStore`], and [`OrderStore`] with the
/// same observable contract as the production clients: invalid credentials
/// and duplicate emails map to the same `ApiError` variants.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().expect("backend state lock poisoned")
    }

    /// Register a credential directly, bypassing the sign-up flow.
    pub fn seed_account(&self, email: &str, password: &str) -> UserId {
        let uid = UserId::new(format!("uid_{}", uuid::Uuid::new_v4().simple()));
        self.state().accounts.insert(
            email.to_owned(),
            AccountRecord {
                uid: uid.clone(),
                password: password.to_owned(),
                display_name: None,
            },
        );
        uid
    }

    /// Insert a profile document directly.
    pub fn seed_profile(&self, user: User) {
        self.state().profiles.insert(user.id.clone(), user);
    }

    /// Insert order documents directly.
    pub fn seed_orders(&self, orders: impl IntoIterator<Item = Order>) {
        self.state().orders.extend(orders);
    }

    /// Make `revoke` fail with a backend error.
    pub fn fail_revoke(&self) {
        self.state().fail_revoke = true;
    }

    /// Make order reads fail with a backend error.
    pub fn fail_orders(&self) {
        self.state().fail_orders = true;
    }

    /// Profile document for the given credential, if any.
    #[must_use]
    pub fn profile(&self, uid: &UserId) -> Option<User> {
        self.state().profiles.get(uid).cloned()
    }

    /// Display name stored on the credential, if any.
    #[must_use]
    pub fn account_display_name(&self, email: &str) -> Option<String> {
        self.state()
            .accounts
            .get(email)
            .and_then(|record| record.display_name.clone())
    }

    /// Whether any credential exists for the email.
    #[must_use]
    pub fn has_account(&self, email: &str) -> bool {
        self.state().accounts.contains_key(email)
    }

    /// Credentials whose sessions have been revoked, in revocation order.
    #[must_use]
    pub fn revoked(&self) -> Vec<UserId> {
        self.state().revoked.clone()
    }

    /// How many order reads reached the backend.
    #[must_use]
    pub fn order_fetch_count(&self) -> usize {
        self.state().order_fetches
    }
}

impl AuthApi for FakeBackend {
    async fn authenticate(&self, email: &Email, password: &str) -> Result<Credential, ApiError> {
        let state = self.state();
        let record = state
            .accounts
            .get(email.as_str())
            .ok_or(ApiError::InvalidCredentials)?;
        if record.password != password {
            return Err(ApiError::InvalidCredentials);
        }
        Ok(Credential {
            uid: record.uid.clone(),
            email: email.clone(),
        })
    }

    async fn register(&self, email: &Email, password: &str) -> Result<Credential, ApiError> {
        let mut state = self.state();
        if state.accounts.contains_key(email.as_str()) {
            return Err(ApiError::EmailInUse);
        }
        let uid = UserId::new(format!("uid_{}", uuid::Uuid::new_v4().simple()));
        state.accounts.insert(
            email.as_str().to_owned(),
            AccountRecord {
                uid: uid.clone(),
                password: password.to_owned(),
                display_name: None,
            },
        );
        Ok(Credential {
            uid,
            email: email.clone(),
        })
    }

    async fn set_display_name(&self, uid: &UserId, display_name: &str) -> Result<(), ApiError> {
        let mut state = self.state();
        let record = state
            .accounts
            .values_mut()
            .find(|record| &record.uid == uid)
            .ok_or_else(|| ApiError::NotFound(format!("account {uid}")))?;
        record.display_name = Some(display_name.to_owned());
        Ok(())
    }

    async fn revoke(&self, uid: &UserId) -> Result<(), ApiError> {
        let mut state = self.state();
        if state.fail_revoke {
            return Err(ApiError::Api {
                status: 503,
                message: "SERVICE_UNAVAILABLE".to_owned(),
            });
        }
        state.revoked.push(uid.clone());
        Ok(())
    }
}

impl ProfileStore for FakeBackend {
    async fn get_profile(&self, uid: &UserId) -> Result<Option<User>, ApiError> {
        Ok(self.state().profiles.get(uid).cloned())
    }

    async fn put_profile(&self, user: &User) -> Result<(), ApiError> {
        self.state().profiles.insert(user.id.clone(), user.clone());
        Ok(())
    }
}

impl OrderStore for FakeBackend {
    async fn orders_for_customer(&self, uid: &UserId) -> Result<Vec<Order>, ApiError> {
        let mut state = self.state();
        state.order_fetches += 1;
        if state.fail_orders {
            return Err(ApiError::Api {
                status: 500,
                message: "INTERNAL".to_owned(),
            });
        }
        // The fake has no creator field; every seeded order belongs to the
        // one customer under test.
        let _ = uid;
        Ok(state.orders.clone())
    }

    async fn orders_for_driver(&self, uid: &UserId) -> Result<Vec<Order>, ApiError> {
        let mut state = self.state();
        state.order_fetches += 1;
        if state.fail_orders {
            return Err(ApiError::Api {
                status: 500,
                message: "INTERNAL".to_owned(),
            });
        }
        Ok(state
            .orders
            .iter()
            .filter(|order| order.driver_id.as_ref() == Some(uid))
            .cloned()
            .collect())
    }
}

/// In-memory double of device snapshot storage.
#[derive(Clone, Default)]
pub struct MemorySnapshots {
    slot: Arc<Mutex<Option<User>>>,
}

impl MemorySnapshots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a persisted snapshot, as if a previous run saved it.
    pub fn seed(&self, user: User) {
        *self.slot.lock().expect("snapshot lock poisoned") = Some(user);
    }

    /// The currently persisted snapshot.
    #[must_use]
    pub fn persisted(&self) -> Option<User> {
        self.slot.lock().expect("snapshot lock poisoned").clone()
    }
}

impl SnapshotStore for MemorySnapshots {
    fn load(&self) -> Result<Option<User>, StoreError> {
        Ok(self.persisted())
    }

    fn save(&self, user: &User) -> Result<(), StoreError> {
        *self.slot.lock().expect("snapshot lock poisoned") = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().expect("snapshot lock poisoned") = None;
        Ok(())
    }
}

/// A unique email per test run, so seeded accounts never collide.
#[must_use]
pub fn unique_email() -> String {
    format!("rider-{}@example.com", uuid::Uuid::new_v4().simple())
}

/// Build a test order with the given status and optional assigned driver.
#[must_use]
pub fn order(id: &str, status: OrderStatus, driver_id: Option<&UserId>) -> Order {
    Order {
        id: OrderId::new(id),
        pickup_address: "12 Canal St".to_owned(),
        delivery_address: "88 Hill Rd".to_owned(),
        package: PackageInfo {
            kind: "documents".to_owned(),
            weight_kg: 0.4,
            image_url: None,
        },
        price: Price::from_minor_units(1299, CurrencyCode::USD),
        status,
        driver_id: driver_id.cloned(),
        created_at: chrono::Utc::now(),
    }
}
