//! End-to-end session flows against in-memory backend doubles.
//!
//! Covers startup restore, sign-in (including lazy profile creation),
//! sign-up, and sign-out, asserting both the in-memory state and the
//! persisted snapshot after each flow.

use swiftdrop_client::models::User;
use swiftdrop_client::session::{PLACEHOLDER_USER_IDS, SessionError, SessionManager};
use swiftdrop_client::storage::{JsonFileStore, SnapshotStore};
use swiftdrop_core::{Email, Role, UserId};

use swiftdrop_integration_tests::{FakeBackend, MemorySnapshots, unique_email};

fn manager(
    backend: &FakeBackend,
    snapshots: &MemorySnapshots,
) -> SessionManager<FakeBackend, FakeBackend, MemorySnapshots> {
    SessionManager::new(backend.clone(), backend.clone(), snapshots.clone())
}

fn profile_for(uid: &UserId, email: &str, name: &str, role: Role) -> User {
    let mut user = User::from_credential(swiftdrop_client::backend::Credential {
        uid: uid.clone(),
        email: Email::parse(email).expect("test email is valid"),
    });
    user.display_name = name.to_owned();
    user.role = role;
    user
}

// ============================================================================
// Restore
// ============================================================================

#[tokio::test]
async fn restore_with_no_snapshot_starts_unauthenticated() {
    let backend = FakeBackend::new();
    let snapshots = MemorySnapshots::new();
    let mut session = manager(&backend, &snapshots);

    session.restore();

    assert!(session.current_user().is_none());
    assert!(session.last_error().is_none());
}

#[tokio::test]
async fn restore_with_valid_snapshot_signs_user_in() {
    let backend = FakeBackend::new();
    let snapshots = MemorySnapshots::new();
    let email = unique_email();
    let uid = backend.seed_account(&email, "hunter2hunter2");
    let user = profile_for(&uid, &email, "Maya R", Role::Customer);
    snapshots.seed(user.clone());

    let mut session = manager(&backend, &snapshots);
    session.restore();

    assert_eq!(session.current_user(), Some(&user));
}

#[tokio::test]
async fn restore_with_placeholder_id_clears_storage() {
    let backend = FakeBackend::new();
    let snapshots = MemorySnapshots::new();
    let placeholder = PLACEHOLDER_USER_IDS
        .first()
        .expect("at least one placeholder id");
    let user = profile_for(
        &UserId::new(*placeholder),
        "stale@example.com",
        "Stale",
        Role::Customer,
    );
    snapshots.seed(user);

    let mut session = manager(&backend, &snapshots);
    session.restore();

    assert!(session.current_user().is_none());
    assert!(snapshots.persisted().is_none(), "snapshot must be cleared");
}

#[tokio::test]
async fn restore_with_unreadable_snapshot_clears_storage() {
    // A corrupt on-disk file exercises the JsonFileStore error path end to end.
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ not json").expect("write corrupt snapshot");
    let store = JsonFileStore::at_path(&path);

    let backend = FakeBackend::new();
    let mut session = SessionManager::new(backend.clone(), backend, store.clone());
    session.restore();

    assert!(session.current_user().is_none());
    assert!(
        store.load().expect("file was removed").is_none(),
        "corrupt snapshot must be discarded"
    );
}

// ============================================================================
// Sign-in
// ============================================================================

#[tokio::test]
async fn sign_in_yields_user_matching_credential_id() {
    let backend = FakeBackend::new();
    let snapshots = MemorySnapshots::new();
    let email = unique_email();
    let uid = backend.seed_account(&email, "hunter2hunter2");
    backend.seed_profile(profile_for(&uid, &email, "Maya R", Role::Customer));

    let mut session = manager(&backend, &snapshots);
    session
        .sign_in(&email, "hunter2hunter2")
        .await
        .expect("sign-in succeeds");

    let user = session.current_user().expect("signed in");
    assert_eq!(user.id, uid);
    assert_eq!(user.display_name, "Maya R");
    assert_eq!(snapshots.persisted().as_ref(), Some(user));
    assert!(session.last_error().is_none());
    assert!(!session.is_loading());
}

#[tokio::test]
async fn sign_in_lazily_creates_missing_profile() {
    let backend = FakeBackend::new();
    let snapshots = MemorySnapshots::new();
    let email = unique_email();
    let uid = backend.seed_account(&email, "hunter2hunter2");
    // No profile document seeded.

    let mut session = manager(&backend, &snapshots);
    session
        .sign_in(&email, "hunter2hunter2")
        .await
        .expect("sign-in succeeds");

    let created = backend.profile(&uid).expect("profile was created");
    assert_eq!(created.role, Role::Customer);
    assert_eq!(
        created.display_name,
        email.split('@').next().expect("email has local part")
    );
    assert_eq!(session.current_user(), Some(&created));
    assert_eq!(snapshots.persisted(), Some(created));
}

#[tokio::test]
async fn sign_in_with_wrong_password_leaves_storage_untouched() {
    let backend = FakeBackend::new();
    let snapshots = MemorySnapshots::new();
    let email = unique_email();
    backend.seed_account(&email, "hunter2hunter2");

    let mut session = manager(&backend, &snapshots);
    let result = session.sign_in(&email, "wrong-password").await;

    assert!(matches!(result, Err(SessionError::InvalidCredentials)));
    assert!(session.current_user().is_none());
    assert!(snapshots.persisted().is_none());
    assert_eq!(session.last_error(), Some("invalid email or password"));
}

#[tokio::test]
async fn sign_in_with_malformed_email_fails_locally() {
    let backend = FakeBackend::new();
    let snapshots = MemorySnapshots::new();
    let mut session = manager(&backend, &snapshots);

    let result = session.sign_in("not-an-email", "hunter2hunter2").await;

    assert!(matches!(result, Err(SessionError::InvalidEmail(_))));
    assert!(snapshots.persisted().is_none());
}

// ============================================================================
// Sign-up
// ============================================================================

#[tokio::test]
async fn sign_up_creates_credential_profile_and_snapshot() {
    let backend = FakeBackend::new();
    let snapshots = MemorySnapshots::new();
    let email = unique_email();

    let mut session = manager(&backend, &snapshots);
    session
        .sign_up(&email, "hunter2hunter2", "Noor A", Role::Driver)
        .await
        .expect("sign-up succeeds");

    let user = session.current_user().expect("signed in");
    assert_eq!(user.email.as_str(), email);
    assert_eq!(user.display_name, "Noor A");
    assert_eq!(user.role, Role::Driver);
    assert!(user.phone.is_none());
    assert!(user.favorite_drivers.is_empty());

    assert_eq!(backend.account_display_name(&email).as_deref(), Some("Noor A"));
    assert_eq!(backend.profile(&user.id).as_ref(), Some(user));
    assert_eq!(snapshots.persisted().as_ref(), Some(user));
}

#[tokio::test]
async fn sign_up_with_taken_email_is_rejected() {
    let backend = FakeBackend::new();
    let snapshots = MemorySnapshots::new();
    let email = unique_email();
    backend.seed_account(&email, "hunter2hunter2");

    let mut session = manager(&backend, &snapshots);
    let result = session
        .sign_up(&email, "another-password", "Noor A", Role::Customer)
        .await;

    assert!(matches!(result, Err(SessionError::EmailAlreadyRegistered)));
    assert!(session.current_user().is_none());
    assert!(snapshots.persisted().is_none());
}

#[tokio::test]
async fn sign_up_with_short_password_never_reaches_backend() {
    let backend = FakeBackend::new();
    let snapshots = MemorySnapshots::new();
    let email = unique_email();

    let mut session = manager(&backend, &snapshots);
    let result = session.sign_up(&email, "short", "Noor A", Role::Customer).await;

    assert!(matches!(result, Err(SessionError::WeakPassword(_))));
    assert!(!backend.has_account(&email));
}

// ============================================================================
// Sign-out
// ============================================================================

#[tokio::test]
async fn sign_out_clears_state_and_revokes_remote_session() {
    let backend = FakeBackend::new();
    let snapshots = MemorySnapshots::new();
    let email = unique_email();
    let uid = backend.seed_account(&email, "hunter2hunter2");
    backend.seed_profile(profile_for(&uid, &email, "Maya R", Role::Customer));

    let mut session = manager(&backend, &snapshots);
    session
        .sign_in(&email, "hunter2hunter2")
        .await
        .expect("sign-in succeeds");
    session.sign_out().await.expect("sign-out succeeds");

    assert!(session.current_user().is_none());
    assert!(snapshots.persisted().is_none());
    assert_eq!(backend.revoked(), vec![uid]);
}

#[tokio::test]
async fn sign_out_clears_local_state_even_when_revocation_fails() {
    let backend = FakeBackend::new();
    let snapshots = MemorySnapshots::new();
    let email = unique_email();
    let uid = backend.seed_account(&email, "hunter2hunter2");
    backend.seed_profile(profile_for(&uid, &email, "Maya R", Role::Customer));

    let mut session = manager(&backend, &snapshots);
    session
        .sign_in(&email, "hunter2hunter2")
        .await
        .expect("sign-in succeeds");

    backend.fail_revoke();
    let result = session.sign_out().await;

    assert!(matches!(result, Err(SessionError::Api(_))));
    assert!(session.current_user().is_none(), "in-memory user cleared");
    assert!(snapshots.persisted().is_none(), "snapshot cleared");
}

#[tokio::test]
async fn sign_out_when_not_signed_in_is_a_no_op() {
    let backend = FakeBackend::new();
    let snapshots = MemorySnapshots::new();
    let mut session = manager(&backend, &snapshots);

    session.sign_out().await.expect("nothing to do");

    assert!(session.current_user().is_none());
    assert!(backend.revoked().is_empty());
}
