//! Session manager.
//!
//! Holds the current-user state for the whole app, persists and restores
//! the session snapshot, and exposes the sign-in/sign-up/sign-out flows
//! that delegate to the remote auth provider and document database.
//!
//! The manager runs on the single-threaded UI executor and takes `&mut self`
//! for every operation, so calls cannot overlap. There is no internal
//! queueing and no cancellation of an in-flight request when a screen is
//! left; the next operation simply observes whatever state the last one
//! committed.

mod error;

pub use error::SessionError;

use swiftdrop_core::{Email, Role};

use crate::backend::{ApiError, AuthApi, ProfileStore};
use crate::models::User;
use crate::storage::SnapshotStore;

/// Identifiers that earlier test builds wrote into the snapshot. A restored
/// snapshot carrying one of these is corrupt and must be discarded.
pub const PLACEHOLDER_USER_IDS: &[&str] = &["test_user", "placeholder"];

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Session manager.
///
/// Generic over the backend traits so the flows can be driven by test
/// doubles; production wires in [`crate::backend::IdentityClient`],
/// [`crate::backend::DocumentClient`], and [`crate::storage::JsonFileStore`].
pub struct SessionManager<A, P, S> {
    auth: A,
    profiles: P,
    snapshots: S,
    current_user: Option<User>,
    loading: bool,
    last_error: Option<String>,
}

impl<A, P, S> SessionManager<A, P, S>
where
    A: AuthApi,
    P: ProfileStore,
    S: SnapshotStore,
{
    /// Create a new session manager in the unauthenticated state.
    #[must_use]
    pub const fn new(auth: A, profiles: P, snapshots: S) -> Self {
        Self {
            auth,
            profiles,
            snapshots,
            current_user: None,
            loading: false,
            last_error: None,
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Whether an operation is currently in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed operation, cleared by the next success.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Restore the persisted session on startup.
    ///
    /// A snapshot whose identifier is a known placeholder value is corrupt:
    /// storage is cleared and the app starts unauthenticated. The same
    /// applies when the storage read fails for any reason - restore never
    /// surfaces an error, it only decides between authenticated and not.
    pub fn restore(&mut self) {
        match self.snapshots.load() {
            Ok(Some(user)) if PLACEHOLDER_USER_IDS.contains(&user.id.as_str()) => {
                tracing::warn!(user_id = %user.id, "discarding placeholder session snapshot");
                self.discard_snapshot();
            }
            Ok(Some(user)) => {
                tracing::debug!(user_id = %user.id, "session restored");
                self.current_user = Some(user);
            }
            Ok(None) => {
                self.current_user = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "unreadable session snapshot, starting unauthenticated");
                self.discard_snapshot();
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// Delegates the credential check to the auth provider, then fetches the
    /// profile document - lazily creating a default customer profile if the
    /// credential has none - and persists it as the session snapshot.
    /// Persisted storage is untouched when any step fails.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidEmail` if the email format is invalid.
    /// Returns `SessionError::InvalidCredentials` if the email/password is wrong.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<(), SessionError> {
        self.loading = true;
        let result = self.sign_in_inner(email, password).await;
        self.finish("sign-in", &result);
        result
    }

    async fn sign_in_inner(&mut self, email: &str, password: &str) -> Result<(), SessionError> {
        let email = Email::parse(email)?;

        let credential = self
            .auth
            .authenticate(&email, password)
            .await
            .map_err(|e| match e {
                ApiError::InvalidCredentials => SessionError::InvalidCredentials,
                other => SessionError::Api(other),
            })?;

        let user = match self.profiles.get_profile(&credential.uid).await? {
            Some(user) => user,
            None => {
                tracing::info!(uid = %credential.uid, "no profile for credential, creating default");
                let user = User::from_credential(credential);
                self.profiles.put_profile(&user).await?;
                user
            }
        };

        self.snapshots.save(&user)?;
        self.current_user = Some(user);
        Ok(())
    }

    /// Register a new account.
    ///
    /// Creates the remote credential, sets its display name, creates the
    /// profile document with default empty fields, and persists the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidEmail` if the email format is invalid.
    /// Returns `SessionError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `SessionError::EmailAlreadyRegistered` if the email is taken.
    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
        role: Role,
    ) -> Result<(), SessionError> {
        self.loading = true;
        let result = self.sign_up_inner(email, password, display_name, role).await;
        self.finish("sign-up", &result);
        result
    }

    async fn sign_up_inner(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
        role: Role,
    ) -> Result<(), SessionError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        let credential = self
            .auth
            .register(&email, password)
            .await
            .map_err(|e| match e {
                ApiError::EmailInUse => SessionError::EmailAlreadyRegistered,
                other => SessionError::Api(other),
            })?;

        self.auth
            .set_display_name(&credential.uid, display_name)
            .await?;

        let user = User::new_registered(credential, display_name, role);
        self.profiles.put_profile(&user).await?;

        self.snapshots.save(&user)?;
        self.current_user = Some(user);
        Ok(())
    }

    /// Sign out.
    ///
    /// The in-memory user and the persisted snapshot are cleared first so a
    /// backend failure cannot leave a stale session behind; the remote
    /// revocation failure is still reported as the operation's error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the snapshot cannot be removed.
    /// Returns `SessionError::Api` if the remote revocation fails.
    pub async fn sign_out(&mut self) -> Result<(), SessionError> {
        self.loading = true;

        let uid = self.current_user.take().map(|user| user.id);
        let result = match (self.snapshots.clear(), uid) {
            (Err(e), _) => Err(SessionError::Storage(e)),
            (Ok(()), Some(uid)) => self.auth.revoke(&uid).await.map_err(SessionError::Api),
            (Ok(()), None) => Ok(()),
        };

        self.finish("sign-out", &result);
        result
    }

    /// Clear the snapshot without reporting failure; restore only decides
    /// between authenticated and not.
    fn discard_snapshot(&mut self) {
        if let Err(e) = self.snapshots.clear() {
            tracing::warn!(error = %e, "failed to clear discarded snapshot");
        }
        self.current_user = None;
    }

    fn finish(&mut self, operation: &str, result: &Result<(), SessionError>) {
        self.loading = false;
        match result {
            Ok(()) => {
                self.last_error = None;
                tracing::debug!(operation, "session operation succeeded");
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                tracing::warn!(operation, error = %e, "session operation failed");
            }
        }
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), SessionError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(SessionError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}
