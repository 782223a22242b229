//! Local session snapshot storage.
//!
//! The device keeps at most one serialized [`User`] snapshot, stored under a
//! fixed key in a single JSON file. The snapshot is replaced wholesale on
//! sign-in and deleted wholesale on sign-out; there is no other local state.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ClientConfig;
use crate::models::User;

/// Fixed key the session snapshot is stored under.
pub const SNAPSHOT_KEY: &str = "session_user";

/// Errors from local snapshot storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the snapshot file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot file exists but does not decode.
    #[error("corrupt snapshot: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Device-local key-value storage holding the session snapshot.
///
/// Implemented by [`JsonFileStore`] in production and by in-memory doubles
/// in tests. Operations are single, unsynchronized reads/writes; the session
/// manager is the only caller.
pub trait SnapshotStore {
    /// Load the persisted snapshot, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be read or decoded. The
    /// session manager treats any error as a corrupt snapshot.
    fn load(&self) -> Result<Option<User>, StoreError>;

    /// Replace the snapshot wholesale.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be written.
    fn save(&self, user: &User) -> Result<(), StoreError>;

    /// Delete the snapshot wholesale. A no-op when none exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file cannot be removed.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Snapshot store backed by one JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store at the configured snapshot path.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            path: config.snapshot_path.clone(),
        }
    }

    /// Create a store at an explicit path.
    #[must_use]
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<User>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut entries: BTreeMap<String, User> = serde_json::from_str(&contents)?;
        Ok(entries.remove(SNAPSHOT_KEY))
    }

    fn save(&self, user: &User) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let entries = BTreeMap::from([(SNAPSHOT_KEY, user)]);
        fs::write(&self.path, serde_json::to_vec_pretty(&entries)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::Credential;
    use swiftdrop_core::{Email, UserId};

    fn sample_user() -> User {
        User::from_credential(Credential {
            uid: UserId::new("uid_store_test"),
            email: Email::parse("store@example.com").unwrap(),
        })
    }

    fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::at_path(dir.path().join("session.json"))
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let user = sample_user();

        store.save(&user).unwrap();
        assert_eq!(store.load().unwrap(), Some(user));
    }

    #[test]
    fn test_save_replaces_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&sample_user()).unwrap();
        let mut replacement = sample_user();
        replacement.display_name = "Replacement".to_owned();
        store.save(&replacement).unwrap();

        assert_eq!(store.load().unwrap(), Some(replacement));
    }

    #[test]
    fn test_clear_removes_snapshot_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&sample_user()).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        // Clearing again must not fail.
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::at_path(path);
        assert!(matches!(store.load(), Err(StoreError::Serde(_))));
    }
}
