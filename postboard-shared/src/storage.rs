//! # Profile storage
//!
//! Durable key-value backing for the auth slice. Each client supplies its
//! own backend: browser `localStorage`, a file on disk, or [`MemoryStorage`].

use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::AuthProfile;

/// Key under which the serialized auth payload is kept.
pub const PROFILE_KEY: &str = "profile";

/// Why a profile could not be read, written or removed.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The stored value is not valid JSON for the expected type
    #[error("could not (de)serialize stored profile: {0}")]
    Serde(#[from] serde_json::Error),

    /// The backend refused the operation
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Durable home of the signed-in user's profile.
pub trait ProfileStorage {
    /// Read the persisted profile; `Ok(None)` when nothing is stored.
    ///
    /// # Errors
    /// Fails when the backend is unavailable or the entry is corrupt.
    fn load_profile(&self) -> Result<Option<AuthProfile>, StorageError>;

    /// Persist `profile` under [`PROFILE_KEY`], replacing any previous entry.
    ///
    /// # Errors
    /// Fails when the backend rejects the write.
    fn save_profile(&self, profile: &AuthProfile) -> Result<(), StorageError>;

    /// Remove the [`PROFILE_KEY`] entry. Other keys are left alone.
    ///
    /// # Errors
    /// Fails when the backend rejects the delete.
    fn clear_profile(&self) -> Result<(), StorageError>;
}

impl<T: ProfileStorage + ?Sized> ProfileStorage for &T {
    fn load_profile(&self) -> Result<Option<AuthProfile>, StorageError> {
        (**self).load_profile()
    }

    fn save_profile(&self, profile: &AuthProfile) -> Result<(), StorageError> {
        (**self).save_profile(profile)
    }

    fn clear_profile(&self) -> Result<(), StorageError> {
        (**self).clear_profile()
    }
}

/// In-process storage holding raw JSON strings, shaped like `localStorage`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored string for `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Write a raw string, bypassing serialization.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    /// Number of keys held, profile or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// True when no key is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ProfileStorage for MemoryStorage {
    fn load_profile(&self) -> Result<Option<AuthProfile>, StorageError> {
        self.raw(PROFILE_KEY)
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(StorageError::from)
    }

    fn save_profile(&self, profile: &AuthProfile) -> Result<(), StorageError> {
        let raw = serde_json::to_string(profile)?;
        self.insert_raw(PROFILE_KEY, raw);
        Ok(())
    }

    fn clear_profile(&self) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(PROFILE_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load() {
        let storage = MemoryStorage::new();
        assert!(storage.load_profile().unwrap().is_none());

        storage.save_profile(&AuthProfile::with_token("t")).unwrap();
        assert_eq!(storage.raw(PROFILE_KEY).as_deref(), Some(r#"{"token":"t"}"#));
        assert_eq!(
            storage.load_profile().unwrap(),
            Some(AuthProfile::with_token("t"))
        );
    }

    #[test]
    fn clear_only_removes_profile_key() {
        let storage = MemoryStorage::new();
        storage.insert_raw("theme", "dark");
        storage.save_profile(&AuthProfile::default()).unwrap();
        assert_eq!(storage.len(), 2);

        storage.clear_profile().unwrap();
        assert_eq!(storage.raw(PROFILE_KEY), None);
        assert_eq!(storage.raw("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn corrupt_entry_is_an_error() {
        let storage = MemoryStorage::new();
        storage.insert_raw(PROFILE_KEY, "{not json");
        assert!(matches!(storage.load_profile(), Err(StorageError::Serde(_))));
    }

    #[test]
    fn references_delegate() {
        let storage = MemoryStorage::new();
        let by_ref: &dyn ProfileStorage = &storage;
        by_ref.save_profile(&AuthProfile::with_token("x")).unwrap();
        assert!(storage.load_profile().unwrap().is_some());
    }
}
