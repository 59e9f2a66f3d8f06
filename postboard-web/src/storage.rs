use gloo_storage::errors::StorageError as BrowserStorageError;
use gloo_storage::{LocalStorage, Storage};
use shared::models::AuthProfile;
use shared::storage::{PROFILE_KEY, ProfileStorage, StorageError};

/// Keeps the auth profile in `window.localStorage`, as JSON under `profile`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalProfileStorage;

fn backend_error(err: BrowserStorageError) -> StorageError {
    match err {
        BrowserStorageError::SerdeError(err) => StorageError::Serde(err),
        other => StorageError::Backend(other.to_string()),
    }
}

impl ProfileStorage for LocalProfileStorage {
    fn load_profile(&self) -> Result<Option<AuthProfile>, StorageError> {
        match LocalStorage::get::<AuthProfile>(PROFILE_KEY) {
            Ok(profile) => Ok(Some(profile)),
            Err(BrowserStorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(backend_error(err)),
        }
    }

    fn save_profile(&self, profile: &AuthProfile) -> Result<(), StorageError> {
        LocalStorage::set(PROFILE_KEY, profile).map_err(backend_error)
    }

    fn clear_profile(&self) -> Result<(), StorageError> {
        LocalStorage::delete(PROFILE_KEY);
        Ok(())
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn missing_profile_loads_as_none() {
        LocalStorage::delete(PROFILE_KEY);
        assert_eq!(LocalProfileStorage.load_profile().unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn saved_profile_comes_back() {
        let storage = LocalProfileStorage;
        storage.save_profile(&AuthProfile::with_token("jwt")).unwrap();

        let loaded = storage.load_profile().unwrap().unwrap();
        assert_eq!(loaded.token.as_deref(), Some("jwt"));
        storage.clear_profile().unwrap();
    }

    #[wasm_bindgen_test]
    fn clear_leaves_other_keys() {
        LocalStorage::set("theme", "dark").unwrap();
        let storage = LocalProfileStorage;
        storage.save_profile(&AuthProfile::with_token("jwt")).unwrap();

        storage.clear_profile().unwrap();
        assert_eq!(storage.load_profile().unwrap(), None);
        assert_eq!(LocalStorage::get::<String>("theme").unwrap(), "dark");
        LocalStorage::delete("theme");
    }

    #[wasm_bindgen_test]
    fn corrupt_entry_is_a_serde_error() {
        LocalStorage::raw().set_item(PROFILE_KEY, "{not json").unwrap();
        assert!(matches!(
            LocalProfileStorage.load_profile(),
            Err(StorageError::Serde(_))
        ));
        LocalStorage::delete(PROFILE_KEY);
    }
}
