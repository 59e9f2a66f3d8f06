use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use shared::models::AuthProfile;
use shared::storage::{ProfileStorage, StorageError};

/// Keeps the auth profile as a JSON file, by default in the platform data dir.
#[derive(Debug, Clone)]
pub struct FileProfileStorage {
    path: PathBuf,
}

impl FileProfileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/postboard/profile.json`, or the working directory when
    /// no home directory can be found.
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "postboard").map_or_else(
            || PathBuf::from("./postboard-profile.json"),
            |dirs| dirs.data_dir().join("profile.json"),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the profile for rewriting. The token never hits a file other
    /// users can read, whether it is new or left over with looser bits.
    fn open_private(&self) -> std::io::Result<File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            options.mode(0o600);
            let file = options.open(&self.path)?;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
            Ok(file)
        }
        #[cfg(not(unix))]
        {
            options.open(&self.path)
        }
    }

    fn io_error(&self, action: &str, err: &std::io::Error) -> StorageError {
        StorageError::Backend(format!(
            "failed to {action} {}: {err}",
            self.path.display()
        ))
    }
}

impl ProfileStorage for FileProfileStorage {
    fn load_profile(&self) -> Result<Option<AuthProfile>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(None),
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(self.io_error("read", &err)),
        }
    }

    fn save_profile(&self, profile: &AuthProfile) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.io_error("create directory for", &err))?;
        }
        let contents = serde_json::to_string_pretty(profile)?;
        let mut file = self
            .open_private()
            .map_err(|err| self.io_error("open", &err))?;
        file.write_all(contents.as_bytes())
            .map_err(|err| self.io_error("write", &err))
    }

    fn clear_profile(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error("remove", &err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_no_profile() {
        let dir = TempDir::new().unwrap();
        let storage = FileProfileStorage::new(dir.path().join("profile.json"));
        assert_eq!(storage.load_profile().unwrap(), None);
    }

    #[test]
    fn save_creates_parent_dirs_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let storage = FileProfileStorage::new(dir.path().join("nested/deeper/profile.json"));

        storage.save_profile(&AuthProfile::with_token("jwt")).unwrap();
        let loaded = storage.load_profile().unwrap().unwrap();
        assert_eq!(loaded.token.as_deref(), Some("jwt"));
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let storage = FileProfileStorage::new(dir.path().join("profile.json"));
        storage.save_profile(&AuthProfile::with_token("jwt")).unwrap();

        let mode = fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn existing_readable_file_is_tightened_and_truncated() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, "x".repeat(512)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let storage = FileProfileStorage::new(&path);
        storage.save_profile(&AuthProfile::with_token("jwt")).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(storage.load_profile().unwrap().unwrap().token.as_deref(), Some("jwt"));
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = FileProfileStorage::new(dir.path().join("profile.json"));
        storage.save_profile(&AuthProfile::with_token("jwt")).unwrap();

        storage.clear_profile().unwrap();
        storage.clear_profile().unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn corrupt_file_is_a_serde_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, "{not json").unwrap();

        let storage = FileProfileStorage::new(path);
        assert!(matches!(
            storage.load_profile(),
            Err(StorageError::Serde(_))
        ));
    }
}
