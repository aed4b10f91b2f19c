/**
 * Credential Store
 *
 * Durable key/value persistence for the last-used username/password pair.
 * The store has no logic beyond get/put; encryption-at-rest is owned by
 * whichever backing implementation is configured.
 *
 * # Implementations
 *
 * - `FileCredentialStore` - JSON file under the platform data directory
 * - `MemoryCredentialStore` - in-process map, for tests and ephemeral use
 * - `KeyringCredentialStore` - OS keyring (behind the `keyring` feature)
 */
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::shared::config::AppConfig;
use crate::shared::error::StoreError;

/// Store key for the last successfully used username
pub const USERNAME_KEY: &str = "auth.username";

/// Store key for the last successfully used password
pub const PASSWORD_KEY: &str = "auth.password";

/// Durable key/value persistence for credentials
pub trait CredentialStore: Send + Sync {
    /// Read a value, `None` if the key has never been written
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory credential store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Credential store backed by a JSON file
///
/// Reads and writes the whole file on each operation; the file holds a flat
/// string map. A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store at the configured location, or the platform default
    pub fn from_config(config: &AppConfig) -> Self {
        match &config.credential_path {
            Some(path) => Self::new(path.clone()),
            None => Self::new(Self::default_path()),
        }
    }

    /// Platform default location for the credential file
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("xfchat")
            .join("credentials.json")
    }

    /// Path this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<HashMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.read_entries()?;
        Ok(entries.remove(key))
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}

/// Credential store backed by the OS keyring
///
/// Each key becomes a keyring entry under the given service name, so
/// secrets never touch the filesystem in plaintext.
#[cfg(feature = "keyring")]
#[derive(Debug, Clone)]
pub struct KeyringCredentialStore {
    service: String,
}

#[cfg(feature = "keyring")]
impl KeyringCredentialStore {
    /// Create a store scoped to `service` in the OS keyring
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, StoreError> {
        keyring::Entry::new(&self.service, key).map_err(|e| StoreError::io(e.to_string()))
    }
}

#[cfg(feature = "keyring")]
impl CredentialStore for KeyringCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StoreError::io(e.to_string())),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| StoreError::io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.get(USERNAME_KEY).unwrap(), None);

        store.put(USERNAME_KEY, "alice").unwrap();
        assert_eq!(store.get(USERNAME_KEY).unwrap(), Some("alice".to_string()));
    }

    #[test]
    fn test_memory_store_overwrite() {
        let store = MemoryCredentialStore::new();
        store.put(PASSWORD_KEY, "old").unwrap();
        store.put(PASSWORD_KEY, "new").unwrap();
        assert_eq!(store.get(PASSWORD_KEY).unwrap(), Some("new".to_string()));
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        assert_eq!(store.get(USERNAME_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));

        store.put(USERNAME_KEY, "alice").unwrap();
        store.put(PASSWORD_KEY, "secret").unwrap();

        assert_eq!(store.get(USERNAME_KEY).unwrap(), Some("alice".to_string()));
        assert_eq!(store.get(PASSWORD_KEY).unwrap(), Some("secret".to_string()));
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested").join("credentials.json"));
        store.put(USERNAME_KEY, "alice").unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        FileCredentialStore::new(&path).put(USERNAME_KEY, "alice").unwrap();

        let reopened = FileCredentialStore::new(&path);
        assert_eq!(reopened.get(USERNAME_KEY).unwrap(), Some("alice".to_string()));
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(matches!(store.get(USERNAME_KEY), Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_from_config_uses_configured_path() {
        let config = AppConfig::builder()
            .service_domain("example.com")
            .credential_path(PathBuf::from("/tmp/xfchat-test.json"))
            .build()
            .unwrap();
        let store = FileCredentialStore::from_config(&config);
        assert_eq!(store.path(), Path::new("/tmp/xfchat-test.json"));
    }
}
