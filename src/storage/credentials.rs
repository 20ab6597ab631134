use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, error};

/// Process-wide key-value storage for the persisted credential record.
///
/// The session store writes three fixed keys through this trait (access
/// token, refresh token, serialized user) whenever the session changes, and
/// reads them once at startup. The API is deliberately infallible: storage
/// failures are logged and swallowed, never surfaced to the session
/// lifecycle.
pub trait CredentialStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// File-backed storage: a single JSON object on disk, loaded once at
/// construction and flushed on every write.
pub struct FileCredentialStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileCredentialStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                error!("Discarding unreadable credential file {:?}: {e}", path);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn flush(&self, entries: &HashMap<String, String>) {
        let raw = match serde_json::to_string(entries) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Failed to serialize credential record: {e}");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create credential directory {:?}: {e}", parent);
                return;
            }
        }
        if let Err(e) = fs::write(&self.path, raw) {
            error!("Failed to persist credentials to {:?}: {e}", self.path);
        }
    }
}

impl CredentialStorage for FileCredentialStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.remove(key).is_some() {
            self.flush(&entries);
        } else {
            debug!("remove of absent key {key}");
        }
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryCredentialStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStorage for MemoryCredentialStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
    }
}

#[cfg(test)]
mod tests_credentials {
    use super::*;
    use crate::constants::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryCredentialStorage::new();
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);

        storage.set(ACCESS_TOKEN_KEY, "token-a");
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), Some("token-a".to_string()));

        storage.remove(ACCESS_TOKEN_KEY);
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
        // removing twice must not panic
        storage.remove(ACCESS_TOKEN_KEY);
    }

    #[test]
    fn test_file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        {
            let storage = FileCredentialStorage::new(&path);
            storage.set(ACCESS_TOKEN_KEY, "access");
            storage.set(REFRESH_TOKEN_KEY, "refresh");
            storage.set(USER_KEY, r#"{"id":1}"#);
        }

        let reopened = FileCredentialStorage::new(&path);
        assert_eq!(reopened.get(ACCESS_TOKEN_KEY), Some("access".to_string()));
        assert_eq!(reopened.get(REFRESH_TOKEN_KEY), Some("refresh".to_string()));
        assert_eq!(reopened.get(USER_KEY), Some(r#"{"id":1}"#.to_string()));
    }

    #[test]
    fn test_file_storage_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let storage = FileCredentialStorage::new(&path);
        storage.set(ACCESS_TOKEN_KEY, "access");
        storage.remove(ACCESS_TOKEN_KEY);

        let reopened = FileCredentialStorage::new(&path);
        assert_eq!(reopened.get(ACCESS_TOKEN_KEY), None);
    }

    #[test]
    fn test_file_storage_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "{not json").unwrap();

        let storage = FileCredentialStorage::new(&path);
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
    }
}
