//! Key-value persistence.
//!
//! Everything the app remembers across runs lives under a handful of fixed
//! string keys. [`FileStore`] keeps them in one JSON object on disk;
//! [`MemoryStore`] keeps them in-process.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;

/// Fixed key names.
pub mod keys {
    pub const TOKEN: &str = "careerwise_token";
    pub const USER: &str = "careerwise_user";
    pub const USER_PROFILE: &str = "careerwise_user_profile";
    pub const ONBOARDING_COMPLETED: &str = "careerwise_onboarding_completed";
    pub const NEEDS_ONBOARDING: &str = "careerwise_needs_onboarding";
    pub const CHAT: &str = "chat-storage";
}

/// String-keyed storage with explicit get/set.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// All stored keys, sorted.
    fn keys(&self) -> Result<Vec<String>, StoreError>;

    /// Decode a JSON value stored under `key`.
    fn get_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        Self: Sized,
    {
        match self.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    key: key.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Encode `value` as JSON under `key`.
    fn set_json<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        lock(&self.entries).remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = lock(&self.entries).keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// JSON-file-backed store.
///
/// Every write rewrites the whole file through a temp file and rename.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

/// File name used inside the data directory.
pub const STORE_FILE: &str = "storage.json";

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Store at `<data_dir>/storage.json`.
    pub fn open_default() -> Result<Self, crate::error::ConfigError> {
        Ok(Self::new(super::data_dir()?.join(STORE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                key: self.path.display().to_string(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(StoreError::ReadFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let write_err = |source: std::io::Error| StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = lock(&self.guard);
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = lock(&self.guard);
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = lock(&self.guard);
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let _guard = lock(&self.guard);
        Ok(self.read_all()?.into_keys().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get(keys::TOKEN).unwrap(), None);
        store.set(keys::TOKEN, "abc").unwrap();
        assert_eq!(store.get(keys::TOKEN).unwrap().as_deref(), Some("abc"));
        store.remove(keys::TOKEN).unwrap();
        store.remove(keys::TOKEN).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORE_FILE);

        let store = FileStore::new(&path);
        store.set(keys::USER, r#"{"id":"u1"}"#).unwrap();
        store.set(keys::TOKEN, "tok").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(keys::TOKEN).unwrap().as_deref(), Some("tok"));
        assert_eq!(
            reopened.keys().unwrap(),
            vec![keys::TOKEN.to_string(), keys::USER.to_string()]
        );
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn file_store_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested").join(STORE_FILE));
        assert_eq!(store.get("anything").unwrap(), None);
        store.remove("anything").unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn file_store_reports_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORE_FILE);
        std::fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get("k"), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn json_helpers_roundtrip_and_flag_corruption() {
        let store = MemoryStore::new();
        store.set_json("numbers", &vec![1, 2, 3]).unwrap();
        let back: Option<Vec<u32>> = store.get_json("numbers").unwrap();
        assert_eq!(back, Some(vec![1, 2, 3]));

        store.set("numbers", "{oops").unwrap();
        let err = store.get_json::<Vec<u32>>("numbers").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == "numbers"));
    }
}
