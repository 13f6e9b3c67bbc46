//! Persistent client-side token storage
//!
//! The session keeps three keys: the bearer token sent with every request,
//! a refresh token that is written but never read back, and the id of the
//! logged-in user.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};
use thiserror::Error;

/// Bearer token attached to outgoing requests
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Refresh token (stored when the backend sends one)
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Id of the logged-in user
pub const USER_ID_KEY: &str = "user_id";

/// Every key owned by the session
pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_ID_KEY];

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a JSON object of strings
    #[error("Corrupt session file {path}: {reason}")]
    Corrupt {
        /// File being read
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// A previous writer panicked while holding the lock
    #[error("Session storage lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

/// Key/value store for session tokens
pub trait TokenStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Delete a value (missing keys are fine)
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Remove every session key from a store
pub fn clear_session(store: &dyn TokenStore) -> StoreResult<()> {
    for key in SESSION_KEYS {
        store.remove(key)?;
    }
    Ok(())
}

/// In-memory store, used for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            entries: RwLock::new(map),
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or_default()
    }

    /// Whether the store holds nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.write()?.remove(key);
        Ok(())
    }
}

/// JSON file store that survives between runs of the CLI
///
/// The whole file is rewritten on every change. A missing file reads as an
/// empty store.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    /// Create a store backed by `path` (the file is created on first write)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Default location: `<config dir>/searchdish/session.json`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("searchdish").join("session.json"))
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> StoreResult<BTreeMap<String, String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let value: Value = serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let Value::Object(map) = value else {
            return Err(StoreError::Corrupt {
                path: self.path.clone(),
                reason: "expected a JSON object".to_string(),
            });
        };

        Ok(map
            .into_iter()
            .filter_map(|(k, v)| match v {
                Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect())
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        fs::write(&self.path, json).map_err(io_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(io_err)?;
        }

        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let _guard = self.lock.lock()?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let _guard = self.lock.lock()?;
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let _guard = self.lock.lock()?;
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}
