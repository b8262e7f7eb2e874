//! Local storage for the provider API key.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::CredentialError;

/// Key under which the Alpha Vantage API key is stored.
pub const API_KEY_NAME: &str = "alphavantage_api_key";

/// Persistence for a single API key.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, CredentialError>;

    /// Store a trimmed key; an empty key clears the entry.
    fn save(&self, api_key: &str) -> Result<(), CredentialError>;

    fn clear(&self) -> Result<(), CredentialError>;
}

/// JSON document at `<home>/credentials.json`.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> CredentialError {
        CredentialError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn read_document(&self) -> Result<BTreeMap<String, String>, CredentialError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(error) => return Err(self.io_error(error)),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|source| CredentialError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn write_document(&self, document: &BTreeMap<String, String>) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|error| self.io_error(error))?;
        }
        let body = serde_json::to_string_pretty(document).map_err(|source| {
            CredentialError::Corrupt {
                path: self.path.display().to_string(),
                source,
            }
        })?;
        fs::write(&self.path, body).map_err(|error| self.io_error(error))
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        Ok(self
            .read_document()?
            .remove(API_KEY_NAME)
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty()))
    }

    fn save(&self, api_key: &str) -> Result<(), CredentialError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return self.clear();
        }
        let mut document = self.read_document()?;
        document.insert(API_KEY_NAME.to_owned(), api_key.to_owned());
        self.write_document(&document)
    }

    fn clear(&self) -> Result<(), CredentialError> {
        let mut document = match self.read_document() {
            Ok(document) => document,
            // A corrupt file is replaced rather than blocking the reset.
            Err(CredentialError::Corrupt { .. }) => BTreeMap::new(),
            Err(error) => return Err(error),
        };
        document.remove(API_KEY_NAME);
        if document.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
                Err(error) => Err(self.io_error(error)),
            };
        }
        self.write_document(&document)
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    api_key: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(api_key: &str) -> Self {
        let store = Self::default();
        *store.slot() = Some(api_key.trim().to_owned()).filter(|key| !key.is_empty());
        store
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.api_key
            .lock()
            .expect("credential store lock is not poisoned")
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.slot().clone())
    }

    fn save(&self, api_key: &str) -> Result<(), CredentialError> {
        *self.slot() = Some(api_key.trim().to_owned()).filter(|key| !key.is_empty());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        *self.slot() = None;
        Ok(())
    }
}
