//! Preference Store - the saved API key
//!
//! Hosts load the key through a [`PreferenceStore`] and hand it to the
//! studio explicitly. Nothing in the engine reads preferences on its own.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Invalid preference key: {0}")]
    InvalidKey(String),

    #[error("Preference I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single string preference.
///
/// Values are trimmed on save; saving a blank value removes it.
pub trait PreferenceStore {
    fn load(&self) -> Result<Option<String>, PreferenceError>;
    fn save(&self, value: &str) -> Result<(), PreferenceError>;
}

/// In-process store, shared by key.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    key: String,
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: Mutex::new(HashMap::new()),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Option<String>, PreferenceError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(&self.key).cloned())
    }

    fn save(&self, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        let value = value.trim();
        if value.is_empty() {
            values.remove(&self.key);
        } else {
            values.insert(self.key.clone(), value.to_string());
        }
        Ok(())
    }
}

/// One file per key under a directory.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(dir: &Path, key: &str) -> Result<Self, PreferenceError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(PreferenceError::InvalidKey(key.to_string()));
        }
        Ok(Self {
            path: dir.join(key),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Result<Option<String>, PreferenceError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let value = content.trim();
                Ok((!value.is_empty()).then(|| value.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                log::warn!("unable to read preference {}: {}", self.path.display(), e);
                Err(e.into())
            }
        }
    }

    fn save(&self, value: &str) -> Result<(), PreferenceError> {
        let value = value.trim();
        let result = if value.is_empty() {
            match fs::remove_file(&self.path) {
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                other => other,
            }
        } else {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, value)
        };

        result.map_err(|e| {
            log::warn!("unable to persist preference {}: {}", self.path.display(), e);
            e.into()
        })
    }
}
