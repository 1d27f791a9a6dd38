//! Persistence of the location document.
//!
//! The medium is an opaque key-value blob store; the whole document lives
//! under one key and is replaced in full on every save.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::types::Document;

/// Key holding the serialized document.
pub const STORAGE_KEY: &str = "usrWeatherData";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Stored document is corrupt: {0}")]
    Corrupt(String),
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Key-value blob medium. `set` replaces the value atomically: a concurrent
/// `get` sees the old or the new value, never a mix.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write beside the target, then rename over it.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Loads and saves the location document under [`STORAGE_KEY`].
#[derive(Debug, Clone)]
pub struct PersistedStore<S> {
    blobs: S,
}

impl<S: BlobStore> PersistedStore<S> {
    pub fn new(blobs: S) -> Self {
        Self { blobs }
    }

    pub fn blobs(&self) -> &S {
        &self.blobs
    }

    /// Read the stored document. `Ok(None)` when nothing was saved yet.
    pub fn try_load(&self) -> Result<Option<Document>, StoreError> {
        let Some(raw) = self.blobs.get(STORAGE_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    /// Read the stored document, falling back to an empty one when nothing is
    /// stored or the stored blob cannot be read. The bad blob stays in place
    /// until the next save replaces it.
    pub fn load(&self) -> Document {
        match self.try_load() {
            Ok(Some(document)) => {
                tracing::info!(
                    "Loaded {} stored location(s)",
                    document.locations.len()
                );
                document
            }
            Ok(None) => Document::default(),
            Err(e) => {
                tracing::warn!("Ignoring stored locations: {}", e);
                Document::default()
            }
        }
    }

    /// Replace the stored document with `document`.
    pub fn save(&self, document: &Document) -> Result<(), StoreError> {
        let json = serde_json::to_string(document)?;
        self.blobs.set(STORAGE_KEY, &json)?;
        tracing::debug!("Saved {} location(s)", document.locations.len());
        Ok(())
    }
}
