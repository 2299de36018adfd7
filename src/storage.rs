//! Persistence for user-defined entries.
//!
//! Custom entries are kept as a JSON array under [`CUSTOM_ENTRIES_KEY`] in a
//! key-value byte store. Selection state is never persisted.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::entry::Entry;
use crate::Result;

/// Storage key of the serialized custom-entry list.
pub const CUSTOM_ENTRIES_KEY: &str = "custom-mcps";

pub trait KeyValueStore {
    /// Bytes stored under `key`, or `None` if nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the bytes stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        // Write through a temp file in the same directory so readers never see
        // a half-written list.
        let mut file = tempfile::NamedTempFile::new_in(&self.dir)?;
        file.write_all(value)?;
        file.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Vec<u8>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.values.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// Read the persisted custom entries.
///
/// A missing, unreadable or corrupt list yields an empty one.
pub fn load_custom_entries<S: KeyValueStore + ?Sized>(store: &S) -> Vec<Entry> {
    let bytes = match store.get(CUSTOM_ENTRIES_KEY) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            debug!("No custom MCPs stored yet");
            return Vec::new();
        },
        Err(e) => {
            warn!("Failed to read custom MCPs: {}", e);
            return Vec::new();
        },
    };

    match serde_json::from_slice::<Vec<Entry>>(&bytes) {
        Ok(entries) => entries.into_iter().map(|entry| Entry { is_custom: true, ..entry }).collect(),
        Err(e) => {
            warn!("Ignoring corrupt custom MCP list: {}", e);
            Vec::new()
        },
    }
}

/// Persist the custom entries, replacing the stored list.
///
/// # Errors
///
/// Returns an error if serialization or the store write fails.
pub fn save_custom_entries<S: KeyValueStore + ?Sized>(store: &mut S, entries: &[Entry]) -> Result<()> {
    let json = serde_json::to_vec_pretty(entries)?;
    store.set(CUSTOM_ENTRIES_KEY, &json)?;
    debug!("Saved {} custom MCP(s)", entries.len());
    Ok(())
}
