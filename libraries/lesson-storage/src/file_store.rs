//! File-backed key/value store
//!
//! Keeps every key in one JSON object on disk so headless players (CLI,
//! tests, native shells) get the same persistence the browser provides.

use crate::error::{Result, StorageError};
use crate::store::KeyValueStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// JSON file store
///
/// The whole file is rewritten on every change. Writes go to a sibling
/// temporary file first and are renamed into place.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open (or lazily create) a store at `path`
    ///
    /// A missing file is an empty store; it is created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                StorageError::SerializationError(format!("{}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!("Opened store {} ({} keys)", path.display(), entries.len());

        Ok(Self { path, entries })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("playbackSpeed", "1.5").unwrap();
        store.set("autoPlayNext", "true").unwrap();
        store.remove("autoPlayNext").unwrap();
        drop(store);

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("playbackSpeed").unwrap().as_deref(), Some("1.5"));
        assert_eq!(store.get("autoPlayNext").unwrap(), None);
    }

    #[test]
    fn missing_and_empty_files_are_empty_stores() {
        let dir = TempDir::new().unwrap();
        let missing = JsonFileStore::open(dir.path().join("none.json")).unwrap();
        assert_eq!(missing.get("x").unwrap(), None);

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, "").unwrap();
        assert!(JsonFileStore::open(&empty).is_ok());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{oops").unwrap();

        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StorageError::SerializationError(_))
        ));
    }
}
