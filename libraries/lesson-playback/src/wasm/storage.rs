//! `window.localStorage` store

use super::js_error;
use lesson_storage::{KeyValueStore, Result, StorageError};
use web_sys::Storage;

/// Key/value store over the page's `localStorage`
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open the current window's `localStorage`
    pub fn open() -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(js_error(&e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))?;

        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(js_error(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::write_rejected(key, js_error(&e)))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::write_rejected(key, js_error(&e)))
    }
}
