//! `localStorage` backed key-value storage for the browser runtime.

use crate::selection::KeyValueStore;
use anyhow::{Result, anyhow};
use tracing::warn;
use web_sys::Storage;

pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// Opens the window's `localStorage`, or `None` when it is unavailable
    /// (e.g. disabled by the browser).
    pub fn open() -> Option<Self> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(Some(storage)) => Some(Self { storage }),
            Ok(None) => None,
            Err(err) => {
                warn!(error = ?err, "localStorage is not accessible");
                None
            }
        }
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| anyhow!("localStorage write for {key} failed: {err:?}"))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|err| anyhow!("localStorage remove for {key} failed: {err:?}"))
    }
}
