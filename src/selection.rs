//! Persistent owned/wishlist sets.
//!
//! Each set is stored under a fixed key as a JSON array of id strings and is
//! rewritten in full after every toggle. Absent or malformed stored values
//! load as an empty set.

use crate::model::AmiiboId;
use anyhow::Result;
use foldhash::HashMap;
use indexmap::IndexSet;
use tracing::{debug, warn};

/// Durable string key-value storage (a file per key natively, `localStorage` on the web).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Process-local storage, used by tests and when no durable backend is available.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    Owned,
    Wishlist,
}

impl SelectionKind {
    /// Storage key. External readers rely on these exact names.
    pub fn storage_key(self) -> &'static str {
        match self {
            SelectionKind::Owned => "ownedAmiibos",
            SelectionKind::Wishlist => "wishlistAmiibos",
        }
    }
}

/// The two selection sets plus the storage they are persisted to.
pub struct SelectionStore {
    owned: IndexSet<AmiiboId>,
    wishlist: IndexSet<AmiiboId>,
    storage: Box<dyn KeyValueStore>,
}

impl SelectionStore {
    /// Loads both sets from `storage`.
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let owned = load_set(storage.as_ref(), SelectionKind::Owned);
        let wishlist = load_set(storage.as_ref(), SelectionKind::Wishlist);
        debug!(owned = owned.len(), wishlist = wishlist.len(), "selections loaded");
        Self {
            owned,
            wishlist,
            storage,
        }
    }

    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()))
    }

    pub fn set(&self, kind: SelectionKind) -> &IndexSet<AmiiboId> {
        match kind {
            SelectionKind::Owned => &self.owned,
            SelectionKind::Wishlist => &self.wishlist,
        }
    }

    pub fn contains(&self, kind: SelectionKind, id: &AmiiboId) -> bool {
        self.set(kind).contains(id)
    }

    /// Flips membership of `id` and persists the whole set.
    ///
    /// Returns the new membership. The in-memory flip stands even when the
    /// write fails; the error is returned for the caller to surface.
    pub fn toggle(&mut self, kind: SelectionKind, id: &AmiiboId) -> (bool, Result<()>) {
        let set = match kind {
            SelectionKind::Owned => &mut self.owned,
            SelectionKind::Wishlist => &mut self.wishlist,
        };
        let now_member = if set.shift_remove(id) {
            false
        } else {
            set.insert(id.clone());
            true
        };
        (now_member, self.persist(kind))
    }

    /// Removes both sets from memory and storage.
    pub fn clear(&mut self) -> Result<()> {
        self.owned.clear();
        self.wishlist.clear();
        self.storage.remove(SelectionKind::Owned.storage_key())?;
        self.storage.remove(SelectionKind::Wishlist.storage_key())?;
        Ok(())
    }

    fn persist(&mut self, kind: SelectionKind) -> Result<()> {
        let encoded = serde_json::to_string(self.set(kind))?;
        self.storage.set(kind.storage_key(), &encoded)
    }
}

fn load_set(storage: &dyn KeyValueStore, kind: SelectionKind) -> IndexSet<AmiiboId> {
    let Some(raw) = storage.get(kind.storage_key()) else {
        return IndexSet::new();
    };
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(ids) => ids
            .into_iter()
            .filter_map(AmiiboId::from_stored)
            .collect(),
        Err(err) => {
            warn!(key = kind.storage_key(), error = %err, "ignoring malformed stored selection");
            IndexSet::new()
        }
    }
}
