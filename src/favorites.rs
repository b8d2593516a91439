//! Favorite movies kept in a [`KeyValueStore`].
//!
//! Layout:
//!
//! - `favorite:<id>` holds the encoded [`MovieRecord`]
//! - `favorites:order` holds the JSON array of favorite ids in display order
//!
//! The number of favorites is the length of the order list. Storage and
//! decode failures never reach the caller: they are logged and the
//! operation leaves nothing observable behind.

use tracing::{debug, warn};

use crate::codec;
use crate::error::StoreError;
use crate::models::{MovieId, MovieRecord};
use crate::store::KeyValueStore;

const ORDER_KEY: &str = "favorites:order";
const RECORD_PREFIX: &str = "favorite:";

fn record_key(id: MovieId) -> String {
    format!("{RECORD_PREFIX}{id}")
}

/// Outcome of [`FavoritesRepository::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The movie was not a favorite and has been stored.
    Added,
    /// The movie was already a favorite and has been removed instead.
    Removed,
}

#[derive(Debug)]
pub struct FavoritesRepository<S> {
    store: S,
}

impl<S: KeyValueStore> FavoritesRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Toggles `record`: a movie that is already a favorite is removed and
    /// nothing is inserted, otherwise the movie is appended to the list.
    ///
    /// Returns `None` if the store could not be updated.
    pub fn add(&mut self, record: &MovieRecord) -> Option<Toggle> {
        let result = if self.contains(record.id) {
            self.try_remove(record.id).map(|_| Toggle::Removed)
        } else {
            self.try_insert(record).map(|_| Toggle::Added)
        };
        match result {
            Ok(toggle) => {
                debug!(id = record.id, ?toggle, "toggled favorite");
                Some(toggle)
            }
            Err(e) => {
                warn!(id = record.id, error = %e, "failed to toggle favorite");
                None
            }
        }
    }

    /// Marks `record` as a favorite. An existing favorite keeps its position
    /// and has its stored copy refreshed.
    ///
    /// Returns `true` if the movie was not a favorite before.
    pub fn favorite(&mut self, record: &MovieRecord) -> bool {
        match self.try_insert(record) {
            Ok(added) => {
                debug!(id = record.id, added, "stored favorite");
                added
            }
            Err(e) => {
                warn!(id = record.id, error = %e, "failed to store favorite");
                false
            }
        }
    }

    /// Removes the favorite with the given id.
    ///
    /// Returns `true` if something was removed.
    pub fn unfavorite(&mut self, id: MovieId) -> bool {
        match self.try_remove(id) {
            Ok(removed) => {
                debug!(id, removed, "removed favorite");
                removed
            }
            Err(e) => {
                warn!(id, error = %e, "failed to remove favorite");
                false
            }
        }
    }

    /// Same as [`unfavorite`](Self::unfavorite).
    pub fn remove(&mut self, id: MovieId) -> bool {
        self.unfavorite(id)
    }

    /// All favorites in display order. Entries that are missing or can not
    /// be decoded are skipped.
    pub fn list(&self) -> Vec<MovieRecord> {
        let order = self.order();
        if order.is_empty() {
            return Vec::new();
        }
        order.into_iter().filter_map(|id| self.stored(id)).collect()
    }

    /// Whether the movie with the given id is a readable favorite.
    pub fn contains(&self, id: MovieId) -> bool {
        let order = self.order();
        if order.is_empty() {
            return false;
        }
        order.contains(&id) && self.stored(id).is_some()
    }

    /// Number of ids in the order list.
    pub fn count(&self) -> usize {
        self.order().len()
    }

    fn try_insert(&mut self, record: &MovieRecord) -> Result<bool, StoreError> {
        let key = record_key(record.id);
        let mut order = self.order();
        if order.contains(&record.id) {
            self.store.set(&key, codec::encode(record))?;
            return Ok(false);
        }

        self.store.set(&key, codec::encode(record))?;
        order.push(record.id);
        if let Err(e) = self.write_order(&order) {
            // The record is unlisted; drop it so no orphan stays behind.
            if let Err(cleanup) = self.store.remove(&key) {
                warn!(%key, error = %cleanup, "left an unlisted favorite entry behind");
            }
            return Err(e);
        }
        Ok(true)
    }

    fn try_remove(&mut self, id: MovieId) -> Result<bool, StoreError> {
        let key = record_key(id);
        let mut order = self.order();
        let before = order.len();
        order.retain(|&other| other != id);
        let listed = order.len() != before;
        // Unlist first: a failed write must leave the favorite fully in place.
        if listed {
            self.write_order(&order)?;
        }

        match self.store.remove(&key) {
            Ok(had_record) => Ok(listed || had_record),
            Err(e) if listed => {
                warn!(%key, error = %e, "left an unlisted favorite entry behind");
                Ok(true)
            }
            Err(e) => Err(e),
        }
    }

    fn order(&self) -> Vec<MovieId> {
        let raw = match self.store.get(ORDER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read favorites order");
                return Vec::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "favorites order is corrupt, treating as empty");
            Vec::new()
        })
    }

    fn write_order(&mut self, order: &[MovieId]) -> Result<(), StoreError> {
        if order.is_empty() {
            self.store.remove(ORDER_KEY)?;
            return Ok(());
        }
        let raw = serde_json::to_string(order).map_err(StoreError::Encode)?;
        self.store.set(ORDER_KEY, raw)
    }

    fn stored(&self, id: MovieId) -> Option<MovieRecord> {
        let key = record_key(id);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(%key, "favorite entry missing");
                return None;
            }
            Err(e) => {
                warn!(%key, error = %e, "failed to read favorite");
                return None;
            }
        };
        match codec::decode(raw.as_bytes()) {
            Ok(record) if record.id == id => Some(record),
            Ok(record) => {
                warn!(%key, found = record.id, "favorite entry holds another movie");
                None
            }
            Err(e) => {
                warn!(%key, error = %e, "skipping undecodable favorite");
                None
            }
        }
    }
}
