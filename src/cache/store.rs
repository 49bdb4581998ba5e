//! Type-partitioned value storage.

use std::any::Any;
use std::collections::HashMap;

use tracing::trace;

use super::{Cachable, CacheKey, FlatCacheError, Result};

/// Authoritative storage for cached values, keyed by [`CacheKey`].
///
/// The store owns every value it holds. Reads hand out clones, so callers
/// never alias internal storage.
#[derive(Default)]
pub struct Store {
    entries: HashMap<CacheKey, Box<dyn Any + Send + Sync>>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Insert `value`, replacing whatever was stored under the same key.
    pub fn set<T: Cachable>(&mut self, value: T) {
        let key = CacheKey::for_value(&value);
        trace!("storing {}", key);
        self.entries.insert(key, Box::new(value));
    }

    /// Insert every value in order. Later values win on duplicate keys.
    pub fn set_many<T, I>(&mut self, values: I)
    where
        T: Cachable,
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.set(value);
        }
    }

    /// Get a copy of the value stored for `id` under type `T`.
    ///
    /// A value stored under the same id but another type is a different key,
    /// so it reads as absent.
    pub fn get<T: Cachable>(&self, id: &str) -> Option<T> {
        self.entries
            .get(&CacheKey::of::<T>(id))
            .and_then(|value| value.downcast_ref::<T>())
            .cloned()
    }

    /// Check whether a value exists for `id` under type `T`.
    pub fn contains<T: Cachable>(&self, id: &str) -> bool {
        self.entries.contains_key(&CacheKey::of::<T>(id))
    }

    /// Remove and return the value stored for `id` under type `T`.
    ///
    /// # Errors
    /// Returns [`FlatCacheError::NoValueForKey`] if nothing is stored there.
    pub fn remove<T: Cachable>(&mut self, id: &str) -> Result<T> {
        let key = CacheKey::of::<T>(id);

        let value = self
            .entries
            .remove(&key)
            .ok_or_else(|| FlatCacheError::NoValueForKey(id.to_string()))?;

        trace!("removed {}", key);

        value
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| FlatCacheError::NoValueForKey(id.to_string()))
    }

    /// Number of stored entries across all types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("entry_count", &self.entries.len())
            .finish()
    }
}
