//! Listener contract and the weak registry that tracks listener interest.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use tracing::debug;

use super::{CacheKey, FlatCache, Update};

/// An observer of cache changes.
///
/// Called synchronously from inside the mutating cache call.
pub trait CacheListener: Send + Sync {
    fn flat_cache_did_update(&self, cache: &FlatCache, update: &Update);
}

/// Maps cache keys to the listeners interested in them.
///
/// Only weak references are held, so registering never keeps a listener
/// alive. Dead references are dropped the next time their key is resolved.
pub(crate) struct ListenerRegistry {
    listeners: HashMap<CacheKey, Vec<Weak<dyn CacheListener>>>,
}

impl ListenerRegistry {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            listeners: HashMap::with_capacity(capacity),
        }
    }

    /// Register interest of `listener` in `key`.
    ///
    /// Returns `false` if that listener was already registered on the key.
    pub(crate) fn add<L>(&mut self, listener: &Arc<L>, key: CacheKey) -> bool
    where
        L: CacheListener + 'static,
    {
        let weak: Weak<L> = Arc::downgrade(listener);
        let weak: Weak<dyn CacheListener> = weak;
        let registered = self.listeners.entry(key).or_default();

        if registered.iter().any(|existing| existing.ptr_eq(&weak)) {
            return false;
        }

        registered.push(weak);
        true
    }

    /// Live listeners for `key`, in registration order.
    ///
    /// Registrations whose listener has been dropped are removed.
    pub(crate) fn resolve(&mut self, key: &CacheKey) -> Vec<Arc<dyn CacheListener>> {
        let Some(registered) = self.listeners.get_mut(key) else {
            return Vec::new();
        };

        let before = registered.len();
        let mut live = Vec::with_capacity(before);
        registered.retain(|weak| match weak.upgrade() {
            Some(listener) => {
                live.push(listener);
                true
            }
            None => false,
        });

        let pruned = before - registered.len();
        if pruned > 0 {
            debug!("Pruned {} stale listener(s) for {}", pruned, key);
        }

        if registered.is_empty() {
            self.listeners.remove(key);
        }

        live
    }

    /// Drop every registration for `key`, returning the live listeners.
    pub(crate) fn detach(&mut self, key: &CacheKey) -> Vec<Arc<dyn CacheListener>> {
        let live = self.resolve(key);
        self.listeners.remove(key);
        if !live.is_empty() {
            debug!("Detached {} listener(s) from {}", live.len(), key);
        }
        live
    }

    /// Number of registrations recorded for `key`, stale ones included.
    pub(crate) fn count(&self, key: &CacheKey) -> usize {
        self.listeners.get(key).map_or(0, Vec::len)
    }

    pub(crate) fn key_count(&self) -> usize {
        self.listeners.len()
    }
}
