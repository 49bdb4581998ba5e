//! The notifying cache: storage plus listener dispatch.

use std::any::type_name;
use std::sync::Arc;

use tracing::{debug, info, trace};

use super::listener::ListenerRegistry;
use super::{Cachable, CacheConfig, CacheKey, CacheListener, Payload, Result, Store, Update};

/// A type-partitioned object cache that tells listeners when the values
/// they registered for change.
///
/// Every mutation runs to completion, then notifies the affected listeners
/// synchronously before returning. The cache expects a single owner; wrap it
/// in a lock if it has to be shared across threads.
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use flatcache::{Cachable, CacheListener, FlatCache, Update};
///
/// #[derive(Clone)]
/// struct Issue { id: String, title: String }
///
/// impl Cachable for Issue {
///     fn id(&self) -> &str { &self.id }
/// }
///
/// struct Printer;
///
/// impl CacheListener for Printer {
///     fn flat_cache_did_update(&self, _cache: &FlatCache, update: &Update) {
///         if let Some(issue) = update.item::<Issue>() {
///             println!("issue {} is now {:?}", issue.id, issue.title);
///         }
///     }
/// }
///
/// let mut cache = FlatCache::new();
/// let printer = Arc::new(Printer);
/// let issue = Issue { id: "1".into(), title: "crash".into() };
///
/// cache.add(&printer, &issue);
/// cache.set(issue);
/// assert_eq!(cache.get::<Issue>("1").map(|i| i.title), Some("crash".to_string()));
/// ```
pub struct FlatCache {
    store: Store,
    listeners: ListenerRegistry,
    config: CacheConfig,
}

impl FlatCache {
    /// Create an empty cache with the default config.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create an empty cache sized by `config`.
    pub fn with_config(config: CacheConfig) -> Self {
        info!(
            "Flat cache initialized (capacity={}, listener_capacity={})",
            config.initial_capacity, config.listener_capacity
        );
        Self {
            store: Store::with_capacity(config.initial_capacity),
            listeners: ListenerRegistry::with_capacity(config.listener_capacity),
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Register `listener` for changes to the slot `value` occupies.
    ///
    /// The cache only keeps a weak reference. Once the caller drops its last
    /// `Arc`, the registration is discarded at the next change to that slot.
    pub fn add<L, T>(&mut self, listener: &Arc<L>, value: &T)
    where
        L: CacheListener + 'static,
        T: Cachable,
    {
        let key = CacheKey::for_value(value);
        if self.listeners.add(listener, key.clone()) {
            debug!("Registered listener for {}", key);
        }
    }

    /// Store `value` and send `Update::Item` to every listener on its key.
    pub fn set<T: Cachable>(&mut self, value: T) {
        let key = CacheKey::for_value(&value);
        let listeners = self.listeners.resolve(&key);
        let update = (!listeners.is_empty())
            .then(|| Update::Item(Payload::new(value.clone())));

        self.store.set(value);
        debug!("Set {}", key);

        if let Some(update) = update {
            for listener in &listeners {
                self.deliver(listener, &update);
            }
        }
    }

    /// Store a batch of values as one change.
    ///
    /// Each interested listener is notified once: with `Update::Item` when
    /// exactly one value of the batch matches its registrations, or with
    /// `Update::List` holding the full batch when two or more do.
    pub fn set_many<T, I>(&mut self, values: I)
    where
        T: Cachable,
        I: IntoIterator<Item = T>,
    {
        let values: Vec<T> = values.into_iter().collect();
        if values.is_empty() {
            return;
        }

        // Listeners in first-match order, each with the batch positions it matched.
        let mut matches: Vec<(Arc<dyn CacheListener>, Vec<usize>)> = Vec::new();
        for (index, value) in values.iter().enumerate() {
            for listener in self.listeners.resolve(&CacheKey::for_value(value)) {
                match matches
                    .iter_mut()
                    .find(|(seen, _)| Arc::ptr_eq(seen, &listener))
                {
                    Some((_, matched)) => matched.push(index),
                    None => matches.push((listener, vec![index])),
                }
            }
        }

        let list = matches
            .iter()
            .any(|(_, matched)| matched.len() > 1)
            .then(|| Update::List(Payload::new(values.clone())));

        // One Item payload per matched batch position, shared by its listeners.
        let mut items: Vec<Option<Update>> = vec![None; values.len()];
        let mut deliveries: Vec<(Arc<dyn CacheListener>, Update)> =
            Vec::with_capacity(matches.len());
        for (listener, matched) in matches {
            let update = match matched.as_slice() {
                [single] => items[*single]
                    .get_or_insert_with(|| Update::Item(Payload::new(values[*single].clone())))
                    .clone(),
                _ => match &list {
                    Some(list) => list.clone(),
                    None => continue,
                },
            };
            deliveries.push((listener, update));
        }

        let count = values.len();
        self.store.set_many(values);
        debug!("Set batch of {} {}", count, type_name::<T>());

        for (listener, update) in &deliveries {
            self.deliver(listener, update);
        }
    }

    /// Get a copy of the value stored for `id` under type `T`.
    pub fn get<T: Cachable>(&self, id: &str) -> Option<T> {
        self.store.get(id)
    }

    pub fn contains<T: Cachable>(&self, id: &str) -> bool {
        self.store.contains::<T>(id)
    }

    /// Remove the value stored for `id` under type `T`.
    ///
    /// Listeners on that key receive `Update::RemoveItem` and lose their
    /// registration; they must call [`add`](Self::add) again to hear about
    /// a value later stored under the same key.
    ///
    /// # Errors
    /// Returns [`FlatCacheError::NoValueForKey`](super::FlatCacheError::NoValueForKey)
    /// when nothing is stored there. No listener is notified in that case.
    pub fn remove<T: Cachable>(&mut self, id: &str) -> Result<T> {
        let value = self.store.remove::<T>(id)?;
        let key = CacheKey::of::<T>(id);
        debug!("Removed {}", key);

        let listeners = self.listeners.detach(&key);
        if !listeners.is_empty() {
            let update = Update::RemoveItem(Payload::new(value.clone()));
            for listener in &listeners {
                self.deliver(listener, &update);
            }
        }

        Ok(value)
    }

    /// Number of stored values across all types.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Registrations recorded for the slot `value` occupies.
    ///
    /// Registrations of dropped listeners are counted until a change to
    /// the slot prunes them.
    pub fn listener_count<T: Cachable>(&self, value: &T) -> usize {
        self.listeners.count(&CacheKey::for_value(value))
    }

    fn deliver(&self, listener: &Arc<dyn CacheListener>, update: &Update) {
        trace!("Notifying listener: {:?}", update.kind());
        listener.flat_cache_did_update(self, update);
    }
}

impl Default for FlatCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlatCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatCache")
            .field("entry_count", &self.store.len())
            .field("listened_keys", &self.listeners.key_count())
            .field("config", &self.config)
            .finish()
    }
}
