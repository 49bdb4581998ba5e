//! Cache module - Type-partitioned object cache with change listeners.
//!
//! Values are stored by their concrete type and string id, so two types may
//! reuse the same id without colliding. Listeners register interest in
//! individual slots and are told when those slots change.
//!
//! ## Architecture
//!
//! - `Store` - Owns the values, keyed by `CacheKey` (type + id)
//! - `FlatCache` - Wraps the store and notifies listeners after each change
//! - `Update` - The notification payload: `Item`, `List` or `RemoveItem`
//! - Listeners are held weakly and pruned once their owner drops them
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut cache = FlatCache::new();
//! cache.add(&listener, &issue);
//!
//! // `listener` receives Update::Item(issue)
//! cache.set(issue);
//!
//! let issue = cache.get::<Issue>("42");
//! ```

mod config;
mod error;
mod flat;
mod key;
mod listener;
mod store;
mod update;

#[cfg(test)]
mod testing;

pub use config::CacheConfig;
pub use error::{FlatCacheError, Result};
pub use flat::FlatCache;
pub use key::{Cachable, CacheKey};
pub use listener::CacheListener;
pub use store::Store;
pub use update::{Payload, Update, UpdateKind};
