//! FlatCache - In-memory object cache with change notification
//!
//! A shared, mutable source of truth for application state. Values are
//! partitioned by concrete type and id; observers register for the values
//! they display and are notified when those values are set or removed.
//!
//! ## Architecture
//!
//! - `cache` - Storage, listener registry and dispatch
//!
//! The cache performs no I/O and never evicts. All operations are
//! synchronous and expect a single owner at a time.

mod cache;

pub use cache::{
    Cachable, CacheConfig, CacheKey, CacheListener, FlatCache, FlatCacheError, Payload, Result,
    Store, Update, UpdateKind,
};
