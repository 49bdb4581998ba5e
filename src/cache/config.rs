//! Cache configuration.

use std::env;

use serde::Deserialize;

const DEFAULT_INITIAL_CAPACITY: usize = 64;
const DEFAULT_LISTENER_CAPACITY: usize = 16;

/// Configuration for a [`FlatCache`](super::FlatCache) instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Number of entries the store reserves room for up front.
    pub initial_capacity: usize,

    /// Number of keys the listener registry reserves room for up front.
    pub listener_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            listener_capacity: DEFAULT_LISTENER_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Create a new cache config with the given initial store capacity.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..Default::default()
        }
    }

    /// Set initial store capacity (builder pattern).
    #[must_use]
    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Set initial listener registry capacity.
    #[must_use]
    pub fn listener_capacity(mut self, listener_capacity: usize) -> Self {
        self.listener_capacity = listener_capacity;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `FLATCACHE_INITIAL_CAPACITY` and `FLATCACHE_LISTENER_CAPACITY`.
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let initial_capacity = env::var("FLATCACHE_INITIAL_CAPACITY")
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(defaults.initial_capacity);

        let listener_capacity = env::var("FLATCACHE_LISTENER_CAPACITY")
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(defaults.listener_capacity);

        Self {
            initial_capacity,
            listener_capacity,
        }
    }
}
