//! Cache keys and the identity contract for cached values.

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A value that can be stored in the cache.
///
/// The `id` only has to be unique among values of the same concrete type:
/// two types sharing an id live in separate slots.
pub trait Cachable: Any + Clone + Send + Sync {
    /// Stable identifier of this value within its type.
    fn id(&self) -> &str;
}

/// Composite lookup key: the concrete type of a value plus its id.
#[derive(Clone)]
pub struct CacheKey {
    type_id: TypeId,
    type_name: &'static str,
    id: String,
}

impl CacheKey {
    /// Key for `id` under type `T`.
    pub fn of<T: Cachable>(id: impl Into<String>) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            id: id.into(),
        }
    }

    /// Key derived from a value's own type and id.
    pub fn for_value<T: Cachable>(value: &T) -> Self {
        Self::of::<T>(value.id())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

// The type name is informational; identity is (TypeId, id).
impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.id == other.id
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.id.hash(state);
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.type_name, self.id)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_name, self.id)
    }
}
