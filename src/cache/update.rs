//! Change notifications delivered to listeners.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// A shared, read-only, type-erased value carried by an [`Update`].
///
/// One payload is built per mutation and shared by every listener it
/// reaches, so cloning is cheap.
#[derive(Clone)]
pub struct Payload {
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Payload {
    pub(crate) fn new<V: Any + Send + Sync>(value: V) -> Self {
        Self {
            value: Arc::new(value),
            type_name: type_name::<V>(),
        }
    }

    /// Borrow the payload as `V` if that is its concrete type.
    pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
        self.value.downcast_ref::<V>()
    }

    /// Name of the payload's concrete type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Payload").field(&self.type_name).finish()
    }
}

/// The shape of an [`Update`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Item,
    List,
    RemoveItem,
}

/// What changed in the cache.
///
/// `Item` and `RemoveItem` carry a single `T`; `List` carries the whole
/// `Vec<T>` of a batch set, in the order the caller passed it.
#[derive(Debug, Clone)]
pub enum Update {
    /// A single value was set.
    Item(Payload),
    /// A batch of values was set.
    List(Payload),
    /// A single value was removed.
    RemoveItem(Payload),
}

impl Update {
    pub fn kind(&self) -> UpdateKind {
        match self {
            Self::Item(_) => UpdateKind::Item,
            Self::List(_) => UpdateKind::List,
            Self::RemoveItem(_) => UpdateKind::RemoveItem,
        }
    }

    /// The value of an `Item` update, if it is one and holds a `T`.
    pub fn item<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Item(payload) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// The batch of a `List` update, if it is one and holds `T`s.
    pub fn list<T: Any>(&self) -> Option<&[T]> {
        match self {
            Self::List(payload) => payload.downcast_ref::<Vec<T>>().map(Vec::as_slice),
            _ => None,
        }
    }

    /// The value of a `RemoveItem` update, if it is one and holds a `T`.
    pub fn removed_item<T: Any>(&self) -> Option<&T> {
        match self {
            Self::RemoveItem(payload) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn payload(&self) -> &Payload {
        match self {
            Self::Item(payload) | Self::List(payload) | Self::RemoveItem(payload) => payload,
        }
    }
}
