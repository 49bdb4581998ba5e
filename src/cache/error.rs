//! Cache errors.

/// Errors raised by cache operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FlatCacheError {
    /// No entry exists for the requested id under the requested type.
    #[error("no value for key `{0}`")]
    NoValueForKey(String),
}

/// Result alias for cache operations.
pub type Result<T> = std::result::Result<T, FlatCacheError>;
