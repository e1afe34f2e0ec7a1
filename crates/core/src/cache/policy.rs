//! Fault policy for cache-aside repositories.
//!
//! Cache faults are handled asymmetrically:
//!
//! - **Read path**: [`classify_lookup`] turns a backend error or an
//!   undecodable payload into [`Lookup::Fault`]. Callers record it and fall
//!   through to the store exactly as on [`Lookup::Miss`].
//! - **Invalidation path**: [`surface_invalidation`] turns a failed delete
//!   into [`RepositoryError::CacheInvalidation`]. The write has already been
//!   committed, so the error means "data changed, cache may be stale".

use crate::storage::{self, RepositoryError};

use super::serialization::SerializationError;
use super::{CacheError, Result};

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The key was present and decoded.
    Hit(T),
    /// The backend reported the key as absent.
    Miss,
    /// The backend failed or returned an undecodable payload.
    Fault(CacheError),
}

impl<T> Lookup<T> {
    /// Returns the cached value, discarding misses and faults.
    pub fn hit(self) -> Option<T> {
        match self {
            Lookup::Hit(value) => Some(value),
            Lookup::Miss | Lookup::Fault(_) => None,
        }
    }

    /// Returns the fault, if any.
    pub fn fault(&self) -> Option<&CacheError> {
        match self {
            Lookup::Fault(err) => Some(err),
            _ => None,
        }
    }
}

/// Classifies a raw cache lookup, decoding hits with `decode`.
///
/// # Examples
///
/// ```
/// use keel_core::cache::{classify_lookup, deserialize_user, CacheError, Lookup};
///
/// let miss = classify_lookup(Ok(None), deserialize_user);
/// assert_eq!(miss, Lookup::Miss);
///
/// let corrupt = classify_lookup(Ok(Some(b"{".to_vec())), deserialize_user);
/// assert!(matches!(corrupt, Lookup::Fault(CacheError::Serialization(_))));
/// ```
pub fn classify_lookup<T, F>(result: Result<Option<Vec<u8>>>, decode: F) -> Lookup<T>
where
    F: FnOnce(&[u8]) -> std::result::Result<T, SerializationError>,
{
    match result {
        Ok(None) => Lookup::Miss,
        Ok(Some(bytes)) => match decode(&bytes) {
            Ok(value) => Lookup::Hit(value),
            Err(err) => Lookup::Fault(CacheError::Serialization(err.to_string())),
        },
        Err(err) => Lookup::Fault(err),
    }
}

/// Maps the outcome of a post-write cache delete onto the mutation's result.
pub fn surface_invalidation(
    result: Result<()>,
    entity_type: &'static str,
    id: &str,
) -> storage::Result<()> {
    result.map_err(|source| RepositoryError::CacheInvalidation {
        entity_type,
        id: id.to_string(),
        source,
    })
}
