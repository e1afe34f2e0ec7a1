//! Pure functions for mapping repository errors to process exit codes.
//!
//! Codes follow the BSD `sysexits.h` conventions so scripts driving the CLI
//! can tell "nothing there" from "try again later".

use super::RepositoryError;

/// Maps a [`RepositoryError`] to a process exit code.
///
/// - `NotFound` -> 66 (`EX_NOINPUT`)
/// - `AlreadyExists`, `Conflict` -> 65 (`EX_DATAERR`)
/// - `InvalidData` -> 65 (`EX_DATAERR`)
/// - `ConnectionFailed` -> 69 (`EX_UNAVAILABLE`)
/// - `QueryFailed`, `Serialization` -> 70 (`EX_SOFTWARE`)
/// - `CacheInvalidation` -> 75 (`EX_TEMPFAIL`): the write landed, retry the
///   invalidation
///
/// # Examples
///
/// ```
/// use keel_core::storage::{repository_error_to_exit_code, RepositoryError};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "User",
///     id: "user_abc".to_string(),
/// };
/// assert_eq!(repository_error_to_exit_code(&error), 66);
/// ```
pub fn repository_error_to_exit_code(error: &RepositoryError) -> u8 {
    match error {
        RepositoryError::NotFound { .. } => 66,
        RepositoryError::AlreadyExists { .. } => 65,
        RepositoryError::Conflict { .. } => 65,
        RepositoryError::InvalidData(_) => 65,
        RepositoryError::ConnectionFailed(_) => 69,
        RepositoryError::QueryFailed(_) => 70,
        RepositoryError::Serialization(_) => 70,
        RepositoryError::CacheInvalidation { .. } => 75,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheError;

    #[test]
    fn test_not_found_maps_to_66() {
        let error = RepositoryError::NotFound {
            entity_type: "User",
            id: "user_1".to_string(),
        };
        assert_eq!(repository_error_to_exit_code(&error), 66);
    }

    #[test]
    fn test_conflicts_map_to_65() {
        let exists = RepositoryError::AlreadyExists {
            entity_type: "User",
            id: "user_1".to_string(),
        };
        let conflict = RepositoryError::Conflict {
            entity_type: "User",
            field: "handle",
            value: "ada".to_string(),
        };
        assert_eq!(repository_error_to_exit_code(&exists), 65);
        assert_eq!(repository_error_to_exit_code(&conflict), 65);
    }

    #[test]
    fn test_connection_failed_maps_to_69() {
        let error = RepositoryError::ConnectionFailed("unable to open database".to_string());
        assert_eq!(repository_error_to_exit_code(&error), 69);
    }

    #[test]
    fn test_query_failed_maps_to_70() {
        let error = RepositoryError::QueryFailed("disk I/O error".to_string());
        assert_eq!(repository_error_to_exit_code(&error), 70);
    }

    #[test]
    fn test_cache_invalidation_maps_to_75() {
        let error = RepositoryError::CacheInvalidation {
            entity_type: "User",
            id: "user_1".to_string(),
            source: CacheError::Timeout(std::time::Duration::from_millis(250)),
        };
        assert_eq!(repository_error_to_exit_code(&error), 75);
    }
}
