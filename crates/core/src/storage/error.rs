use thiserror::Error;

use crate::cache::CacheError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} with {field} '{value}' already exists")]
    Conflict {
        entity_type: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    /// The write was committed but the cached copy could not be removed.
    #[error("{entity_type} {id} was changed but its cache entry may be stale: {source}")]
    CacheInvalidation {
        entity_type: &'static str,
        id: String,
        #[source]
        source: CacheError,
    },
}

impl RepositoryError {
    /// Returns true for the not-found variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }

    /// Returns true when the underlying write succeeded despite the error.
    pub fn write_committed(&self) -> bool {
        matches!(self, RepositoryError::CacheInvalidation { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "User",
            id: "user_123".to_string(),
        };
        assert_eq!(error.to_string(), "User not found: user_123");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "User",
            id: "user_123".to_string(),
        };
        assert_eq!(error.to_string(), "User already exists: user_123");
    }

    #[test]
    fn test_repository_error_conflict_display() {
        let error = RepositoryError::Conflict {
            entity_type: "User",
            field: "email",
            value: "ada@example.com".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "User with email 'ada@example.com' already exists"
        );
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 30s");
    }

    #[test]
    fn test_repository_error_query_failed_display() {
        let error = RepositoryError::QueryFailed("no such table: users".to_string());
        assert_eq!(error.to_string(), "Query failed: no such table: users");
    }

    #[test]
    fn test_cache_invalidation_display_and_source() {
        let error = RepositoryError::CacheInvalidation {
            entity_type: "User",
            id: "user_123".to_string(),
            source: CacheError::ConnectionFailed("refused".to_string()),
        };

        assert_eq!(
            error.to_string(),
            "User user_123 was changed but its cache entry may be stale: \
             Cache connection failed: refused"
        );
        assert!(error.source().is_some());
        assert!(error.write_committed());
        assert!(!error.is_not_found());
    }
}
