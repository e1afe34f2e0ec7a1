//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError` from `keel_core::storage`.
//! Specific errors are mapped to semantic variants (e.g., UNIQUE constraint to Conflict).

use rusqlite::ffi;

use keel_core::storage::RepositoryError;

/// Identity of the row a write was about, used to fill in constraint errors.
#[derive(Debug, Clone, Default)]
pub struct WriteTarget {
    pub id: String,
    /// Unique columns and the values being written to them.
    pub unique: Vec<(&'static str, String)>,
}

/// Maps a rusqlite error with a known ID to a RepositoryError.
///
/// # Error Mapping
///
/// - PRIMARY KEY, or UNIQUE on `id` → `RepositoryError::AlreadyExists`
/// - UNIQUE on another column → `RepositoryError::Conflict`
/// - Other constraint violations → `RepositoryError::InvalidData`
/// - `QueryReturnedNoRows` → `RepositoryError::NotFound`
/// - Connection errors → `RepositoryError::ConnectionFailed`
/// - All other errors → `RepositoryError::QueryFailed`
fn map_rusqlite_error(
    err: &rusqlite::Error,
    entity_type: &'static str,
    target: &WriteTarget,
) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, message)
            if sqlite_err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            // SQLite names the column as "UNIQUE constraint failed: users.email".
            let column = message
                .as_deref()
                .and_then(|m| m.rsplit_once('.'))
                .map(|(_, column)| column.trim());

            match (sqlite_err.extended_code, column) {
                (ffi::SQLITE_CONSTRAINT_PRIMARYKEY, _)
                | (ffi::SQLITE_CONSTRAINT_UNIQUE, Some("id")) => RepositoryError::AlreadyExists {
                    entity_type,
                    id: target.id.clone(),
                },
                (ffi::SQLITE_CONSTRAINT_UNIQUE, Some(column)) => target
                    .unique
                    .iter()
                    .find(|(field, _)| *field == column)
                    .map(|(field, value)| RepositoryError::Conflict {
                        entity_type,
                        field: *field,
                        value: value.clone(),
                    })
                    .unwrap_or_else(|| RepositoryError::InvalidData(err.to_string())),
                _ => RepositoryError::InvalidData(err.to_string()),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
            entity_type,
            id: target.id.clone(),
        },

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error with a known ID to a RepositoryError.
///
/// Use this variant for reads and deletes, where only the ID is known.
pub fn map_tokio_rusqlite_error_with_id(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    let target = WriteTarget {
        id: id.into(),
        unique: Vec::new(),
    };
    map_tokio_rusqlite_write_error(err, entity_type, &target)
}

/// Maps a tokio_rusqlite error raised while writing `target`.
pub fn map_tokio_rusqlite_write_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    target: &WriteTarget,
) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, entity_type, target)
        }
        tokio_rusqlite::Error::Close(_) | tokio_rusqlite::Error::ConnectionClosed => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}
