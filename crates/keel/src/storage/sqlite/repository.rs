//! SQLite repository implementation.
//!
//! Implements `UserRepository` from `keel_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::Utc;
use tokio_rusqlite::Connection;

use keel_core::storage::{RepositoryError, Result, UserRepository};
use keel_core::user::{User, USER_ENTITY};

use super::conversions::{format_datetime, metadata_to_json, row_to_user};
use super::error::{map_tokio_rusqlite_error_with_id, map_tokio_rusqlite_write_error, WriteTarget};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Maps an affected-row count of zero to `QueryReturnedNoRows`.
fn require_row(rows: usize) -> tokio_rusqlite::Result<()> {
    if rows == 0 {
        Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
    } else {
        Ok(())
    }
}

fn write_target(user: &User) -> WriteTarget {
    WriteTarget {
        id: user.id.clone(),
        unique: vec![("email", user.email.clone()), ("handle", user.handle.clone())],
    }
}

fn encode_metadata(user: &User) -> Result<String> {
    metadata_to_json(&user.metadata).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// SQLite-backed user store.
///
/// Email and handle uniqueness is enforced by the schema.
pub struct SqliteUserRepository {
    conn: Connection,
}

impl SqliteUserRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Runs a single-row user SELECT keyed by `key`.
    async fn select_one(&self, query: &'static str, key: &str) -> Result<User> {
        let key_owned = key.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(query).map_err(wrap_err)?;
                stmt.query_row([&key_owned], row_to_user).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, USER_ENTITY, key))
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn get_user(&self, id: &str) -> Result<User> {
        self.select_one(schema::SELECT_USER_BY_ID, id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User> {
        self.select_one(schema::SELECT_USER_BY_EMAIL, email).await
    }

    async fn get_user_by_handle(&self, handle: &str) -> Result<User> {
        self.select_one(schema::SELECT_USER_BY_HANDLE, handle).await
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let metadata = encode_metadata(user)?;
        let target = write_target(user);
        let row = user.clone();
        let last_seen_at = user.last_seen_at.as_ref().map(format_datetime);
        let created_at = format_datetime(&user.created_at);
        let updated_at = format_datetime(&user.updated_at);

        self.conn
            .call(move |conn| {
                let [gradient_from, gradient_to] = row.avatar_gradient;
                conn.execute(
                    schema::INSERT_USER,
                    rusqlite::params![
                        row.id,
                        row.handle,
                        row.display_name,
                        row.email,
                        row.password_hash,
                        gradient_from,
                        gradient_to,
                        row.avatar_url,
                        row.banner_url,
                        row.bio,
                        row.is_verified,
                        row.is_active,
                        metadata,
                        row.followers_count,
                        row.following_count,
                        row.posts_count,
                        last_seen_at,
                        created_at,
                        updated_at
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_write_error(e, USER_ENTITY, &target))
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let metadata = encode_metadata(user)?;
        let target = write_target(user);
        let row = user.clone();
        let updated_at = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                let [gradient_from, gradient_to] = row.avatar_gradient;
                let rows = conn
                    .execute(
                        schema::UPDATE_USER,
                        rusqlite::params![
                            row.id,
                            row.handle,
                            row.display_name,
                            row.email,
                            gradient_from,
                            gradient_to,
                            row.avatar_url,
                            row.banner_url,
                            row.bio,
                            row.is_verified,
                            row.is_active,
                            metadata,
                            updated_at
                        ],
                    )
                    .map_err(wrap_err)?;
                require_row(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_write_error(e, USER_ENTITY, &target))
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        let id_owned = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_USER, [&id_owned])
                    .map_err(wrap_err)?;
                require_row(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, USER_ENTITY, id))
    }

    async fn update_last_seen(&self, id: &str) -> Result<()> {
        let id_owned = id.to_string();
        let seen_at = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::UPDATE_USER_LAST_SEEN, [&id_owned, &seen_at])
                    .map_err(wrap_err)?;
                require_row(rows)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, USER_ENTITY, id))
    }
}
