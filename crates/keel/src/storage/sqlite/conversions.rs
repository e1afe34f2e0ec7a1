//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde_json::{Map, Value};

use keel_core::user::User;

/// Convert a SQLite row to a User.
///
/// Expected columns: see `schema::user_columns!`.
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let metadata: String = row.get(12)?;
    let last_seen_at: Option<String> = row.get(16)?;
    let created_at: String = row.get(17)?;
    let updated_at: String = row.get(18)?;

    Ok(User {
        id: row.get(0)?,
        handle: row.get(1)?,
        display_name: row.get(2)?,
        email: row.get(3)?,
        password_hash: row.get(4)?,
        avatar_gradient: [row.get(5)?, row.get(6)?],
        avatar_url: row.get(7)?,
        banner_url: row.get(8)?,
        bio: row.get(9)?,
        is_verified: row.get(10)?,
        is_active: row.get(11)?,
        metadata: parse_metadata(&metadata)?,
        followers_count: row.get(13)?,
        following_count: row.get(14)?,
        posts_count: row.get(15)?,
        last_seen_at: last_seen_at.as_deref().map(parse_datetime).transpose()?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Serialize user metadata for the `metadata` column.
pub fn metadata_to_json(metadata: &Map<String, Value>) -> Result<String, serde_json::Error> {
    serde_json::to_string(metadata)
}

/// Parse the `metadata` column into a JSON object.
fn parse_metadata(s: &str) -> rusqlite::Result<Map<String, Value>> {
    serde_json::from_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(12, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
///
/// Sub-second precision is kept so a stored user reads back unchanged.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
