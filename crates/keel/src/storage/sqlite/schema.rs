//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    handle TEXT NOT NULL UNIQUE,
    display_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    avatar_gradient_from TEXT NOT NULL,
    avatar_gradient_to TEXT NOT NULL,
    avatar_url TEXT,
    banner_url TEXT,
    bio TEXT,
    is_verified INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    metadata TEXT NOT NULL DEFAULT '{}',
    followers_count INTEGER NOT NULL DEFAULT 0,
    following_count INTEGER NOT NULL DEFAULT 0,
    posts_count INTEGER NOT NULL DEFAULT 0,
    last_seen_at TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

// Column order shared by every SELECT; `row_to_user` depends on it.
macro_rules! user_columns {
    () => {
        "id, handle, display_name, email, password_hash, avatar_gradient_from, \
         avatar_gradient_to, avatar_url, banner_url, bio, is_verified, is_active, metadata, \
         followers_count, following_count, posts_count, last_seen_at, created_at, updated_at"
    };
}

pub const INSERT_USER: &str = concat!(
    "INSERT INTO users (",
    user_columns!(),
    ") VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)"
);

pub const SELECT_USER_BY_ID: &str = concat!("SELECT ", user_columns!(), " FROM users WHERE id = ?1");

pub const SELECT_USER_BY_EMAIL: &str =
    concat!("SELECT ", user_columns!(), " FROM users WHERE email = ?1");

pub const SELECT_USER_BY_HANDLE: &str =
    concat!("SELECT ", user_columns!(), " FROM users WHERE handle = ?1");

pub const UPDATE_USER: &str = r#"
UPDATE users
SET handle = ?2, display_name = ?3, email = ?4, avatar_gradient_from = ?5,
    avatar_gradient_to = ?6, avatar_url = ?7, banner_url = ?8, bio = ?9,
    is_verified = ?10, is_active = ?11, metadata = ?12, updated_at = ?13
WHERE id = ?1
"#;

pub const UPDATE_USER_LAST_SEEN: &str = r#"
UPDATE users
SET last_seen_at = ?2
WHERE id = ?1
"#;

pub const DELETE_USER: &str = r#"
DELETE FROM users
WHERE id = ?1
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(CREATE_TABLES.contains("handle TEXT NOT NULL UNIQUE"));
        assert!(CREATE_TABLES.contains("email TEXT NOT NULL UNIQUE"));
    }

    #[test]
    fn test_queries_contain_expected_keywords() {
        assert!(INSERT_USER.starts_with("INSERT INTO users (id, handle"));
        assert!(INSERT_USER.contains("?19"));
        assert!(SELECT_USER_BY_ID.ends_with("WHERE id = ?1"));
        assert!(SELECT_USER_BY_EMAIL.ends_with("WHERE email = ?1"));
        assert!(SELECT_USER_BY_HANDLE.ends_with("WHERE handle = ?1"));
        assert!(UPDATE_USER.contains("UPDATE users"));
        assert!(!UPDATE_USER.contains("password_hash"));
        assert!(UPDATE_USER_LAST_SEEN.contains("last_seen_at"));
        assert!(DELETE_USER.contains("DELETE"));
    }
}
