//! Storage backend implementations.
//!
//! This module provides concrete implementations of `UserRepository` from
//! `keel_core::storage`, plus the caching decorator that wraps any of them.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! The in-memory backend is always available.
//!
//! # Examples
//!
//! Build without SQLite:
//! ```bash
//! cargo build -p keel --no-default-features
//! ```

pub mod cached;
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use cached::CachedUserRepository;
pub use inmemory::InMemoryUserRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteUserRepository;
