//! keel: cache-aside user repository.
//!
//! Storage backends, cache backends and the caching decorator that joins
//! them, plus the configuration and command layer used by the `keel` binary.
//! Pure types and policy live in `keel_core`.

pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
