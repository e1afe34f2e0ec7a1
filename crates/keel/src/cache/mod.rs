//! Cache backend implementations.
//!
//! This module provides concrete implementations of the cache trait
//! defined in `keel_core::cache`.
//!
//! The in-memory LRU cache is always built. The Redis cache needs the
//! `redis` feature.

pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
