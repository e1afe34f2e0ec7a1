//! Redis cache backend implementation.
//!
//! Provides a distributed cache using Redis for multi-instance deployments.
//! Supports connection pooling and per-key TTL.

mod cache;
mod error;

pub use cache::RedisCache;
