//! Cached repository decorators.
//!
//! Decorators wrap a repository trait with cache-aside behavior:
//!
//! - **Reads**: Check cache first, on miss fetch from repository and populate cache
//! - **Writes**: Persist to repository, then invalidate the cached entry
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let repo = Arc::new(SqliteUserRepository::new("keel.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000));
//!
//! let cached_repo = CachedUserRepository::new(repo, cache, Duration::from_secs(3600))
//!     .with_cache_timeout(Duration::from_millis(250));
//! ```

mod user;

pub use user::CachedUserRepository;
