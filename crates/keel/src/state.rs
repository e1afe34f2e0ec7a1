//! Application state with repository-based storage.
//!
//! This module wires the configured store and cache into a single
//! `Arc<dyn UserRepository>`. Callers never know whether they hold the bare
//! store or the caching decorator.

use std::sync::Arc;

use keel_core::cache::Cache;
use keel_core::storage::UserRepository;

use crate::config::Config;
use crate::storage::CachedUserRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// User repository (cached unless caching is disabled or unavailable).
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// Builds the state from configuration.
    ///
    /// The store is SQLite when the `sqlite` feature is enabled, in-memory
    /// otherwise. The cache is Redis when the `redis` feature is enabled, the
    /// in-process LRU cache otherwise.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        #[cfg(feature = "sqlite")]
        let store = {
            tracing::debug!(path = %config.sqlite_path, "Opening SQLite store");
            Arc::new(crate::storage::SqliteUserRepository::new(&config.sqlite_path).await?)
        };

        #[cfg(not(feature = "sqlite"))]
        let store = Arc::new(crate::storage::InMemoryUserRepository::new());

        Ok(Self::with_store(store, config).await)
    }

    /// Wraps `store` according to the cache settings in `config`.
    pub async fn with_store<R>(store: Arc<R>, config: &Config) -> Self
    where
        R: UserRepository + 'static,
    {
        let users: Arc<dyn UserRepository> = if config.cache_enabled {
            decorate(store, config).await
        } else {
            tracing::info!("Cache disabled, using the store directly");
            store
        };

        Self { users }
    }

    /// Uses an already-built repository as is.
    pub fn with_repository(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

/// Wraps `store` in the cache decorator over `cache`.
pub fn cached<R, C>(store: Arc<R>, cache: Arc<C>, config: &Config) -> Arc<dyn UserRepository>
where
    R: UserRepository + 'static,
    C: Cache + 'static,
{
    let repo = CachedUserRepository::new(store, cache, config.cache_ttl());
    match config.cache_timeout() {
        Some(timeout) => Arc::new(repo.with_cache_timeout(timeout)),
        None => Arc::new(repo),
    }
}

#[cfg(feature = "redis")]
async fn decorate<R>(store: Arc<R>, config: &Config) -> Arc<dyn UserRepository>
where
    R: UserRepository + 'static,
{
    match crate::cache::RedisCache::new(&config.redis_url).await {
        Ok(cache) => {
            tracing::info!(url = %config.redis_url, "Using Redis cache");
            cached(store, Arc::new(cache), config)
        }
        Err(err) => {
            tracing::warn!(
                url = %config.redis_url,
                error = %err,
                "Redis unreachable, running without cache"
            );
            store
        }
    }
}

#[cfg(not(feature = "redis"))]
async fn decorate<R>(store: Arc<R>, config: &Config) -> Arc<dyn UserRepository>
where
    R: UserRepository + 'static,
{
    tracing::debug!(max_entries = config.cache_max_entries, "Using memory cache");
    let cache = Arc::new(crate::cache::MemoryCache::new(config.cache_max_entries));
    cached(store, cache, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_core::user::User;

    use crate::cache::MemoryCache;
    use crate::storage::InMemoryUserRepository;

    fn config(cache_enabled: bool) -> Config {
        Config {
            cache_enabled,
            cache_ttl_seconds: 60,
            cache_max_entries: 100,
            cache_timeout_ms: 250,
            sqlite_path: ":memory:".to_string(),
            redis_url: "redis://localhost:6379".to_string(),
        }
    }

    #[tokio::test]
    async fn test_cached_repository_fills_shared_cache() {
        let store = Arc::new(InMemoryUserRepository::new());
        let cache = Arc::new(MemoryCache::new(100));
        let users = cached(store, Arc::clone(&cache), &config(true));
        let user = User::new("ada", "Ada Lovelace", "ada@example.com");

        users.create_user(&user).await.unwrap();
        assert!(cache.is_empty().await);

        assert_eq!(users.get_user(&user.id).await.unwrap(), user);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_disabled_cache_uses_store_directly() {
        let store = Arc::new(InMemoryUserRepository::new());
        let state = AppState::with_store(Arc::clone(&store), &config(false)).await;
        let user = User::new("ada", "Ada Lovelace", "ada@example.com");

        state.users.create_user(&user).await.unwrap();
        state.users.get_user(&user.id).await.unwrap();
        store.delete_user(&user.id).await.unwrap();

        // Nothing cached, so the deletion behind the state's back is visible.
        assert!(state.users.get_user(&user.id).await.unwrap_err().is_not_found());
    }
}
