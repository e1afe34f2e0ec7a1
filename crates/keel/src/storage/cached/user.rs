//! Cached user repository decorator.
//!
//! Wraps a `UserRepository` implementation with the cache-aside pattern.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use keel_core::cache::{
    classify_lookup, deserialize_user, serialize_user, surface_invalidation, user_key, Cache,
    CacheError, Lookup, Result as CacheResult,
};
use keel_core::storage::{Result, UserRepository};
use keel_core::user::{User, USER_ENTITY};

/// Cached user repository decorator.
///
/// - **Reads by ID**: check cache first. A miss or any cache fault falls
///   through to the repository, and the result is written back with the TTL.
/// - **Writes**: persist to the repository, then delete the cached entry. A
///   failed delete is returned as `RepositoryError::CacheInvalidation` even
///   though the write itself was committed.
/// - **Reads by email or handle**: not cached.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `C` - The cache implementation
pub struct CachedUserRepository<R, C>
where
    R: UserRepository,
    C: Cache,
{
    repository: Arc<R>,
    cache: Arc<C>,
    ttl: Duration,
    cache_timeout: Option<Duration>,
}

impl<R, C> CachedUserRepository<R, C>
where
    R: UserRepository,
    C: Cache,
{
    /// Creates a new cached user repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository to cache
    /// * `cache` - The cache implementation
    /// * `ttl` - Time-to-live for cached users
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache,
            ttl,
            cache_timeout: None,
        }
    }

    /// Bounds every cache call by `timeout`. An elapsed call counts as a
    /// cache fault.
    pub fn with_cache_timeout(mut self, timeout: Duration) -> Self {
        self.cache_timeout = Some(timeout);
        self
    }

    async fn bounded<T, F>(&self, op: F) -> CacheResult<T>
    where
        F: Future<Output = CacheResult<T>> + Send,
        T: Send,
    {
        match self.cache_timeout {
            Some(limit) => tokio::time::timeout(limit, op)
                .await
                .unwrap_or(Err(CacheError::Timeout(limit))),
            None => op.await,
        }
    }

    /// Deletes the cached copy of `id` after a committed write.
    async fn invalidate(&self, id: &str) -> Result<()> {
        let result = self.bounded(self.cache.delete(&user_key(id))).await;
        match surface_invalidation(result, USER_ENTITY, id) {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::error!(user_id = %id, error = %err, "Failed to invalidate user cache");
                Err(err)
            }
        }
    }
}

#[async_trait]
impl<R, C> UserRepository for CachedUserRepository<R, C>
where
    R: UserRepository + 'static,
    C: Cache + 'static,
{
    async fn get_user(&self, id: &str) -> Result<User> {
        let cache_key = user_key(id);

        let lookup = classify_lookup(
            self.bounded(self.cache.get(&cache_key)).await,
            deserialize_user,
        );
        match lookup {
            Lookup::Hit(user) => {
                tracing::trace!(user_id = %id, "Cache hit for user");
                return Ok(user);
            }
            Lookup::Miss => tracing::trace!(user_id = %id, "Cache miss for user"),
            Lookup::Fault(err) => {
                tracing::warn!(user_id = %id, error = %err, "Cache read failed, using store");
            }
        }

        let user = self.repository.get_user(id).await?;

        match serialize_user(&user) {
            Ok(bytes) => {
                let result = self
                    .bounded(self.cache.set(&cache_key, &bytes, Some(self.ttl)))
                    .await;
                if let Err(err) = result {
                    tracing::warn!(user_id = %id, error = %err, "Failed to cache user");
                }
            }
            Err(err) => tracing::warn!(user_id = %id, error = %err, "Failed to encode user"),
        }

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User> {
        self.repository.get_user_by_email(email).await
    }

    async fn get_user_by_handle(&self, handle: &str) -> Result<User> {
        self.repository.get_user_by_handle(handle).await
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        self.repository.create_user(user).await?;
        tracing::debug!(user_id = %user.id, handle = %user.handle, "User created");
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        self.repository.update_user(user).await?;
        self.invalidate(&user.id).await?;
        tracing::debug!(user_id = %user.id, handle = %user.handle, "User updated");
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        self.repository.delete_user(id).await?;
        self.invalidate(id).await?;
        tracing::debug!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn update_last_seen(&self, id: &str) -> Result<()> {
        self.repository.update_last_seen(id).await?;
        self.invalidate(id).await?;
        tracing::debug!(user_id = %id, "User last seen updated");
        Ok(())
    }
}
