use async_trait::async_trait;

use crate::user::User;

use super::Result;

/// Repository for user operations.
///
/// Implemented both by the raw stores and by the caching decorator, so callers
/// hold an `Arc<dyn UserRepository>` and never know which one they got.
/// Lookups report absence as [`RepositoryError::NotFound`](super::RepositoryError::NotFound).
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by their ID.
    async fn get_user(&self, id: &str) -> Result<User>;

    /// Gets a user by their email address.
    async fn get_user_by_email(&self, email: &str) -> Result<User>;

    /// Gets a user by their handle.
    async fn get_user_by_handle(&self, handle: &str) -> Result<User>;

    /// Creates a new user.
    async fn create_user(&self, user: &User) -> Result<()>;

    /// Updates an existing user.
    async fn update_user(&self, user: &User) -> Result<()>;

    /// Deletes a user by their ID.
    async fn delete_user(&self, id: &str) -> Result<()>;

    /// Sets the user's last-seen timestamp to now.
    async fn update_last_seen(&self, id: &str) -> Result<()>;
}
