//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use keel_core::storage::{RepositoryError, Result, UserRepository};
use keel_core::user::{User, USER_ENTITY};

/// In-memory storage backend.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Enforces the same uniqueness rules as the SQLite schema: one user per ID,
/// per email and per handle. Data is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: &str) -> RepositoryError {
    RepositoryError::NotFound {
        entity_type: USER_ENTITY,
        id: id.to_string(),
    }
}

/// Checks `user`'s email and handle against every other stored user.
fn check_unique(users: &HashMap<String, User>, user: &User) -> Result<()> {
    for other in users.values().filter(|other| other.id != user.id) {
        if other.email == user.email {
            return Err(RepositoryError::Conflict {
                entity_type: USER_ENTITY,
                field: "email",
                value: user.email.clone(),
            });
        }
        if other.handle == user.handle {
            return Err(RepositoryError::Conflict {
                entity_type: USER_ENTITY,
                field: "handle",
                value: user.handle.clone(),
            });
        }
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_user(&self, id: &str) -> Result<User> {
        let users = self.users.read().await;
        users.get(id).cloned().ok_or_else(|| not_found(id))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User> {
        let users = self.users.read().await;
        users
            .values()
            .find(|user| user.email == email)
            .cloned()
            .ok_or_else(|| not_found(email))
    }

    async fn get_user_by_handle(&self, handle: &str) -> Result<User> {
        let users = self.users.read().await;
        users
            .values()
            .find(|user| user.handle == handle)
            .cloned()
            .ok_or_else(|| not_found(handle))
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: USER_ENTITY,
                id: user.id.clone(),
            });
        }
        check_unique(&users, user)?;
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(not_found(&user.id));
        }
        check_unique(&users, user)?;

        let stored = users.get_mut(&user.id).ok_or_else(|| not_found(&user.id))?;
        // Credentials, counters and timestamps have their own write paths.
        stored.handle = user.handle.clone();
        stored.display_name = user.display_name.clone();
        stored.email = user.email.clone();
        stored.avatar_gradient = user.avatar_gradient.clone();
        stored.avatar_url = user.avatar_url.clone();
        stored.banner_url = user.banner_url.clone();
        stored.bio = user.bio.clone();
        stored.is_verified = user.is_verified;
        stored.is_active = user.is_active;
        stored.metadata = user.metadata.clone();
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        let mut users = self.users.write().await;
        users.remove(id).map(|_| ()).ok_or_else(|| not_found(id))
    }

    async fn update_last_seen(&self, id: &str) -> Result<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or_else(|| not_found(id))?;
        user.last_seen_at = Some(Utc::now());
        Ok(())
    }
}
