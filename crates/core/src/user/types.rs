use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id;

/// Entity type name used in errors and cache keys.
pub const USER_ENTITY: &str = "User";

/// Tag used when minting user identifiers.
const USER_ID_TAG: &str = "user";

const DEFAULT_AVATAR_GRADIENT: [&str; 2] = ["#6366f1", "#ec4899"];

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub handle: String,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    /// Two CSS colors rendered when no avatar image is set.
    pub avatar_gradient: [String; 2],
    pub avatar_url: Option<String>,
    pub banner_url: Option<String>,
    pub bio: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    /// Free-form settings.
    #[serde(default)]
    pub metadata: Map<String, Value>,
    pub followers_count: i64,
    pub following_count: i64,
    pub posts_count: i64,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user with a freshly minted `user_` identifier.
    pub fn new(
        handle: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id::generate(USER_ID_TAG),
            handle: handle.into(),
            display_name: display_name.into(),
            email: email.into(),
            password_hash: String::new(),
            avatar_gradient: DEFAULT_AVATAR_GRADIENT.map(String::from),
            avatar_url: None,
            banner_url: None,
            bio: None,
            is_verified: false,
            is_active: true,
            metadata: Map::new(),
            followers_count: 0,
            following_count: 0,
            posts_count: 0,
            last_seen_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets a specific ID for this user (useful for testing).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = hash.into();
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }
}
