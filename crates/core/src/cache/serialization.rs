//! Pure functions for serializing/deserializing domain types to/from cache bytes.
//!
//! These functions use JSON serialization for cache storage, providing human-readable
//! cache values that are easy to debug and inspect.

use crate::user::User;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a user to JSON bytes.
pub fn serialize_user(user: &User) -> Result<Vec<u8>> {
    serde_json::to_vec(user).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a user.
pub fn deserialize_user(bytes: &[u8]) -> Result<User> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn fixed_timestamp() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    fn test_user() -> User {
        User::new("ada", "Ada Lovelace", "ada@example.com")
            .with_id("user_550e8400e29b41d4a7164")
            .with_created_at(fixed_timestamp())
            .with_updated_at(fixed_timestamp())
    }

    #[test]
    fn test_roundtrip_user_with_all_optional_fields() {
        let mut user = test_user()
            .with_password_hash("$argon2id$v=19$abc")
            .with_bio("First programmer")
            .with_avatar_url("https://cdn.example.com/a.png")
            .with_metadata("theme", json!("dark"))
            .with_metadata("notifications", json!({"email": false, "push": true}));
        user.banner_url = Some("https://cdn.example.com/b.png".to_string());
        user.last_seen_at = Some(fixed_timestamp());
        user.followers_count = 12;
        user.is_verified = true;

        let bytes = serialize_user(&user).expect("serialize should succeed");
        let deserialized = deserialize_user(&bytes).expect("deserialize should succeed");

        assert_eq!(user, deserialized);
    }

    #[test]
    fn test_payload_is_field_tagged() {
        let bytes = serialize_user(&test_user()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["id"], "user_550e8400e29b41d4a7164");
        assert_eq!(value["handle"], "ada");
        assert_eq!(value["email"], "ada@example.com");
        assert!(value["last_seen_at"].is_null());
    }

    #[test]
    fn test_subsecond_timestamps_survive() {
        let precise = Utc.timestamp_opt(1_718_447_400, 123_456_789).unwrap();
        let user = test_user().with_updated_at(precise);

        let deserialized = deserialize_user(&serialize_user(&user).unwrap()).unwrap();

        assert_eq!(deserialized.updated_at, precise);
    }

    #[test]
    fn test_deserialize_user_malformed_bytes() {
        let result = deserialize_user(b"not valid json");
        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }

    #[test]
    fn test_deserialize_user_wrong_shape() {
        let result = deserialize_user(b"[1, 2, 3]");
        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }

    #[test]
    fn test_deserialize_user_missing_metadata_defaults_to_empty() {
        let mut value = serde_json::to_value(test_user()).unwrap();
        value.as_object_mut().unwrap().remove("metadata");

        let user = deserialize_user(&serde_json::to_vec(&value).unwrap()).unwrap();

        assert!(user.metadata.is_empty());
    }
}
