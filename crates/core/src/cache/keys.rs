use crate::user::USER_ENTITY;

/// Returns the cache key for one entity instance: `<entity-type-lowercase>:<id>`.
///
/// # Examples
///
/// ```
/// use keel_core::cache::entity_key;
///
/// assert_eq!(entity_key("User", "user_abc"), "user:user_abc");
/// ```
pub fn entity_key(entity_type: &str, id: &str) -> String {
    format!("{}:{}", entity_type.to_lowercase(), id)
}

/// Returns the cache key for a user.
pub fn user_key(user_id: &str) -> String {
    entity_key(USER_ENTITY, user_id)
}
