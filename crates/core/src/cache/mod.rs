mod error;
mod keys;
mod policy;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{entity_key, user_key};
pub use policy::{classify_lookup, surface_invalidation, Lookup};
pub use serialization::{deserialize_user, serialize_user, SerializationError};
pub use traits::Cache;
