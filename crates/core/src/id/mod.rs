//! Collision-resistant, type-tagged identifiers.
//!
//! Tagged identifiers look like `user_3f2a9c0d1e7b4a55c91d2` (tag of at most
//! four characters, an underscore, 21 lowercase hex characters). Untagged
//! identifiers are the 32 hex characters of a UUID with the dashes removed.

mod generator;
mod source;

pub use generator::{
    generate, generate_uuid, is_valid_id, split_id, IdGenerator, SUFFIX_LEN, TAG_MAX_LEN,
    UUID_HEX_LEN,
};
pub use source::{SeededSource, SystemSource, UuidSource};
