//! Functional core for keel.
//!
//! Pure types, traits and functions with no I/O: the user entity, the
//! repository and cache capabilities, cache key and payload helpers, the
//! cache fault policy, and identifier generation.

pub mod cache;
pub mod id;
pub mod storage;
pub mod user;
