//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of `UserRepository`
//! that stores all data in a HashMap wrapped in `Arc<RwLock<_>>`. This is useful
//! for testing and development scenarios where persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use keel::storage::inmemory::InMemoryUserRepository;
//!
//! let repo = InMemoryUserRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryUserRepository;
