//! Random value providers backing identifier generation.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::{Builder, Uuid};

/// Provides fresh 128-bit random UUIDs.
///
/// Implementations must be safe to call from many threads at once.
pub trait UuidSource: Send + Sync {
    /// Returns the next random UUID.
    fn next_uuid(&self) -> Uuid;
}

/// Process-wide OS-seeded random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSource;

impl UuidSource for SystemSource {
    fn next_uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic source driven by a seeded generator.
///
/// Two sources built from the same seed yield the same sequence, which makes
/// identifiers reproducible in tests and fixtures. Never use it for
/// production identifiers.
#[derive(Debug)]
pub struct SeededSource {
    rng: Mutex<StdRng>,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl UuidSource for SeededSource {
    fn next_uuid(&self) -> Uuid {
        let mut bytes = [0u8; 16];
        // The generator state is still valid after a panic elsewhere.
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }
}
