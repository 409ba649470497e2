//! Correlation id implementations.

use rand::Rng;

use crate::infrastructure::ports::IdSource;

/// Lower bound (inclusive) of generated correlation ids.
pub const MIN_ID: u32 = 1;

/// Upper bound (exclusive) of generated correlation ids.
pub const MAX_ID: u32 = 10_000;

/// Thread-local RNG ids - uses real randomness.
pub struct ThreadRngIds;

impl ThreadRngIds {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ThreadRngIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for ThreadRngIds {
    fn next_id(&self) -> u32 {
        rand::thread_rng().gen_range(MIN_ID..MAX_ID)
    }
}

/// Fixed id for testing.
#[cfg(test)]
pub struct FixedIds(pub u32);

#[cfg(test)]
impl IdSource for FixedIds {
    fn next_id(&self) -> u32 {
        self.0
    }
}
