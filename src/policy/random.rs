//! Random replacement.
//!
//! Victims are drawn uniformly from every slot of the arena, free or
//! occupied. This gives a baseline policy with minimal overhead and no access
//! tracking; some ARM cores use the same scheme in hardware because it does
//! surprisingly well for its cost.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                            Random Strategy                                  │
//! │                                                                             │
//! │   rng: SmallRng (per cache instance)                                        │
//! │                                                                             │
//! │   tags: [ -- | -- | -- | -- | -- ]      tags are never read or written      │
//! │            0    1    2    3    4                                            │
//! │                      ▲                                                      │
//! │                      └── random_range(0..capacity)                          │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Properties
//!
//! - **No Access Pattern Tracking**: hits run under the shared lock
//! - **Uniform Selection**: every slot is equally likely, so a free slot can
//!   survive while an occupied one is replaced
//! - **Baseline Policy**: useful for comparison with smarter strategies
//!
//! ## Determinism
//!
//! [`Random::new`] seeds from the operating system. Use
//! [`Random::with_seed`] for reproducible runs (tests, trace comparisons).
//!
//! ## Example Usage
//!
//! ```
//! use multicache::cache::Cache;
//! use multicache::policy::random::Random;
//!
//! let cache = Cache::new(10, Random::with_seed(7)).unwrap();
//! for i in 0..100u32 {
//!     cache.add(i, i * 10);
//! }
//! assert!(cache.len() <= 10);
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ds::SlotId;
use crate::traits::EvictionStrategy;

/// Uniform random victim selection.
#[derive(Debug, Clone)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    /// Creates a strategy seeded from operating-system entropy.
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    /// Creates a strategy with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

impl EvictionStrategy for Random {
    fn name(&self) -> &'static str {
        "random"
    }

    // Purge keeps the rng stream.
    fn reset(&mut self, _tags: &mut [i64]) {}

    #[inline]
    fn select_victim(&mut self, tags: &mut [i64]) -> SlotId {
        SlotId(self.rng.random_range(0..tags.len()))
    }

    fn access_is_mutating(&self) -> bool {
        false
    }
}
