//! Round-robin replacement.
//!
//! Recycles slots in a fixed rotation regardless of occupancy or access
//! history. It is the cheapest strategy available: victim selection is a
//! single modular increment and hits never touch strategy state, so `get`
//! runs under the shared lock.
//!
//! ```text
//!   capacity = 4, cursor starts at 0
//!
//!   insert #1 → slot 1
//!   insert #2 → slot 2
//!   insert #3 → slot 3
//!   insert #4 → slot 0
//!   insert #5 → slot 1   (oldest insertion is replaced)
//! ```

use crate::ds::SlotId;
use crate::traits::EvictionStrategy;

/// Rotating-cursor eviction; behaves like FIFO over insertions.
#[derive(Debug, Clone, Default)]
pub struct RoundRobin {
    position: usize,
}

impl RoundRobin {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EvictionStrategy for RoundRobin {
    fn name(&self) -> &'static str {
        "round-robin"
    }

    fn reset(&mut self, _tags: &mut [i64]) {
        self.position = 0;
    }

    #[inline]
    fn select_victim(&mut self, tags: &mut [i64]) -> SlotId {
        self.position = (self.position + 1) % tags.len();
        SlotId(self.position)
    }

    fn access_is_mutating(&self) -> bool {
        false
    }
}
