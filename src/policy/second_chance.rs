//! Second-chance (CLOCK) replacement.
//!
//! Works like [`RoundRobin`](crate::policy::round_robin::RoundRobin), but a
//! hit sets the slot's reference bit. When the hand reaches a referenced slot
//! it clears the bit and moves on, so a recently used entry survives one more
//! sweep. This approximates LRU at O(1) amortized cost per eviction and O(1)
//! per hit, without the linear scan.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                         SecondChance Strategy                               │
//! │                                                                             │
//! │     [0]     [1]     [2]     [3]     [4]                                     │
//! │    ┌───┐   ┌───┐   ┌───┐   ┌───┐   ┌───┐                                    │
//! │    │ 1 │   │ 1 │   │ 0 │   │ 1 │   │ 0 │     tag: 1 = referenced            │
//! │    └───┘   └───┘   └───┘   └───┘   └───┘          0 = evictable             │
//! │      ▲                                                                      │
//! │      └── hand                                                               │
//! │                                                                             │
//! │   select_victim: hand → 1 (clear) → 2 (tag 0) → victim = 2                  │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm
//!
//! ```text
//! SELECT_VICTIM():
//!   loop:
//!     hand = (hand + 1) % capacity
//!     if tags[hand] == 0: return hand
//!     tags[hand] = 0           // second chance
//!
//! ON_ACCESS(slot):
//!   tags[slot] = 1
//! ```
//!
//! The loop ends after at most two sweeps: the first clears every bit it
//! passes, so the second is guaranteed to find a zero.
//!
//! ## Performance Characteristics
//!
//! | Operation        | Time        | Notes                               |
//! |------------------|-------------|-------------------------------------|
//! | `select_victim`  | O(1) amort. | bounded sweep with bit clearing     |
//! | `on_access`      | O(1)        | bit set (needs the exclusive lock)  |
//!
//! SecondChance is the strategy used by
//! [`Cache::with_default_strategy`](crate::cache::Cache::with_default_strategy).

use crate::ds::SlotId;
use crate::traits::EvictionStrategy;

const REFERENCED: i64 = 1;
const EVICTABLE: i64 = 0;

/// CLOCK sweep with a single reference bit per slot.
#[derive(Debug, Clone, Default)]
pub struct SecondChance {
    hand: usize,
}

impl SecondChance {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EvictionStrategy for SecondChance {
    fn name(&self) -> &'static str {
        "second-chance"
    }

    fn reset(&mut self, _tags: &mut [i64]) {
        self.hand = 0;
    }

    fn select_victim(&mut self, tags: &mut [i64]) -> SlotId {
        loop {
            self.hand = (self.hand + 1) % tags.len();
            let tag = &mut tags[self.hand];
            if *tag == EVICTABLE {
                return SlotId(self.hand);
            }
            *tag = EVICTABLE;
        }
    }

    fn access_is_mutating(&self) -> bool {
        true
    }

    #[inline]
    fn on_access(&mut self, tag: &mut i64) -> bool {
        *tag = REFERENCED;
        true
    }
}
