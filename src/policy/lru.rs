//! Least-recently-used replacement over a logical clock.
//!
//! Every hit stamps the slot's tag with the next value of a per-instance
//! monotonic counter; the victim is the slot with the smallest tag. Freshly
//! purged slots carry tag `0`, so free slots are always chosen before any
//! occupied one.
//!
//! ## Why A Linear Scan
//!
//! Victim selection walks the whole tag column, which is O(capacity). A heap
//! would need fewer comparisons, but the tags are a dense `i64` array, so the
//! scan is sequential and prefetch-friendly while a heap would be scattered.
//! For the small-to-medium capacities this cache targets the scan wins.
//!
//! ```text
//!   tags:   [ 12 |  3 |  9 |  3 ]      counter = 12
//!                  ▲
//!                  └── minimum, first in array order on ties → victim = 1
//!
//!   after select_victim:  [ 12 | 13 |  9 |  3 ]   counter = 13
//! ```
//!
//! The victim is stamped as soon as it is chosen, so a new entry starts as
//! the most recently used one.
//!
//! ## Example Usage
//!
//! ```
//! use multicache::cache::Cache;
//! use multicache::policy::lru::LeastRecentlyUsed;
//!
//! let cache = Cache::new(2, LeastRecentlyUsed::new()).unwrap();
//! cache.add("a", 1);
//! cache.add("b", 2);
//! cache.get(&"a");            // "a" is now the most recent
//! cache.add("c", 3);          // evicts "b"
//!
//! assert!(cache.contains(&"a"));
//! assert!(!cache.contains(&"b"));
//! ```

use crate::ds::SlotId;
use crate::traits::EvictionStrategy;

#[derive(Debug, Clone, Default)]
pub struct LeastRecentlyUsed {
    counter: i64,
}

impl LeastRecentlyUsed {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn tick(&mut self) -> i64 {
        self.counter += 1;
        self.counter
    }
}

impl EvictionStrategy for LeastRecentlyUsed {
    fn name(&self) -> &'static str {
        "lru"
    }

    fn reset(&mut self, _tags: &mut [i64]) {
        self.counter = 0;
    }

    fn select_victim(&mut self, tags: &mut [i64]) -> SlotId {
        let mut victim = 0;
        for (idx, &tag) in tags.iter().enumerate().skip(1) {
            if tag < tags[victim] {
                victim = idx;
            }
        }
        tags[victim] = self.tick();
        SlotId(victim)
    }

    fn access_is_mutating(&self) -> bool {
        true
    }

    #[inline]
    fn on_access(&mut self, tag: &mut i64) -> bool {
        *tag = self.tick();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_minimum_tag() {
        let mut lru = LeastRecentlyUsed::new();
        let mut tags = [12i64, 3, 9, 4];
        assert_eq!(lru.select_victim(&mut tags).index(), 1);
    }

    #[test]
    fn ties_go_to_first_slot() {
        let mut lru = LeastRecentlyUsed::new();
        let mut tags = [5i64, 2, 2, 2];
        assert_eq!(lru.select_victim(&mut tags).index(), 1);
    }

    #[test]
    fn victim_is_stamped_most_recent() {
        let mut lru = LeastRecentlyUsed::new();
        let mut tags = [0i64; 3];
        lru.reset(&mut tags);

        assert_eq!(lru.select_victim(&mut tags).index(), 0);
        assert_eq!(lru.select_victim(&mut tags).index(), 1);
        assert_eq!(lru.select_victim(&mut tags).index(), 2);
        assert_eq!(tags, [1, 2, 3]);
        // All occupied: oldest insertion goes first.
        assert_eq!(lru.select_victim(&mut tags).index(), 0);
    }

    #[test]
    fn access_protects_slot() {
        let mut lru = LeastRecentlyUsed::new();
        let mut tags = [0i64; 2];
        lru.select_victim(&mut tags); // slot 0 = 1
        lru.select_victim(&mut tags); // slot 1 = 2
        assert!(lru.on_access(&mut tags[0])); // slot 0 = 3
        assert_eq!(lru.select_victim(&mut tags).index(), 1);
    }

    #[test]
    fn counter_restarts_on_reset() {
        let mut lru = LeastRecentlyUsed::new();
        let mut tag = 0;
        lru.on_access(&mut tag);
        lru.on_access(&mut tag);
        assert_eq!(tag, 2);

        let mut tags = [0i64; 1];
        lru.reset(&mut tags);
        lru.on_access(&mut tag);
        assert_eq!(tag, 1);
    }

    #[test]
    fn is_mutating() {
        assert!(LeastRecentlyUsed::new().access_is_mutating());
    }
}
