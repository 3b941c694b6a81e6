//! Time-based expiry.
//!
//! Each slot's tag records when its current entry was inserted, as
//! nanoseconds since the strategy's own epoch (an [`Instant`] captured at
//! construction, so the clock is monotonic and per instance). An entry older
//! than the expiry duration is stale:
//!
//! - a hit on a stale entry is vetoed and the cache reports a miss;
//! - victim selection returns the first stale slot it finds, and otherwise
//!   the oldest slot (first in array order on ties).
//!
//! Hits never write the tag, so `get` runs under the shared lock. A stale
//! entry stays in its slot until it is recycled or removed; it is simply never
//! returned again.
//!
//! ```text
//!   expiry = 100ms, now = 250ms
//!
//!   tags (ms):  [ 200 | 120 | 140 | 190 ]
//!   age  (ms):  [  50 | 130 | 110 |  60 ]
//!                        ▲
//!                        └── first age ≥ expiry → victim = 1 (scan stops)
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use std::time::Duration;
//!
//! use multicache::cache::Cache;
//! use multicache::policy::timed_expire::TimedExpire;
//!
//! let cache = Cache::new(16, TimedExpire::new(Duration::from_secs(60))).unwrap();
//! cache.add("session:1", "alice");
//! assert_eq!(cache.get(&"session:1").as_deref(), Some(&"alice"));
//!
//! // Zero expiry: every entry is stale the moment it is stored.
//! let instant = Cache::new(4, TimedExpire::from_millis(0)).unwrap();
//! instant.add("k", 1);
//! assert!(instant.get(&"k").is_none());
//! ```

use std::time::{Duration, Instant};

use crate::ds::SlotId;
use crate::traits::EvictionStrategy;

#[derive(Debug, Clone)]
pub struct TimedExpire {
    expiry: Duration,
    epoch: Instant,
}

impl TimedExpire {
    /// Creates a strategy that expires entries `expiry` after insertion.
    pub fn new(expiry: Duration) -> Self {
        Self {
            expiry,
            epoch: Instant::now(),
        }
    }

    /// Creates a strategy with an expiry given in milliseconds.
    pub fn from_millis(expiry_ms: u64) -> Self {
        Self::new(Duration::from_millis(expiry_ms))
    }

    #[inline]
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    #[inline]
    fn now(&self) -> i64 {
        saturating_nanos(self.epoch.elapsed())
    }

    #[inline]
    fn expiry_nanos(&self) -> i64 {
        saturating_nanos(self.expiry)
    }

    /// Index of the first expired slot, else of the oldest one.
    fn find_victim(tags: &[i64], now: i64, expiry: i64) -> usize {
        let mut oldest = 0;
        let mut oldest_age = i64::MIN;
        for (idx, &tag) in tags.iter().enumerate() {
            let age = now.saturating_sub(tag);
            if age >= expiry {
                return idx;
            }
            if age > oldest_age {
                oldest_age = age;
                oldest = idx;
            }
        }
        oldest
    }
}

#[inline]
fn saturating_nanos(duration: Duration) -> i64 {
    i64::try_from(duration.as_nanos()).unwrap_or(i64::MAX)
}

impl EvictionStrategy for TimedExpire {
    fn name(&self) -> &'static str {
        "timed-expire"
    }

    fn reset(&mut self, _tags: &mut [i64]) {}

    fn select_victim(&mut self, tags: &mut [i64]) -> SlotId {
        let now = self.now();
        let victim = Self::find_victim(tags, now, self.expiry_nanos());
        log::trace!("timed-expire victim slot={victim} age_ns={}", now.saturating_sub(tags[victim]));
        tags[victim] = now;
        SlotId(victim)
    }

    fn access_is_mutating(&self) -> bool {
        false
    }

    #[inline]
    fn validate_access(&self, tag: i64) -> bool {
        self.now().saturating_sub(tag) < self.expiry_nanos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod victim_selection {
        use super::*;

        #[test]
        fn first_expired_short_circuits() {
            // ages: 50, 130, 110, 60 with expiry 100
            let tags = [200, 120, 140, 190];
            assert_eq!(TimedExpire::find_victim(&tags, 250, 100), 1);
        }

        #[test]
        fn oldest_wins_when_nothing_expired() {
            let tags = [200, 180, 160, 190];
            assert_eq!(TimedExpire::find_victim(&tags, 250, 1_000), 2);
        }

        #[test]
        fn ties_go_to_first_slot() {
            let tags = [10, 10, 10];
            assert_eq!(TimedExpire::find_victim(&tags, 10, 1_000), 0);
        }

        #[test]
        fn victim_is_stamped_with_insertion_time() {
            let mut te = TimedExpire::new(Duration::from_secs(3_600));
            let mut tags = [0i64; 2];
            std::thread::sleep(Duration::from_millis(2));
            let victim = te.select_victim(&mut tags);
            assert!(tags[victim.index()] > 0);
        }

        #[test]
        fn zero_expiry_always_returns_first_slot() {
            let mut te = TimedExpire::from_millis(0);
            let mut tags = [0i64; 4];
            for _ in 0..4 {
                assert_eq!(te.select_victim(&mut tags).index(), 0);
            }
        }
    }

    mod access_validity {
        use super::*;

        #[test]
        fn zero_expiry_is_never_valid() {
            let te = TimedExpire::from_millis(0);
            let tag = te.now();
            assert!(!te.validate_access(tag));
        }

        #[test]
        fn fresh_entry_is_valid() {
            let te = TimedExpire::new(Duration::from_secs(3_600));
            assert!(te.validate_access(te.now()));
        }

        #[test]
        fn entry_expires_after_duration() {
            let te = TimedExpire::from_millis(5);
            let tag = te.now();
            std::thread::sleep(Duration::from_millis(20));
            assert!(!te.validate_access(tag));
        }

        #[test]
        fn huge_expiry_saturates() {
            let te = TimedExpire::new(Duration::MAX);
            assert_eq!(te.expiry_nanos(), i64::MAX);
            assert!(te.validate_access(0));
        }

        #[test]
        fn access_does_not_touch_tag() {
            let mut te = TimedExpire::new(Duration::from_secs(60));
            let mut tag = te.now();
            let before = tag;
            assert!(te.on_access(&mut tag));
            assert_eq!(tag, before);
            assert!(!te.access_is_mutating());
        }
    }
}
