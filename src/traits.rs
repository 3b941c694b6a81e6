//! # Eviction Strategy Contract
//!
//! This module defines the seam between the [`Cache`](crate::cache::Cache)
//! and its replacement policy. A cache owns exactly one strategy; the strategy
//! decides which slot to recycle and how hits affect future decisions.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                            Cache<K, V, S>                            │
//!   │                                                                      │
//!   │   RwLock ─┬─ index: FxHashMap<K, SlotId>                             │
//!   │           ├─ arena: SlotArena<K, V>  ─── tags: [i64; capacity]       │
//!   │           └─ strategy: S ◄───────────────────┘                        │
//!   │                         only the tag column is lent to S             │
//!   └──────────────────────────────────────────────────────────────────────┘
//!
//!   add_many ──► select_victim(&mut tags) ──► SlotId ──► evict + bind
//!   get (hit) ─► on_access(&mut tag)        (exclusive lock)
//!            └─► validate_access(tag)       (shared lock)
//!   purge ─────► reset(&mut tags)
//! ```
//!
//! ## Locking Tier
//!
//! [`EvictionStrategy::access_is_mutating`] is read once when the cache is
//! built. If it returns `false`, `get` runs under the shared lock and calls
//! [`EvictionStrategy::validate_access`], which takes `&self`. If it returns
//! `true`, `get` takes the exclusive lock and calls
//! [`EvictionStrategy::on_access`].
//!
//! ## Rules For Implementors
//!
//! - `select_victim` must return an id below `tags.len()`. Free and occupied
//!   slots are both valid victims.
//! - A strategy never sees keys or values, and never holds a handle to the
//!   cache. The cache lock is not reentrant.
//! - All state is per instance. Two caches never share a strategy.
//!
//! ## Strategy Summary
//!
//! | Strategy            | Tag meaning            | Victim selection           | Mutating get |
//! |---------------------|------------------------|----------------------------|--------------|
//! | `RoundRobin`        | unused                 | rotating cursor            | no           |
//! | `Random`            | unused                 | uniform index              | no           |
//! | `LeastRecentlyUsed` | logical clock          | O(n) scan for minimum      | yes          |
//! | `SecondChance`      | reference bit          | clock sweep                | yes          |
//! | `TimedExpire`       | insertion time (ns)    | first expired, else oldest | no           |
//!
//! ## Example: Custom Strategy
//!
//! ```
//! use multicache::cache::Cache;
//! use multicache::ds::SlotId;
//! use multicache::traits::EvictionStrategy;
//!
//! /// Always recycles slot 0.
//! #[derive(Debug, Default)]
//! struct FirstSlot;
//!
//! impl EvictionStrategy for FirstSlot {
//!     fn name(&self) -> &'static str {
//!         "first-slot"
//!     }
//!
//!     fn reset(&mut self, _tags: &mut [i64]) {}
//!
//!     fn select_victim(&mut self, _tags: &mut [i64]) -> SlotId {
//!         SlotId::new(0)
//!     }
//!
//!     fn access_is_mutating(&self) -> bool {
//!         false
//!     }
//! }
//!
//! let cache = Cache::new(4, FirstSlot).unwrap();
//! cache.add("a", 1);
//! cache.add("b", 2);
//! assert!(cache.get(&"a").is_none());
//! assert_eq!(cache.get(&"b").as_deref(), Some(&2));
//! ```

use crate::ds::SlotId;

/// Replacement policy driven by a [`Cache`](crate::cache::Cache).
///
/// Every method runs while the owning cache already holds its lock.
pub trait EvictionStrategy: Send + Sync {
    /// Short human-readable name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Reinitializes private state.
    ///
    /// Called once at construction and on every purge. `tags` has already been
    /// zeroed by the cache.
    fn reset(&mut self, tags: &mut [i64]);

    /// Picks the slot to recycle for the next insertion.
    ///
    /// The cache evicts whatever the slot holds. `tags` is never empty.
    fn select_victim(&mut self, tags: &mut [i64]) -> SlotId;

    /// Whether a hit needs to write strategy state.
    ///
    /// Queried once per cache to pick the locking tier of `get`.
    fn access_is_mutating(&self) -> bool;

    /// Records a hit on the slot owning `tag`.
    ///
    /// Returns `false` to veto the hit; the cache then reports a miss.
    /// The default forwards to [`validate_access`](Self::validate_access).
    #[inline]
    fn on_access(&mut self, tag: &mut i64) -> bool {
        self.validate_access(*tag)
    }

    /// Read-only form of [`on_access`](Self::on_access), used under the
    /// shared lock when [`access_is_mutating`](Self::access_is_mutating) is
    /// `false`.
    #[inline]
    fn validate_access(&self, _tag: i64) -> bool {
        true
    }
}

impl<S> EvictionStrategy for Box<S>
where
    S: EvictionStrategy + ?Sized,
{
    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }

    #[inline]
    fn reset(&mut self, tags: &mut [i64]) {
        (**self).reset(tags)
    }

    #[inline]
    fn select_victim(&mut self, tags: &mut [i64]) -> SlotId {
        (**self).select_victim(tags)
    }

    #[inline]
    fn access_is_mutating(&self) -> bool {
        (**self).access_is_mutating()
    }

    #[inline]
    fn on_access(&mut self, tag: &mut i64) -> bool {
        (**self).on_access(tag)
    }

    #[inline]
    fn validate_access(&self, tag: i64) -> bool {
        (**self).validate_access(tag)
    }
}
