//! # Multi-Key Cache
//!
//! A fixed-capacity cache where one value can be reachable under several
//! alias keys. Each value lives in one slot of a pre-allocated
//! [`SlotArena`]; the alias index maps every key to that slot.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────────┐
//!   │ Cache<K, V, S>                                                     │
//!   │                                                                    │
//!   │  RwLock<CacheCore>                                                 │
//!   │   ├─ index: FxHashMap<K, SlotId>     "user:1" ──┐                  │
//!   │   │                                  "sess:9" ──┼──► SlotId(2)     │
//!   │   ├─ arena: SlotArena<K, V>                     │                  │
//!   │   │    tags:  [ 3 | 7 | 9 | 1 ]                  ▼                  │
//!   │   │    slots: [ S0 | S1 | S2 | S3 ]   S2 = { [user:1, sess:9], v } │
//!   │   └─ strategy: S                                                   │
//!   └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation          | Lock                                  | Effect                         |
//! |--------------------|---------------------------------------|--------------------------------|
//! | `get`              | shared or exclusive (per strategy)    | access hook on hit             |
//! | `contains`         | shared                                | none                           |
//! | `add` / `add_many` | exclusive                             | recycle one victim, bind keys  |
//! | `get_or_find`      | exclusive for the whole call          | miss function runs under lock  |
//! | `remove`           | exclusive                             | evicts the whole owning slot   |
//! | `remove_many_func` | exclusive                             | evicts every matching slot     |
//! | `purge`            | exclusive                             | full reset of arena + strategy |
//!
//! ## Alias Cascade
//!
//! Adding a value under keys that are already bound elsewhere evicts those
//! other slots entirely, including their remaining aliases. Removing any one
//! alias removes the whole slot.
//!
//! ```
//! use multicache::cache::Cache;
//! use multicache::policy::LeastRecentlyUsed;
//!
//! let cache = Cache::new(4, LeastRecentlyUsed::new()).unwrap();
//! cache.add_many("alice", ["user:1", "email:alice@example.com"]);
//!
//! assert_eq!(cache.get(&"user:1").as_deref(), Some(&"alice"));
//! assert_eq!(cache.remove(&"email:alice@example.com").as_deref(), Some(&"alice"));
//! assert!(cache.get(&"user:1").is_none());
//! ```
//!
//! ## Thread Safety
//!
//! `Cache` is `Send + Sync` when `K` and `V` are. Values are handed out as
//! `Arc<V>`, so readers never hold the lock after `get` returns. The lock is
//! not reentrant: a miss function passed to `get_or_find` must not call back
//! into the same cache.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::{SlotArena, SlotId};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{
    CacheMetrics, CacheMetricsSnapshot, CoreMetricsRecorder, MetricsReset,
    MetricsSnapshotProvider,
};
use crate::policy::SecondChance;
use crate::traits::EvictionStrategy;

/// Everything guarded by the cache lock.
struct CacheCore<K, V, S> {
    arena: SlotArena<K, V>,
    index: FxHashMap<K, SlotId>,
    strategy: S,
}

impl<K, V, S> CacheCore<K, V, S>
where
    K: Eq + Hash + Clone,
    S: EvictionStrategy,
{
    /// Detaches a slot and unindexes its aliases. Returns the old value.
    fn evict(&mut self, id: SlotId) -> Option<Arc<V>> {
        let (aliases, value) = self.arena.soft_reset(id);
        for alias in &aliases {
            self.index.remove(alias);
        }
        value
    }

    /// Recycles one victim and binds `value` under `keys`.
    ///
    /// Returns the number of occupied slots that were evicted.
    fn insert(&mut self, value: Arc<V>, keys: Vec<K>) -> usize {
        let victim = self.strategy.select_victim(self.arena.tags_mut());
        debug_assert!(
            victim.index() < self.arena.capacity(),
            "{} selected slot {} outside capacity {}",
            self.strategy.name(),
            victim.index(),
            self.arena.capacity()
        );

        let mut evicted = 0;
        if self.evict(victim).is_some() {
            log::trace!("{}: recycled slot {}", self.strategy.name(), victim.index());
            evicted += 1;
        }

        for key in &keys {
            if let Some(&other) = self.index.get(key) {
                if self.evict(other).is_some() {
                    log::trace!("rebinding key evicted slot {}", other.index());
                    evicted += 1;
                }
            }
        }

        for key in &keys {
            self.index.insert(key.clone(), victim);
        }
        self.arena.bind(victim, value, keys);
        evicted
    }

    /// Runs the mutating access hook for a hit on `id`.
    fn touch(&mut self, id: SlotId) -> Option<Arc<V>> {
        let tag = self.arena.tag_mut(id);
        if self.strategy.on_access(tag) {
            self.arena.value(id).cloned()
        } else {
            None
        }
    }

    fn purge(&mut self) {
        self.arena.reset_all();
        self.index.clear();
        self.strategy.reset(self.arena.tags_mut());
    }

    fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut alias_total = 0;
        for (id, slot) in self.arena.iter() {
            if slot.is_free() {
                if !slot.aliases().is_empty() {
                    return Err(InvariantError::new(format!(
                        "free slot {} still holds {} aliases",
                        id.index(),
                        slot.aliases().len()
                    )));
                }
                continue;
            }
            if slot.aliases().is_empty() {
                return Err(InvariantError::new(format!(
                    "occupied slot {} has no aliases",
                    id.index()
                )));
            }
            for alias in slot.aliases() {
                match self.index.get(alias) {
                    Some(&bound) if bound == id => {},
                    Some(&bound) => {
                        return Err(InvariantError::new(format!(
                            "alias in slot {} is indexed to slot {}",
                            id.index(),
                            bound.index()
                        )));
                    },
                    None => {
                        return Err(InvariantError::new(format!(
                            "alias in slot {} is missing from the index",
                            id.index()
                        )));
                    },
                }
            }
            alias_total += slot.aliases().len();
        }

        if alias_total != self.index.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but slots hold {} aliases",
                self.index.len(),
                alias_total
            )));
        }

        let occupied = self.arena.iter_occupied().count();
        if occupied != self.arena.len() {
            return Err(InvariantError::new(format!(
                "occupied count {} disagrees with {} bound slots",
                self.arena.len(),
                occupied
            )));
        }
        Ok(())
    }
}

/// Drops duplicate keys, keeping first occurrences in order.
fn dedup_keys<K: Eq>(keys: impl IntoIterator<Item = K>) -> Vec<K> {
    let mut out: Vec<K> = Vec::new();
    for key in keys {
        if !out.contains(&key) {
            out.push(key);
        }
    }
    out
}

/// Thread-safe, fixed-capacity, multi-key cache.
///
/// `S` is the eviction strategy; it defaults to [`SecondChance`].
pub struct Cache<K, V, S = SecondChance> {
    inner: RwLock<CacheCore<K, V, S>>,
    capacity: usize,
    access_is_mutating: bool,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> Cache<K, V, SecondChance>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache using [`SecondChance`] eviction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `capacity` is zero.
    pub fn with_default_strategy(capacity: usize) -> Result<Self, ConfigError> {
        Self::new(capacity, SecondChance::new())
    }
}

impl<K, V, S> Cache<K, V, S>
where
    K: Eq + Hash + Clone,
    S: EvictionStrategy,
{
    /// Creates a cache with `capacity` slots driven by `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use multicache::cache::Cache;
    /// use multicache::policy::RoundRobin;
    ///
    /// let cache: Cache<u32, String, _> = Cache::new(16, RoundRobin::new()).unwrap();
    /// assert_eq!(cache.capacity(), 16);
    /// assert_eq!(cache.strategy_name(), "round-robin");
    /// ```
    pub fn new(capacity: usize, mut strategy: S) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }

        let mut arena = SlotArena::with_capacity(capacity);
        strategy.reset(arena.tags_mut());
        let access_is_mutating = strategy.access_is_mutating();
        log::debug!(
            "created cache: capacity={} strategy={} mutating_get={}",
            capacity,
            strategy.name(),
            access_is_mutating
        );

        Ok(Self {
            inner: RwLock::new(CacheCore {
                arena,
                index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
                strategy,
            }),
            capacity,
            access_is_mutating,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        })
    }

    /// Number of slots, fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied slots (distinct values, not keys).
    pub fn len(&self) -> usize {
        self.inner.read().arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of keys currently bound across all slots.
    pub fn key_count(&self) -> usize {
        self.inner.read().index.len()
    }

    pub fn strategy_name(&self) -> &'static str {
        self.inner.read().strategy.name()
    }

    /// Returns `true` if `key` is bound. Does not run the access hook.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().index.contains_key(key)
    }

    /// Inserts `value` under a single key.
    pub fn add(&self, key: K, value: V) {
        self.add_arc(key, Arc::new(value));
    }

    /// Inserts an already shared value under a single key.
    pub fn add_arc(&self, key: K, value: Arc<V>) {
        self.add_many_arc(value, [key]);
    }

    /// Inserts `value` reachable under every key in `keys`.
    ///
    /// Any slot that already holds one of the keys is evicted with all of
    /// its aliases. An empty key set does nothing. Duplicate keys are bound
    /// once.
    pub fn add_many(&self, value: V, keys: impl IntoIterator<Item = K>) {
        self.add_many_arc(Arc::new(value), keys);
    }

    /// [`add_many`](Self::add_many) for an already shared value.
    pub fn add_many_arc(&self, value: Arc<V>, keys: impl IntoIterator<Item = K>) {
        let keys = dedup_keys(keys);
        if keys.is_empty() {
            return;
        }

        let mut core = self.inner.write();
        let _evicted = core.insert(value, keys);
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_insert();
            for _ in 0.._evicted {
                self.metrics.record_eviction();
            }
        }
        #[cfg(debug_assertions)]
        self.debug_validate(&core);
    }

    /// Looks up `key`, running the strategy's access hook on a hit.
    ///
    /// A hit the strategy vetoes (for example an expired entry under
    /// [`TimedExpire`](crate::policy::TimedExpire)) is reported as `None`.
    /// The stale entry stays in its slot until it is recycled.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let (found, value) = if self.access_is_mutating {
            let mut core = self.inner.write();
            let slot = core.index.get(key).copied();
            match slot {
                Some(id) => (true, core.touch(id)),
                None => (false, None),
            }
        } else {
            let core = self.inner.read();
            let slot = core.index.get(key).copied();
            match slot {
                Some(id) if core.strategy.validate_access(core.arena.tag(id)) => {
                    (true, core.arena.value(id).cloned())
                },
                Some(_) => (true, None),
                None => (false, None),
            }
        };

        #[cfg(feature = "metrics")]
        {
            match (found, value.is_some()) {
                (_, true) => self.metrics.record_get_hit(),
                (true, false) => self.metrics.record_stale_hit(),
                (false, false) => self.metrics.record_get_miss(),
            }
        }
        #[cfg(not(feature = "metrics"))]
        let _ = found;

        value
    }

    /// Returns the value for `key`, or computes and caches it on a miss.
    ///
    /// The exclusive lock is held for the whole call, so concurrent callers
    /// asking for the same key run `miss` at most once between them. `miss`
    /// returns the value plus the keys to bind it under; `key` itself is
    /// always bound. An `Err` from `miss` is returned untouched and the cache
    /// is not modified.
    ///
    /// `miss` must not call back into this cache.
    ///
    /// # Example
    ///
    /// ```
    /// use multicache::cache::Cache;
    ///
    /// let cache = Cache::with_default_strategy(8).unwrap();
    /// let value = cache
    ///     .get_or_find("user:1".to_string(), |key| {
    ///         Ok::<_, String>((format!("loaded {key}"), vec!["alice".to_string()]))
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(*value, "loaded user:1");
    /// assert!(cache.contains(&"alice".to_string()));
    /// ```
    pub fn get_or_find<F, E>(&self, key: K, miss: F) -> Result<Arc<V>, E>
    where
        F: FnOnce(&K) -> Result<(V, Vec<K>), E>,
    {
        let mut core = self.inner.write();

        let slot = core.index.get(&key).copied();
        if let Some(id) = slot {
            if let Some(value) = core.touch(id) {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();
                return Ok(value);
            }
            #[cfg(feature = "metrics")]
            self.metrics.record_stale_hit();
        } else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
        }

        let (value, keys) = match miss(&key) {
            Ok(found) => found,
            Err(err) => {
                log::debug!("miss function failed; cache left unchanged");
                #[cfg(feature = "metrics")]
                self.metrics.record_miss_fill_error();
                return Err(err);
            },
        };

        let value = Arc::new(value);
        let keys = dedup_keys(std::iter::once(key).chain(keys));
        let _evicted = core.insert(Arc::clone(&value), keys);
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_miss_fill();
            self.metrics.record_insert();
            for _ in 0.._evicted {
                self.metrics.record_eviction();
            }
        }
        #[cfg(debug_assertions)]
        self.debug_validate(&core);

        Ok(value)
    }

    /// Evicts the slot bound to `key`, dropping all of its aliases.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut core = self.inner.write();
        let id = core.index.get(key).copied()?;
        let value = core.evict(id);
        #[cfg(feature = "metrics")]
        self.metrics.record_remove();
        #[cfg(debug_assertions)]
        self.debug_validate(&core);
        value
    }

    /// Evicts every slot whose value matches `predicate`.
    ///
    /// Matching slots are collected before any is evicted. Returns the number
    /// of slots removed.
    ///
    /// ```
    /// use multicache::cache::Cache;
    ///
    /// let cache = Cache::with_default_strategy(8).unwrap();
    /// for id in 0..6u32 {
    ///     cache.add(id, id);
    /// }
    /// assert_eq!(cache.remove_many_func(|v| v % 2 == 0), 3);
    /// assert_eq!(cache.len(), 3);
    /// ```
    pub fn remove_many_func<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&V) -> bool,
    {
        let mut core = self.inner.write();
        let matched: Vec<SlotId> = core
            .arena
            .iter_occupied()
            .filter_map(|(id, value)| predicate(value).then_some(id))
            .collect();

        for &id in &matched {
            core.evict(id);
            #[cfg(feature = "metrics")]
            self.metrics.record_remove();
        }
        #[cfg(debug_assertions)]
        self.debug_validate(&core);
        matched.len()
    }

    /// Empties the cache and resets the strategy.
    pub fn purge(&self) {
        let mut core = self.inner.write();
        let dropped = core.arena.len();
        core.purge();
        log::debug!(
            "purged cache: strategy={} dropped_slots={}",
            core.strategy.name(),
            dropped
        );
        #[cfg(feature = "metrics")]
        self.metrics.record_purge();
    }

    /// Checks index/slot consistency.
    ///
    /// Operations never return this error; it exists for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }

    #[cfg(debug_assertions)]
    fn debug_validate(&self, core: &CacheCore<K, V, S>) {
        if let Err(err) = core.check_invariants() {
            panic!("cache invariant violated: {err}");
        }
    }
}

impl<K, V, S> fmt::Debug for Cache<K, V, S>
where
    S: EvictionStrategy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.read();
        f.debug_struct("Cache")
            .field("capacity", &self.capacity)
            .field("len", &core.arena.len())
            .field("keys", &core.index.len())
            .field("strategy", &core.strategy.name())
            .finish()
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> MetricsSnapshotProvider<CacheMetricsSnapshot> for Cache<K, V, S> {
    fn snapshot(&self) -> CacheMetricsSnapshot {
        let core = self.inner.read();
        let mut snapshot = self.metrics.snapshot_counters();
        snapshot.len = core.arena.len();
        snapshot.key_count = core.index.len();
        snapshot.capacity = self.capacity;
        snapshot
    }
}

#[cfg(feature = "metrics")]
impl<K, V, S> MetricsReset for Cache<K, V, S> {
    fn reset_metrics(&self) {
        self.metrics.reset_metrics();
    }
}
