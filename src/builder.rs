//! Runtime strategy selection.
//!
//! [`Cache`] is generic over its strategy, which is the fastest option when
//! the strategy is known at compile time. When it comes from configuration
//! instead, describe it with a [`StrategyKind`] and let [`CacheBuilder`]
//! produce a `Cache<K, V, AnyStrategy>`.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use multicache::builder::{CacheBuilder, StrategyKind};
//!
//! let cache = CacheBuilder::new(100)
//!     .build::<u64, String>(StrategyKind::TimedExpire { expiry: Duration::from_secs(30) })
//!     .unwrap();
//! cache.add(1, "hello".to_string());
//! assert_eq!(cache.get(&1).as_deref(), Some(&"hello".to_string()));
//! assert_eq!(cache.strategy_name(), "timed-expire");
//! ```

use std::hash::Hash;
use std::time::Duration;

use crate::cache::Cache;
use crate::ds::SlotId;
use crate::error::ConfigError;
use crate::policy::{LeastRecentlyUsed, Random, RoundRobin, SecondChance, TimedExpire};
use crate::traits::EvictionStrategy;

/// Available eviction strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyKind {
    /// Rotating cursor over the slots.
    RoundRobin,
    /// Uniform random victim. `None` seeds from the OS.
    Random { seed: Option<u64> },
    /// Least recently used, by logical clock.
    LeastRecentlyUsed,
    /// Clock sweep with a reference bit.
    SecondChance,
    /// Entries go stale `expiry` after insertion.
    TimedExpire { expiry: Duration },
}

impl StrategyKind {
    /// Name reported by the strategy this kind builds.
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::RoundRobin => "round-robin",
            StrategyKind::Random { .. } => "random",
            StrategyKind::LeastRecentlyUsed => "lru",
            StrategyKind::SecondChance => "second-chance",
            StrategyKind::TimedExpire { .. } => "timed-expire",
        }
    }

    /// Builds a fresh strategy instance for one cache.
    pub fn into_strategy(self) -> AnyStrategy {
        match self {
            StrategyKind::RoundRobin => AnyStrategy::RoundRobin(RoundRobin::new()),
            StrategyKind::Random { seed: Some(seed) } => {
                AnyStrategy::Random(Random::with_seed(seed))
            },
            StrategyKind::Random { seed: None } => AnyStrategy::Random(Random::new()),
            StrategyKind::LeastRecentlyUsed => {
                AnyStrategy::LeastRecentlyUsed(LeastRecentlyUsed::new())
            },
            StrategyKind::SecondChance => AnyStrategy::SecondChance(SecondChance::new()),
            StrategyKind::TimedExpire { expiry } => {
                AnyStrategy::TimedExpire(TimedExpire::new(expiry))
            },
        }
    }
}

/// Closed set of the built-in strategies, dispatched by `match`.
#[derive(Debug, Clone)]
pub enum AnyStrategy {
    RoundRobin(RoundRobin),
    Random(Random),
    LeastRecentlyUsed(LeastRecentlyUsed),
    SecondChance(SecondChance),
    TimedExpire(TimedExpire),
}

macro_rules! dispatch {
    ($self:expr, $s:ident => $body:expr) => {
        match $self {
            AnyStrategy::RoundRobin($s) => $body,
            AnyStrategy::Random($s) => $body,
            AnyStrategy::LeastRecentlyUsed($s) => $body,
            AnyStrategy::SecondChance($s) => $body,
            AnyStrategy::TimedExpire($s) => $body,
        }
    };
}

impl EvictionStrategy for AnyStrategy {
    fn name(&self) -> &'static str {
        dispatch!(self, s => s.name())
    }

    fn reset(&mut self, tags: &mut [i64]) {
        dispatch!(self, s => s.reset(tags))
    }

    fn select_victim(&mut self, tags: &mut [i64]) -> SlotId {
        dispatch!(self, s => s.select_victim(tags))
    }

    fn access_is_mutating(&self) -> bool {
        dispatch!(self, s => s.access_is_mutating())
    }

    fn on_access(&mut self, tag: &mut i64) -> bool {
        dispatch!(self, s => s.on_access(tag))
    }

    fn validate_access(&self, tag: i64) -> bool {
        dispatch!(self, s => s.validate_access(tag))
    }
}

/// Builder for caches whose strategy is chosen at runtime.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Builds a cache with the given strategy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the capacity is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use multicache::builder::{CacheBuilder, StrategyKind};
    ///
    /// let lru = CacheBuilder::new(100).build::<u64, String>(StrategyKind::LeastRecentlyUsed);
    /// assert!(lru.is_ok());
    ///
    /// let seeded = CacheBuilder::new(100).build::<u64, String>(StrategyKind::Random { seed: Some(1) });
    /// assert!(seeded.is_ok());
    ///
    /// assert!(CacheBuilder::new(0).build::<u64, String>(StrategyKind::RoundRobin).is_err());
    /// ```
    pub fn build<K, V>(self, kind: StrategyKind) -> Result<Cache<K, V, AnyStrategy>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        Cache::new(self.capacity, kind.into_strategy())
    }
}
