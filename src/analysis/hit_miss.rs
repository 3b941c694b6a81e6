use std::fmt;
use std::hash::Hash;

use crate::analysis::optimal::calculate_optimal_hit_miss;
use crate::cache::Cache;
use crate::traits::EvictionStrategy;

/// Hit and miss counts from replaying a trace.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HitRate {
    pub hits: usize,
    pub misses: usize,
}

impl HitRate {
    #[inline]
    pub fn total(&self) -> usize {
        self.hits + self.misses
    }

    /// `hits / total`, or `0.0` when nothing was replayed.
    pub fn ratio(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}

/// One strategy's result next to the optimal ratio for the same trace.
#[derive(Debug, Clone, PartialEq)]
pub struct HitMissReport {
    pub strategy: &'static str,
    pub capacity: usize,
    pub achieved: HitRate,
    pub optimal: f64,
}

impl HitMissReport {
    #[inline]
    pub fn achieved_ratio(&self) -> f64 {
        self.achieved.ratio()
    }

    /// Achieved ratio as a fraction of the optimal one.
    ///
    /// When the optimal ratio is zero no strategy can hit, so any strategy is
    /// optimal and this returns `1.0`.
    pub fn fraction_of_optimal(&self) -> f64 {
        if self.optimal == 0.0 {
            1.0
        } else {
            self.achieved_ratio() / self.optimal
        }
    }
}

impl fmt::Display for HitMissReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<15} {:>9.5} {:>12.5}",
            self.strategy,
            self.achieved_ratio() * 100.0,
            self.fraction_of_optimal() * 100.0
        )
    }
}

/// Replays `trace` through a fresh cache: `get`, then `add` on a miss.
///
/// Returns `None` when `capacity` is zero.
pub(crate) fn replay<K, S>(trace: &[K], capacity: usize, strategy: S) -> Option<HitRate>
where
    K: Eq + Hash + Clone,
    S: EvictionStrategy,
{
    let cache = Cache::new(capacity, strategy).ok()?;
    let mut rate = HitRate::default();
    for key in trace {
        if cache.get(key).is_some() {
            rate.hits += 1;
        } else {
            rate.misses += 1;
            cache.add(key.clone(), ());
        }
    }
    Some(rate)
}

/// Measures `strategy` on `trace` and pairs it with the optimal ratio.
///
/// `capacity == 0` yields an all-zero report. An empty trace yields an
/// achieved ratio of `0.0`.
///
/// # Example
///
/// ```
/// use multicache::analysis::calculate_hit_miss;
/// use multicache::policy::RoundRobin;
///
/// let trace = ["a", "b", "a", "c", "a", "b"];
/// let report = calculate_hit_miss(&trace, 2, RoundRobin::new());
/// assert!(report.achieved_ratio() <= report.optimal);
/// assert_eq!(report.strategy, "round-robin");
/// ```
pub fn calculate_hit_miss<K, S>(trace: &[K], capacity: usize, strategy: S) -> HitMissReport
where
    K: Eq + Hash + Clone,
    S: EvictionStrategy,
{
    let name = strategy.name();
    match replay(trace, capacity, strategy) {
        Some(achieved) => HitMissReport {
            strategy: name,
            capacity,
            achieved,
            optimal: calculate_optimal_hit_miss(trace, capacity),
        },
        None => HitMissReport {
            strategy: name,
            capacity,
            achieved: HitRate::default(),
            optimal: 0.0,
        },
    }
}
