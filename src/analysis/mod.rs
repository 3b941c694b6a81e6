//! Offline evaluation of eviction strategies.
//!
//! - [`optimal`]: Bélády's algorithm, the hit-ratio ceiling for a trace.
//! - [`hit_miss`]: replays a trace through a real [`Cache`](crate::cache::Cache).
//! - [`workload`]: synthetic traces with adjustable locality.
//!
//! ## Example
//!
//! ```
//! use multicache::analysis::{compare_strategies, workload::TraceGenerator};
//! use multicache::builder::StrategyKind;
//!
//! let trace = TraceGenerator::new(15, 3, 0.4).unwrap().with_seed(1).generate(2_000);
//! let kinds = [
//!     StrategyKind::RoundRobin,
//!     StrategyKind::LeastRecentlyUsed,
//!     StrategyKind::SecondChance,
//! ];
//!
//! for report in compare_strategies(&trace, 3, &kinds) {
//!     assert!(report.achieved_ratio() <= report.optimal);
//! }
//! ```

pub mod hit_miss;
pub mod optimal;
pub mod workload;

use std::hash::Hash;

pub use hit_miss::{calculate_hit_miss, HitMissReport, HitRate};
pub use optimal::{calculate_optimal_hit_miss, furthest_in_future};

use crate::builder::StrategyKind;
use crate::traits::EvictionStrategy;

/// Runs every strategy in `kinds` over the same trace.
///
/// The optimal ratio is computed once and shared by all reports. Reports come
/// back in the order of `kinds`.
pub fn compare_strategies<K>(trace: &[K], capacity: usize, kinds: &[StrategyKind]) -> Vec<HitMissReport>
where
    K: Eq + Hash + Clone,
{
    let optimal = calculate_optimal_hit_miss(trace, capacity);
    kinds
        .iter()
        .map(|kind| {
            let strategy = kind.clone().into_strategy();
            let name = strategy.name();
            let achieved = hit_miss::replay(trace, capacity, strategy).unwrap_or_default();
            log::debug!(
                "{}: {} hits / {} misses (optimal {:.4})",
                name,
                achieved.hits,
                achieved.misses,
                optimal
            );
            HitMissReport {
                strategy: name,
                capacity,
                achieved,
                optimal,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_follow_input_order() {
        let trace = ["a", "b", "c", "a", "b", "d", "a"];
        let kinds = [StrategyKind::SecondChance, StrategyKind::RoundRobin];
        let reports = compare_strategies(&trace, 2, &kinds);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].strategy, "second-chance");
        assert_eq!(reports[1].strategy, "round-robin");
        assert_eq!(reports[0].optimal, reports[1].optimal);
    }

    #[test]
    fn zero_capacity_reports_zero() {
        let reports = compare_strategies(&[1, 2, 3], 0, &[StrategyKind::LeastRecentlyUsed]);
        assert_eq!(reports[0].achieved, HitRate::default());
        assert_eq!(reports[0].optimal, 0.0);
    }
}
