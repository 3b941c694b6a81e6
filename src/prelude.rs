pub use crate::analysis::{
    calculate_hit_miss, calculate_optimal_hit_miss, compare_strategies, HitMissReport, HitRate,
};
pub use crate::builder::{AnyStrategy, CacheBuilder, StrategyKind};
pub use crate::cache::Cache;
pub use crate::ds::SlotId;
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{CacheMetricsSnapshot, MetricsSnapshotProvider};
pub use crate::policy::{LeastRecentlyUsed, Random, RoundRobin, SecondChance, TimedExpire};
pub use crate::traits::EvictionStrategy;
