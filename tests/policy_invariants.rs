// ==============================================
// CROSS-STRATEGY INVARIANT TESTS (integration)
// ==============================================
//
// Behavior every strategy must share: alias bookkeeping, purge, capacity
// bounds, plus the hit patterns that pin down each strategy's semantics.

use std::time::Duration;

use multicache::builder::{CacheBuilder, StrategyKind};
use multicache::cache::Cache;
use multicache::policy::{LeastRecentlyUsed, Random, RoundRobin, SecondChance, TimedExpire};
use multicache::traits::EvictionStrategy;
use proptest::prelude::*;

fn all_kinds() -> Vec<StrategyKind> {
    vec![
        StrategyKind::RoundRobin,
        StrategyKind::Random { seed: Some(17) },
        StrategyKind::LeastRecentlyUsed,
        StrategyKind::SecondChance,
        StrategyKind::TimedExpire {
            expiry: Duration::from_secs(3600),
        },
    ]
}

/// Replays `trace` with get-then-add-on-miss and returns the hit pattern.
fn hit_pattern<S: EvictionStrategy>(cache: &Cache<&'static str, &'static str, S>, trace: &[&'static str]) -> Vec<bool> {
    trace
        .iter()
        .map(|key| {
            let hit = cache.get(key).is_some();
            if !hit {
                cache.add(*key, *key);
            }
            hit
        })
        .collect()
}

// ==============================================
// Hit Patterns
// ==============================================

mod hit_patterns {
    use super::*;

    #[test]
    fn round_robin_two_slots() {
        let cache = Cache::new(2, RoundRobin::new()).unwrap();
        assert_eq!(
            hit_pattern(&cache, &["a", "b", "a", "b"]),
            [false, false, true, true]
        );
    }

    #[test]
    fn lru_two_slots() {
        let cache = Cache::new(2, LeastRecentlyUsed::new()).unwrap();
        assert_eq!(
            hit_pattern(&cache, &["a", "b", "a", "c", "a", "c"]),
            [false, false, true, false, true, true]
        );
    }

    #[test]
    fn second_chance_two_slots() {
        let cache = Cache::new(2, SecondChance::new()).unwrap();
        assert_eq!(
            hit_pattern(&cache, &["a", "b", "a", "c", "a", "c"]),
            [false, false, true, false, true, true]
        );
    }

    #[test]
    fn timed_expire_zero_never_hits() {
        let cache = Cache::new(4, TimedExpire::new(Duration::ZERO)).unwrap();
        let pattern = hit_pattern(&cache, &["a", "a", "b", "b", "a"]);
        assert!(pattern.iter().all(|hit| !hit));
    }

    #[test]
    fn timed_expire_long_always_hits_after_insert() {
        let cache = Cache::new(4, TimedExpire::new(Duration::from_secs(3600))).unwrap();
        assert_eq!(
            hit_pattern(&cache, &["a", "a", "b", "b", "a"]),
            [false, true, false, true, true]
        );
    }

    #[test]
    fn timed_expire_entries_go_stale() {
        let cache = Cache::new(4, TimedExpire::from_millis(20)).unwrap();
        cache.add("a", "a");
        assert!(cache.get(&"a").is_some());
        std::thread::sleep(Duration::from_millis(40));
        assert!(cache.get(&"a").is_none());
    }
}

// ==============================================
// Alias Cascade And Purge
// ==============================================

mod aliases {
    use super::*;

    #[test]
    fn remove_by_any_alias_drops_all_aliases() {
        for kind in all_kinds() {
            let cache = CacheBuilder::new(4).build::<&str, u32>(kind.clone()).unwrap();
            cache.add("other", 2);
            cache.add_many(1, ["session:abc", "user:7"]);

            assert_eq!(cache.remove(&"user:7").as_deref(), Some(&1), "{kind:?}");
            assert!(cache.get(&"session:abc").is_none(), "{kind:?}");
            if !matches!(kind, StrategyKind::Random { .. }) {
                assert!(cache.get(&"other").is_some(), "{kind:?}");
            }
            cache.check_invariants().unwrap();
        }
    }

    #[test]
    fn purge_then_get_misses() {
        for kind in all_kinds() {
            let cache = CacheBuilder::new(3).build::<&str, u32>(kind.clone()).unwrap();
            cache.add_many(1, ["a", "b"]);
            cache.add("c", 2);
            cache.purge();

            for key in ["a", "b", "c"] {
                assert!(cache.get(&key).is_none(), "{kind:?} kept {key}");
            }
            assert_eq!(cache.key_count(), 0);
            cache.check_invariants().unwrap();
        }
    }

    #[test]
    fn sessions_can_be_dropped_by_value() {
        #[derive(Debug)]
        struct Session {
            user: &'static str,
        }

        let cache = Cache::with_default_strategy(8).unwrap();
        cache.add_many(Session { user: "alice" }, ["sid:1", "alice:web"]);
        cache.add_many(Session { user: "alice" }, ["sid:2", "alice:phone"]);
        cache.add_many(Session { user: "bob" }, ["sid:3", "bob:web"]);

        assert_eq!(cache.remove_many_func(|s| s.user == "alice"), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.key_count(), 2);
        assert!(cache.contains(&"bob:web"));
    }
}

// ==============================================
// Property Tests
// ==============================================

#[derive(Debug, Clone)]
enum Operation {
    Add(Vec<u8>, u32),
    Get(u8),
    Remove(u8),
    RemoveEven,
    Purge,
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => (prop::collection::vec(0u8..24, 0..4), any::<u32>())
            .prop_map(|(keys, v)| Operation::Add(keys, v)),
        4 => (0u8..24).prop_map(Operation::Get),
        1 => (0u8..24).prop_map(Operation::Remove),
        1 => Just(Operation::RemoveEven),
        1 => Just(Operation::Purge),
    ]
}

fn kind_strategy() -> impl Strategy<Value = StrategyKind> {
    prop_oneof![
        Just(StrategyKind::RoundRobin),
        any::<u64>().prop_map(|seed| StrategyKind::Random { seed: Some(seed) }),
        Just(StrategyKind::LeastRecentlyUsed),
        Just(StrategyKind::SecondChance),
        (0u64..3).prop_map(|ms| StrategyKind::TimedExpire {
            expiry: Duration::from_millis(ms)
        }),
    ]
}

proptest! {
    /// The alias index and the slots agree after any operation sequence.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_index_matches_slots(
        capacity in 1usize..8,
        kind in kind_strategy(),
        ops in prop::collection::vec(operation_strategy(), 0..120)
    ) {
        let cache = CacheBuilder::new(capacity).build::<u8, u32>(kind).unwrap();
        for op in ops {
            match op {
                Operation::Add(keys, value) => cache.add_many(value, keys),
                Operation::Get(key) => { cache.get(&key); },
                Operation::Remove(key) => { cache.remove(&key); },
                Operation::RemoveEven => { cache.remove_many_func(|v| v % 2 == 0); },
                Operation::Purge => cache.purge(),
            }
            prop_assert!(cache.check_invariants().is_ok());
            prop_assert!(cache.len() <= cache.capacity());
            prop_assert!(cache.key_count() >= cache.len());
        }
    }

    /// Every key of the last insertion resolves to the same value.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_last_insert_is_reachable_by_all_keys(
        capacity in 1usize..8,
        kind in kind_strategy().prop_filter("needs a non-expiring strategy", |k| {
            !matches!(k, StrategyKind::TimedExpire { .. })
        }),
        prefix in prop::collection::vec((0u8..16, any::<u32>()), 0..40),
        keys in prop::collection::vec(0u8..16, 1..5),
        value in any::<u32>()
    ) {
        let cache = CacheBuilder::new(capacity).build::<u8, u32>(kind).unwrap();
        for (key, v) in prefix {
            cache.add(key, v);
        }
        cache.add_many(value, keys.clone());
        for key in keys {
            let got = cache.get(&key);
            prop_assert_eq!(got.as_deref(), Some(&value));
        }
    }

    /// Rebinding a key never leaves the old slot reachable.
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_rebinding_evicts_old_owner(
        capacity in 2usize..8,
        first in prop::collection::vec(0u8..10, 1..4),
        shared in 0u8..10,
    ) {
        let cache = Cache::new(capacity, LeastRecentlyUsed::new()).unwrap();
        let mut first = first;
        first.push(shared);
        cache.add_many(1u32, first.clone());
        cache.add_many(2u32, [shared, 200]);

        for key in first {
            if key != shared {
                prop_assert!(cache.get(&key).is_none());
            }
        }
        let got = cache.get(&shared);
        prop_assert_eq!(got.as_deref(), Some(&2));
        prop_assert_eq!(cache.len(), 1);
    }
}

// ==============================================
// Random Strategy Determinism
// ==============================================

#[test]
fn seeded_random_caches_agree() {
    let a = Cache::new(4, Random::with_seed(9)).unwrap();
    let b = Cache::new(4, Random::with_seed(9)).unwrap();
    for i in 0..200u32 {
        let key = i % 11;
        assert_eq!(a.get(&key).is_some(), b.get(&key).is_some());
        if a.get(&key).is_none() {
            a.add(key, i);
        }
        if b.get(&key).is_none() {
            b.add(key, i);
        }
    }
}
