//! Bélády's offline-optimal replacement.
//!
//! With the whole trace known in advance, the best possible victim on a miss
//! is the resident key whose next use lies furthest in the future (or that is
//! never used again). The resulting hit ratio is an upper bound for every
//! demand-filled cache of the same capacity, which makes it the reference
//! point for [`calculate_hit_miss`](super::hit_miss::calculate_hit_miss).
//!
//! ## Simulation
//!
//! ```text
//!   capacity = 2, trace = [a, b, c, a, b]
//!
//!   warmup:  a miss  → [a]
//!            b miss  → [a, b]            (resident set full)
//!   steady:  c miss  → next uses: a@3, b@4 → evict b → [a, c]
//!            a hit
//!            b miss  → evict the one never used again
//! ```
//!
//! The resident set is a `Vec` and replacement happens in place, so each key
//! keeps its position until it is evicted. Among keys that are never used
//! again the lowest position wins.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Returns the Bélády-optimal hit ratio for `trace` with `capacity` slots.
///
/// `capacity == 0` gives `0.0`. A run with no misses (only possible for an
/// empty trace) gives `1.0`.
///
/// # Example
///
/// ```
/// use multicache::analysis::calculate_optimal_hit_miss;
///
/// assert_eq!(calculate_optimal_hit_miss(&["a", "b", "a", "a"], 2), 0.5);
/// assert_eq!(calculate_optimal_hit_miss::<&str>(&[], 0), 0.0);
/// ```
pub fn calculate_optimal_hit_miss<K>(trace: &[K], capacity: usize) -> f64
where
    K: Eq + Hash,
{
    if capacity == 0 {
        return 0.0;
    }

    let mut resident: Vec<&K> = Vec::with_capacity(capacity);
    let mut hits = 0usize;
    let mut misses = 0usize;
    let mut index = 0;

    // Warmup: every distinct key is a compulsory miss until the set is full.
    while misses < capacity && index < trace.len() {
        let key = &trace[index];
        if resident.contains(&key) {
            hits += 1;
        } else {
            resident.push(key);
            misses += 1;
        }
        index += 1;
    }

    while index < trace.len() {
        let key = &trace[index];
        if resident.contains(&key) {
            hits += 1;
        } else {
            misses += 1;
            if let Some(victim) = furthest_in_future(index, &resident, trace) {
                resident[victim] = key;
            }
        }
        index += 1;
    }

    if misses == 0 {
        return 1.0;
    }
    hits as f64 / (hits + misses) as f64
}

/// Returns the position in `resident` of the key used furthest in the future.
///
/// Scans `trace` from `from_index`, discarding each resident key as it is
/// seen, until one candidate remains or the trace ends. When several keys are
/// never seen again, the one at the lowest position is returned. `None` only
/// when `resident` is empty.
///
/// ```
/// use multicache::analysis::furthest_in_future;
///
/// let trace = ["a", "a", "b"];
/// assert_eq!(furthest_in_future(0, &[&"a", &"b"], &trace), Some(1));
/// assert_eq!(furthest_in_future(0, &[&"a", &"b", &"c"], &trace), Some(2));
/// ```
pub fn furthest_in_future<K>(from_index: usize, resident: &[&K], trace: &[K]) -> Option<usize>
where
    K: Eq + Hash,
{
    let positions: FxHashMap<&K, usize> = resident
        .iter()
        .enumerate()
        .map(|(pos, key)| (*key, pos))
        .collect();

    let mut candidate = vec![true; resident.len()];
    let mut remaining = resident.len();

    for key in trace.iter().skip(from_index) {
        if remaining <= 1 {
            break;
        }
        if let Some(&pos) = positions.get(key) {
            if candidate[pos] {
                candidate[pos] = false;
                remaining -= 1;
            }
        }
    }

    candidate.iter().position(|&alive| alive)
}
