//! Synthetic access traces with tunable temporal locality.
//!
//! Each key is either a repeat of one of the last few keys (with probability
//! `repeat_chance`) or a uniform draw from `unique_keys` values. Repeats model
//! the short-range locality real workloads show; uniform draws are the noise.
//!
//! ```text
//!   lookback = 3, position i
//!
//!   ... [ k(i-2) | k(i-1) ] k(i)
//!           ▲        ▲
//!           └── repeat picks one of these (offset 1..lookback)
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::ConfigError;

/// Seedable generator of repeat-biased key traces.
#[derive(Debug, Clone)]
pub struct TraceGenerator {
    unique_keys: u64,
    lookback: usize,
    repeat_chance: f64,
    rng: SmallRng,
}

impl TraceGenerator {
    /// Creates a generator drawing from `unique_keys` values.
    ///
    /// `lookback` bounds how far back a repeat may reach and must be at least
    /// 2. `repeat_chance` must lie in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for parameters outside those ranges.
    pub fn new(unique_keys: u64, lookback: usize, repeat_chance: f64) -> Result<Self, ConfigError> {
        if unique_keys == 0 {
            return Err(ConfigError::new("unique_keys must be greater than zero"));
        }
        if lookback < 2 {
            return Err(ConfigError::new("lookback must be at least 2"));
        }
        if !(0.0..=1.0).contains(&repeat_chance) {
            return Err(ConfigError::new("repeat_chance must be within [0, 1]"));
        }
        Ok(Self {
            unique_keys,
            lookback,
            repeat_chance,
            rng: SmallRng::from_os_rng(),
        })
    }

    /// Replaces the rng with one seeded from `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    pub fn repeat_chance(&self) -> f64 {
        self.repeat_chance
    }

    /// Generates a trace of `len` keys.
    ///
    /// ```
    /// use multicache::analysis::workload::TraceGenerator;
    ///
    /// let mut generator = TraceGenerator::new(15, 3, 0.5).unwrap().with_seed(7);
    /// let trace = generator.generate(1_000);
    /// assert_eq!(trace.len(), 1_000);
    /// assert!(trace.iter().all(|&k| k < 15));
    /// ```
    pub fn generate(&mut self, len: usize) -> Vec<u64> {
        let mut trace = Vec::with_capacity(len);
        for i in 0..len {
            let key = if i > self.lookback && self.rng.random::<f64>() < self.repeat_chance {
                let offset = self.rng.random_range(1..self.lookback);
                trace[i - offset]
            } else {
                self.rng.random_range(0..self.unique_keys)
            };
            trace.push(key);
        }
        trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_parameters() {
        assert!(TraceGenerator::new(0, 3, 0.5).is_err());
        assert!(TraceGenerator::new(15, 1, 0.5).is_err());
        assert!(TraceGenerator::new(15, 3, 1.5).is_err());
        assert!(TraceGenerator::new(15, 3, -0.1).is_err());
        assert!(TraceGenerator::new(15, 3, f64::NAN).is_err());
    }

    #[test]
    fn same_seed_same_trace() {
        let a = TraceGenerator::new(15, 3, 0.3).unwrap().with_seed(11).generate(500);
        let b = TraceGenerator::new(15, 3, 0.3).unwrap().with_seed(11).generate(500);
        assert_eq!(a, b);
    }

    #[test]
    fn full_repeat_chance_reuses_recent_keys() {
        let trace = TraceGenerator::new(1_000, 3, 1.0).unwrap().with_seed(5).generate(200);
        for i in 4..trace.len() {
            assert!(
                trace[i] == trace[i - 1] || trace[i] == trace[i - 2],
                "position {i} is not a repeat"
            );
        }
    }

    #[test]
    fn keys_stay_in_range() {
        let trace = TraceGenerator::new(4, 3, 0.0).unwrap().with_seed(1).generate(1_000);
        assert!(trace.iter().all(|&k| k < 4));
    }
}
