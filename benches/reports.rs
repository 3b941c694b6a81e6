//! Strategy comparison report - run with: `cargo bench --bench reports`
//!
//! Standalone binary (not a criterion benchmark). Generates repeat-biased
//! traces from 0% to 100% repeat chance and prints each strategy's hit ratio
//! next to the Bélády optimum.

use multicache::analysis::compare_strategies;
use multicache::analysis::workload::TraceGenerator;
use multicache::builder::StrategyKind;

const CACHE_SIZE: usize = 3;
const TRACE_LEN: usize = 10_000;
const UNIQUE_KEYS: u64 = 15;
const SEED: u64 = 42;

fn main() {
    let kinds = [
        StrategyKind::LeastRecentlyUsed,
        StrategyKind::Random { seed: Some(SEED) },
        StrategyKind::RoundRobin,
        StrategyKind::SecondChance,
    ];

    for step in 0..=10u64 {
        let repeat_chance = step as f64 / 10.0;
        let trace = match TraceGenerator::new(UNIQUE_KEYS, CACHE_SIZE, repeat_chance) {
            Ok(generator) => generator.with_seed(SEED + step).generate(TRACE_LEN),
            Err(err) => {
                eprintln!("skipping repeat chance {repeat_chance}: {err}");
                continue;
            },
        };

        let reports = compare_strategies(&trace, CACHE_SIZE, &kinds);
        let optimal = reports.first().map_or(0.0, |r| r.optimal);

        println!("{:3.0}% Chance of Repeat", repeat_chance * 100.0);
        println!("Optimal Hit Percentage: {:.5}", optimal * 100.0);
        println!();
        println!("{:<15} {:>9} {:>12}", "Strategy", "Hit %", "% of optimal");
        for report in &reports {
            println!("{report}");
        }
        println!();
    }
}
