//! Concrete eviction strategies.
//!
//! | Module            | Strategy             | Hit locking |
//! |-------------------|----------------------|-------------|
//! | [`round_robin`]   | [`RoundRobin`]       | shared      |
//! | [`random`]        | [`Random`]           | shared      |
//! | [`lru`]           | [`LeastRecentlyUsed`]| exclusive   |
//! | [`second_chance`] | [`SecondChance`]     | exclusive   |
//! | [`timed_expire`]  | [`TimedExpire`]      | shared      |

pub mod lru;
pub mod random;
pub mod round_robin;
pub mod second_chance;
pub mod timed_expire;

pub use lru::LeastRecentlyUsed;
pub use random::Random;
pub use round_robin::RoundRobin;
pub use second_chance::SecondChance;
pub use timed_expire::TimedExpire;
