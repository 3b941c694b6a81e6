//! multicache: a fixed-capacity cache where one value can live under many
//! keys, with pluggable eviction strategies and an offline-optimal oracle for
//! comparing them.
//!
//! ```
//! use multicache::prelude::*;
//!
//! let cache = Cache::new(2, LeastRecentlyUsed::new()).unwrap();
//! cache.add_many("alice", ["user:1", "email:alice@example.com"]);
//! assert_eq!(cache.get(&"email:alice@example.com").as_deref(), Some(&"alice"));
//! ```

pub mod analysis;
pub mod builder;
pub mod cache;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod policy;
pub mod prelude;
pub mod traits;
