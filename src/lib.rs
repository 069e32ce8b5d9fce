//! lrumap: a bounded, recency-ordered map with least-recently-used eviction.
//!
//! The crate is split the same way a cache library usually is:
//!
//! - [`ds`]: storage primitives (slot arena, intrusive list, and the
//!   order-preserving [`OrderedMap`](ds::OrderedMap) built from them).
//! - [`policy`]: the eviction policy, [`LruMap`](policy::lru_map::LruMap).
//! - [`capacity`]: the entry-count bound and its numeric conversions.
//! - [`error`]: errors for the opt-in strict constructor and invariant checks.
//!
//! ```
//! use lrumap::prelude::*;
//!
//! let mut map = LruMap::new(2);
//! map.insert(0, "left").insert(1, "right");
//!
//! map.get(&0);
//! let order: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
//! assert_eq!(order, vec![(1, "right"), (0, "left")]);
//! ```

pub mod capacity;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
