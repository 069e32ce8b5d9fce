//! Everyday imports: the map, its capacity type and its errors.
//!
//! Storage primitives stay under [`crate::ds`]; they are not needed to use
//! [`LruMap`] and are left out of the glob import.
//!
//! ```compile_fail
//! use lrumap::prelude::*;
//!
//! let _list: IntrusiveList<u8> = IntrusiveList::new();
//! ```

pub use crate::capacity::Capacity;
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LruMapMetricsSnapshot;
pub use crate::policy::lru_map::LruMap;
