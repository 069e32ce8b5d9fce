//! # Metrics Traits
//!
//! Recording, snapshotting and resetting are split into small traits so the
//! map only ever *writes* counters, while tests and benchmarks *read* them.
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │
//!   │  get_hit/get_miss/insert    │
//!   │  evict/clear                │
//!   └──────────────┬──────────────┘
//!                  │
//!                  ▼
//!   ┌─────────────────────────────┐
//!   │    LruMapMetricsRecorder    │
//!   │  insert_dropped/pop_lru/    │
//!   │  remove                     │
//!   └─────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsReset                 │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters shared by any bounded map.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Counters specific to the recency-ordered map.
pub trait LruMapMetricsRecorder: CoreMetricsRecorder {
    /// A new key was absorbed because the capacity admits nothing.
    fn record_insert_dropped(&mut self);
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&mut self);
}
