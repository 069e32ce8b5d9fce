/// Point-in-time copy of an [`LruMap`](crate::policy::lru_map::LruMap)'s counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruMapMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub insert_dropped: u64,

    pub evict_calls: u64,
    pub evicted_entries: u64,

    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub clear_calls: u64,

    // gauges captured at snapshot time
    pub map_len: usize,
    pub capacity: usize,
}

impl LruMapMetricsSnapshot {
    /// Fraction of `get` calls that found their key, or `0.0` before any call.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
