use crate::metrics::traits::{CoreMetricsRecorder, LruMapMetricsRecorder, MetricsReset};

#[derive(Debug, Default, Clone)]
pub struct LruMapMetrics {
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
}

impl CoreMetricsRecorder for LruMapMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl LruMapMetricsRecorder for LruMapMetrics {
    fn record_insert_dropped(&mut self) {
        self.insert_dropped += 1;
    }

    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }
}

impl MetricsReset for LruMapMetrics {
    fn reset_metrics(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_counters_split_hits_and_misses() {
        let mut m = LruMapMetrics::default();
        m.record_get_hit();
        m.record_get_hit();
        m.record_get_miss();
        assert_eq!(m.get_calls, 3);
        assert_eq!(m.get_hits, 2);
        assert_eq!(m.get_misses, 1);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut m = LruMapMetrics::default();
        m.record_insert_call();
        m.record_insert_dropped();
        m.record_evicted_entry();
        m.reset_metrics();
        assert_eq!(m.insert_calls, 0);
        assert_eq!(m.insert_dropped, 0);
        assert_eq!(m.evicted_entries, 0);
    }
}
