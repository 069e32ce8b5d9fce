use lrumap::policy::lru_map::LruMap;

fn main() {
    let mut map = LruMap::new(3);

    for key in [1, 2, 3, 1, 4, 2, 5, 1] {
        if map.get(&key).is_none() {
            map.insert(key, key * 10);
        }
    }

    let snap = map.metrics_snapshot();
    println!(
        "gets={} hits={} misses={} hit_rate={:.3}",
        snap.get_calls,
        snap.get_hits,
        snap.get_misses,
        snap.hit_rate()
    );
    println!(
        "inserts={} evicted={} len={}/{}",
        snap.insert_new, snap.evicted_entries, snap.map_len, snap.capacity
    );
}

// Expected output:
// gets=8 hits=1 misses=7 hit_rate=0.125
// inserts=7 evicted=4 len=3/3
