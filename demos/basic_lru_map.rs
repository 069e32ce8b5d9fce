use lrumap::policy::lru_map::LruMap;

fn main() {
    let mut map = LruMap::with_entries(2, [(0, "left"), (1, "right")]);
    println!("initial: {:?}", map.iter().collect::<Vec<_>>());

    if let Some(value) = map.get(&0) {
        println!("hit 0: {}", value);
    }
    println!("after get(0): {:?}", map.iter().collect::<Vec<_>>());

    map.insert(2, "center");
    println!("contains 1? {}", map.contains(&1));
    println!("final: {:?}", map.iter().collect::<Vec<_>>());

    let mut sink: LruMap<u32, &str> = LruMap::new(-1);
    sink.insert(7, "gone");
    println!("zero-capacity len: {}", sink.len());
}

// Expected output:
// initial: [(0, "left"), (1, "right")]
// hit 0: left
// after get(0): [(1, "right"), (0, "left")]
// contains 1? false
// final: [(0, "left"), (2, "center")]
// zero-capacity len: 0
//
// Explanation: capacity=2; after get(&0), key 0 is the most recently used and
// key 1 the least. Inserting key 2 evicts key 1. A negative capacity behaves
// like zero, so the second map never stores anything.
