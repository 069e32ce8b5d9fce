#![no_main]

use libfuzzer_sys::fuzz_target;
use lrumap::policy::lru_map::LruMap;

// Fuzz arbitrary operation sequences on LruMap
//
// The first byte picks a signed capacity so zero and negative bounds are
// exercised alongside small positive ones. The map must never exceed its
// bound, and every hit must land at the most-recently-used position.
fuzz_target!(|data: &[u8]| {
    let Some((&cap_byte, ops)) = data.split_first() else {
        return;
    };
    let capacity = i16::from(cap_byte as i8) % 12;
    let bound = capacity.max(0) as usize;
    let mut map: LruMap<u8, u8> = LruMap::new(capacity);

    for pair in ops.chunks_exact(2) {
        let op = pair[0] % 5;
        let key = pair[1] % 24;

        match op {
            0 => {
                let was_present = map.contains(&key);
                let old_len = map.len();
                map.insert(key, pair[0]);
                if bound > 0 {
                    assert_eq!(map.peek_mru(), Some((&key, &pair[0])));
                    if was_present {
                        assert_eq!(map.len(), old_len);
                    }
                } else {
                    assert!(map.is_empty());
                }
            },
            1 => {
                let before: Vec<u8> = map.keys().copied().collect();
                if map.get(&key).is_some() {
                    assert_eq!(map.peek_mru().map(|(k, _)| *k), Some(key));
                } else {
                    let after: Vec<u8> = map.keys().copied().collect();
                    assert_eq!(before, after);
                }
            },
            2 => {
                map.remove(&key);
                assert!(!map.contains(&key));
            },
            3 => {
                let lru = map.peek_lru().map(|(k, v)| (*k, *v));
                assert_eq!(map.pop_lru(), lru);
            },
            4 => {
                let _ = map.peek(&key);
            },
            _ => unreachable!(),
        }

        assert!(map.len() <= bound);
        assert!(map.check_invariants().is_ok());
    }
});
