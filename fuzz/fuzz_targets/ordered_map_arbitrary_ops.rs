#![no_main]

use libfuzzer_sys::fuzz_target;
use lrumap::ds::OrderedMap;

// Fuzz arbitrary operation sequences on OrderedMap
//
// Keys come from a small space so updates, moves and removals of present
// keys are frequent. After each step the index and the order list must agree
// and the back entry must be whatever was last appended or moved.
fuzz_target!(|data: &[u8]| {
    let mut map: OrderedMap<u8, u8> = OrderedMap::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 6;
        let key = pair[1] % 32;

        match op {
            0 => {
                let had = map.get(&key).copied();
                let old_len = map.len();
                assert_eq!(map.push_back(key, pair[0]), had);
                assert_eq!(map.back(), Some((&key, &pair[0])));
                assert_eq!(map.len(), old_len + usize::from(had.is_none()));
            },
            1 => {
                if map.move_to_back(&key) {
                    assert_eq!(map.back().map(|(k, _)| *k), Some(key));
                } else {
                    assert!(!map.contains_key(&key));
                }
            },
            2 => {
                let value = map.get_and_move_to_back(&key).copied();
                assert_eq!(value.is_some(), map.contains_key(&key));
            },
            3 => {
                map.remove(&key);
                assert!(!map.contains_key(&key));
            },
            4 => {
                let front = map.front().map(|(k, v)| (*k, *v));
                assert_eq!(map.pop_front(), front);
            },
            5 => {
                if pair[1] == 0 {
                    map.clear();
                    assert!(map.is_empty());
                }
            },
            _ => unreachable!(),
        }

        assert_eq!(map.iter().len(), map.len());
        assert!(map.check_invariants().is_ok());
    }
});
