#![no_main]

use libfuzzer_sys::fuzz_target;
use lrumap::ds::IntrusiveList;

// Fuzz arbitrary operation sequences on IntrusiveList
//
// Drives push_back, pop_front, move_to_back, remove and clear, including
// stale ids, and re-checks the link structure after every step.
fuzz_target!(|data: &[u8]| {
    let mut list: IntrusiveList<u32> = IntrusiveList::new();
    let mut all_ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 5;
        let value = u32::from(pair[1]);

        match op {
            0 => {
                let id = list.push_back(value);
                all_ids.push(id);
                assert_eq!(list.back(), Some(&value));
                assert_eq!(list.get(id), Some(&value));
            },
            1 => {
                let old_len = list.len();
                let front = list.front().copied();
                assert_eq!(list.pop_front(), front);
                assert_eq!(list.len(), old_len - usize::from(front.is_some()));
            },
            2 if !all_ids.is_empty() => {
                let id = all_ids[value as usize % all_ids.len()];
                let live = list.get(id).copied();
                assert_eq!(list.move_to_back(id), live.is_some());
                if live.is_some() {
                    assert_eq!(list.back().copied(), live);
                }
            },
            3 if !all_ids.is_empty() => {
                let id = all_ids[value as usize % all_ids.len()];
                let old_len = list.len();
                if list.remove(id).is_some() {
                    assert_eq!(list.len(), old_len - 1);
                    assert_eq!(list.get(id), None);
                }
            },
            4 => {
                if pair[1] == 0 {
                    list.clear();
                    all_ids.clear();
                    assert!(list.is_empty());
                }
            },
            _ => {},
        }

        assert_eq!(list.iter().count(), list.len());
        assert_eq!(list.iter_ids().count(), list.len());
        assert!(list.check_links().is_ok());
    }
});
