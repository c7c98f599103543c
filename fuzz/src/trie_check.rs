#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use bintrie::BinaryTrie;

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Get { key: u64 },
    Insert { key: u64, val: u32 },
    Update { key: u64, val: u32 },
    Delete { key: u64 },
    Clear,
}

fuzz_target!(|methods: Vec<MapMethod>| {
    let mut trie = BinaryTrie::<u64, u32>::new();
    let mut bt_map = BTreeMap::<u64, u32>::new();

    for m in &methods {
        match m {
            MapMethod::Get { key } => {
                assert_eq!(trie.get(key), bt_map.get(key));
            }
            MapMethod::Insert { key, val } => {
                let bt_insert = bt_map.insert(*key, *val);
                let t_insert = trie.insert(*key, *val);
                assert_eq!(t_insert, bt_insert);
            }
            MapMethod::Update { key, val } => {
                let old_bt = bt_map.get_mut(key);
                let old_t = trie.get_mut(key);
                assert_eq!(old_t, old_bt);

                if let (Some(old_bt), Some(old_t)) = (old_bt, old_t) {
                    *old_bt = *val;
                    *old_t = *val;
                }
                assert_eq!(trie.get(key), bt_map.get(key));
            }
            MapMethod::Delete { key } => {
                assert_eq!(trie.remove(key), bt_map.remove(key));
            }
            MapMethod::Clear => {
                trie.clear();
                bt_map.clear();
            }
        }
        assert_eq!(trie.len(), bt_map.len());
    }

    // Full-width integers compare MSB first, so prefix order is numeric order.
    assert!(trie.iter().map(|(k, v)| (k, *v)).eq(bt_map.iter().map(|(k, v)| (*k, *v))));
    assert!(trie.iter().rev().map(|(k, _)| k).eq(bt_map.keys().rev().copied()));

    let mut node = trie.first_node();
    let mut walked = 0;
    while let Some(n) = node {
        walked += 1;
        node = n.successor();
    }
    assert_eq!(walked, bt_map.len());
});
