#![no_main]

use std::net::Ipv4Addr;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use bintrie::{Ipv4Cidr, Ipv4Trie, TrieError};

#[derive(Arbitrary, Debug)]
struct Block {
    addr: u32,
    len: u8,
}

impl Block {
    fn cidr(&self) -> Ipv4Cidr {
        Ipv4Cidr::new(Ipv4Addr::from(self.addr), self.len % (Ipv4Cidr::MAX_LEN + 1))
            .expect("length reduced modulo 33")
    }
}

#[derive(Arbitrary, Debug)]
enum PrefixMethod {
    Insert(Block),
    Remove(Block),
    Along { block: Block, include_exact: bool },
}

fuzz_target!(|methods: Vec<PrefixMethod>| {
    let mut trie = Ipv4Trie::<u32>::new();
    let mut flat: Vec<(Ipv4Cidr, u32)> = Vec::new();

    for (i, m) in methods.iter().enumerate() {
        match m {
            PrefixMethod::Insert(b) => {
                let key = b.cidr();
                let val = i as u32;
                if key.prefix_len() == 0 {
                    assert_eq!(trie.try_insert(key, val), Err(TrieError::EmptyKey));
                    continue;
                }
                let old = trie.insert(key, val);
                match flat.iter_mut().find(|(k, _)| *k == key) {
                    Some(slot) => assert_eq!(old, Some(std::mem::replace(&mut slot.1, val))),
                    None => {
                        assert_eq!(old, None);
                        flat.push((key, val));
                    }
                }
            }
            PrefixMethod::Remove(b) => {
                let key = b.cidr();
                let expected = flat
                    .iter()
                    .position(|(k, _)| *k == key)
                    .map(|at| flat.swap_remove(at).1);
                assert_eq!(trie.remove(&key), expected);
            }
            PrefixMethod::Along {
                block,
                include_exact,
            } => {
                let key = block.cidr();
                let mut expected: Vec<(Ipv4Cidr, u32)> = flat
                    .iter()
                    .filter(|(k, _)| k.contains(&key) && (*include_exact || *k != key))
                    .copied()
                    .collect();
                expected.sort_by_key(|(k, _)| k.prefix_len());

                let got: Vec<(Ipv4Cidr, u32)> = trie
                    .entries_along_prefix(&key, *include_exact)
                    .into_iter()
                    .map(|(k, v)| (k, *v))
                    .collect();
                assert_eq!(got, expected);
            }
        }
        assert_eq!(trie.len(), flat.len());
    }

    flat.sort();
    assert!(trie.iter().map(|(k, v)| (k, *v)).eq(flat.iter().copied()));
});
