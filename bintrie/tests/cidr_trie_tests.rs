//! End-to-end behaviour of the trie over IPv4/IPv6 network blocks.

#![cfg(feature = "cidr")]

use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use bintrie::stats::TrieStatsTrait;
use bintrie::{BitKey, Ipv4Cidr, Ipv4Trie, Ipv6Cidr, Ipv6Trie, TrieError};
use rand::{Rng, rng};

fn cidr(s: &str) -> Ipv4Cidr {
    s.parse().unwrap()
}

/// `0.0.0.0/1`, `0.0.0.0/3`, `128.0.0.0/1`, `224.0.0.0/3`: two chains of depth 1 and 3.
fn zeroes_and_ones() -> [Ipv4Cidr; 4] {
    [
        Ipv4Cidr::new(Ipv4Addr::from(0u32), 1).unwrap(),
        Ipv4Cidr::new(Ipv4Addr::from(0u32), 3).unwrap(),
        Ipv4Cidr::new(Ipv4Addr::from(u32::MAX), 1).unwrap(),
        Ipv4Cidr::new(Ipv4Addr::from(u32::MAX), 3).unwrap(),
    ]
}

fn labelled_trie() -> Ipv4Trie<String> {
    let [s1, s3, t1, t3] = zeroes_and_ones();
    let mut trie = Ipv4Trie::new();
    trie.insert(s1, format!("depth 1 s: {s1}"));
    trie.insert(s3, format!("depth 3 s: {s3}"));
    trie.insert(t1, format!("depth 1 t: {t1}"));
    trie.insert(t3, format!("depth 3 t: {t3}"));
    trie
}

#[test]
fn test_map_interface() {
    let [s1, s3, t1, t3] = zeroes_and_ones();
    let mut trie = labelled_trie();
    assert_eq!(trie.len(), 4);

    assert_eq!(
        trie.to_string(),
        "{0.0.0.0/1=depth 1 s: 0.0.0.0/1, 0.0.0.0/3=depth 3 s: 0.0.0.0/3, \
         128.0.0.0/1=depth 1 t: 128.0.0.0/1, 224.0.0.0/3=depth 3 t: 224.0.0.0/3}"
    );
    assert_eq!(
        trie.value_view().to_string(),
        "[depth 1 s: 0.0.0.0/1, depth 3 s: 0.0.0.0/3, depth 1 t: 128.0.0.0/1, \
         depth 3 t: 224.0.0.0/3]"
    );
    assert_eq!(
        trie.key_view().to_string(),
        "[0.0.0.0/1, 0.0.0.0/3, 128.0.0.0/1, 224.0.0.0/3]"
    );
    assert_eq!(
        trie.entries().to_string(),
        "[0.0.0.0/1=depth 1 s: 0.0.0.0/1, 0.0.0.0/3=depth 3 s: 0.0.0.0/3, \
         128.0.0.0/1=depth 1 t: 128.0.0.0/1, 224.0.0.0/3=depth 3 t: 224.0.0.0/3]"
    );

    assert_eq!(trie.get(&s1).unwrap(), "depth 1 s: 0.0.0.0/1");
    assert_eq!(trie.get(&s3).unwrap(), "depth 3 s: 0.0.0.0/3");
    assert_eq!(trie.get(&t1).unwrap(), "depth 1 t: 128.0.0.0/1");
    assert_eq!(trie.get(&t3).unwrap(), "depth 3 t: 224.0.0.0/3");

    let along = |trie: &Ipv4Trie<String>, key: &Ipv4Cidr| {
        trie.values_along_prefix(key, true)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>()
    };
    assert_eq!(
        along(&trie, &s3),
        ["depth 1 s: 0.0.0.0/1", "depth 3 s: 0.0.0.0/3"]
    );
    assert_eq!(
        along(&trie, &t3),
        ["depth 1 t: 128.0.0.0/1", "depth 3 t: 224.0.0.0/3"]
    );

    // Node layout: two chains hanging off a branch-only root.
    let root = trie.root();
    assert_eq!(root.to_string(), "null=null");
    let l = root.left().unwrap();
    let ll = l.left().unwrap();
    let lll = ll.left().unwrap();
    let r = root.right().unwrap();
    let rr = r.right().unwrap();
    let rrr = rr.right().unwrap();
    assert_eq!(l.stored_key(), Some(s1));
    assert_eq!(ll.stored_key(), None);
    assert_eq!(ll.resolve_key().unwrap().to_string(), "0.0.0.0/2");
    assert_eq!(lll.stored_key(), Some(s3));
    assert_eq!(r.stored_key(), Some(t1));
    assert_eq!(rr.resolve_key().unwrap().to_string(), "192.0.0.0/2");
    assert_eq!(rrr.stored_key(), Some(t3));
    assert_eq!(l.value().unwrap(), "depth 1 s: 0.0.0.0/1");
    assert_eq!(ll.value(), None);
    assert_eq!(rr.value(), None);
    assert_eq!(rrr.value().unwrap(), "depth 3 t: 224.0.0.0/3");

    assert_eq!(trie.remove(&t3).unwrap(), "depth 3 t: 224.0.0.0/3");
    assert_eq!(trie.len(), 3);
    assert_eq!(
        trie.to_string(),
        "{0.0.0.0/1=depth 1 s: 0.0.0.0/1, 0.0.0.0/3=depth 3 s: 0.0.0.0/3, \
         128.0.0.0/1=depth 1 t: 128.0.0.0/1}"
    );
    assert_eq!(
        trie.key_view().to_string(),
        "[0.0.0.0/1, 0.0.0.0/3, 128.0.0.0/1]"
    );

    // 192.0.0.0/2 only existed to reach 224.0.0.0/3, so it is gone too.
    let root = trie.root();
    assert_eq!(root.to_string(), "null=null");
    assert!(root.right().unwrap().right().is_none());
    assert_eq!(
        root.left()
            .unwrap()
            .left()
            .unwrap()
            .resolve_key()
            .unwrap()
            .to_string(),
        "0.0.0.0/2"
    );

    trie.clear();
    assert_eq!(trie.len(), 0);
    assert_eq!(trie.to_string(), "{}");
}

#[test]
fn test_clone() {
    let [_, _, _, t3] = zeroes_and_ones();
    let trie = labelled_trie();
    let mut copy = trie.clone();

    assert_eq!(trie.len(), copy.len());
    assert!(trie.iter().eq(copy.iter()));
    assert_eq!(trie, copy);

    copy.remove(&t3);
    assert_eq!(trie.len(), copy.len() + 1);
    assert_ne!(trie, copy);
    assert!(trie.contains_key(&t3));
}

#[test]
fn test_key_order_matches_cidr_ordering() {
    let [s1, s3, t1, t3] = zeroes_and_ones();
    let set: BTreeSet<Ipv4Cidr> = [t3, s1, t1, s3].into_iter().collect();
    let trie = labelled_trie();
    assert_eq!(set.len(), 4);
    assert!(set.iter().copied().eq(trie.keys()));
}

#[test]
fn test_random_order_and_predecessor_walk() {
    let mut rng = rng();
    let mut trie = Ipv4Trie::new();
    let mut expected = BTreeSet::new();
    for _ in 0..3_000 {
        let len = rng.random_range(1..=24u8);
        let addr = Ipv4Addr::from(rng.random::<u32>() & 0xFFF0_0000);
        let block = Ipv4Cidr::new(addr, len).unwrap();
        trie.insert(block, block.to_string());
        expected.insert(block);
    }
    assert_eq!(trie.len(), expected.len());

    // Masked (network, length) ordering coincides with prefix order.
    let keys: Vec<Ipv4Cidr> = trie.keys().collect();
    assert!(expected.iter().copied().eq(keys.iter().copied()));
    for (k, v) in &trie {
        assert_eq!(k.to_string(), *v);
    }

    let mut node = trie.last_node();
    let mut i = keys.len();
    while let Some(n) = node {
        i -= 1;
        assert_eq!(n.stored_key(), Some(keys[i]));
        assert_eq!(n.resolve_key().unwrap().bit_len(), n.depth());
        node = n.predecessor();
    }
    assert_eq!(i, 0);
}

#[test]
fn test_longest_prefix_match() {
    let mut routes = Ipv4Trie::new();
    routes.insert(cidr("10.0.0.0/8"), "corp");
    routes.insert(cidr("10.20.0.0/16"), "lab");
    routes.insert(cidr("10.20.30.0/24"), "rack");
    routes.insert(cidr("192.168.0.0/16"), "home");

    let best = |addr: &str| routes.values_along_prefix(&cidr(addr), true).last().copied();
    assert_eq!(best("10.20.30.40"), Some(&"rack"));
    assert_eq!(best("10.20.99.1"), Some(&"lab"));
    assert_eq!(best("10.99.0.1"), Some(&"corp"));
    assert_eq!(best("192.168.7.7"), Some(&"home"));
    assert_eq!(best("8.8.8.8"), None);

    let matched: Vec<String> = routes
        .entries_along_prefix(&cidr("10.20.30.0/24"), false)
        .into_iter()
        .map(|(k, _)| k.to_string())
        .collect();
    assert_eq!(matched, ["10.0.0.0/8", "10.20.0.0/16"]);

    routes.remove(&cidr("10.0.0.0/8"));
    assert!(routes.values_along_prefix(&cidr("10.99.0.1"), true).is_empty());
    assert_eq!(routes.get_trie_stats().num_entries, 3);
}

#[test]
fn test_default_route_is_not_storable() {
    let mut routes = Ipv4Trie::new();
    routes.insert(cidr("10.0.0.0/8"), "corp");
    assert_eq!(
        routes.try_insert(cidr("0.0.0.0/0"), "default"),
        Err(TrieError::EmptyKey)
    );
    assert_eq!(routes.len(), 1);
    assert_eq!(routes.get(&cidr("0.0.0.0/0")), None);
    assert!(routes.values_along_prefix(&cidr("0.0.0.0/0"), true).is_empty());
    assert_eq!(routes.key_view().to_string(), "[10.0.0.0/8]");
}

#[test]
fn test_ipv6_blocks() {
    let mut trie = Ipv6Trie::new();
    let doc: Ipv6Cidr = "2001:db8::/32".parse().unwrap();
    let site: Ipv6Cidr = "2001:db8:1::/48".parse().unwrap();
    trie.insert(doc, 1);
    trie.insert(site, 2);

    let host: Ipv6Cidr = "2001:db8:1::7".parse().unwrap();
    assert_eq!(trie.values_along_prefix(&host, true), vec![&1, &2]);
    assert_eq!(trie.values_along_prefix(&site, false), vec![&1]);
    assert_eq!(
        trie.key_view().to_string(),
        "[2001:db8::/32, 2001:db8:1::/48]"
    );
    assert_eq!(
        trie.node_for(&"2001:db8::/31".parse().unwrap())
            .map(|n| n.is_entry()),
        Some(false)
    );
}
