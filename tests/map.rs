use std::collections::BTreeMap;

use common::init_logger;
use rand::prelude::*;
use treap_rk::{RankMap, Reverse, TreapError};

mod common;

#[test]
fn test_insert_get() {
    let mut m = RankMap::<&str, i32>::with_seed(1);
    assert!(m.is_empty());
    assert_eq!(m.insert("b", 2), None);
    assert_eq!(m.insert("a", 1), None);
    assert_eq!(m.insert("c", 3), None);
    assert_eq!(m.insert("b", 20), Some(2));
    assert_eq!(m.len(), 3);
    assert_eq!(m.get(&"b"), Some(&20));
    assert_eq!(m.get(&"d"), None);
    assert!(m.contains_key(&"a"));
    *m.get_mut(&"a").unwrap() += 10;
    assert_eq!(m.get(&"a"), Some(&11));
    assert!(m.verify());
}

#[test]
fn test_ranks() {
    let m: RankMap<i32, char> = [(30, 'c'), (10, 'a'), (20, 'b')].into_iter().collect();
    assert_eq!(m.select(0), Ok((&10, &'a')));
    assert_eq!(m.select(2), Ok((&30, &'c')));
    assert_eq!(m.select(3), Err(TreapError::OutOfRange { pos: 3, len: 3 }));
    assert_eq!(m.position(&20), (1, Some(&'b')));
    assert_eq!(m.position(&25), (2, None));
    assert_eq!(m.keys().copied().collect::<Vec<_>>(), [10, 20, 30]);
    assert_eq!(m.values().rev().copied().collect::<String>(), "cba");
    assert_eq!(m.iter().len(), 3);
}

#[test]
fn test_remove() {
    let mut m = RankMap::<i32, String>::with_seed(2);
    for k in 0..10 {
        m.insert(k, k.to_string());
    }
    assert_eq!(m.remove(&4).as_deref(), Some("4"));
    assert_eq!(m.remove(&4), None);
    assert_eq!(m.len(), 9);
    assert_eq!(m.position(&5), (4, Some(&"5".to_string())));
    assert!(m.verify());
}

#[test]
fn test_reverse_order() {
    let mut m = RankMap::<i32, i32, Reverse>::with_seed(3);
    for k in 1..=4 {
        m.insert(k, k * k);
    }
    assert_eq!(m.keys().copied().collect::<Vec<_>>(), [4, 3, 2, 1]);
    assert_eq!(m.select(1), Ok((&3, &9)));
}

#[test]
fn test_debug() {
    let m: RankMap<i32, i32> = [(1, 2)].into_iter().collect();
    assert_eq!(format!("{m:?}"), "{1: 2}");
}

#[test]
fn test_compare_with_btree() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(4);
    let mut m = RankMap::<i32, u32>::with_seed(4);
    let mut bt = BTreeMap::new();
    for _ in 0..3000 {
        let k = rng.gen_range(0..300);
        match rng.gen_range(0..4) {
            0 | 1 => {
                let v = rng.gen();
                assert_eq!(m.insert(k, v), bt.insert(k, v));
            }
            2 => assert_eq!(m.remove(&k), bt.remove(&k)),
            _ => {
                assert_eq!(m.get(&k), bt.get(&k));
                assert_eq!(m.position(&k).0, bt.range(..k).count());
            }
        }
    }
    assert!(m.verify());
    assert!(m.iter().eq(bt.iter()));
}
