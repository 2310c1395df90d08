use balanced_map::{Error, Map, StrMap};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

const N: usize = 1_000;

fn s(key: &str) -> String { key.to_owned() }

fn str_map(entries: &[(&str, usize)]) -> StrMap {
    let mut map = StrMap::new();
    for &(key, value) in entries { assert!(map.insert(s(key), value)); }
    map
}

#[test]
fn test_new() {
    let map = StrMap::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.height(), 0);
    assert_eq!(map.keys().count(), 0);
    assert_eq!(map.validate(), Ok(()));
}

#[test]
fn test_balanced_insert_needs_no_rotation() {
    let map = str_map(&[("b", 1), ("a", 2), ("c", 3)]);

    assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(map.height(), 2);
    assert_eq!(map.min(), Some((&s("a"), &2)));
    assert_eq!(map.validate(), Ok(()));
}

#[test]
fn test_sorted_insert_rotates_left() {
    let map = str_map(&[("a", 1), ("b", 2), ("c", 3)]);

    assert_eq!(map.height(), 2);
    assert_eq!(map.render().to_string(), "    c:3 (h:1)\nb:2 (h:2)\n    a:1 (h:1)\n");
    assert_eq!(map.validate(), Ok(()));
}

#[test]
fn test_remove_extremes_then_range() {
    let keys = ["a", "b", "c", "d", "e", "f", "g"];
    let mut map = StrMap::new();
    for (value, key) in keys.iter().enumerate() { map.insert(s(key), value); }
    assert_eq!(map.height(), 3);

    assert!(map.remove(&s("a")));
    assert!(map.remove(&s("g")));

    assert_eq!(map.len(), 5);
    assert_eq!(map.validate(), Ok(()));
    assert_eq!(map.find_range(&s("c"), &s("e")), [2, 3, 4]);
}

#[test]
fn test_duplicate_insert_does_not_overwrite() {
    let mut map = str_map(&[("k", 1)]);

    assert!(!map.insert(s("k"), 2));
    assert_eq!(map.get(&s("k")), Some(&1));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_values_are_stored_verbatim() {
    let mut map = StrMap::new();
    map.insert(s("answer"), 42);
    assert_eq!(map.get(&s("answer")), Some(&42));
    assert_eq!(*map.get_or_default(s("answer")), 42);
}

#[test]
fn test_remove_absent() {
    let mut map = str_map(&[("a", 1), ("b", 2)]);

    assert!(!map.remove(&s("z")));
    assert_eq!(map.len(), 2);

    let mut empty = StrMap::new();
    assert!(!empty.remove(&s("a")));
    assert!(empty.is_empty());
}

#[test]
fn test_get_or_default_inserts_zero() {
    let mut map = StrMap::new();

    assert_eq!(*map.get_or_default(s("x")), 0);
    assert_eq!(map.len(), 1);
    assert!(map.contains_key(&s("x")));

    let height = map.height();
    *map.get_or_default(s("x")) += 5;
    assert_eq!(map.height(), height);
    *map.get_or_default(s("y")) += 1;
    assert_eq!(map.get(&s("x")), Some(&5));
    assert_eq!(map.get(&s("y")), Some(&1));
    assert_eq!(map.len(), 2);
}

#[test]
fn test_index() {
    let map = str_map(&[("a", 1)]);
    assert_eq!(map[&s("a")], 1);
}

#[test]
#[should_panic(expected = "key not found")]
fn test_index_missing_panics() {
    let map = str_map(&[("a", 1)]);
    let _value: usize = map[&s("b")];
}

#[test]
fn test_find_range_bounds() {
    let map = str_map(&[("apple", 1), ("banana", 2), ("cherry", 3), ("date", 4)]);

    assert_eq!(map.find_range(&s("banana"), &s("cherry")), [2, 3]);
    assert_eq!(map.find_range(&s("b"), &s("c")), [2]);
    assert_eq!(map.find_range(&s("a"), &s("z")), [1, 2, 3, 4]);
    assert_eq!(map.find_range(&s("date"), &s("date")), [4]);
    assert!(map.find_range(&s("e"), &s("z")).is_empty());
    assert!(map.find_range(&s("cherry"), &s("banana")).is_empty());

    let keys: Vec<_> = map.range(&s("b"), &s("d")).map(|e| e.0.as_str()).collect();
    assert_eq!(keys, ["banana", "cherry"]);
}

#[test]
fn test_range_entries_outlive_bounds() {
    let map = str_map(&[("a", 1), ("b", 2), ("c", 3), ("d", 4)]);
    let high = s("c");

    let mut it = {
        let low = s("b");
        map.range(&low, &high)
    };
    assert_eq!(it.next(), Some((&s("b"), &2)));

    let entries: Vec<(&String, &usize)> = {
        let (low, high) = (s("a"), s("b"));
        map.range(&low, &high).collect()
    };
    assert_eq!(entries, [(&s("a"), &1), (&s("b"), &2)]);
    assert_eq!(it.next(), Some((&s("c"), &3)));
    assert_eq!(it.next(), None);
}

#[test]
fn test_values() {
    let map = str_map(&[("c", 3), ("a", 1), ("b", 2)]);

    assert_eq!(map.values().cloned().collect::<Vec<_>>(), [1, 2, 3]);
    assert_eq!(map.values().len(), 3);
    assert_eq!(StrMap::new().values().next(), None);
}

#[test]
fn test_extend_keeps_existing_values() {
    let mut map = str_map(&[("a", 1), ("b", 2)]);
    map.extend(vec![(s("b"), 20), (s("c"), 30), (s("c"), 300)]);

    assert_eq!(map.len(), 3);
    assert_eq!(map.values().cloned().collect::<Vec<_>>(), [1, 2, 30]);
    assert_eq!(map.validate(), Ok(()));
}

#[test]
fn test_hash() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash<T: Hash>(t: &T) -> u64 {
        let mut h = DefaultHasher::new();
        t.hash(&mut h);
        h.finish()
    }

    let forward = str_map(&[("a", 1), ("b", 2), ("c", 3)]);
    let backward = str_map(&[("c", 3), ("b", 2), ("a", 1)]);
    assert_eq!(forward, backward);
    assert_eq!(hash(&forward), hash(&backward));

    let other = str_map(&[("a", 1), ("b", 2), ("c", 4)]);
    assert_ne!(hash(&forward), hash(&other));
}

#[test]
fn test_clone_is_deep() {
    let mut original = str_map(&[("a", 1), ("b", 2), ("c", 3)]);
    let mut copy = original.clone();

    original.remove(&s("b"));
    *original.get_mut(&s("a")).expect("present") = 10;
    assert_eq!(copy.keys().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(copy.get(&s("a")), Some(&1));

    copy.insert(s("d"), 4);
    assert_eq!(original.keys().collect::<Vec<_>>(), ["a", "c"]);
    assert_eq!(original.validate(), Ok(()));
    assert_eq!(copy.validate(), Ok(()));
}

#[test]
fn test_clone_from_discards_old_content() {
    let source = str_map(&[("x", 1), ("y", 2)]);
    let mut target = str_map(&[("a", 1), ("b", 2), ("c", 3)]);

    target.clone_from(&source);
    assert_eq!(target, source);
    assert_eq!(target.keys().collect::<Vec<_>>(), ["x", "y"]);
    assert_eq!(target.len(), 2);
}

#[test]
fn test_clear() {
    let mut map = str_map(&[("a", 1), ("b", 2)]);
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.height(), 0);
    assert!(map.insert(s("a"), 3));
    assert_eq!(map.get(&s("a")), Some(&3));
}

#[test]
fn test_render_with_balance() {
    let map = str_map(&[("b", 1), ("a", 2)]);
    assert_eq!(map.render().with_balance().to_string(), "b:1 (h:2) (b:1)\n    a:2 (h:1) (b:0)\n");
    assert_eq!(map.to_string(), "b:1 (h:2)\n    a:2 (h:1)\n");
    assert_eq!(StrMap::new().to_string(), "");
}

#[test]
fn test_render_indents_by_depth() {
    let map: Map<_, _> = (1..=7).map(|k| (k, k * 10)).collect();
    let lines: Vec<String> = map.render().to_string().lines().map(str::to_owned).collect();

    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "        7:70 (h:1)");
    assert_eq!(lines[3], "4:40 (h:3)");
    assert_eq!(lines[6], "        1:10 (h:1)");
}

#[test]
fn test_debug() {
    let map = str_map(&[("b", 1), ("a", 2)]);
    assert_eq!(format!("{:?}", map), r#"{"a": 2, "b": 1}"#);
}

#[test]
fn test_reverse_comparator() {
    use compare::{natural, Compare};

    let mut map = Map::with_cmp(natural::<u32>().rev());
    for key in 0..10u32 { map.insert(key, ()); }

    assert_eq!(map.keys().cloned().collect::<Vec<_>>(), (0..10u32).rev().collect::<Vec<_>>());
    assert_eq!(map.find_range(&7u32, &3u32).len(), 5);
    assert_eq!(map.validate(), Ok(()));
}

#[test]
fn test_validate_reports_len_mismatch_message() {
    let e = Error::Len { len: 3, count: 2 };
    assert_eq!(e.to_string(), "map reports 3 entries but 2 nodes are reachable");
}

#[test]
fn test_insert_sorted_range() {
    let mut map = Map::new();
    for key in 0..N {
        assert!(map.insert(key, key));
        assert_eq!(map.validate(), Ok(()));
    }
    assert_eq!(map.len(), N);
    assert!(map.height() < N / 2);

    for key in 0..N { assert!(!map.insert(key, 0)); }
    assert_eq!(map.len(), N);
}

#[test]
fn test_insert_shuffled_remove_shuffled() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut keys: Vec<u32> = (0..N).map(|_| rng.gen()).collect();
    keys.sort();
    keys.dedup();
    keys.shuffle(&mut rng);

    let mut map = Map::new();
    for key in &keys {
        assert!(map.insert(*key, key.wrapping_mul(3)));
        assert_eq!(map.validate(), Ok(()));
    }
    assert_eq!(map.len(), keys.len());

    for key in &keys { assert_eq!(map.get(key), Some(&key.wrapping_mul(3))); }

    keys.shuffle(&mut rng);
    for key in &keys {
        assert!(map.remove(key));
        assert!(map.get(key).is_none());
        assert_eq!(map.validate(), Ok(()));
    }
    assert!(map.is_empty());
    assert_eq!(map.height(), 0);
}

#[test]
fn test_string_keys_shuffled() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut words: Vec<String> = (0..N).map(|i| format!("key{:04}", i)).collect();
    words.shuffle(&mut rng);

    let mut map = StrMap::new();
    for (i, word) in words.iter().enumerate() { map.insert(word.clone(), i); }

    let keys: Vec<&String> = map.keys().collect();
    assert!(keys.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(map.find_range(&s("key0100"), &s("key0199")).len(), 100);

    for word in words.iter().step_by(2) { assert!(map.remove(word)); }
    assert_eq!(map.len(), N / 2);
    assert_eq!(map.validate(), Ok(()));
}
