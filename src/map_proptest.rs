#![cfg(test)]

// Property tests for ImmutableOpenHashMap kept inside the crate so they can
// reach the slot table and cursor internals.

use crate::cursor::Cursor;
use crate::error::Error;
use crate::map::ImmutableOpenHashMap;
use crate::order::{walk_backward, NIL};
use crate::views::{Entry, OrderedView};
use hashbrown::HashMap;
use proptest::prelude::*;

// Model: first-seen key order plus last-written value per key.
fn model<K: Copy + Eq + std::hash::Hash, V: Copy>(pairs: &[(K, V)]) -> (Vec<K>, HashMap<K, V>) {
    let mut order = Vec::new();
    let mut values = HashMap::new();
    for &(k, v) in pairs {
        if values.insert(k, v).is_none() {
            order.push(k);
        }
    }
    (order, values)
}

// Small key domain to force duplicates and probe collisions.
fn arb_pairs() -> impl Strategy<Value = Vec<(i32, i64)>> {
    proptest::collection::vec((-20i32..20, any::<i64>()), 0..80)
}

// Property: the built map agrees with the model.
// - len equals the number of distinct keys.
// - get/try_get/contains_key agree for present and absent keys.
// - iteration order is first-seen order, values are last-written.
// - head.prev and tail.next are NIL.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_build_matches_model(pairs in arb_pairs(), lf in 0.05f32..0.95) {
        let (keys, vals): (Vec<i32>, Vec<i64>) = pairs.iter().copied().unzip();
        let m = ImmutableOpenHashMap::build(&keys, &vals, 0, keys.len(), lf).unwrap();
        let (order, values) = model(&pairs);

        prop_assert_eq!(m.len(), order.len());
        prop_assert!(m.capacity() > m.len());
        prop_assert!(m.capacity().is_power_of_two());
        prop_assert_eq!(m.keys().collect::<Vec<_>>(), order.clone());
        for k in -25i32..25 {
            prop_assert_eq!(m.try_get(k), values.get(&k).copied());
            prop_assert_eq!(m.contains_key(k), values.contains_key(&k));
            prop_assert_eq!(m.get(k), values.get(&k).copied().unwrap_or(0));
        }
        let t = m.table();
        if let (Some(h), Some(tl)) = (t.head(), t.tail()) {
            prop_assert_eq!(t.link(h).prev, NIL);
            prop_assert_eq!(t.link(tl).next, NIL);
        } else {
            prop_assert!(m.is_empty());
        }
    }

    // Property: forward then backward traversal are mirror images, through
    // both the cursor and the double-ended iterator.
    #[test]
    fn prop_reverse_symmetry(pairs in arb_pairs()) {
        let m: ImmutableOpenHashMap<i32, i64> = pairs.iter().copied().collect();
        let fwd: Vec<Entry<i32, i64>> = m.iter().collect();
        let mut back: Vec<Entry<i32, i64>> = m.iter().rev().collect();
        back.reverse();
        prop_assert_eq!(&fwd, &back);

        let mut c = m.cursor();
        while c.advance().is_ok() {}
        prop_assert_eq!(c.position(), m.len());
        let mut via_cursor = Vec::new();
        while let Ok(e) = c.retreat() {
            via_cursor.push(e);
        }
        via_cursor.reverse();
        prop_assert_eq!(&fwd, &via_cursor);

        let t = m.table();
        let via_links: Vec<i32> = walk_backward(t.links(), t.tail()).map(|s| t.key_at(s)).collect();
        let mut fwd_keys: Vec<i32> = fwd.iter().map(|e| e.key).collect();
        fwd_keys.reverse();
        prop_assert_eq!(via_links, fwd_keys);
    }

    // Property: seeking any present key then advancing yields its successor
    // in insertion order, or exhaustion for the last key; the recovered
    // position matches the key's index plus one.
    #[test]
    fn prop_seek_successor(pairs in arb_pairs()) {
        let m: ImmutableOpenHashMap<i32, i64> = pairs.iter().copied().collect();
        let keys: Vec<i32> = m.keys().collect();
        for (i, &k) in keys.iter().enumerate() {
            let mut c = m.cursor_at(k).unwrap();
            prop_assert_eq!(c.position(), i + 1);
            match keys.get(i + 1) {
                Some(&next) => prop_assert_eq!(c.advance().map(|e| e.key), Ok(next)),
                None => prop_assert_eq!(c.advance(), Err(Error::Exhausted)),
            }
        }
        for k in 100..105 {
            prop_assert!(matches!(Cursor::at(m.table(), k), Err(Error::NotFound)));
        }
    }

    // Property: reads are idempotent and a copy is structurally equal with
    // the same order.
    #[test]
    fn prop_reads_idempotent_and_copy_equal(pairs in arb_pairs()) {
        let m: ImmutableOpenHashMap<i32, i64> = pairs.iter().copied().collect();
        let first: Vec<_> = m.iter().collect();
        let len = m.len();
        for _ in 0..3 {
            prop_assert_eq!(m.iter().collect::<Vec<_>>(), first.clone());
            prop_assert_eq!(m.len(), len);
            for e in &first {
                prop_assert!(m.contains_key(e.key));
                prop_assert_eq!(m.get(e.key), e.value);
            }
        }
        let c = m.copy();
        prop_assert!(c == m);
        prop_assert_eq!(c.iter().collect::<Vec<_>>(), first);
    }

    // Property: view bulk operations agree with the model iteration.
    #[test]
    fn prop_views_agree(pairs in arb_pairs(), pivot in -20i32..20) {
        let m: ImmutableOpenHashMap<i32, i64> = pairs.iter().copied().collect();
        let (order, values) = model(&pairs);
        let ks = m.key_set();
        prop_assert_eq!(ks.count(|&k| k < pivot), order.iter().filter(|&&k| k < pivot).count());
        prop_assert_eq!(ks.find_first(|&k| k > pivot), order.iter().copied().find(|&k| k > pivot));
        prop_assert_eq!(ks.any_match(|k| k == pivot), values.contains_key(&pivot));
        let sum = m.values().fold(0i64, |a, v| a.wrapping_add(v));
        let model_sum = order.iter().fold(0i64, |a, k| a.wrapping_add(values[k]));
        prop_assert_eq!(sum, model_sum);
        prop_assert_eq!(m.key_set().first().ok(), order.first().copied());
        prop_assert_eq!(m.key_set().last().ok(), order.last().copied());
    }
}

// Float keys: bit identity over arbitrary patterns, including signed zeros
// and NaNs.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_float_keys_bitwise(bits in proptest::collection::vec(
        prop_oneof![
            Just(0u64),
            Just(0x8000_0000_0000_0000u64),
            Just(f64::NAN.to_bits()),
            Just(f64::NAN.to_bits() | 1),
            0u64..16,
        ],
        0..40,
    )) {
        let keys: Vec<f64> = bits.iter().map(|&b| f64::from_bits(b)).collect();
        let vals: Vec<u64> = bits.clone();
        let m = ImmutableOpenHashMap::from_slices(&keys, &vals).unwrap();
        let (order, _) = model(&bits.iter().map(|&b| (b, b)).collect::<Vec<_>>());
        prop_assert_eq!(m.len(), order.len());
        let got: Vec<u64> = m.keys().map(f64::to_bits).collect();
        prop_assert_eq!(got, order);
        for &b in &bits {
            prop_assert_eq!(m.try_get(f64::from_bits(b)), Some(b));
        }
    }
}
