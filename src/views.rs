//! Read-only projections of a map: key set, value collection, entry set.
//!
//! Views borrow the map, copy nothing, and walk the insertion order. Their
//! shared bulk operations live on [`OrderedView`].

use core::fmt;

use crate::cursor::{Cursor, FastIter, Iter, Keys, Values};
use crate::error::{Error, Result};
use crate::map::ImmutableOpenHashMap;
use crate::primitive::Primitive;

/// A key/value pair copied out of the map.
///
/// Equality is bit-pattern equality on both fields, matching how the map
/// compares keys.
#[derive(Debug, Clone, Copy)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: Primitive, V: Primitive> PartialEq for Entry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key.same(other.key) && self.value.same(other.value)
    }
}

impl<K: Primitive, V: Primitive> Eq for Entry<K, V> {}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Entry::new(key, value)
    }
}

/// Bulk operations shared by every view. All of them follow insertion order.
pub trait OrderedView {
    type Item: Copy;
    type Iter: DoubleEndedIterator<Item = Self::Item> + ExactSizeIterator;

    fn iter(&self) -> Self::Iter;

    fn len(&self) -> usize {
        self.iter().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn for_each<F: FnMut(Self::Item)>(&self, f: F) {
        self.iter().for_each(f)
    }

    fn any_match<P: FnMut(Self::Item) -> bool>(&self, mut pred: P) -> bool {
        self.iter().any(|x| pred(x))
    }

    fn all_match<P: FnMut(Self::Item) -> bool>(&self, mut pred: P) -> bool {
        self.iter().all(|x| pred(x))
    }

    fn none_match<P: FnMut(Self::Item) -> bool>(&self, mut pred: P) -> bool {
        !self.iter().any(|x| pred(x))
    }

    /// Reduction seeded with the first item; `None` when empty.
    fn reduce<F: FnMut(Self::Item, Self::Item) -> Self::Item>(&self, f: F) -> Option<Self::Item> {
        self.iter().reduce(f)
    }

    /// Reduction seeded with `identity`.
    fn fold<B, F: FnMut(B, Self::Item) -> B>(&self, identity: B, f: F) -> B {
        self.iter().fold(identity, f)
    }

    fn find_first<P: FnMut(&Self::Item) -> bool>(&self, pred: P) -> Option<Self::Item> {
        self.iter().find(pred)
    }

    fn count<P: FnMut(&Self::Item) -> bool>(&self, pred: P) -> usize {
        self.iter().filter(pred).count()
    }

    fn first(&self) -> Result<Self::Item> {
        self.iter().next().ok_or(Error::Empty)
    }

    fn last(&self) -> Result<Self::Item> {
        self.iter().next_back().ok_or(Error::Empty)
    }

    fn to_vec(&self) -> Vec<Self::Item> {
        self.iter().collect()
    }
}

/// Keys of a map as a set.
#[derive(Clone, Copy)]
pub struct KeySet<'a, K, V> {
    map: &'a ImmutableOpenHashMap<K, V>,
}

impl<'a, K: Primitive, V: Primitive> KeySet<'a, K, V> {
    pub(crate) fn new(map: &'a ImmutableOpenHashMap<K, V>) -> Self {
        Self { map }
    }

    pub fn contains(&self, key: K) -> bool {
        self.map.contains_key(key)
    }

    pub fn cursor(&self) -> Cursor<'a, K, V> {
        self.map.cursor()
    }

    /// Cursor placed right after `key`.
    pub fn cursor_at(&self, key: K) -> Result<Cursor<'a, K, V>> {
        self.map.cursor_at(key)
    }
}

impl<'a, K: Primitive, V: Primitive> OrderedView for KeySet<'a, K, V> {
    type Item = K;
    type Iter = Keys<'a, K, V>;

    fn iter(&self) -> Keys<'a, K, V> {
        self.map.keys()
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<'a, K: Primitive, V: Primitive> IntoIterator for KeySet<'a, K, V> {
    type Item = K;
    type IntoIter = Keys<'a, K, V>;

    fn into_iter(self) -> Keys<'a, K, V> {
        self.map.keys()
    }
}

/// Values of a map, with duplicates, in the order of their keys.
#[derive(Clone, Copy)]
pub struct ValueCollection<'a, K, V> {
    map: &'a ImmutableOpenHashMap<K, V>,
}

impl<'a, K: Primitive, V: Primitive> ValueCollection<'a, K, V> {
    pub(crate) fn new(map: &'a ImmutableOpenHashMap<K, V>) -> Self {
        Self { map }
    }

    /// Linear scan.
    pub fn contains(&self, value: V) -> bool {
        self.map.contains_value(value)
    }

    pub fn cursor(&self) -> Cursor<'a, K, V> {
        self.map.cursor()
    }
}

impl<'a, K: Primitive, V: Primitive> OrderedView for ValueCollection<'a, K, V> {
    type Item = V;
    type Iter = Values<'a, K, V>;

    fn iter(&self) -> Values<'a, K, V> {
        self.map.values_iter()
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<'a, K: Primitive, V: Primitive> IntoIterator for ValueCollection<'a, K, V> {
    type Item = V;
    type IntoIter = Values<'a, K, V>;

    fn into_iter(self) -> Values<'a, K, V> {
        self.map.values_iter()
    }
}

/// Entries of a map as a set of pairs.
#[derive(Clone, Copy)]
pub struct EntrySet<'a, K, V> {
    map: &'a ImmutableOpenHashMap<K, V>,
}

impl<'a, K: Primitive, V: Primitive> EntrySet<'a, K, V> {
    pub(crate) fn new(map: &'a ImmutableOpenHashMap<K, V>) -> Self {
        Self { map }
    }

    /// True when the key is present with a bit-equal value.
    pub fn contains(&self, entry: Entry<K, V>) -> bool {
        self.map
            .try_get(entry.key)
            .is_some_and(|v| v.same(entry.value))
    }

    pub fn cursor(&self) -> Cursor<'a, K, V> {
        self.map.cursor()
    }

    /// Cursor placed right after the entry's key.
    pub fn cursor_at(&self, entry: Entry<K, V>) -> Result<Cursor<'a, K, V>> {
        if !self.contains(entry) {
            return Err(Error::NotFound);
        }
        self.map.cursor_at(entry.key)
    }

    pub fn fast_iter(&self) -> FastIter<'a, K, V> {
        self.map.fast_iter()
    }
}

impl<'a, K: Primitive, V: Primitive> OrderedView for EntrySet<'a, K, V> {
    type Item = Entry<K, V>;
    type Iter = Iter<'a, K, V>;

    fn iter(&self) -> Iter<'a, K, V> {
        self.map.iter()
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

impl<'a, K: Primitive, V: Primitive> IntoIterator for EntrySet<'a, K, V> {
    type Item = Entry<K, V>;
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.map.iter()
    }
}

impl<'a, K: Primitive, V: Primitive> fmt::Debug for KeySet<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K: Primitive, V: Primitive> fmt::Debug for ValueCollection<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, K: Primitive, V: Primitive> fmt::Debug for EntrySet<'a, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(Entry::into_pair))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ImmutableOpenHashMap<i32, i64> {
        ImmutableOpenHashMap::from_pairs(&[(3, 30), (1, 10), (4, 40), (1, 11), (5, 50)])
            .expect("valid input")
    }

    /// Invariant: every view walks insertion order, not slot order.
    #[test]
    fn views_follow_insertion_order() {
        let m = sample();
        assert_eq!(m.key_set().to_vec(), vec![3, 1, 4, 5]);
        assert_eq!(m.values().to_vec(), vec![30, 11, 40, 50]);
        let pairs: Vec<_> = m.entry_set().iter().map(Entry::into_pair).collect();
        assert_eq!(pairs, vec![(3, 30), (1, 11), (4, 40), (5, 50)]);
    }

    #[test]
    fn views_delegate_len() {
        let m = sample();
        assert_eq!(m.key_set().len(), 4);
        assert_eq!(m.values().len(), 4);
        assert_eq!(m.entry_set().len(), 4);
        assert!(!m.entry_set().is_empty());
    }

    #[test]
    fn bulk_predicates() {
        let m = sample();
        let keys = m.key_set();
        assert!(keys.any_match(|k| k == 4));
        assert!(!keys.any_match(|k| k == 2));
        assert!(keys.all_match(|k| k > 0));
        assert!(keys.none_match(|k| k > 5));
        assert_eq!(keys.count(|k| k % 2 == 1), 3);
        assert_eq!(keys.find_first(|&k| k > 3), Some(4));
        assert_eq!(keys.find_first(|&k| k > 9), None);
    }

    #[test]
    fn reductions() {
        let m = sample();
        assert_eq!(m.values().reduce(|a, b| a + b), Some(131));
        assert_eq!(m.values().fold(1000, |a, b| a + b), 1131);
        // Order-sensitive reduction shows the walk order.
        assert_eq!(m.key_set().fold(0, |acc, k| acc * 10 + k), 3145);

        let empty = ImmutableOpenHashMap::<i32, i64>::empty();
        assert_eq!(empty.values().reduce(|a, b| a + b), None);
        assert_eq!(empty.values().fold(7, |a, b| a + b), 7);
    }

    #[test]
    fn for_each_visits_in_order() {
        let m = sample();
        let mut seen = Vec::new();
        m.entry_set().for_each(|e| seen.push(e.key));
        assert_eq!(seen, vec![3, 1, 4, 5]);
    }

    #[test]
    fn first_and_last() {
        let m = sample();
        assert_eq!(m.key_set().first(), Ok(3));
        assert_eq!(m.key_set().last(), Ok(5));
        assert_eq!(m.values().last(), Ok(50));
        assert_eq!(m.entry_set().first(), Ok(Entry::new(3, 30)));

        let empty = ImmutableOpenHashMap::<i32, i64>::empty();
        assert_eq!(empty.key_set().first(), Err(Error::Empty));
        assert_eq!(empty.values().last(), Err(Error::Empty));
        assert_eq!(empty.entry_set().first(), Err(Error::Empty));
    }

    #[test]
    fn contains_per_view() {
        let m = sample();
        assert!(m.key_set().contains(1));
        assert!(!m.key_set().contains(2));
        assert!(m.values().contains(11));
        assert!(!m.values().contains(10));
        assert!(m.entry_set().contains(Entry::new(1, 11)));
        assert!(!m.entry_set().contains(Entry::new(1, 10)));
    }

    #[test]
    fn entry_set_cursor_requires_exact_entry() {
        let m = sample();
        assert!(matches!(
            m.entry_set().cursor_at(Entry::new(4, 41)),
            Err(Error::NotFound)
        ));
        let mut c = m.entry_set().cursor_at(Entry::new(4, 40)).unwrap();
        assert_eq!(c.advance().map(|e| e.key), Ok(5));
    }

    #[test]
    fn views_into_iter() {
        let m = sample();
        let mut total = 0;
        for k in m.key_set() {
            total += k;
        }
        assert_eq!(total, 13);
        let rev: Vec<_> = m.values().into_iter().rev().collect();
        assert_eq!(rev, vec![50, 40, 11, 30]);
    }

    #[test]
    fn debug_output_is_ordered() {
        let m = sample();
        assert_eq!(format!("{:?}", m.key_set()), "{3, 1, 4, 5}");
        assert_eq!(format!("{:?}", m.values()), "[30, 11, 40, 50]");
        assert_eq!(
            format!("{:?}", m.entry_set()),
            "{(3, 30), (1, 11), (4, 40), (5, 50)}"
        );
    }

    #[test]
    fn entry_equality_is_bitwise() {
        assert_eq!(Entry::new(1.5f64, 0.0f32), Entry::new(1.5, 0.0));
        assert_ne!(Entry::new(0.0f64, 1u8), Entry::new(-0.0, 1));
        assert_eq!(Entry::new(f64::NAN, 1u8), Entry::new(f64::NAN, 1));
        assert_eq!(Entry::from((2i8, true)).into_pair(), (2, true));
    }
}
