//! ImmutableOpenHashMap: the frozen, insertion-ordered map.

use core::fmt;

use crate::builder::{load, Builder};
use crate::config::{BuildOptions, LoadFactor};
use crate::cursor::{Cursor, FastIter, Iter, Keys, Values};
use crate::error::{Error, Result};
use crate::primitive::Primitive;
use crate::slot_table::SlotTable;
use crate::views::{Entry, EntrySet, KeySet, ValueCollection};

/// An open-addressing hash map from primitive keys to primitive values that
/// is built once and never changes afterwards.
///
/// Iteration follows the order in which distinct keys first appeared in the
/// input. When a key repeats, the last value wins but the key keeps its first
/// position.
///
/// Keys are compared by bit pattern, so `-0.0` and `0.0` are different keys
/// and a NaN key is found only by the identical NaN.
///
/// The map has no mutating methods at all; trying to call one does not
/// compile:
///
/// ```compile_fail
/// use prim_linked_map::ImmutableOpenHashMap;
///
/// let mut m = ImmutableOpenHashMap::from_pairs(&[(1i32, 2i32)]).unwrap();
/// m.put(3, 4);
/// ```
///
/// ```compile_fail
/// use prim_linked_map::ImmutableOpenHashMap;
///
/// let mut m = ImmutableOpenHashMap::from_pairs(&[(1i32, 2i32)]).unwrap();
/// m.remove(1);
/// ```
///
/// ```compile_fail
/// use prim_linked_map::ImmutableOpenHashMap;
///
/// let mut m = ImmutableOpenHashMap::from_pairs(&[(1i32, 2i32)]).unwrap();
/// m.clear();
/// ```
///
/// Building and reading:
///
/// ```
/// use prim_linked_map::ImmutableOpenHashMap;
///
/// let m = ImmutableOpenHashMap::build(&[5i32, 3, 5], &[10i64, 20, 30], 0, 3, 0.75).unwrap();
/// assert_eq!(m.len(), 2);
/// assert_eq!(m.get(5), 30);
/// assert_eq!(m.keys().collect::<Vec<_>>(), vec![5, 3]);
/// ```
#[derive(Clone)]
pub struct ImmutableOpenHashMap<K, V> {
    table: SlotTable<K, V>,
    options: BuildOptions<V>,
}

impl<K: Primitive, V: Primitive> ImmutableOpenHashMap<K, V> {
    /// Builds a map from `keys[offset..offset + length]` and the same range of
    /// `values`.
    ///
    /// Fails if the arrays differ in length, the range does not fit, or
    /// `load_factor` is not strictly between 0 and 1.
    pub fn build(
        keys: &[K],
        values: &[V],
        offset: usize,
        length: usize,
        load_factor: f32,
    ) -> Result<Self> {
        let options = BuildOptions::new().load_factor(LoadFactor::new(load_factor)?);
        Self::build_with(keys, values, offset, length, options)
    }

    pub fn build_with(
        keys: &[K],
        values: &[V],
        offset: usize,
        length: usize,
        options: BuildOptions<V>,
    ) -> Result<Self> {
        let table = load(keys, values, offset, length, options.load_factor)?;
        Ok(Self::from_parts(table, options))
    }

    /// Whole arrays, default load factor.
    pub fn from_slices(keys: &[K], values: &[V]) -> Result<Self> {
        Self::build_with(keys, values, 0, keys.len(), BuildOptions::default())
    }

    pub fn from_pairs(pairs: &[(K, V)]) -> Result<Self> {
        let (keys, values): (Vec<K>, Vec<V>) = pairs.iter().copied().unzip();
        Self::from_slices(&keys, &values)
    }

    pub fn builder() -> Builder<K, V> {
        Builder::new()
    }

    pub fn empty() -> Self {
        Self::from_parts(SlotTable::with_capacity(2), BuildOptions::default())
    }

    pub(crate) fn from_parts(table: SlotTable<K, V>, options: BuildOptions<V>) -> Self {
        Self { table, options }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Number of slots backing the map.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn load_factor(&self) -> LoadFactor {
        self.options.load_factor
    }

    /// Value returned by [`get`](Self::get) for absent keys.
    pub fn default_value(&self) -> V {
        self.options.default_value
    }

    /// A copy of this map whose `get` returns `value` for absent keys.
    pub fn with_default_value(&self, value: V) -> Self {
        Self {
            table: self.table.clone(),
            options: self.options.default_value(value),
        }
    }

    /// Value for `key`, or the configured default when absent.
    #[inline]
    pub fn get(&self, key: K) -> V {
        self.try_get(key).unwrap_or(self.options.default_value)
    }

    #[inline]
    pub fn try_get(&self, key: K) -> Option<V> {
        self.table.find(key).map(|s| self.table.value_at(s))
    }

    pub fn get_or(&self, key: K, default: V) -> V {
        self.try_get(key).unwrap_or(default)
    }

    #[inline]
    pub fn contains_key(&self, key: K) -> bool {
        self.table.find(key).is_some()
    }

    /// Linear scan over the slots; values compare by bit pattern.
    pub fn contains_value(&self, value: V) -> bool {
        self.table.contains_value(value)
    }

    pub fn first_key(&self) -> Result<K> {
        self.first_entry().map(|e| e.key)
    }

    pub fn last_key(&self) -> Result<K> {
        self.last_entry().map(|e| e.key)
    }

    pub fn first_value(&self) -> Result<V> {
        self.first_entry().map(|e| e.value)
    }

    pub fn last_value(&self) -> Result<V> {
        self.last_entry().map(|e| e.value)
    }

    pub fn first_entry(&self) -> Result<Entry<K, V>> {
        let s = self.table.head().ok_or(Error::Empty)?;
        Ok(Entry::new(self.table.key_at(s), self.table.value_at(s)))
    }

    pub fn last_entry(&self) -> Result<Entry<K, V>> {
        let s = self.table.tail().ok_or(Error::Empty)?;
        Ok(Entry::new(self.table.key_at(s), self.table.value_at(s)))
    }

    /// Deep copy backed by freshly allocated arrays.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn key_set(&self) -> KeySet<'_, K, V> {
        KeySet::new(self)
    }

    pub fn values(&self) -> ValueCollection<'_, K, V> {
        ValueCollection::new(self)
    }

    pub fn entry_set(&self) -> EntrySet<'_, K, V> {
        EntrySet::new(self)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.table)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            inner: Iter::new(&self.table),
        }
    }

    pub fn values_iter(&self) -> Values<'_, K, V> {
        Values {
            inner: Iter::new(&self.table),
        }
    }

    /// Flyweight iteration; see [`FastIter`].
    pub fn fast_iter(&self) -> FastIter<'_, K, V> {
        FastIter::new(&self.table)
    }

    /// Cursor before the first entry.
    pub fn cursor(&self) -> Cursor<'_, K, V> {
        Cursor::front(&self.table)
    }

    /// Cursor after the last entry, for walking backwards.
    pub fn cursor_back(&self) -> Cursor<'_, K, V> {
        Cursor::back(&self.table)
    }

    /// Cursor right after `key`; `NotFound` when absent.
    pub fn cursor_at(&self, key: K) -> Result<Cursor<'_, K, V>> {
        Cursor::at(&self.table, key)
    }

    #[cfg(test)]
    pub(crate) fn table(&self) -> &SlotTable<K, V> {
        &self.table
    }

    #[cfg(test)]
    pub(crate) fn table_mut(&mut self) -> &mut SlotTable<K, V> {
        &mut self.table
    }
}

impl<K: Primitive, V: Primitive> Default for ImmutableOpenHashMap<K, V> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Map equality: same keys with bit-equal values, regardless of order.
impl<K: Primitive, V: Primitive> PartialEq for ImmutableOpenHashMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|e| other.try_get(e.key).is_some_and(|v| v.same(e.value)))
    }
}

impl<K: Primitive, V: Primitive> Eq for ImmutableOpenHashMap<K, V> {}

impl<K: Primitive, V: Primitive> fmt::Debug for ImmutableOpenHashMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(Entry::into_pair))
            .finish()
    }
}

impl<'a, K: Primitive, V: Primitive> IntoIterator for &'a ImmutableOpenHashMap<K, V> {
    type Item = Entry<K, V>;
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K: Primitive, V: Primitive> FromIterator<(K, V)> for ImmutableOpenHashMap<K, V> {
    /// Collects with the default load factor.
    ///
    /// # Panics
    ///
    /// If the input has more entries than the largest supported table.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut b = Builder::new();
        b.extend(iter);
        match b.build() {
            Ok(m) => m,
            Err(e) => panic!("cannot collect into ImmutableOpenHashMap: {}", e),
        }
    }
}

impl<K: Primitive, V: Primitive, const N: usize> TryFrom<[(K, V); N]>
    for ImmutableOpenHashMap<K, V>
{
    type Error = Error;

    fn try_from(pairs: [(K, V); N]) -> Result<Self> {
        Self::from_pairs(&pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: repeated keys keep their first position and take the last
    /// value.
    #[test]
    fn dedupe_last_value_first_position() {
        let m = ImmutableOpenHashMap::build(&[5i32, 3, 5], &[10i32, 20, 30], 0, 3, 0.75).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(5), 30);
        assert_eq!(m.get(3), 20);
        assert_eq!(m.keys().collect::<Vec<_>>(), vec![5, 3]);
    }

    /// Invariant: a zero key is stored and found like any other key.
    #[test]
    fn zero_key() {
        let m = ImmutableOpenHashMap::build(&[0i32, 7, 0], &[1i32, 2, 3], 0, 3, 0.75).unwrap();
        assert!(m.contains_key(0));
        assert_eq!(m.get(0), 3);
        assert_eq!(m.len(), 2);
        assert_eq!(m.keys().collect::<Vec<_>>(), vec![0, 7]);
    }

    /// Invariant: float keys compare by bits, so both signed zeros are kept.
    #[test]
    fn signed_zero_keys_are_distinct() {
        let m = ImmutableOpenHashMap::from_slices(&[-0.0f64, 0.0], &[1i32, 2]).unwrap();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(-0.0), 1);
        assert_eq!(m.get(0.0), 2);
        assert_ne!(m.get(-0.0), m.get(0.0));
    }

    #[test]
    fn nan_key_found_by_identical_bits() {
        let nan = f32::NAN;
        let other_nan = f32::from_bits(nan.to_bits() ^ 1);
        let m = ImmutableOpenHashMap::from_slices(&[nan, 1.0], &[9u8, 1]).unwrap();
        assert_eq!(m.try_get(nan), Some(9));
        assert_eq!(m.try_get(other_nan), None);
    }

    #[test]
    fn build_validates_arguments() {
        let k = [1i32, 2];
        assert_eq!(
            ImmutableOpenHashMap::build(&k, &[1i32], 0, 1, 0.75).err(),
            Some(Error::LengthMismatch { keys: 2, values: 1 })
        );
        for lf in [0.0f32, 1.0, -1.0, 2.0, f32::NAN] {
            let r = ImmutableOpenHashMap::build(&k, &k, 0, 2, lf);
            assert!(matches!(r, Err(Error::LoadFactor(_))), "lf={}", lf);
        }
        assert!(ImmutableOpenHashMap::build(&k, &k, 1, 2, 0.5)
            .err()
            .is_some_and(|e| e.is_invalid_argument()));
    }

    #[test]
    fn absent_keys_use_default_value() {
        let m = ImmutableOpenHashMap::from_pairs(&[(1u64, 1.5f64)]).unwrap();
        assert_eq!(m.get(2), 0.0);
        assert_eq!(m.try_get(2), None);
        assert_eq!(m.get_or(2, 9.0), 9.0);
        let m2 = m.with_default_value(-1.0);
        assert_eq!(m2.get(2), -1.0);
        assert_eq!(m2.default_value(), -1.0);
        assert_eq!(m.get(2), 0.0);

        let opts = BuildOptions::new().default_value(f64::MAX);
        let m3 = ImmutableOpenHashMap::build_with(&[1u64], &[2.0], 0, 1, opts).unwrap();
        assert_eq!(m3.get(7), f64::MAX);
    }

    #[test]
    fn ends_of_the_order() {
        let m = ImmutableOpenHashMap::from_pairs(&[(9i16, 'a'), (2, 'b'), (5, 'c')]).unwrap();
        assert_eq!(m.first_key(), Ok(9));
        assert_eq!(m.last_key(), Ok(5));
        assert_eq!(m.first_value(), Ok('a'));
        assert_eq!(m.last_value(), Ok('c'));
        assert_eq!(m.last_entry(), Ok(Entry::new(5, 'c')));

        let e: ImmutableOpenHashMap<i16, char> = ImmutableOpenHashMap::empty();
        assert_eq!(e.first_key(), Err(Error::Empty));
        assert_eq!(e.last_key(), Err(Error::Empty));
        assert_eq!(e.first_value(), Err(Error::Empty));
        assert_eq!(e.last_value(), Err(Error::Empty));
    }

    #[test]
    fn contains_value_bitwise() {
        let m = ImmutableOpenHashMap::from_pairs(&[(1i32, -0.0f32), (2, f32::NAN)]).unwrap();
        assert!(m.contains_value(-0.0));
        assert!(!m.contains_value(0.0));
        assert!(m.contains_value(f32::NAN));
    }

    /// Invariant: a copy is equal, keeps the order, and owns separate storage.
    #[test]
    fn copy_is_independent() {
        let m = ImmutableOpenHashMap::from_pairs(&[(1i32, 10i32), (2, 20), (3, 30)]).unwrap();
        let mut c = m.copy();
        assert_eq!(c, m);
        assert!(c.iter().eq(m.iter()));

        let (k1, v1, l1) = m.table().storage_ptrs();
        let (k2, v2, l2) = c.table().storage_ptrs();
        assert_ne!(k1, k2);
        assert_ne!(v1, v2);
        assert_ne!(l1, l2);

        for v in c.table_mut().values_mut() {
            *v = v.wrapping_add(1);
        }
        assert_eq!(m.get(2), 20);
        assert_eq!(c.get(2), 21);
        assert_ne!(c, m);
    }

    #[test]
    fn equality_ignores_order() {
        let a = ImmutableOpenHashMap::from_pairs(&[(1i32, 1i32), (2, 2)]).unwrap();
        let b = ImmutableOpenHashMap::from_pairs(&[(2i32, 2i32), (1, 1)]).unwrap();
        let c = ImmutableOpenHashMap::from_pairs(&[(2i32, 2i32), (1, 3)]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, ImmutableOpenHashMap::empty());
    }

    #[test]
    fn debug_is_insertion_ordered() {
        let m = ImmutableOpenHashMap::from_pairs(&[(3u8, true), (1, false)]).unwrap();
        assert_eq!(format!("{:?}", m), "{3: true, 1: false}");
    }

    #[test]
    fn collect_and_try_from() {
        let m: ImmutableOpenHashMap<i64, i64> = (0..100).map(|i| (i % 10, i)).collect();
        assert_eq!(m.len(), 10);
        assert_eq!(m.get(3), 93);
        assert_eq!(m.keys().collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());

        let t = ImmutableOpenHashMap::try_from([(1usize, 2usize), (3, 4)]).unwrap();
        assert_eq!(t.get(3), 4);
        assert_eq!(ImmutableOpenHashMap::<u8, u8>::default().len(), 0);
    }

    #[test]
    fn cursors_from_map() {
        let m = ImmutableOpenHashMap::from_pairs(&[(1i32, 0i32), (2, 0), (3, 0)]).unwrap();
        let mut c = m.cursor_at(2).unwrap();
        assert_eq!(c.advance().map(|e| e.key), Ok(3));
        assert!(matches!(m.cursor_at(4), Err(Error::NotFound)));
        let mut c = m.cursor_back();
        let mut back = Vec::new();
        while let Ok(e) = c.retreat() {
            back.push(e.key);
        }
        assert_eq!(back, vec![3, 2, 1]);
    }

    #[test]
    fn fast_iter_matches_iter() {
        let m: ImmutableOpenHashMap<u32, u32> = (0..50u32).map(|i| (i * 7, i)).collect();
        let mut fast = m.fast_iter();
        let mut out = Vec::new();
        while let Some(e) = fast.next() {
            out.push(*e);
        }
        assert_eq!(out, m.iter().collect::<Vec<_>>());
    }
}
