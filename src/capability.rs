//! Capability traits. Reading is a capability of its own; a map that cannot
//! be mutated simply has no mutation trait to implement.

use crate::cursor::FastIter;
use crate::map::ImmutableOpenHashMap;
use crate::primitive::Primitive;
use crate::views::Entry;

/// Read access to a primitive-keyed map.
pub trait PrimitiveMap<K: Primitive, V: Primitive> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn try_get(&self, key: K) -> Option<V>;

    /// Value returned by `get` for absent keys.
    fn default_value(&self) -> V;

    fn get(&self, key: K) -> V {
        self.try_get(key).unwrap_or(self.default_value())
    }

    fn get_or(&self, key: K, default: V) -> V {
        self.try_get(key).unwrap_or(default)
    }

    fn contains_key(&self, key: K) -> bool {
        self.try_get(key).is_some()
    }

    fn contains_value(&self, value: V) -> bool;
}

/// Maps that can hand out a flyweight entry iterator for allocation-free
/// bulk traversal.
pub trait FastIterable<K: Primitive, V: Primitive> {
    fn fast_iter(&self) -> FastIter<'_, K, V>;

    /// Calls `f` with each entry in order. The reference is only valid for
    /// the duration of the call.
    fn fast_for_each<F: FnMut(&Entry<K, V>)>(&self, mut f: F) {
        let mut it = self.fast_iter();
        while let Some(e) = it.next() {
            f(e);
        }
    }
}

impl<K: Primitive, V: Primitive> PrimitiveMap<K, V> for ImmutableOpenHashMap<K, V> {
    fn len(&self) -> usize {
        ImmutableOpenHashMap::len(self)
    }

    fn try_get(&self, key: K) -> Option<V> {
        ImmutableOpenHashMap::try_get(self, key)
    }

    fn default_value(&self) -> V {
        ImmutableOpenHashMap::default_value(self)
    }

    fn contains_key(&self, key: K) -> bool {
        ImmutableOpenHashMap::contains_key(self, key)
    }

    fn contains_value(&self, value: V) -> bool {
        ImmutableOpenHashMap::contains_value(self, value)
    }
}

impl<K: Primitive, V: Primitive> FastIterable<K, V> for ImmutableOpenHashMap<K, V> {
    fn fast_iter(&self) -> FastIter<'_, K, V> {
        ImmutableOpenHashMap::fast_iter(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total<M: PrimitiveMap<i32, i32>>(m: &M, keys: &[i32]) -> i32 {
        keys.iter().map(|&k| m.get(k)).sum()
    }

    #[test]
    fn generic_reads_through_trait() {
        let m = ImmutableOpenHashMap::from_pairs(&[(1, 10), (2, 20)])
            .unwrap()
            .with_default_value(100);
        assert_eq!(total(&m, &[1, 2, 3]), 130);
        let dynm: &dyn PrimitiveMap<i32, i32> = &m;
        assert_eq!(dynm.len(), 2);
        assert!(dynm.contains_key(2));
        assert!(dynm.contains_value(20));
        assert_eq!(dynm.get_or(9, -1), -1);
        assert!(!dynm.is_empty());
    }

    #[test]
    fn fast_for_each_visits_in_order() {
        let m = ImmutableOpenHashMap::from_pairs(&[(4u8, 1u8), (2, 2), (9, 3)]).unwrap();
        let mut keys = Vec::new();
        FastIterable::fast_for_each(&m, |e| keys.push(e.key));
        assert_eq!(keys, vec![4, 2, 9]);
    }
}
