//! SlotTable: parallel key/value/link arrays with an explicit occupancy tag.
//!
//! The table is filled exactly once, through [`SlotTable::insert`], and then
//! frozen. Probing is linear over a power-of-two table; no tombstones exist
//! because nothing is ever removed.

use crate::error::{Error, Result};
use crate::order::{walk_forward, Link, OrderIndex};
use crate::primitive::Primitive;

/// Largest table the builder will allocate. Slot indices must fit in a `u32`
/// link with one value left over for the `NIL` marker.
pub(crate) const MAX_CAPACITY: usize = 1 << 30;

/// Power-of-two table size for `expected` entries at `load_factor`.
///
/// Always leaves at least one vacant slot so an unsuccessful probe stops.
pub(crate) fn table_size(expected: usize, load_factor: f32) -> Result<usize> {
    let wanted = (expected as f64 / load_factor as f64).ceil();
    if !(wanted <= MAX_CAPACITY as f64) {
        return Err(Error::CapacityOverflow { expected });
    }
    let wanted = (wanted as usize).max(expected + 1).max(2);
    let cap = wanted.next_power_of_two();
    if cap > MAX_CAPACITY {
        return Err(Error::CapacityOverflow { expected });
    }
    Ok(cap)
}

/// What an insert did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inserted {
    /// A vacant slot was claimed and appended to the order.
    New(usize),
    /// The key was present; only its value changed.
    Overwrote(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct SlotTable<K, V> {
    keys: Box<[K]>,
    values: Box<[V]>,
    links: Box<[Link]>,
    occupied: Box<[bool]>,
    mask: usize,
    len: usize,
    order: OrderIndex,
}

impl<K: Primitive, V: Primitive> SlotTable<K, V> {
    /// Allocates a vacant table. `capacity` must be a power of two no larger
    /// than [`MAX_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two() && capacity <= MAX_CAPACITY);
        Self {
            keys: vec![K::ZERO; capacity].into_boxed_slice(),
            values: vec![V::ZERO; capacity].into_boxed_slice(),
            links: vec![Link::UNLINKED; capacity].into_boxed_slice(),
            occupied: vec![false; capacity].into_boxed_slice(),
            mask: capacity - 1,
            len: 0,
            order: OrderIndex::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn head(&self) -> Option<usize> {
        self.order.head()
    }

    #[inline]
    pub fn tail(&self) -> Option<usize> {
        self.order.tail()
    }

    #[inline]
    pub fn key_at(&self, slot: usize) -> K {
        debug_assert!(self.occupied[slot]);
        self.keys[slot]
    }

    #[inline]
    pub fn value_at(&self, slot: usize) -> V {
        debug_assert!(self.occupied[slot]);
        self.values[slot]
    }

    #[inline]
    pub fn link(&self, slot: usize) -> Link {
        self.links[slot]
    }

    #[cfg(test)]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Slots in insertion order.
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        walk_forward(&self.links, self.head())
    }

    /// Slot holding `key`, if any.
    pub fn find(&self, key: K) -> Option<usize> {
        let mut pos = key.mix() as usize & self.mask;
        while self.occupied[pos] {
            if self.keys[pos].same(key) {
                return Some(pos);
            }
            pos = (pos + 1) & self.mask;
        }
        None
    }

    /// Inserts `key -> value`. A repeated key keeps its slot and its place in
    /// the order; only the value is replaced.
    pub fn insert(&mut self, key: K, value: V) -> Inserted {
        let mut pos = key.mix() as usize & self.mask;
        while self.occupied[pos] {
            if self.keys[pos].same(key) {
                self.values[pos] = value;
                return Inserted::Overwrote(pos);
            }
            pos = (pos + 1) & self.mask;
        }
        debug_assert!(self.len < self.mask, "table must keep a vacant slot");
        self.occupied[pos] = true;
        self.keys[pos] = key;
        self.values[pos] = value;
        self.order.append(&mut self.links, pos);
        self.len += 1;
        Inserted::New(pos)
    }

    /// Whether any stored value is bit-equal to `value`.
    pub fn contains_value(&self, value: V) -> bool {
        self.occupied
            .iter()
            .zip(self.values.iter())
            .any(|(&occ, v)| occ && v.same(value))
    }

    /// Number of steps from the head to `slot`. Linear in the table size.
    pub fn position_of(&self, slot: usize) -> usize {
        self.slots().take_while(|&s| s != slot).count()
    }

    #[cfg(test)]
    pub(crate) fn storage_ptrs(&self) -> (*const K, *const V, *const Link) {
        (self.keys.as_ptr(), self.values.as_ptr(), self.links.as_ptr())
    }

    #[cfg(test)]
    pub(crate) fn values_mut(&mut self) -> &mut [V] {
        &mut self.values
    }
}
