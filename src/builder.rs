//! Builder: one-shot bulk loading of a frozen map.

use crate::config::{BuildOptions, LoadFactor};
use crate::error::{Error, Result};
use crate::map::ImmutableOpenHashMap;
use crate::primitive::Primitive;
use crate::slot_table::{table_size, Inserted, SlotTable};

/// Loads `keys[offset..offset + length]` paired with the same range of
/// `values` into a new table sized for `length` entries.
///
/// All argument checks happen before allocation.
pub(crate) fn load<K: Primitive, V: Primitive>(
    keys: &[K],
    values: &[V],
    offset: usize,
    length: usize,
    load_factor: LoadFactor,
) -> Result<SlotTable<K, V>> {
    if keys.len() != values.len() {
        return Err(Error::LengthMismatch {
            keys: keys.len(),
            values: values.len(),
        });
    }
    let end = offset
        .checked_add(length)
        .filter(|&end| end <= keys.len())
        .ok_or(Error::RangeOutOfBounds {
            offset,
            length,
            len: keys.len(),
        })?;
    let capacity = table_size(length, load_factor.get())?;

    let mut table = SlotTable::with_capacity(capacity);
    for (&k, &v) in keys[offset..end].iter().zip(&values[offset..end]) {
        match table.insert(k, v) {
            Inserted::New(slot) => debug_assert_eq!(table.tail(), Some(slot)),
            Inserted::Overwrote(slot) => {
                tracing::trace!(key = ?k, slot, "duplicate key, value replaced");
            }
        }
    }
    tracing::debug!(
        input = length,
        len = table.len(),
        capacity,
        load_factor = load_factor.get(),
        "built immutable map"
    );
    Ok(table)
}

/// Accumulates pairs in order, then freezes them into an
/// [`ImmutableOpenHashMap`].
///
/// Pairs are only flattened into parallel arrays here; hashing happens once,
/// in [`Builder::build`]. Repeated keys follow the map's rule: the last value
/// wins and the first occurrence fixes the position.
#[derive(Debug, Clone)]
pub struct Builder<K, V> {
    keys: Vec<K>,
    values: Vec<V>,
    options: BuildOptions<V>,
}

impl<K: Primitive, V: Primitive> Builder<K, V> {
    pub fn new() -> Self {
        Self::with_options(BuildOptions::default())
    }

    pub fn with_options(options: BuildOptions<V>) -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            options,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            options: BuildOptions::default(),
        }
    }

    pub fn load_factor(mut self, load_factor: LoadFactor) -> Self {
        self.options.load_factor = load_factor;
        self
    }

    pub fn default_value(mut self, value: V) -> Self {
        self.options.default_value = value;
        self
    }

    pub fn push(&mut self, key: K, value: V) -> &mut Self {
        self.keys.push(key);
        self.values.push(value);
        self
    }

    /// Number of pairs pushed so far, duplicates included.
    pub fn pending(&self) -> usize {
        self.keys.len()
    }

    pub fn build(self) -> Result<ImmutableOpenHashMap<K, V>> {
        let len = self.keys.len();
        let table = load(&self.keys, &self.values, 0, len, self.options.load_factor)?;
        Ok(ImmutableOpenHashMap::from_parts(table, self.options))
    }
}

impl<K: Primitive, V: Primitive> Default for Builder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Primitive, V: Primitive> Extend<(K, V)> for Builder<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.push(k, v);
        }
    }
}
