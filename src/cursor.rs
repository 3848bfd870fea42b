//! Traversal of the insertion order: a seekable bidirectional cursor plus
//! the double-ended iterators the views hand out.

use core::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::order::slot;
use crate::primitive::Primitive;
use crate::slot_table::SlotTable;
use crate::views::Entry;

/// A position between two entries of the insertion order.
///
/// `advance` returns the entry after the position and moves past it;
/// `retreat` returns the entry before it and moves back. A cursor created by
/// [`seek`](Cursor::seek) sits right after the sought key.
///
/// The position index is tracked while the cursor starts from an end and only
/// moves step by step. After a seek it is unknown, and
/// [`position`](Cursor::position) recovers it by walking from the first entry
/// on every call. That walk is linear in the map size and its result is not
/// stored.
#[derive(Debug, Clone)]
pub struct Cursor<'a, K, V> {
    table: &'a SlotTable<K, V>,
    prev: Option<usize>,
    next: Option<usize>,
    current: Option<usize>,
    index: Option<usize>,
}

impl<'a, K: Primitive, V: Primitive> Cursor<'a, K, V> {
    /// Cursor before the first entry.
    pub(crate) fn front(table: &'a SlotTable<K, V>) -> Self {
        Self {
            table,
            prev: None,
            next: table.head(),
            current: None,
            index: Some(0),
        }
    }

    /// Cursor after the last entry.
    pub(crate) fn back(table: &'a SlotTable<K, V>) -> Self {
        Self {
            table,
            prev: table.tail(),
            next: None,
            current: None,
            index: Some(table.len()),
        }
    }

    /// Cursor right after `key`.
    pub(crate) fn at(table: &'a SlotTable<K, V>, key: K) -> Result<Self> {
        let mut c = Self::front(table);
        c.seek(key)?;
        Ok(c)
    }

    #[inline]
    fn entry(&self, s: usize) -> Entry<K, V> {
        Entry::new(self.table.key_at(s), self.table.value_at(s))
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.prev.is_some()
    }

    /// The entry most recently returned by a move, or the sought entry.
    pub fn current(&self) -> Option<Entry<K, V>> {
        self.current.map(|s| self.entry(s))
    }

    pub fn peek_next(&self) -> Option<Entry<K, V>> {
        self.next.map(|s| self.entry(s))
    }

    pub fn peek_previous(&self) -> Option<Entry<K, V>> {
        self.prev.map(|s| self.entry(s))
    }

    pub fn advance(&mut self) -> Result<Entry<K, V>> {
        let s = self.next.ok_or(Error::Exhausted)?;
        self.current = Some(s);
        self.prev = Some(s);
        self.next = slot(self.table.link(s).next);
        if let Some(i) = self.index.as_mut() {
            *i += 1;
        }
        Ok(self.entry(s))
    }

    pub fn retreat(&mut self) -> Result<Entry<K, V>> {
        let s = self.prev.ok_or(Error::Exhausted)?;
        self.current = Some(s);
        self.next = Some(s);
        self.prev = slot(self.table.link(s).prev);
        if let Some(i) = self.index.as_mut() {
            *i -= 1;
        }
        Ok(self.entry(s))
    }

    /// Moves the cursor to just after `key`. On `NotFound` the cursor is left
    /// where it was.
    pub fn seek(&mut self, key: K) -> Result<()> {
        let s = match self.table.tail() {
            Some(t) if self.table.key_at(t).same(key) => t,
            _ => self.table.find(key).ok_or(Error::NotFound)?,
        };
        self.current = Some(s);
        self.prev = Some(s);
        self.next = slot(self.table.link(s).next);
        self.index = None;
        Ok(())
    }

    /// Number of entries before the cursor, which is also the index of the
    /// entry `advance` would return.
    pub fn position(&self) -> usize {
        if let Some(i) = self.index {
            return i;
        }
        match self.next {
            Some(n) => {
                tracing::trace!(slot = n, "recovering cursor position by walking");
                self.table.position_of(n)
            }
            None => self.table.len(),
        }
    }

    /// Index of the entry `retreat` would return.
    pub fn previous_index(&self) -> Option<usize> {
        self.position().checked_sub(1)
    }
}

impl<'a, K: Primitive, V: Primitive> Iterator for Cursor<'a, K, V> {
    type Item = Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().ok()
    }
}

impl<'a, K: Primitive, V: Primitive> FusedIterator for Cursor<'a, K, V> {}

/// Double-ended iterator over entries in insertion order.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    table: &'a SlotTable<K, V>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, K: Primitive, V: Primitive> Iter<'a, K, V> {
    pub(crate) fn new(table: &'a SlotTable<K, V>) -> Self {
        Self {
            table,
            front: table.head(),
            back: table.tail(),
            remaining: table.len(),
        }
    }

    #[inline]
    fn next_slot(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let s = self.front?;
        self.front = slot(self.table.link(s).next);
        self.remaining -= 1;
        Some(s)
    }

    #[inline]
    fn next_back_slot(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let s = self.back?;
        self.back = slot(self.table.link(s).prev);
        self.remaining -= 1;
        Some(s)
    }
}

impl<'a, K: Primitive, V: Primitive> Iterator for Iter<'a, K, V> {
    type Item = Entry<K, V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_slot()
            .map(|s| Entry::new(self.table.key_at(s), self.table.value_at(s)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: Primitive, V: Primitive> DoubleEndedIterator for Iter<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.next_back_slot()
            .map(|s| Entry::new(self.table.key_at(s), self.table.value_at(s)))
    }
}

impl<'a, K: Primitive, V: Primitive> ExactSizeIterator for Iter<'a, K, V> {}
impl<'a, K: Primitive, V: Primitive> FusedIterator for Iter<'a, K, V> {}

/// Keys in insertion order.
#[derive(Debug, Clone)]
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K: Primitive, V: Primitive> Iterator for Keys<'a, K, V> {
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<K> {
        let s = self.inner.next_slot()?;
        Some(self.inner.table.key_at(s))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K: Primitive, V: Primitive> DoubleEndedIterator for Keys<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<K> {
        let s = self.inner.next_back_slot()?;
        Some(self.inner.table.key_at(s))
    }
}

impl<'a, K: Primitive, V: Primitive> ExactSizeIterator for Keys<'a, K, V> {}
impl<'a, K: Primitive, V: Primitive> FusedIterator for Keys<'a, K, V> {}

/// Values in insertion order of their keys.
#[derive(Debug, Clone)]
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K: Primitive, V: Primitive> Iterator for Values<'a, K, V> {
    type Item = V;

    #[inline]
    fn next(&mut self) -> Option<V> {
        let s = self.inner.next_slot()?;
        Some(self.inner.table.value_at(s))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K: Primitive, V: Primitive> DoubleEndedIterator for Values<'a, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<V> {
        let s = self.inner.next_back_slot()?;
        Some(self.inner.table.value_at(s))
    }
}

impl<'a, K: Primitive, V: Primitive> ExactSizeIterator for Values<'a, K, V> {}
impl<'a, K: Primitive, V: Primitive> FusedIterator for Values<'a, K, V> {}

/// Flyweight iterator: one entry is reused and overwritten on every step.
///
/// This is a lending iterator, so the borrow checker rejects holding an
/// entry across a call to `next`; copy it out if it must outlive the step.
#[derive(Debug)]
pub struct FastIter<'a, K, V> {
    inner: Iter<'a, K, V>,
    entry: Entry<K, V>,
}

impl<'a, K: Primitive, V: Primitive> FastIter<'a, K, V> {
    pub(crate) fn new(table: &'a SlotTable<K, V>) -> Self {
        Self {
            inner: Iter::new(table),
            entry: Entry::new(K::ZERO, V::ZERO),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&Entry<K, V>> {
        let s = self.inner.next_slot()?;
        self.entry.key = self.inner.table.key_at(s);
        self.entry.value = self.inner.table.value_at(s);
        Some(&self.entry)
    }

    pub fn next_back(&mut self) -> Option<&Entry<K, V>> {
        let s = self.inner.next_back_slot()?;
        self.entry.key = self.inner.table.key_at(s);
        self.entry.value = self.inner.table.value_at(s);
        Some(&self.entry)
    }

    pub fn len(&self) -> usize {
        self.inner.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.inner.remaining == 0
    }
}
