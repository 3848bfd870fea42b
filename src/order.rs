//! OrderIndex: a doubly linked list over slot indices, stored in the table.

/// Marker for "no neighbor".
pub(crate) const NIL: u32 = u32::MAX;

/// Per-slot neighbors in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Link {
    pub prev: u32,
    pub next: u32,
}

impl Link {
    pub const UNLINKED: Link = Link {
        prev: NIL,
        next: NIL,
    };
}

impl Default for Link {
    fn default() -> Self {
        Link::UNLINKED
    }
}

#[inline]
pub(crate) fn slot(raw: u32) -> Option<usize> {
    if raw == NIL {
        None
    } else {
        Some(raw as usize)
    }
}

/// Head and tail of the list threaded through `links`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OrderIndex {
    pub head: u32,
    pub tail: u32,
}

impl OrderIndex {
    pub const fn new() -> Self {
        OrderIndex {
            head: NIL,
            tail: NIL,
        }
    }

    pub fn head(&self) -> Option<usize> {
        slot(self.head)
    }

    pub fn tail(&self) -> Option<usize> {
        slot(self.tail)
    }

    /// Links `pos` after the current tail. `pos` must not already be linked.
    pub fn append(&mut self, links: &mut [Link], pos: usize) {
        let raw = pos as u32;
        debug_assert!(raw != NIL);
        links[pos] = Link {
            prev: self.tail,
            next: NIL,
        };
        match slot(self.tail) {
            Some(t) => links[t].next = raw,
            None => self.head = raw,
        }
        self.tail = raw;
    }
}

impl Default for OrderIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Slots in forward order starting at `from`.
pub(crate) fn walk_forward(
    links: &[Link],
    from: Option<usize>,
) -> impl Iterator<Item = usize> + '_ {
    core::iter::successors(from, move |&s| slot(links[s].next))
}

/// Slots in backward order starting at `from`.
#[cfg(test)]
pub(crate) fn walk_backward(
    links: &[Link],
    from: Option<usize>,
) -> impl Iterator<Item = usize> + '_ {
    core::iter::successors(from, move |&s| slot(links[s].prev))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: after appends, head.prev and tail.next are NIL and the
    /// forward walk equals append order.
    #[test]
    fn append_threads_in_order() {
        let mut links = vec![Link::UNLINKED; 8];
        let mut order = OrderIndex::new();
        for &p in &[5usize, 1, 7, 0] {
            order.append(&mut links, p);
        }
        assert_eq!(order.head(), Some(5));
        assert_eq!(order.tail(), Some(0));
        assert_eq!(links[5].prev, NIL);
        assert_eq!(links[0].next, NIL);

        let fwd: Vec<_> = walk_forward(&links, order.head()).collect();
        assert_eq!(fwd, vec![5, 1, 7, 0]);
        let back: Vec<_> = walk_backward(&links, order.tail()).collect();
        assert_eq!(back, vec![0, 7, 1, 5]);
    }

    #[test]
    fn empty_index_has_no_ends() {
        let order = OrderIndex::default();
        assert_eq!(order.head(), None);
        assert_eq!(order.tail(), None);
        let links: Vec<Link> = Vec::new();
        assert_eq!(walk_forward(&links, order.head()).count(), 0);
    }

    #[test]
    fn single_append_is_head_and_tail() {
        let mut links = vec![Link::UNLINKED; 2];
        let mut order = OrderIndex::new();
        order.append(&mut links, 1);
        assert_eq!(order.head(), Some(1));
        assert_eq!(order.tail(), Some(1));
        assert_eq!(links[1], Link::UNLINKED);
    }
}
