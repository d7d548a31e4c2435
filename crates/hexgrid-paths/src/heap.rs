//! Indexed binary min-heap with in-place key decrease.
//!
//! The heap stores item ids (indices into a caller-owned slice). Each item
//! records its own slot in the heap through [`HeapItem`], so membership tests
//! are O(1) and [`IndexedHeap::decrease_key`] is O(log n) with no scan.

/// Capability needed to live in an [`IndexedHeap`]: a comparable key and a
/// settable position slot.
pub trait HeapItem {
    type Key: Ord;

    /// Current sort key. Smaller keys are popped first.
    fn heap_key(&self) -> Self::Key;

    /// Slot last assigned by the heap, or `None` if not queued.
    fn heap_index(&self) -> Option<usize>;

    /// Called by the heap whenever the item moves.
    fn set_heap_index(&mut self, idx: Option<usize>);
}

/// A binary min-heap over ids into an external `[T]` arena.
///
/// Every method that touches ordering takes the arena, since keys live in
/// the items themselves. An id must be pushed at most once until popped.
#[derive(Debug, Default, Clone)]
pub struct IndexedHeap {
    slots: Vec<usize>,
}

impl IndexedHeap {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Create an empty heap with room for `n` ids.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            slots: Vec::with_capacity(n),
        }
    }

    /// Number of queued ids.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the heap is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The id with the smallest key, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<usize> {
        self.slots.first().copied()
    }

    /// Remove every id, clearing their stored positions.
    pub fn clear<T: HeapItem>(&mut self, items: &mut [T]) {
        for &id in &self.slots {
            items[id].set_heap_index(None);
        }
        self.slots.clear();
    }

    /// Whether `id` is currently queued.
    #[inline]
    pub fn contains<T: HeapItem>(&self, items: &[T], id: usize) -> bool {
        matches!(items[id].heap_index(), Some(i) if self.slots.get(i) == Some(&id))
    }

    /// Queue `id`.
    pub fn push<T: HeapItem>(&mut self, items: &mut [T], id: usize) {
        debug_assert!(!self.contains(items, id), "id {id} pushed twice");
        let i = self.slots.len();
        self.slots.push(id);
        items[id].set_heap_index(Some(i));
        self.sift_up(items, i);
    }

    /// Remove and return the id with the smallest key.
    pub fn pop<T: HeapItem>(&mut self, items: &mut [T]) -> Option<usize> {
        let last = self.slots.len().checked_sub(1)?;
        self.slots.swap(0, last);
        let id = self.slots.pop()?;
        items[id].set_heap_index(None);
        if let Some(&root) = self.slots.first() {
            items[root].set_heap_index(Some(0));
            self.sift_down(items, 0);
        }
        Some(id)
    }

    /// Restore ordering after `id`'s key has decreased.
    ///
    /// Returns `false` if `id` is not queued.
    pub fn decrease_key<T: HeapItem>(&mut self, items: &mut [T], id: usize) -> bool {
        if !self.contains(items, id) {
            return false;
        }
        if let Some(i) = items[id].heap_index() {
            self.sift_up(items, i);
        }
        true
    }

    fn sift_up<T: HeapItem>(&mut self, items: &mut [T], mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if items[self.slots[i]].heap_key() >= items[self.slots[parent]].heap_key() {
                break;
            }
            self.swap(items, i, parent);
            i = parent;
        }
    }

    fn sift_down<T: HeapItem>(&mut self, items: &mut [T], mut i: usize) {
        let len = self.slots.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < len && items[self.slots[right]].heap_key() < items[self.slots[left]].heap_key() {
                child = right;
            }
            if items[self.slots[child]].heap_key() >= items[self.slots[i]].heap_key() {
                break;
            }
            self.swap(items, i, child);
            i = child;
        }
    }

    #[inline]
    fn swap<T: HeapItem>(&mut self, items: &mut [T], a: usize, b: usize) {
        self.slots.swap(a, b);
        items[self.slots[a]].set_heap_index(Some(a));
        items[self.slots[b]].set_heap_index(Some(b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    #[derive(Debug, Clone, Default)]
    struct Item {
        f: i32,
        h: i32,
        pos: Option<usize>,
    }

    impl Item {
        fn new(f: i32, h: i32) -> Self {
            Self { f, h, pos: None }
        }
    }

    impl HeapItem for Item {
        type Key = (i32, i32);

        fn heap_key(&self) -> (i32, i32) {
            (self.f, self.h)
        }

        fn heap_index(&self) -> Option<usize> {
            self.pos
        }

        fn set_heap_index(&mut self, idx: Option<usize>) {
            self.pos = idx;
        }
    }

    fn assert_heap(heap: &IndexedHeap, items: &[Item]) {
        for (i, &id) in heap.slots.iter().enumerate() {
            assert_eq!(items[id].pos, Some(i), "stale position for id {id}");
            if i > 0 {
                let parent = heap.slots[(i - 1) / 2];
                assert!(items[parent].heap_key() <= items[id].heap_key());
            }
        }
    }

    #[test]
    fn pops_in_key_order() {
        let mut items: Vec<Item> = [5, 3, 9, 1, 7].iter().map(|&f| Item::new(f, 0)).collect();
        let mut heap = IndexedHeap::new();
        for id in 0..items.len() {
            heap.push(&mut items, id);
        }
        let mut order = Vec::new();
        while let Some(id) = heap.pop(&mut items) {
            order.push(items[id].f);
        }
        assert_eq!(order, vec![1, 3, 5, 7, 9]);
        assert!(items.iter().all(|it| it.pos.is_none()));
    }

    #[test]
    fn ties_broken_by_lower_h() {
        let mut items = vec![Item::new(10, 8), Item::new(10, 2), Item::new(10, 5)];
        let mut heap = IndexedHeap::new();
        for id in 0..3 {
            heap.push(&mut items, id);
        }
        assert_eq!(heap.pop(&mut items), Some(1));
        assert_eq!(heap.pop(&mut items), Some(2));
        assert_eq!(heap.pop(&mut items), Some(0));
    }

    #[test]
    fn pop_empty_is_none() {
        let mut items: Vec<Item> = Vec::new();
        let mut heap = IndexedHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.pop(&mut items), None);
        assert_eq!(heap.peek(), None);
    }

    #[test]
    fn contains_tracks_membership() {
        let mut items = vec![Item::new(1, 0), Item::new(2, 0), Item::new(3, 0)];
        let mut heap = IndexedHeap::new();
        heap.push(&mut items, 0);
        heap.push(&mut items, 2);
        assert!(heap.contains(&items, 0));
        assert!(!heap.contains(&items, 1));
        assert!(heap.contains(&items, 2));

        assert_eq!(heap.pop(&mut items), Some(0));
        assert!(!heap.contains(&items, 0));

        // A leftover position from an unrelated heap must not count.
        items[1].pos = Some(0);
        assert!(!heap.contains(&items, 1));
    }

    #[test]
    fn decrease_key_moves_item_up() {
        let mut items: Vec<Item> = (0..8).map(|f| Item::new(10 + f, 0)).collect();
        let mut heap = IndexedHeap::new();
        for id in 0..items.len() {
            heap.push(&mut items, id);
        }
        items[7].f = 1;
        assert!(heap.decrease_key(&mut items, 7));
        assert_heap(&heap, &items);
        assert_eq!(heap.peek(), Some(7));

        let mut other = vec![Item::new(0, 0)];
        let mut empty = IndexedHeap::new();
        assert!(!empty.decrease_key(&mut other, 0));
    }

    #[test]
    fn clear_resets_positions() {
        let mut items = vec![Item::new(1, 0), Item::new(2, 0)];
        let mut heap = IndexedHeap::with_capacity(2);
        heap.push(&mut items, 0);
        heap.push(&mut items, 1);
        heap.clear(&mut items);
        assert!(heap.is_empty());
        assert!(items.iter().all(|it| it.pos.is_none()));
    }

    #[test]
    fn random_operations_keep_invariant() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let mut items: Vec<Item> = (0..200)
            .map(|_| Item::new(rng.random_range(0..1000), rng.random_range(0..50)))
            .collect();
        let mut heap = IndexedHeap::new();
        let mut queued = vec![false; items.len()];

        for _ in 0..2000 {
            let id = rng.random_range(0..items.len());
            match rng.random_range(0..3u32) {
                0 if !queued[id] => {
                    heap.push(&mut items, id);
                    queued[id] = true;
                }
                1 if queued[id] => {
                    items[id].f -= rng.random_range(0..100);
                    assert!(heap.decrease_key(&mut items, id));
                }
                _ => {
                    if let Some(min) = heap.pop(&mut items) {
                        let key = items[min].heap_key();
                        queued[min] = false;
                        for (other, &q) in queued.iter().enumerate() {
                            if q {
                                assert!(key <= items[other].heap_key());
                            }
                        }
                    }
                }
            }
            assert_heap(&heap, &items);
            for (id, &q) in queued.iter().enumerate() {
                assert_eq!(heap.contains(&items, id), q);
            }
        }
    }
}
