//! Priority queue with update-in-place semantics.
//!
//! Entries live in a binary heap keyed by `(priority, insertion_order)`,
//! with a side index from element to heap slot. Priorities default to
//! `f32`; any [`Priority`] type works, so callers summing integer costs
//! can keep them exact. Pushing an element that is
//! already queued moves it to its new priority instead of adding a second
//! entry, which is the decrease-key operation Dijkstra needs. Among equal
//! priorities, elements pushed earlier come out first (FIFO).

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Which end of the priority range pops first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Order {
    /// Lowest priority value first.
    #[default]
    Ascending,
    /// Highest priority value first.
    Descending,
}

/// End of the queue to [`peek`](PriorityQueue::peek) at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PeekPosition {
    /// The element [`pop`](PriorityQueue::pop) would return next.
    Head,
    /// The element that would be popped last.
    Tail,
}

/// A value the queue can order by.
///
/// Floats are ordered with `total_cmp`, so NaN never breaks the heap.
pub trait Priority: Copy + fmt::Debug {
    fn total_order(&self, other: &Self) -> Ordering;
}

macro_rules! float_priority {
    ($($t:ty),*) => {$(
        impl Priority for $t {
            #[inline]
            fn total_order(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }
        }
    )*};
}

macro_rules! int_priority {
    ($($t:ty),*) => {$(
        impl Priority for $t {
            #[inline]
            fn total_order(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }
        }
    )*};
}

float_priority!(f32, f64);
int_priority!(u32, u64, usize, i32, i64);

#[derive(Debug, Clone)]
struct Entry<T, P> {
    element: T,
    priority: P,
    /// Insertion counter; breaks ties.
    seq: u64,
}

fn compare<T, P: Priority>(order: Order, a: &Entry<T, P>, b: &Entry<T, P>) -> Ordering {
    let by_priority = match order {
        Order::Ascending => a.priority.total_order(&b.priority),
        Order::Descending => b.priority.total_order(&a.priority),
    };
    by_priority.then(a.seq.cmp(&b.seq))
}

#[inline]
fn precedes<T, P: Priority>(order: Order, a: &Entry<T, P>, b: &Entry<T, P>) -> bool {
    compare(order, a, b) == Ordering::Less
}

/// A priority queue of unique elements.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T, P = f32> {
    heap: Vec<Entry<T, P>>,
    index: HashMap<T, usize>,
    order: Order,
    seq: u64,
}

impl<T: Eq + Hash + Clone, P: Priority> PriorityQueue<T, P> {
    /// Create an empty queue with the given ordering.
    pub fn new(order: Order) -> Self {
        Self {
            heap: Vec::new(),
            index: HashMap::new(),
            order,
            seq: 0,
        }
    }

    /// Current ordering mode.
    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    /// Change the ordering mode and re-establish the heap under it.
    pub fn set_order(&mut self, order: Order) {
        if self.order == order {
            return;
        }
        self.order = order;
        for i in (0..self.heap.len() / 2).rev() {
            self.sift_down(i);
        }
    }

    /// Insert `element`, or move it to `priority` if it is already queued.
    pub fn push(&mut self, element: T, priority: P) {
        if let Some(&i) = self.index.get(&element) {
            self.heap[i].priority = priority;
            let i = self.sift_up(i);
            self.sift_down(i);
            return;
        }
        let seq = self.seq;
        self.seq += 1;
        let i = self.heap.len();
        self.index.insert(element.clone(), i);
        self.heap.push(Entry {
            element,
            priority,
            seq,
        });
        self.sift_up(i);
    }

    /// Remove and return the head element.
    pub fn pop(&mut self) -> Option<T> {
        self.pop_with_priority().map(|(element, _)| element)
    }

    /// Remove and return the head element together with its priority.
    pub fn pop_with_priority(&mut self) -> Option<(T, P)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.index.remove(&entry.element);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((entry.element, entry.priority))
    }

    /// Look at either end of the queue without removing anything.
    ///
    /// `Head` is O(1); `Tail` scans every entry.
    pub fn peek(&self, position: PeekPosition) -> Option<(&T, P)> {
        let entry = match position {
            PeekPosition::Head => self.heap.first(),
            PeekPosition::Tail => self.heap.iter().reduce(|last, e| {
                if precedes(self.order, last, e) { e } else { last }
            }),
        }?;
        Some((&entry.element, entry.priority))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
        self.seq = 0;
    }

    #[inline]
    pub fn contains(&self, element: &T) -> bool {
        self.index.contains_key(element)
    }

    /// Priority of `element`, if queued.
    pub fn find(&self, element: &T) -> Option<P> {
        self.index.get(element).map(|&i| self.heap[i].priority)
    }

    /// Zero-based rank of `element` in pop order, if queued.
    pub fn position(&self, element: &T) -> Option<usize> {
        let target = &self.heap[*self.index.get(element)?];
        Some(
            self.heap
                .iter()
                .filter(|&e| precedes(self.order, e, target))
                .count(),
        )
    }

    /// All elements, in pop order.
    pub fn keys(&self) -> Vec<T> {
        self.sorted().into_iter().map(|e| e.element.clone()).collect()
    }

    /// All priorities, in pop order.
    pub fn priorities(&self) -> Vec<P> {
        self.sorted().into_iter().map(|e| e.priority).collect()
    }

    /// Iterate over `(element, priority)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, P)> + '_ {
        self.heap.iter().map(|e| (&e.element, e.priority))
    }

    fn sorted(&self) -> Vec<&Entry<T, P>> {
        let mut entries: Vec<&Entry<T, P>> = self.heap.iter().collect();
        entries.sort_by(|a, b| compare(self.order, *a, *b));
        entries
    }

    // -----------------------------------------------------------------------
    // Heap maintenance
    // -----------------------------------------------------------------------

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        for i in [a, b] {
            if let Some(slot) = self.index.get_mut(&self.heap[i].element) {
                *slot = i;
            }
        }
    }

    /// Move the entry at `i` towards the root. Returns its final slot.
    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !precedes(self.order, &self.heap[i], &self.heap[parent]) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut best = i;
            if left < n && precedes(self.order, &self.heap[left], &self.heap[best]) {
                best = left;
            }
            if right < n && precedes(self.order, &self.heap[right], &self.heap[best]) {
                best = right;
            }
            if best == i {
                break;
            }
            self.swap(i, best);
            i = best;
        }
    }
}

impl<T: Eq + Hash + Clone, P: Priority> Default for PriorityQueue<T, P> {
    fn default() -> Self {
        Self::new(Order::Ascending)
    }
}

impl<T, P> fmt::Display for PriorityQueue<T, P>
where
    T: Eq + Hash + Clone + fmt::Display,
    P: Priority + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "priority queue ({:?}, {} entries):", self.order, self.len())?;
        for e in self.sorted() {
            writeln!(f, "  {}: {}", e.element, e.priority)?;
        }
        Ok(())
    }
}
