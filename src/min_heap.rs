//! Array-backed binary min-heap
//!
//! A binary min-heap stored implicitly in a vector, using 1-based index
//! arithmetic: the parent of slot `i` is `i / 2` and its children are `2i` and
//! `2i + 1`. Slot `i` lives at vector offset `i - 1`.
//!
//! The heap is built by repeated [`insert`](SequencedHeap::insert) calls and
//! consumed by a single [`drain_sorted`](SequencedHeap::drain_sorted), which
//! runs an in-place heap-sort over the backing store and hands the sorted
//! entries to the caller.
//!
//! # Time Complexity
//!
//! | Operation      | Complexity          |
//! |----------------|---------------------|
//! | `insert`       | O(log n) amortized  |
//! | `peek`         | O(1)                |
//! | `drain_sorted` | O(n log n)          |
//!
//! # Example
//!
//! ```rust
//! use triage_queue::SequencedHeap;
//! use triage_queue::min_heap::MinHeap;
//!
//! let mut heap = MinHeap::new();
//! heap.insert(3, "three", 1).unwrap();
//! heap.insert(1, "one", 2).unwrap();
//! heap.insert(2, "two", 3).unwrap();
//!
//! assert_eq!(heap.peek().map(|e| *e.payload()), Some("one"));
//!
//! let sequences: Vec<u64> = heap
//!     .drain_sorted()
//!     .unwrap()
//!     .iter()
//!     .map(|e| triage_queue::Sequenced::sequence(e))
//!     .collect();
//! assert_eq!(sequences, vec![2, 3, 1]);
//! ```

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::entry::HeapEntry;
use crate::traits::{HeapError, Sequenced, SequencedHeap};

/// Smallest logical capacity the backing store grows to
pub const INITIAL_CAPACITY: usize = 4;

/// How entries with equal priority are ordered relative to each other
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TieBreak {
    /// Compare by priority only; equal priorities end up in whatever order the
    /// heap structure leaves them
    #[default]
    Structural,
    /// Compare by `(priority, sequence)`; equal priorities drain in insertion
    /// order
    Sequence,
}

/// A binary min-heap of sequenced entries
///
/// Ordering uses the entry priority, refined by the sequence number when the
/// heap was built with [`TieBreak::Sequence`].
///
/// The logical capacity starts at zero and doubles (to at least
/// [`INITIAL_CAPACITY`]) whenever `len + 1` reaches it. It never shrinks.
#[derive(Debug)]
pub struct MinHeap<T, P: Ord = i32> {
    /// Entries in level order; slot `i` (1-based) is at offset `i - 1`
    data: Vec<HeapEntry<T, P>>,
    capacity: usize,
    tie_break: TieBreak,
    drained: bool,
}

impl<T, P: Ord> SequencedHeap<T, P> for MinHeap<T, P> {
    fn new() -> Self {
        Self::with_tie_break(TieBreak::default())
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn insert(&mut self, priority: P, payload: T, sequence: u64) -> Result<(), HeapError> {
        if self.drained {
            return Err(HeapError::Drained);
        }

        self.reserve_slot()?;
        self.data.push(HeapEntry::new(priority, payload, sequence));
        self.sift_up(self.data.len());

        trace!(len = self.data.len(), sequence, "inserted heap entry");
        Ok(())
    }

    fn drain_sorted(&mut self) -> Result<Vec<HeapEntry<T, P>>, HeapError> {
        if self.drained {
            return Err(HeapError::Drained);
        }
        self.drained = true;

        // Move the current minimum behind the live region until one slot is left.
        // Afterwards slot 1 holds the largest key and slot `len` the smallest.
        let mut end = self.data.len();
        while end > 1 {
            self.data.swap(0, end - 1);
            end -= 1;
            if end > 1 {
                self.sift_down(end);
            }
        }

        let mut sorted = std::mem::take(&mut self.data);
        sorted.reverse();

        debug!(entries = sorted.len(), tie_break = ?self.tie_break, "drained heap");
        Ok(sorted)
    }
}

impl<T, P: Ord> MinHeap<T, P> {
    /// Creates an empty heap with the given tie-break policy
    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self {
            data: Vec::new(),
            capacity: 0,
            tie_break,
            drained: false,
        }
    }

    /// The tie-break policy this heap was built with
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Logical capacity of the backing store
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true once [`drain_sorted`](SequencedHeap::drain_sorted) has run
    pub fn is_drained(&self) -> bool {
        self.drained
    }

    /// Returns the entry with the minimum key without removing it
    pub fn peek(&self) -> Option<&HeapEntry<T, P>> {
        self.data.first()
    }

    /// The live entries in level order (root first)
    pub fn as_slice(&self) -> &[HeapEntry<T, P>] {
        &self.data
    }

    /// Grow the logical capacity so that one more entry fits
    fn reserve_slot(&mut self) -> Result<(), HeapError> {
        let len = self.data.len();
        if len + 1 < self.capacity {
            return Ok(());
        }

        let grown = self
            .capacity
            .checked_mul(2)
            .ok_or(HeapError::AllocationFailure {
                requested: usize::MAX,
            })?
            .max(INITIAL_CAPACITY);

        self.data
            .try_reserve_exact(grown - len)
            .map_err(|_| HeapError::AllocationFailure { requested: grown })?;

        debug!(from = self.capacity, to = grown, "grew heap storage");
        self.capacity = grown;
        Ok(())
    }

    /// Compare the keys at two 1-based slots
    fn compare(&self, a: usize, b: usize) -> Ordering {
        let (a, b) = (&self.data[a - 1], &self.data[b - 1]);
        let by_priority = a.priority().cmp(b.priority());
        match self.tie_break {
            TieBreak::Structural => by_priority,
            TieBreak::Sequence => by_priority.then_with(|| a.sequence().cmp(&b.sequence())),
        }
    }

    /// Move the entry at 1-based `index` up until its parent is not larger
    fn sift_up(&mut self, mut index: usize) {
        while index > 1 {
            let parent = index / 2;
            if self.compare(index, parent) == Ordering::Less {
                self.data.swap(index - 1, parent - 1);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move the root down within slots `1..=end`
    ///
    /// The left child is preferred unless the right one is strictly smaller.
    fn sift_down(&mut self, end: usize) {
        let mut index = 1;
        while 2 * index <= end {
            let mut child = 2 * index;
            if child < end && self.compare(child + 1, child) == Ordering::Less {
                child += 1;
            }
            if self.compare(child, index) != Ordering::Less {
                break;
            }
            self.data.swap(index - 1, child - 1);
            index = child;
        }
    }
}

impl<T, P: Ord> Default for MinHeap<T, P> {
    fn default() -> Self {
        <Self as SequencedHeap<T, P>>::new()
    }
}
