//! Common traits for sequenced heaps
//!
//! This module provides the seam between the triage layer and the heap that
//! orders its records:
//!
//! - [`SequencedHeap`]: a build-once, drain-once priority queue whose entries
//!   carry an insertion sequence number alongside their priority
//! - [`Sequenced`]: anything that remembers its insertion sequence number, used
//!   to restore submission order after a priority drain
//!
//! Unlike `std::collections::BinaryHeap`, which is a max-heap that yields one
//! element per `pop`, a [`SequencedHeap`] is a min-heap consumed in a single
//! [`drain_sorted`](SequencedHeap::drain_sorted) call.

use std::fmt;

use crate::entry::HeapEntry;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// Growing the backing store could not acquire memory
    AllocationFailure {
        /// Total number of slots the heap tried to reserve
        requested: usize,
    },
    /// The heap has already been drained and cannot be reused
    Drained,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::AllocationFailure { requested } => {
                write!(f, "unable to grow heap storage to {} entries", requested)
            }
            HeapError::Drained => {
                write!(f, "heap has already been drained (build once, drain once)")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Base trait for sequenced min-heaps
///
/// Entries are `(priority, payload, sequence)` triples. Only the priority takes
/// part in the heap ordering (unless the implementation documents otherwise);
/// the sequence is carried through so that callers can recover the order in
/// which entries were submitted.
///
/// # Lifecycle
///
/// A heap is created empty, mutated only through [`insert`](Self::insert), and
/// consumed exactly once through [`drain_sorted`](Self::drain_sorted). Any call
/// after the drain returns [`HeapError::Drained`].
///
/// # Example
///
/// ```rust
/// use triage_queue::SequencedHeap;
/// use triage_queue::min_heap::MinHeap;
///
/// let mut heap = MinHeap::new();
/// heap.insert(3, "three", 1).unwrap();
/// heap.insert(1, "one", 2).unwrap();
/// heap.insert(2, "two", 3).unwrap();
///
/// let drained = heap.drain_sorted().unwrap();
/// let priorities: Vec<i32> = drained.iter().map(|e| *e.priority()).collect();
/// assert_eq!(priorities, vec![1, 2, 3]);
/// assert!(heap.insert(4, "four", 4).is_err());
/// ```
pub trait SequencedHeap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap holds no entries
    fn is_empty(&self) -> bool;

    /// Returns the number of entries in the heap
    fn len(&self) -> usize;

    /// Inserts an entry with the given priority and insertion sequence number
    ///
    /// # Errors
    /// - [`HeapError::Drained`] if the heap has already been drained
    /// - [`HeapError::AllocationFailure`] if the backing store cannot grow
    ///
    /// # Time Complexity
    /// O(log n) amortized
    fn insert(&mut self, priority: P, payload: T, sequence: u64) -> Result<(), HeapError>;

    /// Removes every entry, returning them lowest priority first
    ///
    /// Draining an empty heap is not an error: it yields an empty vector.
    ///
    /// # Errors
    /// Returns [`HeapError::Drained`] if the heap was already drained.
    ///
    /// # Time Complexity
    /// O(n log n)
    fn drain_sorted(&mut self) -> Result<Vec<HeapEntry<T, P>>, HeapError>;
}

/// A value that remembers the position at which it was submitted
pub trait Sequenced {
    /// The insertion sequence number
    fn sequence(&self) -> u64;
}

impl<T: Sequenced + ?Sized> Sequenced for &T {
    fn sequence(&self) -> u64 {
        (**self).sequence()
    }
}
