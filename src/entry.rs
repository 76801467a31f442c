//! Heap entries
//!
//! A [`HeapEntry`] is the `(priority, payload, sequence)` triple stored in a
//! [`MinHeap`](crate::min_heap::MinHeap). The sequence number never influences
//! the default ordering; it is a marker of submission order.

use crate::traits::Sequenced;

/// A prioritized payload tagged with its insertion sequence number
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeapEntry<T, P = i32> {
    priority: P,
    payload: T,
    sequence: u64,
}

impl<T, P> HeapEntry<T, P> {
    /// Creates a new entry
    pub fn new(priority: P, payload: T, sequence: u64) -> Self {
        Self {
            priority,
            payload,
            sequence,
        }
    }

    /// The ordering key
    pub fn priority(&self) -> &P {
        &self.priority
    }

    /// The owned payload
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Splits the entry into `(priority, payload, sequence)`
    pub fn into_parts(self) -> (P, T, u64) {
        (self.priority, self.payload, self.sequence)
    }
}

impl<T, P> Sequenced for HeapEntry<T, P> {
    fn sequence(&self) -> u64 {
        self.sequence
    }
}
