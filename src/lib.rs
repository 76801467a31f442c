//! Sequenced Priority Queue for Rust
//!
//! This crate provides an array-backed binary min-heap whose entries carry an
//! insertion sequence number, together with a stable re-sort that recovers
//! submission order after a priority drain. An emergency-room triage
//! simulation is built on top of it.
//!
//! # Features
//!
//! - **MinHeap**: O(log n) insert with geometric growth; O(n log n) in-place heap-sort drain
//! - **Stable re-sort**: insertion sort by key, restoring submission order from served order
//! - **Triage**: patient records, a simulation that serves by urgency, and a report in admission order
//! - **Session**: the interactive intake menu, driven by any reader/writer pair
//! - **CLI**: argument parsing and the batch/interactive entry point of the `triage` binary
//!
//! # Example
//!
//! ```rust
//! use triage_queue::min_heap::MinHeap;
//! use triage_queue::sort::sort_by_sequence;
//! use triage_queue::SequencedHeap;
//!
//! let mut heap = MinHeap::new();
//! heap.insert(3, "first", 1).unwrap();
//! heap.insert(1, "second", 2).unwrap();
//! heap.insert(2, "third", 3).unwrap();
//!
//! let mut served = heap.drain_sorted().unwrap();
//! assert_eq!(served[0].payload(), &"second");
//!
//! sort_by_sequence(&mut served);
//! let payloads: Vec<&str> = served.iter().map(|e| *e.payload()).collect();
//! assert_eq!(payloads, vec!["first", "second", "third"]);
//! ```

pub mod cli;
pub mod entry;
pub mod min_heap;
pub mod session;
pub mod sort;
pub mod traits;
pub mod triage;

// Re-export the main traits for convenience
pub use entry::HeapEntry;
pub use traits::{HeapError, Sequenced, SequencedHeap};
