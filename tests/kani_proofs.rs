//! Kani verification proofs for the sequenced min-heap
//!
//! Kani is AWS's model checker for Rust. It can verify properties of Rust code
//! by checking all possible executions up to certain bounds.
//!
//! To run these proofs:
//!   cargo kani

#[cfg(kani)]
use triage_queue::min_heap::{MinHeap, TieBreak};
#[cfg(kani)]
use triage_queue::{HeapError, Sequenced, SequencedHeap};

/// Proof that insert always increments the length by exactly one
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(10)]
fn verify_insert_increments_len() {
    let mut heap: MinHeap<u8, u8> = MinHeap::new();

    for seq in 0..4u64 {
        let before = heap.len();
        heap.insert(kani::any(), kani::any(), seq).unwrap();
        assert!(heap.len() == before + 1);
    }
}

/// Proof: every parent is no larger than its children after arbitrary inserts
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(10)]
fn verify_heap_property_after_inserts() {
    let mut heap: MinHeap<(), u8> = MinHeap::new();

    for seq in 0..5u64 {
        heap.insert(kani::any(), (), seq).unwrap();
    }

    let slots = heap.as_slice();
    for child in 2..=slots.len() {
        assert!(slots[child / 2 - 1].priority() <= slots[child - 1].priority());
    }
}

/// Proof: the drain is sorted and loses nothing
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(10)]
fn verify_drain_sorted() {
    let mut heap: MinHeap<(), u8> = MinHeap::new();
    let mut total: u32 = 0;

    for seq in 0..4u64 {
        let p: u8 = kani::any();
        total += p as u32;
        heap.insert(p, (), seq).unwrap();
    }

    let drained = heap.drain_sorted().unwrap();
    assert!(drained.len() == 4);

    let mut sum: u32 = 0;
    for i in 0..drained.len() {
        sum += *drained[i].priority() as u32;
        if i > 0 {
            assert!(drained[i - 1].priority() <= drained[i].priority());
        }
    }
    assert!(sum == total);
}

/// Proof: with the sequence tie-break, equal priorities keep insertion order
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(10)]
fn verify_sequence_tie_break_is_fifo() {
    let mut heap: MinHeap<(), u8> = MinHeap::with_tie_break(TieBreak::Sequence);

    for seq in 0..4u64 {
        let p: u8 = kani::any();
        kani::assume(p < 2);
        heap.insert(p, (), seq).unwrap();
    }

    let drained = heap.drain_sorted().unwrap();
    for i in 1..drained.len() {
        if drained[i - 1].priority() == drained[i].priority() {
            assert!(drained[i - 1].sequence() < drained[i].sequence());
        }
    }
}

/// Proof: a drained heap rejects further inserts
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(4)]
fn verify_reuse_after_drain_rejected() {
    let mut heap: MinHeap<u8, u8> = MinHeap::new();
    heap.insert(kani::any(), kani::any(), 0).unwrap();
    assert!(heap.drain_sorted().is_ok());

    assert!(heap.insert(kani::any(), kani::any(), 1) == Err(HeapError::Drained));
}
