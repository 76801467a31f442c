//! Insert + drain + re-sort benchmarks
//!
//! Measures the full two-pass pipeline (build the heap, heap-sort drain,
//! restore submission order) for growing batch sizes, and the re-sort alone
//! so its quadratic cost is visible next to the heap work.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench drain_perf
//!
//! # Only the re-sort
//! cargo bench --bench drain_perf -- 'resort/'
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use triage_queue::min_heap::{MinHeap, TieBreak};
use triage_queue::sort::sort_by_sequence;
use triage_queue::{HeapEntry, SequencedHeap};

const SIZES: [usize; 4] = [16, 128, 1024, 4096];

fn priorities(count: usize) -> Vec<i32> {
    let mut state: u32 = 0x2545_f491;
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state % 5 + 1) as i32
        })
        .collect()
}

fn build_and_drain(priorities: &[i32], tie_break: TieBreak) -> Vec<HeapEntry<usize, i32>> {
    let mut heap = MinHeap::with_tie_break(tie_break);
    for (i, p) in priorities.iter().enumerate() {
        heap.insert(*p, i, i as u64).unwrap();
    }
    heap.drain_sorted().unwrap()
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for size in SIZES {
        let input = priorities(size);

        group.bench_with_input(BenchmarkId::new("structural", size), &input, |b, input| {
            b.iter(|| {
                let mut drained = build_and_drain(input, TieBreak::Structural);
                sort_by_sequence(&mut drained);
                black_box(drained)
            })
        });

        group.bench_with_input(BenchmarkId::new("sequence", size), &input, |b, input| {
            b.iter(|| {
                let mut drained = build_and_drain(input, TieBreak::Sequence);
                sort_by_sequence(&mut drained);
                black_box(drained)
            })
        });
    }

    group.finish();
}

fn benchmark_resort(c: &mut Criterion) {
    let mut group = c.benchmark_group("resort");

    for size in SIZES {
        let drained = build_and_drain(&priorities(size), TieBreak::Structural);

        group.bench_with_input(BenchmarkId::new("insertion", size), &drained, |b, drained| {
            b.iter(|| {
                let mut rows = drained.clone();
                sort_by_sequence(&mut rows);
                black_box(rows)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_pipeline, benchmark_resort);
criterion_main!(benches);
