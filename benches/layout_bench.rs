// benches/layout_bench.rs

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use ptrchase::kernel::traverse;
use ptrchase::node::IndexNode;
use ptrchase::sequence::{ArraySeq, BlockList, HeapList, StackList};

const SIZES: [usize; 3] = [1_000, 100_000, 1_000_000];

// Traversal only; sequences are built once outside the measured closure
fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("Traversal");

    for n in SIZES {
        let array = ArraySeq::build(n).unwrap();
        group.bench_with_input(BenchmarkId::new("array", n), &array, |b, seq| {
            b.iter(|| traverse(black_box(seq)))
        });

        let list = HeapList::build(n).unwrap();
        group.bench_with_input(BenchmarkId::new("list", n), &list, |b, seq| {
            b.iter(|| traverse(black_box(seq)))
        });

        let block = BlockList::build(n).unwrap();
        group.bench_with_input(BenchmarkId::new("list_block", n), &block, |b, seq| {
            b.iter(|| traverse(black_box(seq)))
        });

        // Heap-backed here; criterion's threads keep the default stack size
        let mut storage = vec![IndexNode::VACANT; n];
        let stack = StackList::build(&mut storage, n).unwrap();
        group.bench_with_input(BenchmarkId::new("list_stack", n), &stack, |b, seq| {
            b.iter(|| traverse(black_box(seq)))
        });
    }

    group.finish();
}

// Construction cost, which the binary keeps outside the ROI
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Build");
    let n = 100_000;

    group.bench_function("list", |b| b.iter(|| HeapList::build(black_box(n)).unwrap()));
    group.bench_function("list_block", |b| {
        b.iter(|| BlockList::build(black_box(n)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_traversal, bench_build);
criterion_main!(benches);
