//! Benchmarks for assembling melodies of increasing length.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tonegen::{assemble, sequencing, Melody};

pub fn bench_melody(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/melody");

    // The program melody: four half-second tones
    let demo = sequencing::demo().expect("demo melody is valid");
    group.bench_function("demo", |b| b.iter(|| assemble(black_box(&demo))));

    // The demo repeated, to see how concatenation scales
    for repeats in [4usize, 16] {
        let melody: Melody = demo
            .notes()
            .iter()
            .copied()
            .cycle()
            .take(demo.len() * repeats)
            .collect();
        group.bench_with_input(
            BenchmarkId::new("repeated_demo", repeats),
            &melody,
            |b, m| b.iter(|| assemble(black_box(m))),
        );
    }

    group.finish();
}
