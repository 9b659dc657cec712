//! Benchmarks for per-waveform tone generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use tonegen::{generate, Waveform};

use crate::DURATIONS;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &duration in DURATIONS {
        // Sine and square both call sin(); triangle and sawtooth use floor()
        for waveform in Waveform::ALL {
            group.bench_with_input(
                BenchmarkId::new(waveform.name(), duration),
                &duration,
                |b, &d| b.iter(|| generate(black_box(440), black_box(d), waveform)),
            );
        }
    }

    group.finish();
}
