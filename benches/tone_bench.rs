//! Benchmarks for tone generation and melody assembly.
//!
//! Run with: cargo bench
//!
//! Benchmark groups:
//!   - dsp/*        Single-tone generation per waveform
//!   - scenarios/*  Whole-melody assembly

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Tone lengths in seconds (0.5 s = 22050 samples).
pub const DURATIONS: &[f64] = &[0.01, 0.1, 0.5];

criterion_group!(
    benches,
    dsp::bench_oscillator,
    scenarios::bench_melody,
);
criterion_main!(benches);
