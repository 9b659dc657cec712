//! Benchmarks for low-level generation.

mod oscillator;

pub use oscillator::bench_oscillator;
