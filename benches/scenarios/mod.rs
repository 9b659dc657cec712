//! Scenario benchmarks built from whole melodies.

mod melody;

pub use melody::bench_melody;
