//! Sample generation primitives.
//!
//! Everything here is pure: a waveform kind, a frequency and a duration go
//! in, an owned buffer of 16-bit PCM samples comes out.

/// Waveform kinds and the tone generator.
pub mod oscillator;
/// Owned PCM sample buffers.
pub mod signal;

pub use oscillator::{generate, sample_count, Waveform};
pub use signal::Signal;
