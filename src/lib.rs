pub mod dsp; // Waveform synthesis and owned sample buffers
pub mod error;
pub mod io; // Playback seam and the default-device sink
pub mod sequencing; // Notes, melodies and assembly

pub use dsp::{generate, Signal, Waveform};
pub use error::{PlaybackError, ToneError};
pub use sequencing::{assemble, Melody, Note};

/// PCM samples per second for every generated signal.
pub const SAMPLE_RATE: u32 = 44_100;

/// Peak magnitude of generated samples, well under `i16::MAX` to avoid clipping.
pub const AMPLITUDE_SCALE: i16 = 3_000;
