// Purpose - the boundary between generated signals and the audio device

#[cfg(feature = "rtrb")]
pub mod device;

use tracing::info;

use crate::dsp::signal::Signal;
use crate::error::PlaybackError;
use crate::SAMPLE_RATE;

#[cfg(feature = "rtrb")]
pub use device::CpalSink;

/// Destination for mono 16-bit frames at `SAMPLE_RATE`.
///
/// `write` may be called any number of times with one or more frames and
/// blocks until the frames are accepted. `close` finishes playback and
/// releases the device.
pub trait AudioSink {
    fn write(&mut self, frames: &[i16]) -> Result<(), PlaybackError>;

    fn close(self) -> Result<(), PlaybackError>
    where
        Self: Sized;
}

/// Settings for opening an output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Requested device rate in Hz
    pub sample_rate: u32,
    /// Frames handed to the sink per `write`
    pub frames_per_buffer: usize,
    /// Frames buffered between the writer and the device callback
    pub ring_capacity: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            frames_per_buffer: 256,
            ring_capacity: SAMPLE_RATE as usize / 4,
        }
    }
}

impl PlaybackConfig {
    pub fn with_frames_per_buffer(mut self, frames: usize) -> Self {
        self.frames_per_buffer = frames;
        self
    }

    pub fn with_ring_capacity(mut self, frames: usize) -> Self {
        self.ring_capacity = frames;
        self
    }
}

/// Write `signal` to `sink` in chunks of at most `frames_per_buffer` frames,
/// then close the sink.
///
/// The signal is only borrowed; a failing sink leaves it untouched. The
/// first error stops playback and drops the sink.
pub fn play<S: AudioSink>(
    mut sink: S,
    signal: &Signal,
    frames_per_buffer: usize,
) -> Result<(), PlaybackError> {
    let chunk = frames_per_buffer.max(1);
    info!(
        samples = signal.len(),
        seconds = signal.duration_secs(),
        chunk,
        "playback started"
    );

    for frames in signal.samples().chunks(chunk) {
        sink.write(frames)?;
    }
    sink.close()?;

    info!("playback finished");
    Ok(())
}
