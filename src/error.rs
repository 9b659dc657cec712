//! Error types for tone generation and playback.

use thiserror::Error;

/// Errors raised while building notes or generating and assembling signals.
#[derive(Error, Debug)]
pub enum ToneError {
    /// Frequencies are whole Hz and must be above zero.
    #[error("invalid frequency: {0} Hz (must be > 0)")]
    InvalidFrequency(u32),

    /// Durations must be finite and above zero.
    #[error("invalid duration: {0} s (must be finite and > 0)")]
    InvalidDuration(f64),

    /// The sample buffer could not be reserved.
    #[error("allocation failure: could not reserve {requested} samples")]
    Allocation { requested: usize },

    /// The playback device failed.
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

/// Errors raised by the playback device.
///
/// Every variant is terminal for the playback attempt. Already generated
/// signals are only ever borrowed by playback and stay intact.
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("playback: no default output device available")]
    NoOutputDevice,

    #[error("playback: failed to list output configs: {0}")]
    SupportedConfigs(#[from] cpal::SupportedStreamConfigsError),

    /// No supported output config covers the requested rate.
    #[error("playback: no output config supports {0} Hz")]
    NoMatchingConfig(u32),

    #[error("playback: unsupported sample format: {0}")]
    UnsupportedSampleFormat(String),

    #[error("playback: failed to open output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("playback: failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("playback: failed to stop output stream: {0}")]
    PauseStream(#[from] cpal::PauseStreamError),

    /// Reported asynchronously by the device while the stream was running.
    #[error("playback: stream error: {0}")]
    Stream(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            ToneError::InvalidFrequency(0).to_string(),
            "invalid frequency: 0 Hz (must be > 0)"
        );
        assert_eq!(
            ToneError::Allocation { requested: 42 }.to_string(),
            "allocation failure: could not reserve 42 samples"
        );
    }

    #[test]
    fn playback_errors_convert_transparently() {
        let err: ToneError = PlaybackError::NoOutputDevice.into();
        assert!(matches!(err, ToneError::Playback(PlaybackError::NoOutputDevice)));
        assert_eq!(
            err.to_string(),
            "playback: no default output device available"
        );
    }

    #[test]
    fn unmatched_rate_names_the_rate() {
        assert_eq!(
            PlaybackError::NoMatchingConfig(44_100).to_string(),
            "playback: no output config supports 44100 Hz"
        );
    }
}
