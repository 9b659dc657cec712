#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::oscillator::{self, Waveform};
use crate::dsp::signal::Signal;
use crate::error::ToneError;

/// Convert a MIDI key number to frequency in Hz.
/// A4 = 440 Hz = key 69
#[inline]
fn midi_key_to_freq(key: u8) -> f64 {
    440.0 * 2.0_f64.powf((f64::from(key) - 69.0) / 12.0)
}

/// A single tone: pitch, length and shape.
///
/// Notes are validated on construction and immutable afterwards, so every
/// `Note` can be generated without further checks.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "NoteFields"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    frequency: u32,
    duration: f64,
    waveform: Waveform,
}

impl Note {
    /// Create a note of `frequency` Hz lasting `duration` seconds.
    pub fn new(frequency: u32, duration: f64, waveform: Waveform) -> Result<Self, ToneError> {
        oscillator::validate(frequency, duration)?;
        Ok(Self {
            frequency,
            duration,
            waveform,
        })
    }

    /// Create a note from a MIDI key number, rounded to the nearest whole Hz.
    ///
    /// # Example
    /// ```
    /// use tonegen::{Note, Waveform};
    /// let a4 = Note::from_midi(69, 0.5, Waveform::Sine).unwrap();
    /// assert_eq!(a4.frequency(), 440);
    /// ```
    pub fn from_midi(key: u8, duration: f64, waveform: Waveform) -> Result<Self, ToneError> {
        let frequency = midi_key_to_freq(key).round() as u32;
        Self::new(frequency, duration, waveform)
    }

    /// Frequency in Hz
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Number of samples this note generates.
    pub fn sample_count(&self) -> usize {
        oscillator::sample_count(self.duration)
    }

    /// Generate this note's samples.
    pub fn generate(&self) -> Result<Signal, ToneError> {
        oscillator::generate(self.frequency, self.duration, self.waveform)
    }
}

/// Unchecked wire form of a [`Note`]; deserialized notes go through
/// [`Note::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct NoteFields {
    frequency: u32,
    duration: f64,
    waveform: Waveform,
}

#[cfg(feature = "serde")]
impl TryFrom<NoteFields> for Note {
    type Error = ToneError;

    fn try_from(fields: NoteFields) -> Result<Self, Self::Error> {
        Note::new(fields.frequency, fields.duration, fields.waveform)
    }
}
