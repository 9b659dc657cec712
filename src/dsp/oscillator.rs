#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::dsp::signal::Signal;
use crate::error::ToneError;
use crate::{AMPLITUDE_SCALE, SAMPLE_RATE};

/*
Tone Oscillator
===============

A tone is a fixed number of samples of one periodic shape at one pitch.
Nothing carries over between tones: every tone starts at phase zero, and
each sample is a pure function of its index, so a tone can be regenerated
bit-for-bit at any time.

Vocabulary
----------

  index       0-based position of a sample inside the tone.

  phase       Angle of the sine at a given index, in radians:
                  phase = 2π · frequency · index / sample_rate

  period      Samples per cycle: sample_rate / frequency.
              At 440 Hz and 44.1 kHz that is ~100.23 samples.

  position    Fractional progress through the current cycle, 0.0 to 1.0:
                  position = fract(index / period)

  amplitude   Peak magnitude. Every shape is computed in -1.0..=1.0 and
              scaled by AMPLITUDE_SCALE, then rounded to the nearest i16.


The Shapes
----------

  Sine        round(sin(phase) · A)
              Starts at 0, smooth, fundamental only.

  Square      +A while sin(phase) > 0, otherwise -A.
              Never produces an intermediate value. Index 0 is -A
              because sin(0) is not > 0.

  Triangle    round((2 · |2·position - 1| - 1) · A)
              Starts at +A, falls to -A at mid-cycle, climbs back.

  Sawtooth    round((2·position - 1) · A)
              Ramps from -A up to +A, then snaps back.


Length
------

A tone of `d` seconds has floor(d · 44100) samples. 0.5 s is exactly
22050 samples, so two half-second tones fill exactly one second.
*/

/// Periodic shape used to generate a tone.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl Waveform {
    /// Every waveform kind, in declaration order.
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Sawtooth,
    ];

    /// Lowercase name used by `Display` and `FromStr`.
    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
        }
    }

    /// Sample value at `index` for a tone of `frequency` Hz.
    ///
    /// The result always lies within `-AMPLITUDE_SCALE..=AMPLITUDE_SCALE`.
    ///
    /// # Example
    /// ```
    /// use tonegen::{Waveform, AMPLITUDE_SCALE};
    /// assert_eq!(Waveform::Sine.sample(0, 440), 0);
    /// assert_eq!(Waveform::Sawtooth.sample(0, 440), -AMPLITUDE_SCALE);
    /// ```
    pub fn sample(self, index: usize, frequency: u32) -> i16 {
        let amplitude = f64::from(AMPLITUDE_SCALE);
        let value = match self {
            Waveform::Sine => phase(index, frequency).sin(),
            Waveform::Square => {
                if phase(index, frequency).sin() > 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => {
                let position = cycle_position(index, frequency);
                2.0 * (2.0 * position - 1.0).abs() - 1.0
            }
            Waveform::Sawtooth => {
                let position = cycle_position(index, frequency);
                2.0 * position - 1.0
            }
        };
        (value * amplitude).round() as i16
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Waveform::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown waveform '{s}'"))
    }
}

#[inline]
fn phase(index: usize, frequency: u32) -> f64 {
    TAU * f64::from(frequency) * index as f64 / f64::from(SAMPLE_RATE)
}

/// Fractional progress through the current cycle (0.0 to just under 1.0).
#[inline]
fn cycle_position(index: usize, frequency: u32) -> f64 {
    let period = f64::from(SAMPLE_RATE) / f64::from(frequency);
    let cycles = index as f64 / period;
    cycles - cycles.floor()
}

/// Number of samples in a tone of `duration_secs` seconds.
#[inline]
pub fn sample_count(duration_secs: f64) -> usize {
    (duration_secs * f64::from(SAMPLE_RATE)).floor() as usize
}

pub(crate) fn validate(frequency: u32, duration_secs: f64) -> Result<(), ToneError> {
    if frequency == 0 {
        return Err(ToneError::InvalidFrequency(frequency));
    }
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(ToneError::InvalidDuration(duration_secs));
    }
    Ok(())
}

/// Generate one tone as 16-bit PCM at `SAMPLE_RATE`.
///
/// Rejects a zero frequency and non-positive or non-finite durations. The
/// buffer is reserved fallibly, so an oversized request comes back as
/// [`ToneError::Allocation`] instead of aborting the process.
///
/// # Example
/// ```
/// use tonegen::{generate, Waveform};
/// let tone = generate(440, 0.5, Waveform::Sine).unwrap();
/// assert_eq!(tone.len(), 22_050);
/// ```
pub fn generate(
    frequency: u32,
    duration_secs: f64,
    waveform: Waveform,
) -> Result<Signal, ToneError> {
    validate(frequency, duration_secs)?;

    let len = sample_count(duration_secs);
    let mut samples = Vec::new();
    samples
        .try_reserve_exact(len)
        .map_err(|_| ToneError::Allocation { requested: len })?;
    samples.extend((0..len).map(|i| waveform.sample(i, frequency)));

    debug!(frequency, %waveform, samples = len, "generated tone");
    Ok(Signal::from(samples))
}
