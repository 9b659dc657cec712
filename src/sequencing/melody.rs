#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::note::Note;
use crate::dsp::oscillator::Waveform;
use crate::dsp::signal::Signal;
use crate::error::ToneError;

/// An ordered run of notes, played one after another with no overlap.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Melody {
    notes: Vec<Note>,
}

impl Melody {
    /// Create an empty melody
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note (builder style)
    pub fn with_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Sum of every note's sample count.
    pub fn total_samples(&self) -> usize {
        self.notes
            .iter()
            .fold(0usize, |acc, n| acc.saturating_add(n.sample_count()))
    }
}

impl FromIterator<Note> for Melody {
    fn from_iter<I: IntoIterator<Item = Note>>(iter: I) -> Self {
        Self {
            notes: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Note>> for Melody {
    fn from(notes: Vec<Note>) -> Self {
        Self { notes }
    }
}

/// Render a melody into one contiguous signal.
///
/// Notes are generated in order and concatenated with no gaps, crossfades
/// or silence between them. The output length is the sum of the per-note
/// lengths. If any note fails, the partial output is dropped and the error
/// is returned.
pub fn assemble(melody: &Melody) -> Result<Signal, ToneError> {
    assemble_with(melody, Note::generate)
}

fn assemble_with<F>(melody: &Melody, mut render: F) -> Result<Signal, ToneError>
where
    F: FnMut(&Note) -> Result<Signal, ToneError>,
{
    let mut output = Signal::with_capacity(melody.total_samples())?;

    for (index, note) in melody.notes().iter().enumerate() {
        let tone = render(note)?;
        debug!(index, samples = tone.len(), "appending note");
        output.append(tone)?;
    }

    info!(
        notes = melody.len(),
        samples = output.len(),
        seconds = output.duration_secs(),
        "assembled melody"
    );
    Ok(output)
}

/// The fixed program melody: four half-second tones at A4 (440 Hz), one
/// per waveform, in the order sine, sawtooth, square, triangle.
pub fn demo() -> Result<Melody, ToneError> {
    const FREQUENCY: u32 = 440;
    const DURATION: f64 = 0.5;

    [
        Waveform::Sine,
        Waveform::Sawtooth,
        Waveform::Square,
        Waveform::Triangle,
    ]
    .into_iter()
    .map(|waveform| Note::new(FREQUENCY, DURATION, waveform))
    .collect()
}
