use crate::error::ToneError;
use crate::SAMPLE_RATE;

/// An owned run of mono 16-bit PCM samples at `SAMPLE_RATE`.
///
/// A `Signal` has a single owner. Concatenation consumes the appended
/// signal, and the buffer is released when the owner drops it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signal {
    samples: Vec<i16>,
}

impl Signal {
    /// A signal with no samples.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An empty signal with room for `capacity` samples, reserved fallibly.
    pub fn with_capacity(capacity: usize) -> Result<Self, ToneError> {
        let mut samples = Vec::new();
        samples
            .try_reserve_exact(capacity)
            .map_err(|_| ToneError::Allocation {
                requested: capacity,
            })?;
        Ok(Self { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Playback length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(SAMPLE_RATE)
    }

    /// Append `other` to the end of this signal, taking ownership of it.
    ///
    /// Fails with [`ToneError::Allocation`] if the combined buffer cannot be
    /// reserved; `self` is left unchanged in that case.
    pub fn append(&mut self, other: Signal) -> Result<(), ToneError> {
        if self.samples.is_empty() && self.samples.capacity() < other.samples.len() {
            self.samples = other.samples;
            return Ok(());
        }
        self.samples
            .try_reserve(other.samples.len())
            .map_err(|_| ToneError::Allocation {
                requested: self.samples.len().saturating_add(other.samples.len()),
            })?;
        self.samples.extend_from_slice(&other.samples);
        Ok(())
    }
}

impl From<Vec<i16>> for Signal {
    fn from(samples: Vec<i16>) -> Self {
        Self { samples }
    }
}

impl AsRef<[i16]> for Signal {
    fn as_ref(&self) -> &[i16] {
        &self.samples
    }
}
