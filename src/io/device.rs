//! Default output device sink.
//!
//! The writer side pushes frames into a lock-free ring buffer; the cpal
//! callback drains it on the audio thread and fans each mono frame out to
//! every device channel. An empty ring plays silence.

use std::cmp::Reverse;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{
    ChannelCount, FromSample, SampleFormat, SizedSample, StreamConfig, SupportedStreamConfig,
    SupportedStreamConfigRange,
};
use rtrb::{Consumer, Producer, PushError, RingBuffer};
use tracing::{debug, error, info};

use super::{AudioSink, PlaybackConfig};
use crate::error::PlaybackError;

/// How long the writer sleeps while waiting for ring space
const POLL_INTERVAL: Duration = Duration::from_millis(2);
/// No drain progress for this long means the device stopped pulling frames
const STALL_TIMEOUT: Duration = Duration::from_secs(2);
/// Time left for the device to play out its own buffer after the ring drains
const TAIL_GRACE: Duration = Duration::from_millis(100);

/// First error reported by the device callback, if any.
type StreamFault = Arc<Mutex<Option<String>>>;

/// Blocking sink on the default output device.
pub struct CpalSink {
    stream: cpal::Stream,
    writer: RingWriter,
}

impl CpalSink {
    /// Open and start a stream on the default output device.
    ///
    /// Picks a supported device configuration that covers the requested
    /// sample rate, preferring the device's default channel count and
    /// sample format.
    pub fn open(config: &PlaybackConfig) -> Result<Self, PlaybackError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(PlaybackError::NoOutputDevice)?;

        let preferred = device
            .default_output_config()
            .map(|c| (c.channels(), c.sample_format()))
            .map_err(|err| debug!(%err, "no default output config"))
            .ok();
        let ranges: Vec<_> = device.supported_output_configs()?.collect();
        let supported = choose_config(&ranges, preferred, config.sample_rate)
            .ok_or(PlaybackError::NoMatchingConfig(config.sample_rate))?;

        let stream_config: StreamConfig = supported.config();
        let fault: StreamFault = Arc::new(Mutex::new(None));
        let capacity = config.ring_capacity.max(config.frames_per_buffer).max(1);
        let (writer, consumer) = RingWriter::new(capacity, fault.clone());

        let stream = match supported.sample_format() {
            SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, consumer, fault)?,
            SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, consumer, fault)?,
            SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, consumer, fault)?,
            SampleFormat::F64 => build_stream::<f64>(&device, &stream_config, consumer, fault)?,
            other => return Err(PlaybackError::UnsupportedSampleFormat(other.to_string())),
        };
        stream.play()?;

        info!(
            device = %device.name().unwrap_or_else(|_| "<unknown>".to_string()),
            sample_rate = stream_config.sample_rate.0,
            channels = stream_config.channels,
            format = %supported.sample_format(),
            ring = capacity,
            "opened output stream"
        );

        Ok(Self { stream, writer })
    }
}

impl AudioSink for CpalSink {
    fn write(&mut self, frames: &[i16]) -> Result<(), PlaybackError> {
        self.writer.write(frames)
    }

    fn close(self) -> Result<(), PlaybackError> {
        self.writer.drain()?;
        thread::sleep(TAIL_GRACE);
        self.writer.check_fault()?;

        self.stream.pause()?;
        debug!("output stream stopped");
        Ok(())
    }
}

fn is_playable(format: SampleFormat) -> bool {
    matches!(
        format,
        SampleFormat::I16 | SampleFormat::U16 | SampleFormat::F32 | SampleFormat::F64
    )
}

/// Pick the supported range that covers `sample_rate` and best matches the
/// device default. Ties go to the earliest range.
fn choose_config(
    ranges: &[SupportedStreamConfigRange],
    preferred: Option<(ChannelCount, SampleFormat)>,
    sample_rate: u32,
) -> Option<SupportedStreamConfig> {
    let score = |range: &SupportedStreamConfigRange| match preferred {
        Some((channels, format)) => {
            2 * u8::from(range.channels() == channels) + u8::from(range.sample_format() == format)
        }
        None => 0,
    };

    ranges
        .iter()
        .filter(|r| r.min_sample_rate().0 <= sample_rate && sample_rate <= r.max_sample_rate().0)
        .filter(|r| is_playable(r.sample_format()))
        .min_by_key(|r| Reverse(score(*r)))
        .map(|r| r.clone().with_sample_rate(cpal::SampleRate(sample_rate)))
}

/// Writer half of the ring shared with the device callback.
///
/// `write` blocks while the ring is full, `drain` blocks until it is empty.
/// Both fail with [`PlaybackError::Stream`] when the callback reported an
/// error, when the consumer is gone, or when nothing drains for the stall
/// timeout.
pub(crate) struct RingWriter {
    producer: Producer<i16>,
    fault: StreamFault,
    stall_timeout: Duration,
}

impl RingWriter {
    pub(crate) fn new(capacity: usize, fault: StreamFault) -> (Self, Consumer<i16>) {
        let (producer, consumer) = RingBuffer::<i16>::new(capacity);
        let writer = Self {
            producer,
            fault,
            stall_timeout: STALL_TIMEOUT,
        };
        (writer, consumer)
    }

    #[cfg(test)]
    fn with_stall_timeout(mut self, timeout: Duration) -> Self {
        self.stall_timeout = timeout;
        self
    }

    fn check_fault(&self) -> Result<(), PlaybackError> {
        let reported = self.fault.lock().ok().and_then(|mut slot| slot.take());
        match reported {
            Some(message) => Err(PlaybackError::Stream(message)),
            None => Ok(()),
        }
    }

    /// Block until at least `wanted` ring slots are free, or the ring is
    /// completely empty when `wanted` exceeds its capacity.
    fn wait_for_slots(&self, wanted: usize) -> Result<usize, PlaybackError> {
        let capacity = self.producer.buffer().capacity();
        let wanted = wanted.min(capacity);
        let mut last_free = self.producer.slots();
        let mut last_progress = Instant::now();

        loop {
            self.check_fault()?;
            let free = self.producer.slots();
            if free >= wanted {
                return Ok(free);
            }
            if self.producer.is_abandoned() {
                return Err(PlaybackError::Stream("device callback dropped".to_string()));
            }
            if free != last_free {
                last_free = free;
                last_progress = Instant::now();
            } else if last_progress.elapsed() > self.stall_timeout {
                return Err(PlaybackError::Stream(
                    "device stopped consuming samples".to_string(),
                ));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn write(&mut self, frames: &[i16]) -> Result<(), PlaybackError> {
        let mut remaining = frames;
        while !remaining.is_empty() {
            let free = self.wait_for_slots(remaining.len())?;
            let (now, rest) = remaining.split_at(free.min(remaining.len()));
            for &sample in now {
                if let Err(PushError::Full(_)) = self.producer.push(sample) {
                    return Err(PlaybackError::Stream("ring buffer overrun".to_string()));
                }
            }
            remaining = rest;
        }
        Ok(())
    }

    /// Block until the callback has taken every queued frame.
    fn drain(&self) -> Result<(), PlaybackError> {
        let capacity = self.producer.buffer().capacity();
        self.wait_for_slots(capacity)?;
        Ok(())
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut consumer: Consumer<i16>,
    fault: StreamFault,
) -> Result<cpal::Stream, PlaybackError>
where
    T: SizedSample + FromSample<i16>,
{
    let channels = usize::from(config.channels).max(1);

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let value = T::from_sample(consumer.pop().unwrap_or(0));
                frame.fill(value);
            }
        },
        move |err| {
            error!(%err, "audio stream error");
            if let Ok(mut slot) = fault.lock() {
                slot.get_or_insert_with(|| err.to_string());
            }
        },
        None,
    )?;

    Ok(stream)
}
