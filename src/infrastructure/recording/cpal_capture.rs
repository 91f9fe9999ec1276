//! Default-device audio capture using cpal
//!
//! Captures at 44.1kHz mono when the device allows it. Otherwise records
//! at the device's nearest rate and channel count, then mixes down and
//! resamples.

use std::sync::{Arc, Mutex};
use std::time::{Duration as StdDuration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, SizedSample, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use tracing::{debug, error};

use crate::application::ports::{AudioCapture, ProgressCallback, RecordingError};
use crate::domain::recording::{Duration, PcmBuffer, SAMPLE_RATE};

/// Interval between progress callbacks
const PROGRESS_TICK: StdDuration = StdDuration::from_millis(100);

/// Shared sample buffer written by the cpal callback thread
type SampleBuffer = Arc<Mutex<Vec<i16>>>;

/// Audio capture from the host's default input device.
///
/// The cpal stream is created and dropped inside each capture call, since
/// `cpal::Stream` is not `Send`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpalCapture;

impl CpalCapture {
    /// Create a new cpal-based capture
    pub fn new() -> Self {
        Self
    }

    /// Get the default input device
    fn input_device() -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecordingError::NoInputDevice)
    }

    /// Pick an i16 or f32 input configuration, preferring ones that
    /// include 44.1kHz and then fewer channels
    fn input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| RecordingError::StartFailed(Box::new(e)))?;

        let best = supported_configs
            .filter(|c| matches!(c.sample_format(), SampleFormat::I16 | SampleFormat::F32))
            .min_by_key(|c| {
                let includes_target = c.min_sample_rate().0 <= SAMPLE_RATE
                    && c.max_sample_rate().0 >= SAMPLE_RATE;
                (!includes_target, c.channels())
            })
            .ok_or_else(|| RecordingError::StartFailed("No suitable input config found".into()))?;

        let sample_rate = SampleRate(
            SAMPLE_RATE.clamp(best.min_sample_rate().0, best.max_sample_rate().0),
        );

        let config = StreamConfig {
            channels: best.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, best.sample_format()))
    }

    /// Build an input stream that converts each sample to i16 and mixes
    /// down to mono before appending to `buffer`
    fn build_stream<T, F>(
        device: &cpal::Device,
        config: &StreamConfig,
        buffer: SampleBuffer,
        to_i16: F,
    ) -> Result<cpal::Stream, RecordingError>
    where
        T: SizedSample,
        F: Fn(T) -> i16 + Send + 'static,
    {
        let channels = config.channels;

        device
            .build_input_stream(
                config,
                move |data: &[T], _: &cpal::InputCallbackInfo| {
                    let converted: Vec<i16> = data.iter().map(|&s| to_i16(s)).collect();
                    let mono = Self::mix_to_mono(&converted, channels);
                    if let Ok(mut buffer) = buffer.lock() {
                        buffer.extend_from_slice(&mono);
                    }
                },
                |err| error!(error = %err, "Audio stream error"),
                None,
            )
            .map_err(|e| RecordingError::StartFailed(Box::new(e)))
    }

    /// Average interleaved channels into one
    fn mix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels <= 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / chunk.len() as i32) as i16
            })
            .collect()
    }

    fn f32_to_i16(sample: f32) -> i16 {
        (sample.clamp(-1.0, 1.0) * 32767.0) as i16
    }

    /// Resample mono audio from `source_rate` to 44.1kHz if needed.
    ///
    /// The resampler's output delay is dropped from the front, and the
    /// input is padded with silence until the delayed tail is flushed out.
    fn resample(samples: &[i16], source_rate: u32) -> Result<Vec<i16>, RecordingError> {
        if source_rate == SAMPLE_RATE || samples.is_empty() {
            return Ok(samples.to_vec());
        }

        let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

        let ratio = SAMPLE_RATE as f64 / source_rate as f64;
        let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

        let mut resampler = FftFixedIn::<f32>::new(
            source_rate as usize,
            SAMPLE_RATE as usize,
            1024, // Chunk size
            2,    // Sub-chunks
            1,    // Mono
        )
        .map_err(|e| RecordingError::RecordingFailed(Box::new(e)))?;

        let delay = resampler.output_delay();
        let wanted = delay + output_len;
        let mut output: Vec<f32> = Vec::with_capacity(wanted + resampler.output_frames_max());
        let mut input_pos = 0;

        while output.len() < wanted {
            let frames_needed = resampler.input_frames_next();
            let start = input_pos.min(samples_f32.len());
            let end = (input_pos + frames_needed).min(samples_f32.len());

            // Past the end of the input this is all silence
            let mut samples_in = samples_f32[start..end].to_vec();
            samples_in.resize(frames_needed, 0.0);
            let chunk = vec![samples_in];

            let resampled = resampler
                .process(&chunk, None)
                .map_err(|e| RecordingError::RecordingFailed(Box::new(e)))?;

            output.extend_from_slice(&resampled[0]);
            input_pos += frames_needed;
        }

        Ok(output
            .into_iter()
            .skip(delay)
            .take(output_len)
            .map(Self::f32_to_i16)
            .collect())
    }

    /// Sleep until `duration` has elapsed, reporting progress on the way
    fn wait_for(duration: Duration, on_progress: Option<&ProgressCallback>) {
        let total = duration.as_std();
        let total_ms = duration.as_millis();
        let start = Instant::now();

        loop {
            let elapsed = start.elapsed();
            if elapsed >= total {
                break;
            }
            if let Some(progress) = on_progress {
                progress(elapsed.as_millis() as u64, total_ms);
            }
            std::thread::sleep((total - elapsed).min(PROGRESS_TICK));
        }

        if let Some(progress) = on_progress {
            progress(total_ms, total_ms);
        }
    }
}

impl AudioCapture for CpalCapture {
    fn capture(
        &self,
        duration: Duration,
        on_progress: Option<ProgressCallback>,
    ) -> Result<PcmBuffer, RecordingError> {
        let device = Self::input_device()?;
        let (config, sample_format) = Self::input_config(&device)?;
        let device_rate = config.sample_rate.0;

        debug!(
            device = %device.name().unwrap_or_else(|_| "unknown".to_string()),
            sample_rate = device_rate,
            channels = config.channels,
            ?sample_format,
            "Opening input stream"
        );

        let buffer: SampleBuffer = Arc::new(Mutex::new(
            Vec::with_capacity(duration.frames_at(device_rate)),
        ));

        let stream = match sample_format {
            SampleFormat::I16 => {
                Self::build_stream::<i16, _>(&device, &config, Arc::clone(&buffer), |s| s)?
            }
            SampleFormat::F32 => Self::build_stream::<f32, _>(
                &device,
                &config,
                Arc::clone(&buffer),
                Self::f32_to_i16,
            )?,
            other => {
                return Err(RecordingError::StartFailed(
                    format!("Unsupported sample format: {:?}", other).into(),
                ))
            }
        };

        stream
            .play()
            .map_err(|e| RecordingError::StartFailed(Box::new(e)))?;

        Self::wait_for(duration, on_progress.as_ref());
        drop(stream);

        let samples = {
            let mut guard = buffer.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *guard)
        };

        if samples.is_empty() {
            return Err(RecordingError::RecordingFailed(
                "No audio data captured".into(),
            ));
        }

        let resampled = Self::resample(&samples, device_rate)?;
        Ok(PcmBuffer::new(resampled, SAMPLE_RATE))
    }
}
