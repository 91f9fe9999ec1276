//! Captured PCM buffer value object

/// Sample rate every recording is captured and written at
pub const SAMPLE_RATE: u32 = 44100;

/// Channels every recording is captured and written with (mono)
pub const CHANNELS: u16 = 1;

/// Mono 16-bit PCM samples at a known sample rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl PcmBuffer {
    /// Create a buffer from mono samples
    pub fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// A buffer of `frames` zero samples
    pub fn silence(frames: usize, sample_rate: u32) -> Self {
        Self::new(vec![0; frames], sample_rate)
    }

    /// Get the samples
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames (equal to samples, since the buffer is mono)
    pub fn frames(&self) -> usize {
        self.samples.len()
    }

    /// Playback length in milliseconds
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }

    /// Truncate or zero-pad to exactly `frames` samples
    pub fn fit_to(&mut self, frames: usize) {
        self.samples.resize(frames, 0);
    }
}
