//! Recording domain module

mod duration;
mod format;
mod pcm;
mod recorder_config;

pub use duration::{Duration, DEFAULT_DURATION_SECS, MAX_DURATION_SECS};
pub use format::AudioFormat;
pub use pcm::{PcmBuffer, CHANNELS, SAMPLE_RATE};
pub use recorder_config::{CaptureResult, RecorderConfig};
