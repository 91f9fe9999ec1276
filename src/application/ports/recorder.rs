//! Capture and encoding port interfaces

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::recording::{Duration, PcmBuffer};

/// Error raised by an underlying audio or encoding library, kept as-is
pub type NativeError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Recording errors.
///
/// Failures from the device or the encoders are carried unmodified as the
/// error source.
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("No audio input device available")]
    NoInputDevice,

    #[error("Failed to start recording: {0}")]
    StartFailed(#[source] NativeError),

    #[error("Recording failed: {0}")]
    RecordingFailed(#[source] NativeError),

    #[error("Failed to encode {format} file: {source}")]
    EncodeFailed {
        format: &'static str,
        #[source]
        source: NativeError,
    },

    #[error("No encoder available for \"{0}\" files")]
    UnsupportedEncoding(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Progress callback type for reporting recording progress.
/// Parameters: (elapsed_ms, total_ms)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Port for bounded audio capture from an input device
pub trait AudioCapture: Send + Sync {
    /// Capture mono audio for a fixed duration, blocking the caller.
    ///
    /// # Arguments
    /// * `duration` - How long to record
    /// * `on_progress` - Optional callback for progress updates
    ///
    /// # Returns
    /// Mono samples resampled to the recording sample rate
    fn capture(
        &self,
        duration: Duration,
        on_progress: Option<ProgressCallback>,
    ) -> Result<PcmBuffer, RecordingError>;
}

/// Port for writing a sample buffer to an audio file
pub trait AudioFileWriter: Send + Sync {
    /// Encode `buffer` into `path`, choosing the container by extension.
    fn write(&self, path: &Path, buffer: &PcmBuffer) -> Result<(), RecordingError>;
}
