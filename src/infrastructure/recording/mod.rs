//! Recording infrastructure module
//!
//! Wires the cpal default-device capture and the multi-format file writer
//! into the [`Recorder`] use case.

mod cpal_capture;

pub use cpal_capture::CpalCapture;

use std::path::PathBuf;

use crate::application::Recorder;
use crate::domain::recording::Duration;

use super::encoding::MultiFormatWriter;

/// Recorder backed by the default microphone
pub type MicRecorder = Recorder<CpalCapture, MultiFormatWriter>;

impl Recorder<CpalCapture, MultiFormatWriter> {
    /// Build a recorder on the default input device.
    ///
    /// Creates `output_directory` if missing and substitutes WAV for an
    /// unsupported `format`; neither problem makes construction fail.
    pub fn new(duration: Duration, output_directory: impl Into<PathBuf>, format: &str) -> Self {
        Self::with_adapters(
            duration,
            output_directory,
            format,
            CpalCapture::new(),
            MultiFormatWriter::new(),
        )
    }
}
