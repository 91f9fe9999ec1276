//! Audio file encoding module
//!
//! Writes a captured buffer to disk, picking the container from the
//! file extension: WAV (hound), FLAC (flacenc) and, with the `mp3`
//! feature, MP3 (LAME via mp3lame-encoder).

mod flac;
#[cfg(feature = "mp3")]
mod mp3;
mod wav;

pub use flac::{encode_to_flac, write_flac, FlacError};
#[cfg(feature = "mp3")]
pub use mp3::{encode_to_mp3, write_mp3, Mp3Error};
pub use wav::write_wav;

use std::path::Path;

use tracing::debug;

use crate::application::ports::{AudioFileWriter, RecordingError};
use crate::domain::recording::PcmBuffer;

/// Extension-keyed audio file writer.
///
/// The recorder validates formats up front, but which containers can
/// actually be written is decided here.
#[derive(Debug, Default, Clone, Copy)]
pub struct MultiFormatWriter;

impl MultiFormatWriter {
    pub fn new() -> Self {
        Self
    }

    #[cfg(feature = "mp3")]
    fn encode_mp3(path: &Path, buffer: &PcmBuffer) -> Result<(), RecordingError> {
        write_mp3(path, buffer).map_err(|e| RecordingError::EncodeFailed {
            format: "mp3",
            source: Box::new(e),
        })
    }

    #[cfg(not(feature = "mp3"))]
    fn encode_mp3(_path: &Path, _buffer: &PcmBuffer) -> Result<(), RecordingError> {
        Err(RecordingError::UnsupportedEncoding("mp3".to_string()))
    }
}

impl AudioFileWriter for MultiFormatWriter {
    fn write(&self, path: &Path, buffer: &PcmBuffer) -> Result<(), RecordingError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        debug!(path = %path.display(), frames = buffer.frames(), "Encoding audio file");

        match extension.as_str() {
            "wav" => write_wav(path, buffer).map_err(|e| RecordingError::EncodeFailed {
                format: "wav",
                source: Box::new(e),
            }),
            "flac" => write_flac(path, buffer).map_err(|e| RecordingError::EncodeFailed {
                format: "flac",
                source: Box::new(e),
            }),
            "mp3" => Self::encode_mp3(path, buffer),
            _ => Err(RecordingError::UnsupportedEncoding(extension)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recording::SAMPLE_RATE;

    fn tone() -> PcmBuffer {
        PcmBuffer::new(vec![500; 4410], SAMPLE_RATE)
    }

    #[test]
    fn writes_wav_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.wav");

        MultiFormatWriter::new().write(&path, &tone()).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.duration(), 4410);
    }

    #[test]
    fn writes_flac_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.flac");

        MultiFormatWriter::new().write(&path, &tone()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], b"fLaC");
    }

    #[test]
    fn extension_match_ignores_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.WAV");

        MultiFormatWriter::new().write(&path, &tone()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.ogg");

        let err = MultiFormatWriter::new().write(&path, &tone()).unwrap_err();
        assert!(matches!(err, RecordingError::UnsupportedEncoding(ext) if ext == "ogg"));
        assert!(!path.exists());
    }

    #[test]
    fn wav_write_failure_keeps_native_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("a.wav");

        let err = MultiFormatWriter::new().write(&path, &tone()).unwrap_err();
        match err {
            RecordingError::EncodeFailed { format, source } => {
                assert_eq!(format, "wav");
                assert!(source.downcast_ref::<hound::Error>().is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    #[cfg(not(feature = "mp3"))]
    fn mp3_without_feature_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.mp3");

        let err = MultiFormatWriter::new().write(&path, &tone()).unwrap_err();
        assert!(matches!(err, RecordingError::UnsupportedEncoding(ext) if ext == "mp3"));
    }
}
