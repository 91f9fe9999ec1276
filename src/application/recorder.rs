//! Fixed-duration recording use case

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{info, warn};

use crate::domain::recording::{
    AudioFormat, CaptureResult, Duration, RecorderConfig, SAMPLE_RATE,
};

use super::ports::{AudioCapture, AudioFileWriter, ProgressCallback, RecordingError};

/// Records one clip of a fixed duration and writes it to disk.
///
/// Construction never fails: an output directory that cannot be created
/// and an unsupported format are both reported and then tolerated.
pub struct Recorder<C, W>
where
    C: AudioCapture,
    W: AudioFileWriter,
{
    config: RecorderConfig,
    capture: C,
    writer: W,
}

impl<C, W> Recorder<C, W>
where
    C: AudioCapture,
    W: AudioFileWriter,
{
    /// Validate the settings and build a recorder on the given adapters
    pub fn with_adapters(
        duration: Duration,
        output_directory: impl Into<PathBuf>,
        format: &str,
        capture: C,
        writer: W,
    ) -> Self {
        let output_directory = output_directory.into();
        ensure_directory(&output_directory);
        let format = validate_format(format);

        Self {
            config: RecorderConfig {
                duration,
                output_directory,
                format,
            },
            capture,
            writer,
        }
    }

    pub fn duration(&self) -> Duration {
        self.config.duration
    }

    pub fn output_directory(&self) -> &Path {
        &self.config.output_directory
    }

    pub fn format(&self) -> AudioFormat {
        self.config.format
    }

    /// Record for the configured duration, blocking the calling thread,
    /// then write `<output_directory>/<unix seconds>.<format>`.
    pub fn start_recording(&self) -> Result<CaptureResult, RecordingError> {
        self.record(None)
    }

    /// Same as [`start_recording`](Self::start_recording), reporting
    /// `(elapsed_ms, total_ms)` while the capture runs.
    pub fn start_recording_with_progress(
        &self,
        on_progress: ProgressCallback,
    ) -> Result<CaptureResult, RecordingError> {
        self.record(Some(on_progress))
    }

    fn record(&self, on_progress: Option<ProgressCallback>) -> Result<CaptureResult, RecordingError> {
        info!(duration = %self.config.duration, "Recording...");

        let mut buffer = self.capture.capture(self.config.duration, on_progress)?;
        buffer.fit_to(self.config.duration.frames_at(SAMPLE_RATE));

        let path = self.config.output_path_for(unix_timestamp());
        self.writer.write(&path, &buffer)?;

        info!(
            path = %path.display(),
            frames = buffer.frames(),
            duration_ms = buffer.duration_ms(),
            "Recording saved"
        );
        Ok(CaptureResult::new(path))
    }
}

/// Create the output directory and any missing parents, logging failures
fn ensure_directory(path: &Path) {
    if let Err(e) = fs::create_dir_all(path) {
        warn!(
            path = %path.display(),
            error = %e,
            "Error occurred while creating the output directory"
        );
    }
}

/// Normalize the requested format, substituting the default if unsupported
fn validate_format(requested: &str) -> AudioFormat {
    let (format, substituted) = AudioFormat::parse_or_default(&requested.to_lowercase());
    if substituted {
        warn!(
            requested,
            "Audio file format is not supported. Accepted formats: WAV, MP3, and FLAC. Using default value: {}",
            format.extension().to_uppercase()
        );
    }
    format
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::domain::recording::PcmBuffer;

    /// Returns a short burst of samples instead of touching a device
    struct MockCapture {
        frames: usize,
    }

    impl AudioCapture for MockCapture {
        fn capture(
            &self,
            duration: Duration,
            on_progress: Option<ProgressCallback>,
        ) -> Result<PcmBuffer, RecordingError> {
            if let Some(cb) = on_progress {
                cb(duration.as_millis(), duration.as_millis());
            }
            Ok(PcmBuffer::new(vec![100; self.frames], SAMPLE_RATE))
        }
    }

    struct FailingCapture;

    impl AudioCapture for FailingCapture {
        fn capture(
            &self,
            _duration: Duration,
            _on_progress: Option<ProgressCallback>,
        ) -> Result<PcmBuffer, RecordingError> {
            Err(RecordingError::NoInputDevice)
        }
    }

    #[derive(Default, Clone)]
    struct MockWriter {
        written: Arc<Mutex<Vec<(PathBuf, usize)>>>,
    }

    impl AudioFileWriter for MockWriter {
        fn write(&self, path: &Path, buffer: &PcmBuffer) -> Result<(), RecordingError> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), buffer.frames()));
            Ok(())
        }
    }

    fn recorder_in(
        dir: &Path,
        format: &str,
        frames: usize,
    ) -> (Recorder<MockCapture, MockWriter>, MockWriter) {
        let writer = MockWriter::default();
        let recorder = Recorder::with_adapters(
            Duration::from_secs(1).unwrap(),
            dir,
            format,
            MockCapture { frames },
            writer.clone(),
        );
        (recorder, writer)
    }

    #[test]
    fn supported_formats_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        for format in AudioFormat::ALL {
            let (recorder, _) = recorder_in(dir.path(), format.extension(), 0);
            assert_eq!(recorder.format(), format);
        }
    }

    #[test]
    fn format_is_lower_cased() {
        let dir = tempfile::tempdir().unwrap();
        let (recorder, _) = recorder_in(dir.path(), "FLAC", 0);
        assert_eq!(recorder.format(), AudioFormat::Flac);
    }

    #[test]
    fn unsupported_format_falls_back_to_wav() {
        let dir = tempfile::tempdir().unwrap();
        for requested in ["wavf", "ogg", "", "mp4"] {
            let (recorder, _) = recorder_in(dir.path(), requested, 0);
            assert_eq!(recorder.format(), AudioFormat::Wav);
        }
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("c");
        let (recorder, _) = recorder_in(&nested, "wav", 0);
        assert!(nested.is_dir());
        assert_eq!(recorder.output_directory(), nested.as_path());
    }

    #[test]
    fn uncreatable_directory_does_not_fail_construction() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let target = blocker.join("recordings");
        let (recorder, _) = recorder_in(&target, "wav", 0);
        assert!(!target.exists());
        assert_eq!(recorder.format(), AudioFormat::Wav);
    }

    #[test]
    fn start_recording_writes_exact_frame_count() {
        let dir = tempfile::tempdir().unwrap();
        let (recorder, writer) = recorder_in(dir.path(), "wav", 1000);

        recorder.start_recording().unwrap();

        let written = writer.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].1, SAMPLE_RATE as usize);
    }

    #[test]
    fn start_recording_trims_overlong_capture() {
        let dir = tempfile::tempdir().unwrap();
        let (recorder, writer) = recorder_in(dir.path(), "wav", SAMPLE_RATE as usize + 512);

        recorder.start_recording().unwrap();

        assert_eq!(writer.written.lock().unwrap()[0].1, SAMPLE_RATE as usize);
    }

    #[test]
    fn output_path_is_timestamp_with_extension() {
        let dir = tempfile::tempdir().unwrap();
        let (recorder, _) = recorder_in(dir.path(), "flac", 10);

        let before = unix_timestamp();
        let result = recorder.start_recording().unwrap();
        let path = result.file_path();

        assert_eq!(path.parent().unwrap(), dir.path());
        assert_eq!(path.extension().unwrap(), "flac");
        let stamp: u64 = path.file_stem().unwrap().to_str().unwrap().parse().unwrap();
        assert!(stamp >= before);
    }

    #[test]
    fn progress_callback_is_forwarded() {
        let dir = tempfile::tempdir().unwrap();
        let (recorder, _) = recorder_in(dir.path(), "wav", 10);

        let last = Arc::new(AtomicU64::new(0));
        let seen = Arc::clone(&last);
        recorder
            .start_recording_with_progress(Arc::new(move |elapsed, _total| {
                seen.store(elapsed, Ordering::SeqCst);
            }))
            .unwrap();

        assert_eq!(last.load(Ordering::SeqCst), 1000);
    }

    #[test]
    fn capture_errors_propagate() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MockWriter::default();
        let recorder = Recorder::with_adapters(
            Duration::default(),
            dir.path(),
            "wav",
            FailingCapture,
            writer.clone(),
        );

        let err = recorder.start_recording().unwrap_err();
        assert!(matches!(err, RecordingError::NoInputDevice));
        assert!(writer.written.lock().unwrap().is_empty());
    }
}
