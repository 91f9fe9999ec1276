//! Recorder settings and capture result value objects

use std::path::{Path, PathBuf};

use super::{AudioFormat, Duration};

/// Validated settings for a single recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderConfig {
    pub duration: Duration,
    pub output_directory: PathBuf,
    pub format: AudioFormat,
}

impl RecorderConfig {
    /// Path of the file a recording started at `unix_secs` is written to
    pub fn output_path_for(&self, unix_secs: u64) -> PathBuf {
        self.output_directory
            .join(format!("{}.{}", unix_secs, self.format.extension()))
    }
}

/// Where a finished recording was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResult {
    file_path: PathBuf,
}

impl CaptureResult {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_uses_timestamp_and_extension() {
        let config = RecorderConfig {
            duration: Duration::default(),
            output_directory: PathBuf::from("./recordings"),
            format: AudioFormat::Flac,
        };
        assert_eq!(
            config.output_path_for(1_700_000_000),
            PathBuf::from("./recordings/1700000000.flac")
        );
    }
}
