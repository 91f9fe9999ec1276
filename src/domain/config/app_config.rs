//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::error::DurationParseError;
use crate::domain::recording::{AudioFormat, Duration};

/// Default directory recordings are written to
pub const DEFAULT_OUTPUT_DIR: &str = "./recordings/";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub duration: Option<String>,
    pub output_dir: Option<String>,
    pub format: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            duration: Some(Duration::default_duration().to_string()),
            output_dir: Some(DEFAULT_OUTPUT_DIR.to_string()),
            format: Some(AudioFormat::default().to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            duration: other.duration.or(self.duration),
            output_dir: other.output_dir.or(self.output_dir),
            format: other.format.or(self.format),
        }
    }

    /// Parse the configured duration, or the default if not set.
    /// A value that is set but malformed is an error.
    pub fn duration_or_default(&self) -> Result<Duration, DurationParseError> {
        match self.duration.as_deref() {
            Some(s) => s.parse(),
            None => Ok(Duration::default_duration()),
        }
    }

    /// Get the output directory, or `./recordings/` if not set
    pub fn output_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR))
    }

    /// Get the raw format name, or "wav" if not set.
    ///
    /// Left unparsed so the recorder decides on substitution.
    pub fn format_or_default(&self) -> &str {
        self.format
            .as_deref()
            .unwrap_or_else(|| AudioFormat::default().extension())
    }
}
