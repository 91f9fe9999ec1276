//! Audio container format value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::UnsupportedFormatError;

/// Container formats a recording can be written as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioFormat {
    #[default]
    Wav,
    Mp3,
    Flac,
}

impl AudioFormat {
    /// Every format the recorder accepts
    pub const ALL: [AudioFormat; 3] = [Self::Wav, Self::Mp3, Self::Flac];

    /// File extension, also the canonical lower-case name
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
        }
    }

    /// Parse a user-supplied name, falling back to the default when it
    /// is not one of the supported formats.
    ///
    /// Returns the format and whether a substitution happened.
    pub fn parse_or_default(name: &str) -> (Self, bool) {
        match name.parse() {
            Ok(format) => (format, false),
            Err(_) => (Self::default(), true),
        }
    }
}

impl FromStr for AudioFormat {
    type Err = UnsupportedFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wav" => Ok(Self::Wav),
            "mp3" => Ok(Self::Mp3),
            "flac" => Ok(Self::Flac),
            _ => Err(UnsupportedFormatError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
