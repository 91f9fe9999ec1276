//! Duration value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Default recording duration (5 seconds)
pub const DEFAULT_DURATION_SECS: u64 = 5;

/// Longest accepted recording (24 hours).
///
/// Keeps `frames_at` within `u32` range at 44.1kHz, so frame counts fit a
/// `usize` on every target.
pub const MAX_DURATION_SECS: u64 = 24 * 60 * 60;

/// Value object representing a recording length in whole seconds.
/// Immutable, always non-zero and at most [`MAX_DURATION_SECS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    seconds: u64,
}

impl Duration {
    /// Create a Duration from seconds, rejecting zero and anything over
    /// [`MAX_DURATION_SECS`]
    pub const fn from_secs(secs: u64) -> Option<Self> {
        if secs == 0 || secs > MAX_DURATION_SECS {
            None
        } else {
            Some(Self { seconds: secs })
        }
    }

    /// Default recording duration (5 seconds)
    pub const fn default_duration() -> Self {
        Self {
            seconds: DEFAULT_DURATION_SECS,
        }
    }

    /// Get duration in seconds
    pub const fn as_secs(&self) -> u64 {
        self.seconds
    }

    /// Get duration in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.seconds.saturating_mul(1000)
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_secs(self.seconds)
    }

    /// Number of frames this duration spans at the given sample rate
    pub const fn frames_at(&self, sample_rate: u32) -> usize {
        let frames = self.seconds.saturating_mul(sample_rate as u64);
        if frames > usize::MAX as u64 {
            usize::MAX
        } else {
            frames as usize
        }
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Parse a duration string into a Duration value object.
    /// Supported formats: "5", "30s", "1m", "2m30s", "90s"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let invalid = || DurationParseError { input: s.to_string() };

        // A bare number is taken as seconds
        if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
            let secs: u64 = input.parse().map_err(|_| invalid())?;
            return Self::from_secs(secs).ok_or_else(invalid);
        }

        let mut minutes: u64 = 0;
        let mut seconds: u64 = 0;
        let mut current_num = String::new();
        let mut found_any = false;

        for ch in input.chars() {
            if ch.is_ascii_digit() {
                current_num.push(ch);
            } else if ch == 'm' && !current_num.is_empty() {
                minutes = current_num.parse().map_err(|_| invalid())?;
                current_num.clear();
                found_any = true;
            } else if ch == 's' && !current_num.is_empty() {
                seconds = current_num.parse().map_err(|_| invalid())?;
                current_num.clear();
                found_any = true;
            } else {
                return Err(invalid());
            }
        }

        if !current_num.is_empty() || !found_any {
            return Err(invalid());
        }

        let total = minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(seconds))
            .ok_or_else(invalid)?;

        Self::from_secs(total).ok_or_else(invalid)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.seconds / 60;
        let seconds = self.seconds % 60;

        if minutes == 0 {
            write!(f, "{}s", seconds)
        } else if seconds == 0 {
            write!(f, "{}m", minutes)
        } else {
            write!(f, "{}m{}s", minutes, seconds)
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_duration()
    }
}
