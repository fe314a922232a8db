//! Playback timeout value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::TimeoutParseError;

/// Default playback timeout (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Upper bound for a configured timeout (10 minutes)
pub const MAX_TIMEOUT_SECS: u64 = 600;

/// Value object bounding how long a single render may run.
/// Immutable and validated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timeout {
    milliseconds: u64,
}

impl Timeout {
    /// Create a Timeout from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create a Timeout from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    pub const fn default_timeout() -> Self {
        Self::from_secs(DEFAULT_TIMEOUT_SECS)
    }

    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl FromStr for Timeout {
    type Err = TimeoutParseError;

    /// Parse a timeout string.
    /// Supported formats: "30" (seconds), "500ms", "30s", "1m", "1m30s"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let err = || TimeoutParseError {
            input: s.to_string(),
        };

        // Bare numbers are seconds, matching PLAYBACK_TIMEOUT_SECONDS
        if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
            let secs: u64 = input.parse().map_err(|_| err())?;
            return Self::checked(secs.saturating_mul(1000)).ok_or_else(err);
        }

        let mut total_ms: u64 = 0;
        let mut current_num = String::new();
        let mut found_any = false;
        let mut chars = input.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch.is_ascii_digit() {
                current_num.push(ch);
                continue;
            }
            if current_num.is_empty() {
                return Err(err());
            }
            let value: u64 = current_num.parse().map_err(|_| err())?;
            let unit_ms = match ch {
                'm' if chars.peek() == Some(&'s') => {
                    chars.next();
                    1
                }
                'm' => 60_000,
                's' => 1000,
                _ => return Err(err()),
            };
            total_ms = total_ms.saturating_add(value.saturating_mul(unit_ms));
            current_num.clear();
            found_any = true;
        }

        if !current_num.is_empty() || !found_any {
            return Err(err());
        }

        Self::checked(total_ms).ok_or_else(err)
    }
}

impl Timeout {
    fn checked(ms: u64) -> Option<Self> {
        (ms > 0 && ms <= MAX_TIMEOUT_SECS * 1000).then_some(Self { milliseconds: ms })
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.milliseconds % 1000 != 0 {
            return write!(f, "{}ms", self.milliseconds);
        }

        let total_secs = self.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;

        if minutes == 0 {
            write!(f, "{}s", seconds)
        } else if seconds == 0 {
            write!(f, "{}m", minutes)
        } else {
            write!(f, "{}m{}s", minutes, seconds)
        }
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self::default_timeout()
    }
}
