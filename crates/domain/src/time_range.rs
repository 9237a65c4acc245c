// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation time ranges.
//!
//! A time range is written `HH:mm-HH:mm` and stored as a pair of minute
//! offsets from midnight. Ranges are half-open: a range ending at 10:00 and
//! a range starting at 10:00 do not overlap.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Shortest reservation the system accepts, in minutes.
pub const MIN_DURATION_MINUTES: u16 = 30;

/// Earliest permitted start (06:00), in minutes after midnight.
pub const OPENING_MINUTE: u16 = 6 * 60;

/// Latest permitted end (22:00), in minutes after midnight.
pub const CLOSING_MINUTE: u16 = 22 * 60;

/// Reasons a time range string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeRangeError {
    /// The input is not two `HH:mm` times joined by `-`.
    #[error("Invalid time range '{input}': expected the form HH:mm-HH:mm")]
    Format {
        /// The rejected input.
        input: String,
    },
    /// The start time is not strictly before the end time.
    #[error("Invalid time range: start time {start} must be before end time {end}")]
    Order {
        /// The start time as written.
        start: String,
        /// The end time as written.
        end: String,
    },
    /// The range is shorter than the minimum duration.
    #[error("Invalid time range: reservations must last at least {minimum} minutes, got {minutes}")]
    Duration {
        /// The requested duration.
        minutes: u16,
        /// The minimum duration.
        minimum: u16,
    },
    /// The range starts before opening or ends after closing.
    #[error("Invalid time range {range}: reservations must fall between 06:00 and 22:00")]
    Window {
        /// The rejected range in canonical form.
        range: String,
    },
}

/// A validated `[start, end)` interval within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start: u16,
    end: u16,
}

impl TimeRange {
    /// Parses and fully validates a time range.
    ///
    /// Checks, in order: shape, ordering, minimum duration, and the
    /// 06:00 to 22:00 working window.
    ///
    /// # Errors
    ///
    /// Returns the first `TimeRangeError` that applies.
    pub fn parse(input: &str) -> Result<Self, TimeRangeError> {
        let range: Self = Self::parse_lenient(input)?;

        let minutes: u16 = range.duration_minutes();
        if minutes < MIN_DURATION_MINUTES {
            return Err(TimeRangeError::Duration {
                minutes,
                minimum: MIN_DURATION_MINUTES,
            });
        }

        if range.start < OPENING_MINUTE || range.end > CLOSING_MINUTE {
            return Err(TimeRangeError::Window {
                range: range.to_string(),
            });
        }

        Ok(range)
    }

    /// Parses a time range checking only its shape and ordering.
    ///
    /// Used for ranges read back from storage, which were validated when
    /// they were written.
    ///
    /// # Errors
    ///
    /// Returns `TimeRangeError::Format` or `TimeRangeError::Order`.
    pub fn parse_lenient(input: &str) -> Result<Self, TimeRangeError> {
        let format_error = || TimeRangeError::Format {
            input: input.to_string(),
        };

        let parts: Vec<&str> = input.split('-').collect();
        let [start_text, end_text] = parts.as_slice() else {
            return Err(format_error());
        };

        let start: u16 = parse_clock(start_text.trim()).ok_or_else(format_error)?;
        let end: u16 = parse_clock(end_text.trim()).ok_or_else(format_error)?;

        if start >= end {
            return Err(TimeRangeError::Order {
                start: start_text.trim().to_string(),
                end: end_text.trim().to_string(),
            });
        }

        Ok(Self { start, end })
    }

    /// Minutes after midnight at which the range starts.
    #[must_use]
    pub const fn start_minute(&self) -> u16 {
        self.start
    }

    /// Minutes after midnight at which the range ends.
    #[must_use]
    pub const fn end_minute(&self) -> u16 {
        self.end
    }

    /// Length of the range in minutes.
    #[must_use]
    pub const fn duration_minutes(&self) -> u16 {
        self.end - self.start
    }

    /// Returns whether two ranges share any instant.
    ///
    /// Touching endpoints do not count.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

impl FromStr for TimeRange {
    type Err = TimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parses `H:mm` or `HH:mm` into minutes after midnight.
fn parse_clock(text: &str) -> Option<u16> {
    let (hours, minutes) = text.split_once(':')?;

    if hours.is_empty()
        || hours.len() > 2
        || minutes.len() != 2
        || !hours.bytes().all(|b| b.is_ascii_digit())
        || !minutes.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let hours: u16 = hours.parse().ok()?;
    let minutes: u16 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    Some(hours * 60 + minutes)
}
