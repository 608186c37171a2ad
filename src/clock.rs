/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Simulated wall-clock time.
//!
//! All times in the simulation are 4-digit `HHMM` strings on a single day.
//! [`ClockTime`] is the parsed form, stored as minutes since midnight, so that
//! ordering, differences and additions are plain integer arithmetic.
//!
//! Differences never wrap around midnight; additions wrap silently modulo
//! one day.
//!
//! # Examples
//!
//! ```
//! use fulfillment_rs::clock::{ClockTime, add_minutes, time_difference};
//!
//! assert_eq!(time_difference("0900", "0905").unwrap(), 5);
//! assert_eq!(add_minutes("2359", 1).unwrap(), "0000");
//!
//! let t: ClockTime = "0905".parse().unwrap();
//! assert_eq!(t.minutes_since_midnight(), 545);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of minutes in one simulated day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Errors produced when parsing an `HHMM` time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    /// The input is not exactly four ASCII digits.
    #[error("invalid time format '{0}': expected 4-digit HHMM")]
    InvalidFormat(String),

    /// Hours or minutes are outside the valid range of a day.
    #[error("time '{0}' is out of range: hours must be 00-23 and minutes 00-59")]
    OutOfRange(String),
}

/// A time of day with minute resolution.
///
/// Ordering is chronological, which for well-formed `HHMM` strings is the
/// same as lexicographic ordering of their text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight, `0000`.
    pub const MIDNIGHT: Self = Self(0);

    /// Last minute of the day, `2359`.
    pub const END_OF_DAY: Self = Self((MINUTES_PER_DAY - 1) as u16);

    /// Builds a time from hour and minute components.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::OutOfRange`] if `hour > 23` or `minute > 59`.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, ClockError> {
        if hour > 23 || minute > 59 {
            return Err(ClockError::OutOfRange(format!("{hour:02}{minute:02}")));
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    /// Minutes elapsed since midnight.
    #[inline]
    #[must_use]
    pub fn minutes_since_midnight(self) -> u32 {
        u32::from(self.0)
    }

    /// Hour component (0-23).
    #[inline]
    #[must_use]
    pub fn hour(self) -> u32 {
        self.minutes_since_midnight() / 60
    }

    /// Minute component (0-59).
    #[inline]
    #[must_use]
    pub fn minute(self) -> u32 {
        self.minutes_since_midnight() % 60
    }

    /// Absolute distance in minutes between two times of the same day.
    ///
    /// Symmetric, and never wraps around midnight: `2355` and `0005` are
    /// 1430 minutes apart.
    #[inline]
    #[must_use]
    pub fn difference(self, other: Self) -> u32 {
        self.minutes_since_midnight()
            .abs_diff(other.minutes_since_midnight())
    }

    /// Returns this time advanced by `minutes`, wrapping past midnight.
    #[must_use]
    pub fn add_minutes(self, minutes: u32) -> Self {
        let total = (self.minutes_since_midnight() + minutes % MINUTES_PER_DAY) % MINUTES_PER_DAY;
        Self(total as u16)
    }
}

impl FromStr for ClockTime {
    type Err = ClockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(ClockError::InvalidFormat(s.to_string()));
        }
        let digit = |i: usize| u32::from(bytes[i] - b'0');
        let hour = digit(0) * 10 + digit(1);
        let minute = digit(2) * 10 + digit(3);
        Self::from_hm(hour, minute).map_err(|_| ClockError::OutOfRange(s.to_string()))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ClockError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.hour(), self.minute())
    }
}

/// Absolute difference in minutes between two `HHMM` strings.
///
/// # Errors
///
/// Returns a [`ClockError`] if either argument is not a valid `HHMM` time.
pub fn time_difference(a: &str, b: &str) -> Result<u32, ClockError> {
    let a: ClockTime = a.parse()?;
    let b: ClockTime = b.parse()?;
    Ok(a.difference(b))
}

/// Adds `minutes` to an `HHMM` string, wrapping hours modulo 24.
///
/// # Errors
///
/// Returns a [`ClockError`] if `time` is not a valid `HHMM` time.
pub fn add_minutes(time: &str, minutes: u32) -> Result<String, ClockError> {
    let time: ClockTime = time.parse()?;
    Ok(time.add_minutes(minutes).to_string())
}
