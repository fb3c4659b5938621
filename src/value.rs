// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Representations accepted by conversions and arithmetic.
//!
//! Every input is funnelled into the closed tagged union [`TimeValue`]:
//!
//! | Variant | Built from | Meaning |
//! |---------|------------|---------|
//! | `Absent` | `None`, `TimeValue::Absent` | no value |
//! | `Date` | [`NaiveDate`] | calendar date, midnight |
//! | `DateTime` | [`NaiveDateTime`] | wall-clock date-time |
//! | `EpochMillis` | [`EpochMillis`], bare `i64` with > 10 digits | ms since 1970-01-01 |
//! | `EpochSeconds` | [`EpochSeconds`], bare `i64` with ≤ 10 digits | s since 1970-01-01 |
//! | `Timestamp` | [`DateTime<Utc>`], [`SystemTime`] | absolute timestamp object |
//! | `Text` | `&str`, `String` | text read with a pattern |
//!
//! Bare integers go through [`TimeValue::from_epoch`], which guesses the
//! unit from the number of decimal digits. Wrap the value in
//! [`EpochMillis`] or [`EpochSeconds`] to state the unit explicitly.

use crate::Instant;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::trace;
use std::fmt;
use std::time::SystemTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest number of decimal digits still read as epoch seconds.
pub const EPOCH_SECONDS_MAX_DIGITS: u32 = 10;

/// Milliseconds since the Unix epoch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpochMillis(pub i64);

/// Seconds since the Unix epoch ("Unix time").
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EpochSeconds(pub i64);

impl EpochSeconds {
    /// Same instant in milliseconds, `None` on overflow.
    #[inline]
    pub fn to_millis(self) -> Option<EpochMillis> {
        self.0.checked_mul(1000).map(EpochMillis)
    }
}

impl EpochMillis {
    /// Whole seconds, rounding toward the past.
    #[inline]
    pub fn to_seconds(self) -> EpochSeconds {
        EpochSeconds(self.0.div_euclid(1000))
    }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms", self.0)
    }
}

impl fmt::Display for EpochSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} s", self.0)
    }
}

/// Number of decimal digits in `|n|` (`0` has one digit).
pub fn decimal_digits(n: i64) -> u32 {
    n.unsigned_abs().checked_ilog10().map_or(1, |d| d + 1)
}

/// A time point in any supported representation, or its absence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeValue {
    #[default]
    Absent,
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    EpochMillis(EpochMillis),
    EpochSeconds(EpochSeconds),
    Timestamp(DateTime<Utc>),
    Text(String),
}

impl TimeValue {
    /// Tag a bare epoch number by its digit count: up to
    /// [`EPOCH_SECONDS_MAX_DIGITS`] digits is seconds, more is milliseconds.
    pub fn from_epoch(n: i64) -> Self {
        if decimal_digits(n) <= EPOCH_SECONDS_MAX_DIGITS {
            trace!("epoch value {n} read as seconds");
            TimeValue::EpochSeconds(EpochSeconds(n))
        } else {
            trace!("epoch value {n} read as milliseconds");
            TimeValue::EpochMillis(EpochMillis(n))
        }
    }

    /// `true` for `Absent` and for blank text.
    pub fn is_absent(&self) -> bool {
        match self {
            TimeValue::Absent => true,
            TimeValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }

    /// Short name of the representation, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            TimeValue::Absent => "absent",
            TimeValue::Date(_) => "date",
            TimeValue::DateTime(_) => "date-time",
            TimeValue::EpochMillis(_) => "epoch-millis",
            TimeValue::EpochSeconds(_) => "epoch-seconds",
            TimeValue::Timestamp(_) => "timestamp",
            TimeValue::Text(_) => "text",
        }
    }
}

impl From<NaiveDate> for TimeValue {
    fn from(value: NaiveDate) -> Self {
        TimeValue::Date(value)
    }
}

impl From<NaiveDateTime> for TimeValue {
    fn from(value: NaiveDateTime) -> Self {
        TimeValue::DateTime(value)
    }
}

impl From<Instant> for TimeValue {
    fn from(value: Instant) -> Self {
        TimeValue::DateTime(value.naive())
    }
}

impl From<EpochMillis> for TimeValue {
    fn from(value: EpochMillis) -> Self {
        TimeValue::EpochMillis(value)
    }
}

impl From<EpochSeconds> for TimeValue {
    fn from(value: EpochSeconds) -> Self {
        TimeValue::EpochSeconds(value)
    }
}

impl From<i64> for TimeValue {
    fn from(value: i64) -> Self {
        TimeValue::from_epoch(value)
    }
}

impl From<DateTime<Utc>> for TimeValue {
    fn from(value: DateTime<Utc>) -> Self {
        TimeValue::Timestamp(value)
    }
}

impl From<SystemTime> for TimeValue {
    fn from(value: SystemTime) -> Self {
        TimeValue::Timestamp(DateTime::<Utc>::from(value))
    }
}

impl From<&str> for TimeValue {
    fn from(value: &str) -> Self {
        TimeValue::Text(value.to_owned())
    }
}

impl From<String> for TimeValue {
    fn from(value: String) -> Self {
        TimeValue::Text(value)
    }
}

impl From<&TimeValue> for TimeValue {
    fn from(value: &TimeValue) -> Self {
        value.clone()
    }
}

impl<T: Into<TimeValue>> From<Option<T>> for TimeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(TimeValue::Absent, Into::into)
    }
}
