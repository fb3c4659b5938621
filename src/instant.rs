// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Canonical instant and the representation targets it projects onto.
//!
//! [`Instant`] is the pivot of every conversion: a wall-clock date-time in
//! the configured [`Zone`](crate::Zone). Each public representation is a
//! projection of it:
//!
//! ```text
//! value → Instant → target
//! ```
//!
//! Targets implement [`FromInstant`], so a single generic
//! [`Converter::convert`](crate::Converter::convert) covers every pairing of
//! input and output representation.

use crate::value::{EpochMillis, EpochSeconds};
use crate::{Config, FormatError, Zone};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::time::SystemTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// Instant
// ═══════════════════════════════════════════════════════════════════════════

/// A wall-clock date-time in the configured zone.
///
/// Ordering follows the wall clock. Use
/// [`Calculator::compare`](crate::Calculator::compare) for ordering on the
/// absolute time line, which differs only inside repeated local hours.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Instant(NaiveDateTime);

impl Instant {
    // ── constructors ──────────────────────────────────────────────────

    #[inline]
    pub const fn new(wall: NaiveDateTime) -> Self {
        Self(wall)
    }

    /// Midnight at the start of `date`.
    #[inline]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN))
    }

    /// Build from calendar fields; `None` if any field is out of range.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, minute, second)
            .map(Self)
    }

    /// The current instant read on `zone`'s wall clock.
    pub fn now(zone: Zone) -> Self {
        Self(zone.wall_clock(Utc::now()))
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn naive(&self) -> NaiveDateTime {
        self.0
    }

    /// The calendar date (time-of-day dropped).
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    #[inline]
    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    /// Same date at midnight.
    #[inline]
    pub fn start_of_day(&self) -> Self {
        Self::from_date(self.date())
    }

    /// Last representable nanosecond of the same date.
    pub fn end_of_day(&self) -> Self {
        let next = self.date().succ_opt().map(Self::from_date);
        next.and_then(|n| n.0.checked_sub_signed(Duration::nanoseconds(1)).map(Self))
            .unwrap_or(Self(NaiveDateTime::MAX))
    }

    /// `true` if the instant's year is a Gregorian leap year.
    #[inline]
    pub fn is_leap_year(&self) -> bool {
        self.date().leap_year()
    }

    /// `self + step`, or `None` past chrono's representable range.
    #[inline]
    pub fn checked_add(self, step: Duration) -> Option<Self> {
        self.0.checked_add_signed(step).map(Self)
    }

    /// `self - step`, or `None` past chrono's representable range.
    #[inline]
    pub fn checked_sub(self, step: Duration) -> Option<Self> {
        self.0.checked_sub_signed(step).map(Self)
    }

    // ── zone projections ──────────────────────────────────────────────

    /// Resolve onto the absolute time line.
    #[inline]
    pub fn zoned(&self, zone: Zone) -> Result<DateTime<FixedOffset>, FormatError> {
        zone.attach(self.0)
    }

    #[inline]
    pub fn epoch_millis(&self, zone: Zone) -> Result<EpochMillis, FormatError> {
        zone.epoch_millis(self.0).map(EpochMillis)
    }

    /// Whole epoch seconds; sub-second precision is dropped toward the past.
    #[inline]
    pub fn epoch_seconds(&self, zone: Zone) -> Result<EpochSeconds, FormatError> {
        Ok(EpochSeconds(self.zoned(zone)?.timestamp()))
    }

    pub fn from_epoch_millis(millis: EpochMillis, zone: Zone) -> Result<Self, FormatError> {
        zone.from_epoch_millis(millis.0).map(Self)
    }

    pub fn from_epoch_seconds(seconds: EpochSeconds, zone: Zone) -> Result<Self, FormatError> {
        zone.from_epoch_seconds(seconds.0).map(Self)
    }

    /// Exact elapsed time from `self` to `later` on the absolute time line.
    pub fn elapsed_until(&self, later: &Self, zone: Zone) -> Result<Duration, FormatError> {
        Ok(later.zoned(zone)? - self.zoned(zone)?)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Generic trait implementations
// ═══════════════════════════════════════════════════════════════════════════

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────
//
// The operators panic when the result leaves chrono's range, as
// `NaiveDateTime + Duration` does. Use `checked_add` / `checked_sub` for
// untrusted steps.

impl Add<Duration> for Instant {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl AddAssign<Duration> for Instant {
    #[inline]
    fn add_assign(&mut self, rhs: Duration) {
        self.0 += rhs;
    }
}

impl Sub<Duration> for Instant {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Duration) -> Self::Output {
        Self(self.0 - rhs)
    }
}

impl SubAssign<Duration> for Instant {
    #[inline]
    fn sub_assign(&mut self, rhs: Duration) {
        self.0 -= rhs;
    }
}

/// Wall-clock difference; see [`Instant::elapsed_until`] for the zone-aware one.
impl Sub for Instant {
    type Output = Duration;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}

// ── From conversions ──────────────────────────────────────────────────────

impl From<NaiveDateTime> for Instant {
    #[inline]
    fn from(wall: NaiveDateTime) -> Self {
        Self(wall)
    }
}

impl From<NaiveDate> for Instant {
    #[inline]
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl From<Instant> for NaiveDateTime {
    #[inline]
    fn from(instant: Instant) -> Self {
        instant.0
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// FromInstant: representation targets
// ═══════════════════════════════════════════════════════════════════════════

/// A representation an [`Instant`] can be projected onto.
///
/// Projections that need a pattern, locale or zone read them from the
/// [`Config`].
pub trait FromInstant: Sized {
    fn from_instant(instant: Instant, config: &Config) -> Result<Self, FormatError>;
}

impl FromInstant for Instant {
    #[inline]
    fn from_instant(instant: Instant, _: &Config) -> Result<Self, FormatError> {
        Ok(instant)
    }
}

impl FromInstant for NaiveDate {
    #[inline]
    fn from_instant(instant: Instant, _: &Config) -> Result<Self, FormatError> {
        Ok(instant.date())
    }
}

impl FromInstant for NaiveDateTime {
    #[inline]
    fn from_instant(instant: Instant, _: &Config) -> Result<Self, FormatError> {
        Ok(instant.naive())
    }
}

impl FromInstant for EpochMillis {
    fn from_instant(instant: Instant, config: &Config) -> Result<Self, FormatError> {
        instant.epoch_millis(config.zone())
    }
}

impl FromInstant for EpochSeconds {
    fn from_instant(instant: Instant, config: &Config) -> Result<Self, FormatError> {
        instant.epoch_seconds(config.zone())
    }
}

impl FromInstant for DateTime<FixedOffset> {
    fn from_instant(instant: Instant, config: &Config) -> Result<Self, FormatError> {
        instant.zoned(config.zone())
    }
}

impl FromInstant for DateTime<Utc> {
    fn from_instant(instant: Instant, config: &Config) -> Result<Self, FormatError> {
        Ok(instant.zoned(config.zone())?.with_timezone(&Utc))
    }
}

impl FromInstant for SystemTime {
    fn from_instant(instant: Instant, config: &Config) -> Result<Self, FormatError> {
        Ok(SystemTime::from(instant.zoned(config.zone())?))
    }
}

/// Text in the configured default pattern and locale.
impl FromInstant for String {
    fn from_instant(instant: Instant, config: &Config) -> Result<Self, FormatError> {
        config
            .pattern()
            .format(&instant.zoned(config.zone())?, config.locale())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
