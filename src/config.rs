// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Converter configuration: default pattern, default locale and zone.
//!
//! A [`Config`] is an ordinary value, built once and then handed to a
//! [`Converter`](crate::Converter) or [`Calculator`](crate::Calculator).
//! The zone is explicit so that behaviour does not silently depend on the
//! process environment; [`Zone::Local`] opts back into the platform zone.

use crate::{FormatError, Pattern};
use chrono::{
    DateTime, Duration, FixedOffset, Local, LocalResult, Locale, NaiveDateTime, Offset, TimeZone,
    Utc,
};
use log::trace;

/// How wall-clock date-times map onto the absolute time line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// The platform's local time zone.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl Zone {
    /// UTC as a fixed zone.
    pub fn utc() -> Self {
        Zone::Fixed(Utc.fix())
    }

    /// Fixed offset of `seconds` east of UTC, `None` if out of range.
    pub fn east(seconds: i32) -> Option<Self> {
        FixedOffset::east_opt(seconds).map(Zone::Fixed)
    }

    /// Attach this zone to a wall-clock date-time.
    ///
    /// Ambiguous local times resolve to the earliest instant. Local times
    /// skipped by a forward transition are moved one hour later.
    pub fn attach(&self, wall: NaiveDateTime) -> Result<DateTime<FixedOffset>, FormatError> {
        match self {
            Zone::Fixed(offset) => offset
                .from_local_datetime(&wall)
                .earliest()
                .ok_or_else(|| FormatError::out_of_range(wall)),
            Zone::Local => resolve_local(wall, |w| {
                Local.from_local_datetime(w).map(|dt| dt.fixed_offset())
            }),
        }
    }

    /// Wall-clock reading of an absolute UTC instant in this zone.
    pub fn wall_clock(&self, utc: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Zone::Fixed(offset) => utc.with_timezone(offset).naive_local(),
            Zone::Local => utc.with_timezone(&Local).naive_local(),
        }
    }

    /// Milliseconds since the Unix epoch for a wall-clock date-time.
    pub fn epoch_millis(&self, wall: NaiveDateTime) -> Result<i64, FormatError> {
        Ok(self.attach(wall)?.timestamp_millis())
    }

    /// Wall-clock date-time for milliseconds since the Unix epoch.
    pub fn from_epoch_millis(&self, millis: i64) -> Result<NaiveDateTime, FormatError> {
        DateTime::from_timestamp_millis(millis)
            .map(|utc| self.wall_clock(utc))
            .ok_or_else(|| FormatError::out_of_range(format_args!("epoch millis {millis}")))
    }

    /// Wall-clock date-time for seconds since the Unix epoch.
    pub fn from_epoch_seconds(&self, seconds: i64) -> Result<NaiveDateTime, FormatError> {
        DateTime::from_timestamp(seconds, 0)
            .map(|utc| self.wall_clock(utc))
            .ok_or_else(|| FormatError::out_of_range(format_args!("epoch seconds {seconds}")))
    }
}

/// Resolve a wall-clock reading through a zone lookup.
///
/// The earliest of two readings wins. A reading inside a gap is retried one
/// hour later.
fn resolve_local<F>(wall: NaiveDateTime, lookup: F) -> Result<DateTime<FixedOffset>, FormatError>
where
    F: Fn(&NaiveDateTime) -> LocalResult<DateTime<FixedOffset>>,
{
    if let Some(dt) = lookup(&wall).earliest() {
        return Ok(dt);
    }
    let shifted = wall
        .checked_add_signed(Duration::hours(1))
        .ok_or_else(|| FormatError::out_of_range(wall))?;
    trace!("local time {wall} falls in a zone gap, using {shifted}");
    lookup(&shifted)
        .earliest()
        .ok_or_else(|| FormatError::out_of_range(wall))
}

/// Defaults applied by conversions that are not given explicit arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pattern: Pattern,
    locale: Locale,
    zone: Zone,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pattern: Pattern::default(),
            locale: Locale::en_US,
            zone: Zone::default(),
        }
    }
}

impl Config {
    /// Default configuration: `yyyy-MM-dd`, `en_US`, local zone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default pattern.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, FormatError> {
        self.pattern = Pattern::compile(pattern)?;
        Ok(self)
    }

    /// Replace the default locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Replace the default locale by its POSIX name, e.g. `"fr_FR"`.
    pub fn with_locale_name(self, name: &str) -> Result<Self, FormatError> {
        let locale = parse_locale(name)?;
        Ok(self.with_locale(locale))
    }

    /// Replace the zone.
    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    #[inline]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[inline]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[inline]
    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub(crate) fn set_pattern(&mut self, pattern: Pattern) {
        self.pattern = pattern;
    }

    pub(crate) fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }
}

/// Look up a chrono locale by its POSIX name.
pub fn parse_locale(name: &str) -> Result<Locale, FormatError> {
    Locale::try_from(name).map_err(|_| FormatError::UnknownLocale(name.to_owned()))
}
