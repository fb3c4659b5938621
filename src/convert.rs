// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Conversion between temporal representations.
//!
//! [`Converter`] normalises any [`TimeValue`] onto the canonical
//! [`Instant`] and projects it onto any [`FromInstant`] target. Every
//! operation returns `Ok(None)` for absent input (`None`, empty or blank
//! text) and `Err` only for a [`FormatError`].
//!
//! ```
//! use chrono::NaiveDate;
//! use datekit::{Config, Converter, EpochSeconds, Zone};
//!
//! let conv = Converter::new(Config::new().with_zone(Zone::utc()));
//! let secs = conv.to_epoch_seconds("2021-06-15").unwrap();
//! assert_eq!(secs, Some(EpochSeconds(1_623_715_200)));
//!
//! let date = conv.to_date(1_623_715_200_i64).unwrap();
//! assert_eq!(date, NaiveDate::from_ymd_opt(2021, 6, 15));
//! ```

use crate::value::{EpochMillis, EpochSeconds};
use crate::{Config, FormatError, FromInstant, Instant, Pattern, TimeValue};
use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, Utc};
use std::time::SystemTime;

/// The conversion layer: a [`Config`] plus total conversion functions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Converter {
    config: Config,
}

impl Converter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the default pattern used for text without an explicit one.
    pub fn set_default_pattern(&mut self, pattern: &str) -> Result<(), FormatError> {
        self.config.set_pattern(Pattern::compile(pattern)?);
        Ok(())
    }

    /// Replace the default locale used when rendering text.
    pub fn set_default_locale(&mut self, locale: Locale) {
        self.config.set_locale(locale);
    }

    /// The current instant on the configured zone's wall clock.
    pub fn now(&self) -> Instant {
        Instant::now(self.config.zone())
    }

    // ── normalisation ─────────────────────────────────────────────────

    /// Normalise any representation onto the canonical instant; text is
    /// read with the default pattern.
    pub fn to_instant(&self, value: impl Into<TimeValue>) -> Result<Option<Instant>, FormatError> {
        self.resolve(value.into(), self.config.pattern())
    }

    /// Like [`to_instant`](Self::to_instant), reading text with `pattern`.
    pub fn to_instant_with(
        &self,
        value: impl Into<TimeValue>,
        pattern: &str,
    ) -> Result<Option<Instant>, FormatError> {
        self.resolve(value.into(), &Pattern::compile(pattern)?)
    }

    /// Parse text against an explicit pattern. Blank text is absent.
    pub fn parse(&self, text: &str, pattern: &str) -> Result<Option<Instant>, FormatError> {
        self.to_instant_with(text, pattern)
    }

    fn resolve(&self, value: TimeValue, pattern: &Pattern) -> Result<Option<Instant>, FormatError> {
        let zone = self.config.zone();
        let instant = match value {
            TimeValue::Absent => return Ok(None),
            TimeValue::Date(date) => Instant::from_date(date),
            TimeValue::DateTime(wall) => Instant::new(wall),
            TimeValue::EpochMillis(millis) => Instant::from_epoch_millis(millis, zone)?,
            TimeValue::EpochSeconds(seconds) => Instant::from_epoch_seconds(seconds, zone)?,
            TimeValue::Timestamp(utc) => Instant::new(zone.wall_clock(utc)),
            TimeValue::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                Instant::new(pattern.parse(text, zone)?)
            }
        };
        Ok(Some(instant))
    }

    // ── projection ────────────────────────────────────────────────────

    /// Convert any value to any [`FromInstant`] target through the
    /// canonical instant.
    pub fn convert<T: FromInstant>(
        &self,
        value: impl Into<TimeValue>,
    ) -> Result<Option<T>, FormatError> {
        self.to_instant(value)?
            .map(|instant| T::from_instant(instant, &self.config))
            .transpose()
    }

    /// Calendar date; the time-of-day is dropped.
    pub fn to_date(&self, value: impl Into<TimeValue>) -> Result<Option<NaiveDate>, FormatError> {
        self.convert(value)
    }

    pub fn to_datetime(
        &self,
        value: impl Into<TimeValue>,
    ) -> Result<Option<NaiveDateTime>, FormatError> {
        self.convert(value)
    }

    pub fn to_epoch_millis(
        &self,
        value: impl Into<TimeValue>,
    ) -> Result<Option<EpochMillis>, FormatError> {
        self.convert(value)
    }

    /// Unix time; sub-second precision is dropped.
    pub fn to_epoch_seconds(
        &self,
        value: impl Into<TimeValue>,
    ) -> Result<Option<EpochSeconds>, FormatError> {
        self.convert(value)
    }

    pub fn to_timestamp(
        &self,
        value: impl Into<TimeValue>,
    ) -> Result<Option<DateTime<Utc>>, FormatError> {
        self.convert(value)
    }

    pub fn to_system_time(
        &self,
        value: impl Into<TimeValue>,
    ) -> Result<Option<SystemTime>, FormatError> {
        self.convert(value)
    }

    /// Text in the default pattern and locale.
    pub fn to_text(&self, value: impl Into<TimeValue>) -> Result<Option<String>, FormatError> {
        self.convert(value)
    }

    /// Text in an explicit pattern and locale. Input text is still read
    /// with the default pattern.
    pub fn to_text_with(
        &self,
        value: impl Into<TimeValue>,
        pattern: &str,
        locale: Locale,
    ) -> Result<Option<String>, FormatError> {
        let pattern = Pattern::compile(pattern)?;
        self.to_instant(value)?
            .map(|instant| self.render(&instant, &pattern, locale))
            .transpose()
    }

    /// Render an instant with `pattern` and `locale`.
    pub fn format(
        &self,
        instant: &Instant,
        pattern: &str,
        locale: Locale,
    ) -> Result<String, FormatError> {
        self.render(instant, &Pattern::compile(pattern)?, locale)
    }

    fn render(
        &self,
        instant: &Instant,
        pattern: &Pattern,
        locale: Locale,
    ) -> Result<String, FormatError> {
        pattern.format(&instant.zoned(self.config.zone())?, locale)
    }
}

impl From<Config> for Converter {
    fn from(config: Config) -> Self {
        Self::new(config)
    }
}
