// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date/time convenience primitives.
//!
//! This crate converts between the usual ways of writing down a point in
//! time and measures the distance between two of them, whatever
//! representation each one arrives in.
//!
//! # Core types
//!
//! - [`Instant`]: canonical wall-clock date-time every conversion pivots on.
//! - [`TimeValue`]: tagged union of every accepted representation (or its absence).
//! - [`Converter`]: converts any representation to any other.
//! - [`Calculator`]: orders and measures pairs of values in any representation.
//! - [`Config`]: default pattern, default locale and [`Zone`].
//! - [`Pattern`]: compiled `yyyy-MM-dd HH:mm:ss`-style template.
//! - [`Span`], [`Breakdown`], [`CalendarPeriod`]: measurement results.
//!
//! # Representations
//!
//! | Representation | Rust type | Relation to [`Instant`] |
//! |----------------|-----------|-------------------------|
//! | Calendar date | [`chrono::NaiveDate`] | instant truncated to midnight |
//! | Date-time | [`chrono::NaiveDateTime`] | the instant itself |
//! | Epoch milliseconds | [`EpochMillis`] | through the zone's offset |
//! | Epoch seconds | [`EpochSeconds`] | milliseconds ÷ 1000 |
//! | Timestamp object | [`chrono::DateTime<Utc>`](chrono::DateTime), [`std::time::SystemTime`] | through the zone's offset |
//! | Text | `&str` / `String` | rendered/parsed with (pattern, locale) |
//!
//! A bare `i64` is read as epoch seconds when it has at most ten decimal
//! digits and as milliseconds otherwise; wrap it in [`EpochMillis`] or
//! [`EpochSeconds`] to avoid the guess.
//!
//! # Absence
//!
//! `None`, [`TimeValue::Absent`] and blank text are absent values. Every
//! conversion and measurement maps them to `Ok(None)`; only
//! [`FormatError`] is ever returned as an error.
//!
//! ```
//! use datekit::{Calculator, Config, TimeUnit, Zone};
//!
//! let calc = Calculator::new(Config::new().with_zone(Zone::utc()));
//! let months = calc.duration_in(TimeUnit::Months, "2020-01-31", "2020-03-01").unwrap();
//! let total = calc.total_duration_in(TimeUnit::Months, "2020-01-31", "2020-03-01").unwrap();
//! assert_eq!((months, total), (Some(0), Some(1)));
//! ```

mod breakdown;
pub mod calendar;
mod calc;
mod config;
mod convert;
mod error;
pub(crate) mod instant;
mod pattern;
mod span;
mod unit;
pub(crate) mod value;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use breakdown::Breakdown;
pub use calc::Calculator;
pub use calendar::CalendarPeriod;
pub use chrono::Locale;
pub use config::{parse_locale, Config, Zone};
pub use convert::Converter;
pub use error::FormatError;
pub use instant::{FromInstant, Instant};
pub use pattern::{Pattern, DEFAULT_PATTERN};
pub use span::Span;
pub use unit::TimeUnit;
pub use value::{decimal_digits, EpochMillis, EpochSeconds, TimeValue, EPOCH_SECONDS_MAX_DIGITS};
