// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Proleptic Gregorian calendar arithmetic.
//!
//! Two different questions get two different answers here:
//!
//! * [`CalendarPeriod::between`] decomposes the distance between two dates
//!   into years, months and days ("2 years, 3 months, 10 days").
//! * [`total_months_between`] counts every whole month elapsed, regardless
//!   of how the remainder would be split.
//!
//! From 2020-01-31 to 2020-03-01 the period has no whole month (adding a
//! month to Jan 31 overflows past Mar 1) while the total count is 1.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of days in `month` of `year`, `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Add `months` to `date`, rolling an overflowing day-of-month into the
/// following month (Jan 31 + 1 month = Mar 3, or Mar 2 in leap years).
pub fn add_months_rolling(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let index = i64::from(date.year())
        .checked_mul(12)?
        .checked_add(i64::from(date.month0()))?
        .checked_add(months)?;
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month0 = u32::try_from(index.rem_euclid(12)).ok()?;
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?;
    first.checked_add_days(chrono::Days::new(u64::from(date.day0())))
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// Whole months from `start` to `end`, counting a month only once the
/// end's day and time-of-day reach the start's. Negative when `end`
/// precedes `start`.
pub fn total_months_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    let mut months = month_index(end.date()) - month_index(start.date());
    let start_key = (start.day(), start.time());
    let end_key = (end.day(), end.time());
    if months > 0 && end_key < start_key {
        months -= 1;
    } else if months < 0 && end_key > start_key {
        months += 1;
    }
    months
}

/// A years/months/days decomposition of the distance between two dates.
///
/// All components share the sign of the distance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarPeriod {
    pub years: i64,
    pub months: i64,
    pub days: i64,
}

impl CalendarPeriod {
    /// Decompose the distance from `start` to `end`.
    ///
    /// Whole years are taken first, then whole months, each only counted
    /// when adding it to `start` (with day-of-month rollover) does not pass
    /// `end`. The remaining days complete the distance exactly. If `end`
    /// precedes `start` the decomposition of the reverse distance is
    /// negated.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        if end < start {
            return Self::between(end, start).negated();
        }

        let fits = |months: i64| add_months_rolling(start, months).is_some_and(|d| d <= end);

        let mut years = i64::from(end.year() - start.year());
        while years > 0 && !fits(years * 12) {
            years -= 1;
        }

        let mut months = (month_index(end) - month_index(start) - years * 12).clamp(0, 12);
        while months > 0 && !fits(years * 12 + months) {
            months -= 1;
        }

        let anchor = add_months_rolling(start, years * 12 + months).unwrap_or(start);
        let days = end.signed_duration_since(anchor).num_days();
        Self {
            years,
            months,
            days,
        }
    }

    /// Same decomposition with every component negated.
    pub fn negated(self) -> Self {
        Self {
            years: -self.years,
            months: -self.months,
            days: -self.days,
        }
    }

    /// `true` when every component is zero.
    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// Whole weeks within the days component.
    #[inline]
    pub fn weeks(&self) -> i64 {
        self.days / 7
    }

    /// Whole centuries within the years component.
    #[inline]
    pub fn centuries(&self) -> i64 {
        self.years / 100
    }
}

impl fmt::Display for CalendarPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} years, {} months, {} days",
            self.years, self.months, self.days
        )
    }
}
