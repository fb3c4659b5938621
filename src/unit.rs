// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Units of elapsed time, from centuries down to nanoseconds.

use chrono::Duration;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unit in which a duration can be requested.
///
/// Calendar units (centuries to days) are measured with calendar rules;
/// clock units (hours to nanoseconds) have a fixed length.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeUnit {
    Centuries,
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
    Millis,
    Micros,
    Nanos,
}

impl TimeUnit {
    /// Every unit, coarsest first.
    pub const ALL: [TimeUnit; 11] = [
        TimeUnit::Centuries,
        TimeUnit::Years,
        TimeUnit::Months,
        TimeUnit::Weeks,
        TimeUnit::Days,
        TimeUnit::Hours,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
        TimeUnit::Millis,
        TimeUnit::Micros,
        TimeUnit::Nanos,
    ];

    /// Units of a [`Breakdown`](crate::Breakdown), coarsest first.
    pub const BREAKDOWN: [TimeUnit; 7] = [
        TimeUnit::Days,
        TimeUnit::Hours,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
        TimeUnit::Millis,
        TimeUnit::Micros,
        TimeUnit::Nanos,
    ];

    /// `true` for units whose length depends on the calendar.
    pub const fn is_calendar(self) -> bool {
        matches!(
            self,
            TimeUnit::Centuries | TimeUnit::Years | TimeUnit::Months | TimeUnit::Weeks | TimeUnit::Days
        )
    }

    /// Fixed length in nanoseconds, `None` for months and longer.
    ///
    /// Days and weeks are taken as 86 400 s and 7 days.
    pub const fn nanos(self) -> Option<i64> {
        match self {
            TimeUnit::Weeks => Some(7 * 86_400_000_000_000),
            TimeUnit::Days => Some(86_400_000_000_000),
            TimeUnit::Hours => Some(3_600_000_000_000),
            TimeUnit::Minutes => Some(60_000_000_000),
            TimeUnit::Seconds => Some(1_000_000_000),
            TimeUnit::Millis => Some(1_000_000),
            TimeUnit::Micros => Some(1_000),
            TimeUnit::Nanos => Some(1),
            TimeUnit::Centuries | TimeUnit::Years | TimeUnit::Months => None,
        }
    }

    /// Whole units in `elapsed`, truncated toward zero. `None` for
    /// variable-length units and on overflow.
    pub fn count(self, elapsed: Duration) -> Option<i64> {
        match self {
            TimeUnit::Weeks => Some(elapsed.num_weeks()),
            TimeUnit::Days => Some(elapsed.num_days()),
            TimeUnit::Hours => Some(elapsed.num_hours()),
            TimeUnit::Minutes => Some(elapsed.num_minutes()),
            TimeUnit::Seconds => Some(elapsed.num_seconds()),
            TimeUnit::Millis => Some(elapsed.num_milliseconds()),
            TimeUnit::Micros => elapsed.num_microseconds(),
            TimeUnit::Nanos => elapsed.num_nanoseconds(),
            TimeUnit::Centuries | TimeUnit::Years | TimeUnit::Months => None,
        }
    }

    /// `count` of this unit as a duration; `None` for variable-length units
    /// and on overflow.
    pub fn duration(self, count: i64) -> Option<Duration> {
        match self {
            TimeUnit::Weeks => Duration::try_weeks(count),
            TimeUnit::Days => Duration::try_days(count),
            TimeUnit::Hours => Duration::try_hours(count),
            TimeUnit::Minutes => Duration::try_minutes(count),
            TimeUnit::Seconds => Duration::try_seconds(count),
            TimeUnit::Millis => Duration::try_milliseconds(count),
            TimeUnit::Micros => Some(Duration::microseconds(count)),
            TimeUnit::Nanos => Some(Duration::nanoseconds(count)),
            TimeUnit::Centuries | TimeUnit::Years | TimeUnit::Months => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TimeUnit::Centuries => "centuries",
            TimeUnit::Years => "years",
            TimeUnit::Months => "months",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Days => "days",
            TimeUnit::Hours => "hours",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Millis => "milliseconds",
            TimeUnit::Micros => "microseconds",
            TimeUnit::Nanos => "nanoseconds",
        }
    }

    /// Short suffix used by [`Breakdown`](crate::Breakdown)'s display.
    pub const fn symbol(self) -> &'static str {
        match self {
            TimeUnit::Centuries => "c",
            TimeUnit::Years => "y",
            TimeUnit::Months => "mo",
            TimeUnit::Weeks => "w",
            TimeUnit::Days => "d",
            TimeUnit::Hours => "h",
            TimeUnit::Minutes => "m",
            TimeUnit::Seconds => "s",
            TimeUnit::Millis => "ms",
            TimeUnit::Micros => "us",
            TimeUnit::Nanos => "ns",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_ordered_coarse_to_fine() {
        let mut sorted = TimeUnit::ALL;
        sorted.sort();
        assert_eq!(sorted, TimeUnit::ALL);
        assert!(TimeUnit::BREAKDOWN.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_calendar_units() {
        assert!(TimeUnit::Months.is_calendar());
        assert!(TimeUnit::Days.is_calendar());
        assert!(!TimeUnit::Hours.is_calendar());
        assert_eq!(TimeUnit::Months.nanos(), None);
    }

    #[test]
    fn test_count_truncates_toward_zero() {
        let d = Duration::minutes(150);
        assert_eq!(TimeUnit::Hours.count(d), Some(2));
        assert_eq!(TimeUnit::Hours.count(-d), Some(-2));
        assert_eq!(TimeUnit::Days.count(d), Some(0));
        assert_eq!(TimeUnit::Micros.count(d), Some(9_000_000_000));
        assert_eq!(TimeUnit::Years.count(d), None);
    }

    #[test]
    fn test_count_and_duration_agree_with_nanos() {
        for unit in TimeUnit::BREAKDOWN {
            let one = unit.duration(1).unwrap();
            assert_eq!(one.num_nanoseconds(), unit.nanos());
            assert_eq!(unit.count(one), Some(1));
        }
    }

    #[test]
    fn test_nanos_overflow_is_none() {
        let long = Duration::days(365 * 300);
        assert_eq!(TimeUnit::Nanos.count(long), None);
        assert!(TimeUnit::Micros.count(long).is_some());
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeUnit::Millis.to_string(), "milliseconds");
        assert_eq!(TimeUnit::Micros.symbol(), "us");
    }
}
