// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The stretch of time between two instants.
//!
//! A [`Span`] is what the arithmetic layer works on once both operands are
//! normalised: the exact elapsed duration, its greedy [`Breakdown`], the
//! calendar [`CalendarPeriod`] between the two dates, and a few interval
//! set operations.

use crate::{Breakdown, CalendarPeriod, FormatError, Instant, Zone};
use chrono::Duration;
use qtty::{Day, Days, Seconds};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Two instants, `start` then `end`. `end` may precede `start`, in which
/// case every measurement is negative.
///
/// # Examples
///
/// ```
/// use datekit::{Instant, Span, Zone};
///
/// let start = Instant::from_ymd_hms(2021, 1, 1, 0, 0, 0).unwrap();
/// let end = Instant::from_ymd_hms(2021, 1, 2, 12, 0, 0).unwrap();
/// let span = Span::new(start, end);
///
/// assert_eq!(span.elapsed(Zone::utc()).unwrap().num_hours(), 36);
/// assert_eq!(span.breakdown(Zone::utc()).unwrap().to_string(), "1d 12h");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    pub start: Instant,
    pub end: Instant,
}

impl Span {
    pub fn new(start: Instant, end: Instant) -> Self {
        Span { start, end }
    }

    /// Span whose `start` is the earlier of the two instants.
    pub fn ordered(a: Instant, b: Instant) -> Self {
        if a <= b {
            Span::new(a, b)
        } else {
            Span::new(b, a)
        }
    }

    /// `true` if `end` precedes `start`.
    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.end < self.start
    }

    /// Exact elapsed time on the absolute time line of `zone`.
    pub fn elapsed(&self, zone: Zone) -> Result<Duration, FormatError> {
        self.start.elapsed_until(&self.end, zone)
    }

    /// Elapsed time as a fractional number of days.
    pub fn elapsed_days(&self, zone: Zone) -> Result<Days, FormatError> {
        let elapsed = self.elapsed(zone)?;
        let seconds = elapsed.num_seconds() as f64 + f64::from(elapsed.subsec_nanos()) / 1e9;
        Ok(Seconds::new(seconds).to::<Day>())
    }

    pub fn breakdown(&self, zone: Zone) -> Result<Breakdown, FormatError> {
        self.elapsed(zone).map(Breakdown::from_elapsed)
    }

    /// Years/months/days between the two dates (time-of-day ignored).
    pub fn period(&self) -> CalendarPeriod {
        CalendarPeriod::between(self.start.date(), self.end.date())
    }

    /// Half-open containment: `start <= instant < end`.
    pub fn contains(&self, instant: &Instant) -> bool {
        self.start <= *instant && *instant < self.end
    }

    /// The overlapping sub-span of `self` and `other`.
    ///
    /// Spans are treated as half-open ranges `[start, end)`: if one ends
    /// exactly when the other starts, the intersection is empty and `None`
    /// is returned.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(Self::new(start, end))
        } else {
            None
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32) -> Instant {
        Instant::from_ymd_hms(2021, 3, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_span_creation() {
        let span = Span::new(at(1, 0), at(2, 0));
        assert_eq!(span.start, at(1, 0));
        assert_eq!(span.end, at(2, 0));
        assert!(!span.is_reversed());
        assert_eq!(Span::ordered(at(2, 0), at(1, 0)), span);
    }

    #[test]
    fn test_elapsed_and_days() {
        let span = Span::new(at(1, 0), at(2, 12));
        assert_eq!(span.elapsed(Zone::utc()).unwrap(), Duration::hours(36));
        assert!((span.elapsed_days(Zone::utc()).unwrap() - Days::new(1.5)).abs() < Days::new(1e-12));
    }

    #[test]
    fn test_reversed_span_is_negative() {
        let span = Span::new(at(2, 12), at(1, 0));
        assert!(span.is_reversed());
        assert_eq!(span.elapsed(Zone::utc()).unwrap(), Duration::hours(-36));
        let b = span.breakdown(Zone::utc()).unwrap();
        assert_eq!((b.days(), b.hours()), (-1, -12));
        assert_eq!(span.period().days, -1);
    }

    #[test]
    fn test_offset_zone_does_not_change_elapsed() {
        let span = Span::new(at(1, 0), at(2, 12));
        let zone = Zone::east(9 * 3600).unwrap();
        assert_eq!(span.elapsed(zone).unwrap(), span.elapsed(Zone::utc()).unwrap());
    }

    #[test]
    fn test_span_display() {
        let span = Span::new(at(1, 0), at(2, 0));
        let display = span.to_string();
        assert!(display.contains("2021-03-01 00:00:00"));
        assert!(display.contains("to"));
    }

    #[test]
    fn test_contains_is_half_open() {
        let span = Span::new(at(1, 0), at(2, 0));
        assert!(span.contains(&at(1, 0)));
        assert!(span.contains(&at(1, 23)));
        assert!(!span.contains(&at(2, 0)));
    }

    #[test]
    fn test_intersection_overlap() {
        let a = Span::new(at(1, 0), at(5, 0));
        let b = Span::new(at(3, 0), at(8, 0));
        let overlap = a.intersection(&b).expect("expected overlap");
        assert_eq!(overlap, Span::new(at(3, 0), at(5, 0)));
    }

    #[test]
    fn test_intersection_disjoint_and_touching() {
        let a = Span::new(at(1, 0), at(3, 0));
        assert_eq!(a.intersection(&Span::new(at(5, 0), at(8, 0))), None);
        assert_eq!(a.intersection(&Span::new(at(3, 0), at(8, 0))), None);
    }
}
