// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Ordering and elapsed-time measurements between two time points.
//!
//! [`Calculator`] accepts operands in any representation, normalises both
//! through its [`Converter`] and computes once on the canonical
//! [`Instant`]s. Absent operands make the result `None`; unreadable ones
//! surface the converter's [`FormatError`].
//!
//! Two families of unit durations are offered because they answer
//! different questions:
//!
//! | Method | Calendar units | Clock units |
//! |--------|----------------|-------------|
//! | [`duration_in`](Calculator::duration_in) | component of the years/months/days period | exact elapsed ÷ unit |
//! | [`total_duration_in`](Calculator::total_duration_in) | every whole unit elapsed | exact elapsed ÷ unit |

use crate::calendar::total_months_between;
use crate::{
    Breakdown, CalendarPeriod, Config, Converter, FormatError, Instant, Span, TimeUnit, TimeValue,
};
use chrono::{Duration, Locale, Months};
use std::cmp::Ordering;

/// The arithmetic layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calculator {
    converter: Converter,
}

impl Calculator {
    pub fn new(config: Config) -> Self {
        Self {
            converter: Converter::new(config),
        }
    }

    #[inline]
    pub fn converter(&self) -> &Converter {
        &self.converter
    }

    #[inline]
    pub fn config(&self) -> &Config {
        self.converter.config()
    }

    pub fn set_default_pattern(&mut self, pattern: &str) -> Result<(), FormatError> {
        self.converter.set_default_pattern(pattern)
    }

    pub fn set_default_locale(&mut self, locale: Locale) {
        self.converter.set_default_locale(locale);
    }

    fn pair(
        &self,
        a: impl Into<TimeValue>,
        b: impl Into<TimeValue>,
    ) -> Result<Option<(Instant, Instant)>, FormatError> {
        let a = self.converter.to_instant(a)?;
        let b = self.converter.to_instant(b)?;
        Ok(a.zip(b))
    }

    /// Normalise both operands into a [`Span`] from `a` to `b`.
    pub fn span(
        &self,
        a: impl Into<TimeValue>,
        b: impl Into<TimeValue>,
    ) -> Result<Option<Span>, FormatError> {
        Ok(self.pair(a, b)?.map(|(a, b)| Span::new(a, b)))
    }

    /// Exact elapsed time from `a` to `b`.
    pub fn elapsed(
        &self,
        a: impl Into<TimeValue>,
        b: impl Into<TimeValue>,
    ) -> Result<Option<Duration>, FormatError> {
        let zone = self.config().zone();
        self.span(a, b)?.map(|span| span.elapsed(zone)).transpose()
    }

    /// Chronological order of `a` relative to `b`.
    pub fn compare(
        &self,
        a: impl Into<TimeValue>,
        b: impl Into<TimeValue>,
    ) -> Result<Option<Ordering>, FormatError> {
        Ok(self
            .elapsed(a, b)?
            .map(|elapsed| Duration::zero().cmp(&elapsed)))
    }

    /// Greedy days → nanoseconds split of the elapsed time from `a` to `b`.
    pub fn breakdown(
        &self,
        a: impl Into<TimeValue>,
        b: impl Into<TimeValue>,
    ) -> Result<Option<Breakdown>, FormatError> {
        Ok(self.elapsed(a, b)?.map(Breakdown::from_elapsed))
    }

    /// Years/months/days between the dates of `a` and `b`.
    pub fn period(
        &self,
        a: impl Into<TimeValue>,
        b: impl Into<TimeValue>,
    ) -> Result<Option<CalendarPeriod>, FormatError> {
        Ok(self.span(a, b)?.map(|span| span.period()))
    }

    /// Signed duration from `a` to `b` in `unit`.
    ///
    /// Calendar units return the matching component of the
    /// [`CalendarPeriod`] between the two dates (weeks are whole weeks of
    /// the days component, centuries whole centuries of the years
    /// component). Clock units divide the exact elapsed time.
    pub fn duration_in(
        &self,
        unit: TimeUnit,
        a: impl Into<TimeValue>,
        b: impl Into<TimeValue>,
    ) -> Result<Option<i64>, FormatError> {
        let Some(span) = self.span(a, b)? else {
            return Ok(None);
        };
        let count = match unit {
            TimeUnit::Centuries => span.period().centuries(),
            TimeUnit::Years => span.period().years,
            TimeUnit::Months => span.period().months,
            TimeUnit::Weeks => span.period().weeks(),
            TimeUnit::Days => span.period().days,
            clock => self.clock_count(clock, &span)?,
        };
        Ok(Some(count))
    }

    /// Signed count of every whole `unit` elapsed from `a` to `b`.
    ///
    /// Months count a month once the end's day and time-of-day reach the
    /// start's; years and centuries follow from the month count. Weeks and
    /// days divide the wall-clock difference, so a day that gains or loses
    /// an hour to a zone transition still counts once. Shorter units divide
    /// the exact elapsed time.
    pub fn total_duration_in(
        &self,
        unit: TimeUnit,
        a: impl Into<TimeValue>,
        b: impl Into<TimeValue>,
    ) -> Result<Option<i64>, FormatError> {
        let Some(span) = self.span(a, b)? else {
            return Ok(None);
        };
        let months = || total_months_between(span.start.naive(), span.end.naive());
        let count = match unit {
            TimeUnit::Centuries => months() / 1200,
            TimeUnit::Years => months() / 12,
            TimeUnit::Months => months(),
            TimeUnit::Weeks | TimeUnit::Days => {
                let wall = span.end - span.start;
                unit.count(wall).ok_or_else(|| {
                    FormatError::out_of_range(format_args!("{span} in {unit}"))
                })?
            }
            fixed => self.clock_count(fixed, &span)?,
        };
        Ok(Some(count))
    }

    fn clock_count(&self, unit: TimeUnit, span: &Span) -> Result<i64, FormatError> {
        let elapsed = span.elapsed(self.config().zone())?;
        unit.count(elapsed)
            .ok_or_else(|| FormatError::out_of_range(format_args!("{span} in {unit}")))
    }

    /// Move `value` by `amount` of `unit`.
    ///
    /// Calendar months and longer clamp to the end of the target month
    /// (Jan 31 + 1 month = Feb 28/29); other units move the wall clock by a
    /// fixed length.
    pub fn shift(
        &self,
        value: impl Into<TimeValue>,
        unit: TimeUnit,
        amount: i64,
    ) -> Result<Option<Instant>, FormatError> {
        let Some(instant) = self.converter.to_instant(value)? else {
            return Ok(None);
        };
        let out_of_range =
            || FormatError::out_of_range(format_args!("{instant} shifted by {amount} {unit}"));
        let wall = instant.naive();

        let months_per_unit = match unit {
            TimeUnit::Centuries => Some(1200),
            TimeUnit::Years => Some(12),
            TimeUnit::Months => Some(1),
            _ => None,
        };
        let shifted = match months_per_unit {
            Some(per) => {
                let months = amount
                    .checked_mul(per)
                    .and_then(|m| u32::try_from(m.unsigned_abs()).ok())
                    .map(Months::new)
                    .ok_or_else(out_of_range)?;
                if amount < 0 {
                    wall.checked_sub_months(months)
                } else {
                    wall.checked_add_months(months)
                }
            }
            None => unit
                .duration(amount)
                .and_then(|step| wall.checked_add_signed(step)),
        };
        shifted.map(|w| Some(Instant::new(w))).ok_or_else(out_of_range)
    }

    /// `true` if `value` lies within `[start, end]` on the wall clock.
    pub fn is_between(
        &self,
        value: impl Into<TimeValue>,
        start: impl Into<TimeValue>,
        end: impl Into<TimeValue>,
    ) -> Result<Option<bool>, FormatError> {
        let Some(value) = self.converter.to_instant(value)? else {
            return Ok(None);
        };
        Ok(self
            .pair(start, end)?
            .map(|(start, end)| start <= value && value <= end))
    }
}

impl From<Converter> for Calculator {
    fn from(converter: Converter) -> Self {
        Self { converter }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{EpochMillis, EpochSeconds};
    use crate::Zone;
    use chrono::{NaiveDate, NaiveDateTime};

    fn calc() -> Calculator {
        Calculator::new(Config::new().with_zone(Zone::utc()))
    }

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn date(y: i32, mo: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap()
    }

    #[test]
    fn test_compare_mixed_representations() {
        let c = calc();
        assert_eq!(
            c.compare("2021-06-15", EpochSeconds(1_623_715_201)).unwrap(),
            Some(Ordering::Less)
        );
        assert_eq!(
            c.compare(EpochMillis(1_623_715_200_000), date(2021, 6, 15)).unwrap(),
            Some(Ordering::Equal)
        );
        assert_eq!(
            c.compare(dt(2021, 6, 16, 0, 0), "2021-06-15").unwrap(),
            Some(Ordering::Greater)
        );
        assert_eq!(c.compare(None::<NaiveDate>, "2021-06-15").unwrap(), None);
    }

    #[test]
    fn test_one_day_apart() {
        let c = calc();
        assert_eq!(
            c.duration_in(TimeUnit::Days, dt(2021, 1, 1, 0, 0), dt(2021, 1, 2, 0, 0))
                .unwrap(),
            Some(1)
        );
        assert_eq!(
            c.duration_in(TimeUnit::Hours, dt(2021, 1, 1, 0, 0), dt(2021, 1, 2, 0, 0))
                .unwrap(),
            Some(24)
        );
    }

    #[test]
    fn test_period_component_vs_total_months() {
        let c = calc();
        let (a, b) = (date(2020, 1, 31), date(2020, 3, 1));
        assert_eq!(c.duration_in(TimeUnit::Months, a, b).unwrap(), Some(0));
        assert_eq!(c.total_duration_in(TimeUnit::Months, a, b).unwrap(), Some(1));
        assert_eq!(c.duration_in(TimeUnit::Days, a, b).unwrap(), Some(30));
        assert_eq!(c.total_duration_in(TimeUnit::Days, a, b).unwrap(), Some(30));
    }

    #[test]
    fn test_total_days_and_weeks_truncate_wall_clock() {
        let c = calc();
        let (a, b) = (dt(2021, 1, 1, 0, 0), dt(2021, 1, 2, 23, 0));
        assert_eq!(c.total_duration_in(TimeUnit::Days, a, b).unwrap(), Some(1));
        assert_eq!(c.total_duration_in(TimeUnit::Days, b, a).unwrap(), Some(-1));
        assert_eq!(
            c.total_duration_in(TimeUnit::Weeks, "2021-03-22", "2021-03-29").unwrap(),
            Some(1)
        );
        assert_eq!(
            c.total_duration_in(TimeUnit::Weeks, "2021-03-22", "2021-03-28").unwrap(),
            Some(0)
        );
    }

    #[test]
    fn test_calendar_components() {
        let c = calc();
        let (a, b) = ("2018-03-05", "2020-06-25");
        assert_eq!(c.duration_in(TimeUnit::Years, a, b).unwrap(), Some(2));
        assert_eq!(c.duration_in(TimeUnit::Months, a, b).unwrap(), Some(3));
        assert_eq!(c.duration_in(TimeUnit::Days, a, b).unwrap(), Some(20));
        assert_eq!(c.duration_in(TimeUnit::Weeks, a, b).unwrap(), Some(2));
        assert_eq!(c.duration_in(TimeUnit::Centuries, a, b).unwrap(), Some(0));
        assert_eq!(c.total_duration_in(TimeUnit::Months, a, b).unwrap(), Some(27));
        assert_eq!(c.total_duration_in(TimeUnit::Years, a, b).unwrap(), Some(2));
        assert_eq!(
            c.period(a, b).unwrap(),
            Some(CalendarPeriod {
                years: 2,
                months: 3,
                days: 20
            })
        );
    }

    #[test]
    fn test_centuries() {
        let c = calc();
        let (a, b) = (date(1899, 12, 31), date(2100, 1, 1));
        assert_eq!(c.duration_in(TimeUnit::Centuries, a, b).unwrap(), Some(2));
        assert_eq!(c.total_duration_in(TimeUnit::Centuries, a, b).unwrap(), Some(2));
        assert_eq!(c.total_duration_in(TimeUnit::Centuries, b, a).unwrap(), Some(-2));
    }

    #[test]
    fn test_durations_are_signed() {
        let c = calc();
        let (a, b) = (dt(2021, 1, 1, 0, 0), dt(2021, 1, 1, 1, 30));
        assert_eq!(c.duration_in(TimeUnit::Minutes, b, a).unwrap(), Some(-90));
        assert_eq!(c.duration_in(TimeUnit::Hours, b, a).unwrap(), Some(-1));
        assert_eq!(
            c.duration_in(TimeUnit::Millis, b, a).unwrap(),
            Some(-5_400_000)
        );
        assert_eq!(
            c.duration_in(TimeUnit::Nanos, a, b).unwrap(),
            Some(5_400_000_000_000)
        );
    }

    #[test]
    fn test_nanos_overflow_is_error() {
        let c = calc();
        assert!(matches!(
            c.duration_in(TimeUnit::Nanos, date(1700, 1, 1), date(2100, 1, 1)),
            Err(FormatError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_breakdown_between_text_and_epoch() {
        let c = calc();
        let b = c
            .breakdown("2021-06-15", EpochMillis(1_623_715_200_000 + 90_061_001))
            .unwrap()
            .unwrap();
        assert_eq!(b.to_string(), "1d 1h 1m 1s 1ms");
        assert_eq!(b.total_nanos(), 90_061_001 * 1_000_000);
    }

    #[test]
    fn test_unparsable_operand_propagates() {
        let c = calc();
        assert!(matches!(
            c.compare("15.06.2021", "2021-06-15"),
            Err(FormatError::Unparsable { .. })
        ));
        assert_eq!(c.breakdown("", "2021-06-15").unwrap(), None);
    }

    #[test]
    fn test_shift() {
        let c = calc();
        let shifted = c.shift(date(2020, 1, 31), TimeUnit::Months, 1).unwrap().unwrap();
        assert_eq!(shifted.date(), date(2020, 2, 29));
        let shifted = c.shift("2020-03-31", TimeUnit::Months, -1).unwrap().unwrap();
        assert_eq!(shifted.date(), date(2020, 2, 29));
        let shifted = c.shift(date(2020, 2, 29), TimeUnit::Years, 1).unwrap().unwrap();
        assert_eq!(shifted.date(), date(2021, 2, 28));
        let shifted = c.shift(dt(2021, 1, 1, 23, 0), TimeUnit::Hours, 2).unwrap().unwrap();
        assert_eq!(shifted.naive(), dt(2021, 1, 2, 1, 0));
        assert_eq!(c.shift(TimeValue::Absent, TimeUnit::Days, 1).unwrap(), None);
        assert!(c.shift(date(2020, 1, 1), TimeUnit::Centuries, i64::MAX).is_err());
    }

    #[test]
    fn test_is_between_inclusive() {
        let c = calc();
        assert_eq!(
            c.is_between("2021-06-15", "2021-06-15", "2021-06-30").unwrap(),
            Some(true)
        );
        assert_eq!(
            c.is_between("2021-07-01", "2021-06-15", "2021-06-30").unwrap(),
            Some(false)
        );
        assert_eq!(
            c.is_between("2021-06-20", TimeValue::Absent, "2021-06-30").unwrap(),
            None
        );
    }

    #[test]
    fn test_defaults_are_shared_with_converter() {
        let mut c = calc();
        c.set_default_pattern("dd.MM.yyyy").unwrap();
        c.set_default_locale(Locale::de_DE);
        assert_eq!(
            c.duration_in(TimeUnit::Days, "01.01.2021", "03.01.2021").unwrap(),
            Some(2)
        );
        assert_eq!(c.converter().config().locale(), Locale::de_DE);
    }
}
