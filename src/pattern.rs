// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date/time templates in the conventional `yyyy-MM-dd HH:mm:ss` syntax.
//!
//! A [`Pattern`] is compiled once into chrono [`Item`]s and then used both
//! to render instants (locale-aware, through chrono's `unstable-locales`
//! tables) and to parse text back into a wall-clock date-time.
//!
//! | Letters | Field | Example |
//! |---------|-------|---------|
//! | `yyyy`, `yy` | year | `2021`, `21` |
//! | `M`, `MM`, `MMM`, `MMMM` (`L`) | month | `6`, `06`, `Jun`, `June` |
//! | `d`, `dd` | day of month | `5`, `05` |
//! | `D`, `DDD` | day of year | `166` |
//! | `E`…`EEE`, `EEEE` | weekday name | `Tue`, `Tuesday` |
//! | `u` | weekday number (Monday = 1) | `2` |
//! | `a` | AM/PM marker | `PM` |
//! | `H`, `HH` | hour 0–23 | `14` |
//! | `h`, `hh` | hour 1–12 | `02` |
//! | `m`, `mm` | minute | `07` |
//! | `s`, `ss` | second | `09` |
//! | `S…` | milliseconds | `042` |
//! | `Z` / `X` / `z` | offset `+0100` / `+01:00` / zone name | |
//!
//! `yy` follows chrono's two-digit year rule: `00`–`69` read as 20xx and
//! `70`–`99` as 19xx, a fixed window rather than one that slides with the
//! current date. `z` renders but cannot be parsed.
//!
//! Text inside single quotes is literal and `''` is a literal quote. Every
//! other non-letter character is literal too.

use crate::{FormatError, Zone};
use chrono::format::{self, Item, ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, Locale, NaiveDateTime, NaiveTime};
use log::debug;
use std::fmt::{self, Write};
use std::str::FromStr;

/// Pattern used when a caller does not supply one.
pub const DEFAULT_PATTERN: &str = "yyyy-MM-dd";

/// Which calendar/clock fields a pattern mentions; drives parse defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Fields {
    year: bool,
    month: bool,
    day: bool,
    ordinal: bool,
    hour: bool,
    hour12: bool,
    ampm: bool,
    minute: bool,
    second: bool,
    fraction: bool,
    offset: bool,
    zone_name: bool,
}

impl Fields {
    fn mark(&mut self, letter: char) {
        match letter {
            'y' => self.year = true,
            'M' | 'L' => self.month = true,
            'd' => self.day = true,
            'D' => self.ordinal = true,
            'H' => self.hour = true,
            'h' => self.hour12 = true,
            'a' => self.ampm = true,
            'm' => self.minute = true,
            's' => self.second = true,
            'S' => self.fraction = true,
            'Z' | 'X' => self.offset = true,
            'z' => self.zone_name = true,
            _ => {}
        }
    }

    fn has_hour(&self) -> bool {
        self.hour || self.hour12
    }

    fn has_clock(&self) -> bool {
        self.has_hour() || self.minute || self.second || self.fraction
    }
}

/// Maps a run of `width` identical pattern letters onto a strftime spec.
fn field_spec(letter: char, width: usize) -> Option<&'static str> {
    let spec = match (letter, width) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M' | 'L', 1) => "%-m",
        ('M' | 'L', 2) => "%m",
        ('M' | 'L', 3) => "%b",
        ('M' | 'L', _) => "%B",
        ('d', 1) => "%-d",
        ('d', _) => "%d",
        ('D', 1 | 2) => "%-j",
        ('D', _) => "%j",
        ('E', 1..=3) => "%a",
        ('E', _) => "%A",
        ('u', _) => "%u",
        ('a', _) => "%p",
        ('H', 1) => "%-H",
        ('H', _) => "%H",
        ('h', 1) => "%-I",
        ('h', _) => "%I",
        ('m', 1) => "%-M",
        ('m', _) => "%M",
        ('s', 1) => "%-S",
        ('s', _) => "%S",
        ('S', _) => "%3f",
        ('Z', _) => "%z",
        ('X', _) => "%:z",
        ('z', _) => "%Z",
        _ => return None,
    };
    Some(spec)
}

fn flush_literal(items: &mut Vec<Item<'static>>, literal: &mut String) {
    if !literal.is_empty() {
        items.push(Item::OwnedLiteral(std::mem::take(literal).into_boxed_str()));
    }
}

/// A compiled date/time template.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    source: String,
    items: Vec<Item<'static>>,
    fields: Fields,
}

impl Pattern {
    /// Compile a template.
    ///
    /// Fails with [`FormatError::UnsupportedLetter`] for letters without a
    /// field meaning and [`FormatError::UnterminatedQuote`] for an open
    /// quoted literal.
    pub fn compile(source: &str) -> Result<Self, FormatError> {
        let mut items = Vec::new();
        let mut fields = Fields::default();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    literal.push('\'');
                    continue;
                }
                let mut closed = false;
                while let Some(q) = chars.next() {
                    if q != '\'' {
                        literal.push(q);
                    } else if chars.peek() == Some(&'\'') {
                        chars.next();
                        literal.push('\'');
                    } else {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(FormatError::UnterminatedQuote {
                        pattern: source.to_owned(),
                    });
                }
            } else if c.is_ascii_alphabetic() {
                let mut width = 1;
                while chars.peek() == Some(&c) {
                    chars.next();
                    width += 1;
                }
                let spec = field_spec(c, width).ok_or_else(|| FormatError::UnsupportedLetter {
                    letter: c,
                    pattern: source.to_owned(),
                })?;
                flush_literal(&mut items, &mut literal);
                fields.mark(c);
                items.extend(StrftimeItems::new(spec));
            } else {
                literal.push(c);
            }
        }
        flush_literal(&mut items, &mut literal);

        debug!("compiled pattern `{source}` into {} items", items.len());
        Ok(Self {
            source: source.to_owned(),
            items,
            fields,
        })
    }

    /// The template text this pattern was compiled from.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// `true` when the pattern carries no time-of-day field.
    #[inline]
    pub fn is_date_only(&self) -> bool {
        !self.fields.has_clock()
    }

    /// Render a zoned date-time, substituting month/day names and AM/PM
    /// markers from `locale`.
    pub fn format(
        &self,
        datetime: &DateTime<FixedOffset>,
        locale: Locale,
    ) -> Result<String, FormatError> {
        let mut out = String::new();
        write!(
            out,
            "{}",
            datetime.format_localized_with_items(self.items.iter(), locale)
        )
        .map_err(|_| FormatError::Render {
            pattern: self.source.clone(),
        })?;
        Ok(out)
    }

    /// Parse `text` into a wall-clock date-time of `zone`.
    ///
    /// Fields the pattern does not mention are defaulted: year 1970,
    /// January, day 1, hour 0, minute 0, and AM for a 12-hour clock
    /// without a marker. An offset in the text (`Z`, `X`) fixes the
    /// absolute instant, which is then read on `zone`'s wall clock;
    /// without one the text already is a `zone` wall-clock reading.
    pub fn parse(&self, text: &str, zone: Zone) -> Result<NaiveDateTime, FormatError> {
        if self.fields.zone_name {
            return Err(FormatError::ParseUnsupported {
                letter: 'z',
                pattern: self.source.clone(),
            });
        }
        let unparsable = |source| FormatError::Unparsable {
            text: text.to_owned(),
            pattern: self.source.clone(),
            source,
        };

        let mut parsed = Parsed::new();
        if let Err(err) = format::parse(&mut parsed, text, self.items.iter()) {
            debug!("`{text}` does not match `{}`: {err}", self.source);
            return Err(unparsable(err));
        }
        self.fill_defaults(&mut parsed).map_err(unparsable)?;

        let date = parsed.to_naive_date().map_err(unparsable)?;
        let time = if self.fields.has_clock() {
            parsed.to_naive_time().map_err(unparsable)?
        } else {
            NaiveTime::MIN
        };
        let wall = date.and_time(time);
        if !self.fields.offset {
            return Ok(wall);
        }

        let offset = parsed.to_fixed_offset().map_err(unparsable)?;
        let utc = wall
            .checked_sub_offset(offset)
            .ok_or_else(|| FormatError::out_of_range(format_args!("`{text}`")))?;
        Ok(zone.wall_clock(utc.and_utc()))
    }

    fn fill_defaults(&self, parsed: &mut Parsed) -> ParseResult<()> {
        let f = self.fields;
        if !f.year {
            parsed.set_year(1970)?;
        }
        if !f.ordinal {
            if !f.month {
                parsed.set_month(1)?;
            }
            if !f.day {
                parsed.set_day(1)?;
            }
        }
        if f.has_clock() && !f.has_hour() {
            parsed.set_hour(0)?;
        }
        if f.hour12 && !f.ampm {
            parsed.set_ampm(false)?;
        }
        if f.has_clock() && !f.minute {
            parsed.set_minute(0)?;
        }
        Ok(())
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            source: DEFAULT_PATTERN.to_owned(),
            items: StrftimeItems::new("%Y-%m-%d").collect(),
            fields: Fields {
                year: true,
                month: true,
                day: true,
                ..Fields::default()
            },
        }
    }
}

impl FromStr for Pattern {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, TimeZone};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_default_pattern_formats_iso_date() {
        let dt = utc(2021, 6, 5, 13, 4, 9);
        let default = Pattern::default();
        let compiled = Pattern::compile(DEFAULT_PATTERN).unwrap();
        assert_eq!(default.format(&dt, Locale::en_US).unwrap(), "2021-06-05");
        assert_eq!(compiled.format(&dt, Locale::en_US).unwrap(), "2021-06-05");
        assert!(default.is_date_only());
        assert_eq!(default.as_str(), DEFAULT_PATTERN);
    }

    #[test]
    fn test_format_numeric_fields() {
        let dt = utc(2021, 6, 5, 13, 4, 9);
        let p = Pattern::compile("d/M/yy H:m:s").unwrap();
        assert_eq!(p.format(&dt, Locale::en_US).unwrap(), "5/6/21 13:4:9");

        let p = Pattern::compile("hh:mm a").unwrap();
        assert_eq!(p.format(&dt, Locale::en_US).unwrap(), "01:04 PM");
    }

    #[test]
    fn test_format_milliseconds() {
        let dt = utc(2021, 6, 5, 13, 4, 9) + chrono::Duration::milliseconds(42);
        let p = Pattern::compile("HH:mm:ss.SSS").unwrap();
        assert_eq!(p.format(&dt, Locale::en_US).unwrap(), "13:04:09.042");
    }

    #[test]
    fn test_format_localized_names() {
        let dt = utc(2014, 11, 28, 12, 0, 9);
        let p = Pattern::compile("EEEE d MMMM yyyy").unwrap();
        assert_eq!(
            p.format(&dt, Locale::en_US).unwrap(),
            "Friday 28 November 2014"
        );
        assert_eq!(
            p.format(&dt, Locale::fr_BE).unwrap(),
            "vendredi 28 novembre 2014"
        );
    }

    #[test]
    fn test_quoted_literals() {
        let dt = utc(2021, 6, 5, 13, 0, 0);
        let p = Pattern::compile("yyyy-MM-dd'T'HH 'o''clock'").unwrap();
        assert_eq!(p.format(&dt, Locale::en_US).unwrap(), "2021-06-05T13 o'clock");

        let p = Pattern::compile("''yy").unwrap();
        assert_eq!(p.format(&dt, Locale::en_US).unwrap(), "'21");
    }

    #[test]
    fn test_malformed_patterns() {
        assert_eq!(
            Pattern::compile("yyyy-qq"),
            Err(FormatError::UnsupportedLetter {
                letter: 'q',
                pattern: "yyyy-qq".into()
            })
        );
        assert_eq!(
            Pattern::compile("yyyy 'open"),
            Err(FormatError::UnterminatedQuote {
                pattern: "yyyy 'open".into()
            })
        );
        assert!("GGGG".parse::<Pattern>().is_err());
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let p = Pattern::default();
        let ndt = p.parse("2021-06-15", Zone::utc()).unwrap();
        assert_eq!(
            ndt,
            NaiveDate::from_ymd_opt(2021, 6, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_datetime_with_millis() {
        let p = Pattern::compile("yyyy/MM/dd HH:mm:ss.SSS").unwrap();
        let ndt = p.parse("2021/06/15 10:30:05.250", Zone::utc()).unwrap();
        assert_eq!(
            ndt,
            NaiveDate::from_ymd_opt(2021, 6, 15)
                .unwrap()
                .and_hms_milli_opt(10, 30, 5, 250)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_defaults_missing_fields() {
        let p = Pattern::compile("yyyy-MM").unwrap();
        assert_eq!(
            p.parse("2021-06", Zone::utc()).unwrap().date(),
            NaiveDate::from_ymd_opt(2021, 6, 1).unwrap()
        );

        let p = Pattern::compile("yyyy-MM-dd HH").unwrap();
        assert_eq!(
            p.parse("2021-06-15 07", Zone::utc()).unwrap(),
            NaiveDate::from_ymd_opt(2021, 6, 15)
                .unwrap()
                .and_hms_opt(7, 0, 0)
                .unwrap()
        );

        let p = Pattern::compile("HH:mm").unwrap();
        assert_eq!(
            p.parse("08:45", Zone::utc()).unwrap(),
            NaiveDate::from_ymd_opt(1970, 1, 1)
                .unwrap()
                .and_hms_opt(8, 45, 0)
                .unwrap()
        );

        let p = Pattern::compile("yyyy-MM-dd hh:mm").unwrap();
        assert_eq!(
            p.parse("2021-06-15 09:15", Zone::utc()).unwrap().time(),
            NaiveTime::from_hms_opt(9, 15, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_clock_without_hour_defaults_hour() {
        let p = Pattern::compile("yyyy-MM-dd mm:ss").unwrap();
        assert!(!p.is_date_only());
        assert_eq!(
            p.parse("2021-06-15 05:30", Zone::utc()).unwrap(),
            NaiveDate::from_ymd_opt(2021, 6, 15)
                .unwrap()
                .and_hms_opt(0, 5, 30)
                .unwrap()
        );

        let p = Pattern::compile("ss.SSS").unwrap();
        assert_eq!(
            p.parse("07.250", Zone::utc()).unwrap().time(),
            NaiveTime::from_hms_milli_opt(0, 0, 7, 250).unwrap()
        );
    }

    #[test]
    fn test_parse_offset_fixes_the_instant() {
        let p = Pattern::compile("yyyy-MM-dd HH:mm Z").unwrap();
        let ten = |h| {
            NaiveDate::from_ymd_opt(2021, 6, 15)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        assert_eq!(p.parse("2021-06-15 10:00 +0500", Zone::utc()).unwrap(), ten(5));
        assert_eq!(p.parse("2021-06-15 10:00 +0000", Zone::utc()).unwrap(), ten(10));

        let plus_two = Zone::east(2 * 3600).unwrap();
        assert_eq!(p.parse("2021-06-15 10:00 +0500", plus_two).unwrap(), ten(7));

        let p = Pattern::compile("yyyy-MM-dd'T'HH:mmX").unwrap();
        assert_eq!(p.parse("2021-06-15T10:00-03:00", Zone::utc()).unwrap(), ten(13));
    }

    #[test]
    fn test_parse_zone_name_is_rejected() {
        let p = Pattern::compile("yyyy-MM-dd z").unwrap();
        assert_eq!(
            p.parse("2021-06-15 CET", Zone::utc()),
            Err(FormatError::ParseUnsupported {
                letter: 'z',
                pattern: "yyyy-MM-dd z".into()
            })
        );
    }

    #[test]
    fn test_two_digit_year_window() {
        let p = Pattern::compile("dd/MM/yy").unwrap();
        assert_eq!(p.parse("01/01/50", Zone::utc()).unwrap().year(), 2050);
        assert_eq!(p.parse("01/01/70", Zone::utc()).unwrap().year(), 1970);
    }

    #[test]
    fn test_parse_english_month_names() {
        let p = Pattern::compile("d MMM yyyy").unwrap();
        assert_eq!(
            p.parse("15 Jun 2021", Zone::utc()).unwrap().date(),
            NaiveDate::from_ymd_opt(2021, 6, 15).unwrap()
        );
    }

    #[test]
    fn test_parse_mismatch_is_unparsable() {
        let p = Pattern::default();
        match p.parse("15/06/2021", Zone::utc()) {
            Err(FormatError::Unparsable { text, pattern, .. }) => {
                assert_eq!(text, "15/06/2021");
                assert_eq!(pattern, DEFAULT_PATTERN);
            }
            other => panic!("expected Unparsable, got {other:?}"),
        }
        assert!(p.parse("2021-02-30", Zone::utc()).is_err());
    }
}
