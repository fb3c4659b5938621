// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Greedy decomposition of an elapsed duration into days … nanoseconds.

use crate::TimeUnit;
use chrono::Duration;
use qtty::{Day, Days, Seconds};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Elapsed time split into [`TimeUnit::BREAKDOWN`] units, coarsest first.
///
/// Each step converts what is left into the current unit (truncating
/// toward zero), subtracts that many units and moves on, so the counts
/// add back up to the original duration exactly. Every count carries the
/// sign of the duration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Breakdown {
    entries: Vec<(TimeUnit, i64)>,
}

impl Breakdown {
    pub fn from_elapsed(elapsed: Duration) -> Self {
        let mut rest = elapsed;
        let mut entries = Vec::with_capacity(TimeUnit::BREAKDOWN.len());
        for unit in TimeUnit::BREAKDOWN {
            // Below one millisecond the remainder always fits, so no count overflows.
            let count = unit.count(rest).unwrap_or(0);
            if let Some(step) = unit.duration(count) {
                rest -= step;
            }
            entries.push((unit, count));
        }
        Self { entries }
    }

    /// Count for `unit`, `None` if the unit is not part of a breakdown.
    pub fn get(&self, unit: TimeUnit) -> Option<i64> {
        self.entries
            .iter()
            .find(|(u, _)| *u == unit)
            .map(|&(_, count)| count)
    }

    /// `(unit, count)` pairs, coarsest first.
    pub fn iter(&self) -> impl Iterator<Item = (TimeUnit, i64)> + '_ {
        self.entries.iter().copied()
    }

    #[inline]
    pub fn days(&self) -> i64 {
        self.get(TimeUnit::Days).unwrap_or(0)
    }

    #[inline]
    pub fn hours(&self) -> i64 {
        self.get(TimeUnit::Hours).unwrap_or(0)
    }

    #[inline]
    pub fn minutes(&self) -> i64 {
        self.get(TimeUnit::Minutes).unwrap_or(0)
    }

    #[inline]
    pub fn seconds(&self) -> i64 {
        self.get(TimeUnit::Seconds).unwrap_or(0)
    }

    #[inline]
    pub fn millis(&self) -> i64 {
        self.get(TimeUnit::Millis).unwrap_or(0)
    }

    /// Σ count × unit length, in nanoseconds.
    pub fn total_nanos(&self) -> i128 {
        self.entries
            .iter()
            .map(|&(unit, count)| i128::from(count) * i128::from(unit.nanos().unwrap_or(0)))
            .sum()
    }

    /// The reconstructed duration as a fractional number of days.
    pub fn as_days(&self) -> Days {
        Seconds::new(self.total_nanos() as f64 / 1e9).to::<Day>()
    }

    /// `true` when every count is zero.
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|&(_, count)| count == 0)
    }
}

impl From<Duration> for Breakdown {
    fn from(elapsed: Duration) -> Self {
        Self::from_elapsed(elapsed)
    }
}

impl<'a> IntoIterator for &'a Breakdown {
    type Item = (TimeUnit, i64);
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, (TimeUnit, i64)>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().copied()
    }
}

/// Non-zero components, e.g. `1d 2h 30m`; `0ns` when empty.
impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (unit, count) in self.iter().filter(|&(_, c)| c != 0) {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{count}{}", unit.symbol())?;
            first = false;
        }
        if first {
            f.write_str("0ns")?;
        }
        Ok(())
    }
}
