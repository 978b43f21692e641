//! Time-of-day and teaching-week primitives
//!
//! Times are local wall-clock values compared as minutes since midnight.
//! Week numbers are 1-based teaching weeks within a semester.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Minutes in one day
const MINUTES_PER_DAY: u16 = 24 * 60;

/// Wall-clock time of day with minute precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Build a time from hours and minutes, `None` when out of range
    #[must_use]
    pub const fn from_hm(hours: u16, minutes: u16) -> Option<Self> {
        if hours <= 24 && minutes < 60 && hours * 60 + minutes <= MINUTES_PER_DAY {
            Some(Self(hours * 60 + minutes))
        } else {
            None
        }
    }

    /// Whole hour `hours:00` for in-crate constants; callers pass 0..=24
    #[must_use]
    pub(crate) const fn hour(hours: u16) -> Self {
        assert!(hours <= 24, "hour out of range");
        Self(hours * 60)
    }

    /// Minutes since midnight
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    /// Hour component
    #[must_use]
    pub const fn hours(self) -> u16 {
        self.0 / 60
    }
}

impl FromStr for TimeOfDay {
    type Err = String;

    /// Accepts `HH:MM` and `HH:MM:SS` (seconds are ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.split(':');
        let (Some(h), Some(m)) = (parts.next(), parts.next()) else {
            return Err(format!("Invalid time '{s}': expected HH:MM"));
        };
        if let Some(sec) = parts.next() {
            if sec.parse::<u8>().map_or(true, |sec| sec >= 60) || parts.next().is_some() {
                return Err(format!("Invalid time '{s}': expected HH:MM[:SS]"));
            }
        }
        let hours = h
            .parse::<u16>()
            .map_err(|_| format!("Invalid hour in time '{s}'"))?;
        let minutes = m
            .parse::<u16>()
            .map_err(|_| format!("Invalid minutes in time '{s}'"))?;
        Self::from_hm(hours, minutes).ok_or_else(|| format!("Time out of range: '{s}'"))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Ordered set of teaching-week numbers
///
/// Iteration and [`Display`](fmt::Display) are always ascending, so results
/// derived from a `WeekSet` are reproducible for the same inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekSet(BTreeSet<u8>);

impl WeekSet {
    /// Empty set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Inclusive range `first..=last`; empty when `first > last`
    #[must_use]
    pub fn range(first: u8, last: u8) -> Self {
        Self((first..=last).collect())
    }

    /// Every week of a semester with `teaching_weeks` weeks
    #[must_use]
    pub fn full(teaching_weeks: u8) -> Self {
        Self::range(1, teaching_weeks)
    }

    /// Add a week, returns `false` if it was already present
    pub fn insert(&mut self, week: u8) -> bool {
        self.0.insert(week)
    }

    /// Whether `week` is in the set
    #[must_use]
    pub fn contains(&self, week: u8) -> bool {
        self.0.contains(&week)
    }

    /// Number of weeks in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no weeks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ascending iterator over the weeks
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }

    /// Weeks present in both sets
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0.intersection(&other.0).copied().collect())
    }

    /// Whether the two sets share at least one week
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        // walk the smaller set
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|week| large.contains(week))
    }

    /// Lowest week number, if any
    #[must_use]
    pub fn first(&self) -> Option<u8> {
        self.0.first().copied()
    }

    /// Ascending vector of the weeks
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }
}

impl FromIterator<u8> for WeekSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[u8; N]> for WeekSet {
    fn from(weeks: [u8; N]) -> Self {
        weeks.into_iter().collect()
    }
}

impl FromStr for WeekSet {
    type Err = String;

    /// Parses comma-separated weeks and inclusive ranges, e.g. `"1-3,7,9-10"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut weeks = Self::new();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let parse = |raw: &str| {
                raw.trim()
                    .parse::<u8>()
                    .map_err(|_| format!("Invalid week number '{raw}' in '{s}'"))
            };
            if let Some((lo, hi)) = token.split_once('-') {
                let (lo, hi) = (parse(lo)?, parse(hi)?);
                if lo > hi {
                    return Err(format!("Invalid week range '{token}': start after end"));
                }
                weeks.0.extend(lo..=hi);
            } else {
                weeks.insert(parse(token)?);
            }
        }
        Ok(weeks)
    }
}

impl fmt::Display for WeekSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for week in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{week}")?;
            first = false;
        }
        Ok(())
    }
}
