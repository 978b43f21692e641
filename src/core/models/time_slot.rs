//! Weekly time slot model

use crate::core::calendar::TimeOfDay;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Start of the afternoon half of the teaching day
pub const AFTERNOON_START: TimeOfDay = TimeOfDay::hour(14);

/// Teaching weekday, Monday (1) through Friday (5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weekday {
    /// Day 1
    Monday = 1,
    /// Day 2
    Tuesday = 2,
    /// Day 3
    Wednesday = 3,
    /// Day 4
    Thursday = 4,
    /// Day 5
    Friday = 5,
}

impl Weekday {
    /// All teaching days in order
    pub const ALL: [Self; 5] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    /// Day number, 1 = Monday
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Three-letter English abbreviation
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
        }
    }
}

impl TryFrom<u8> for Weekday {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|day| day.number() == value)
            .ok_or_else(|| format!("day_of_week must be 1-5 (Monday-Friday), got {value}"))
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> Self {
        day.number()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Half of the teaching day a slot belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    /// Morning shift
    #[serde(alias = "mati")]
    Morning,
    /// Afternoon shift
    #[serde(alias = "tarda")]
    Afternoon,
}

impl Shift {
    /// Shift a slot starting at `start` falls in
    #[must_use]
    pub fn for_start(start: TimeOfDay) -> Self {
        if start < AFTERNOON_START {
            Self::Morning
        } else {
            Self::Afternoon
        }
    }
}

/// A recurring weekly window shared by every classroom and semester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Storage identifier
    pub id: String,

    /// Day of the week
    pub day_of_week: Weekday,

    /// Start time (inclusive)
    pub start_time: TimeOfDay,

    /// End time (exclusive)
    pub end_time: TimeOfDay,

    /// Declared shift; derived from the start time when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<Shift>,
}

impl TimeSlot {
    /// Create a slot with a derived shift
    #[must_use]
    pub fn new(id: &str, day_of_week: Weekday, start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            id: id.to_string(),
            day_of_week,
            start_time,
            end_time,
            shift: None,
        }
    }

    /// Declared shift, or the one implied by the start time
    #[must_use]
    pub fn shift(&self) -> Shift {
        self.shift
            .unwrap_or_else(|| Shift::for_start(self.start_time))
    }

    /// Length of the slot in minutes (0 for an inverted slot)
    #[must_use]
    pub const fn duration_minutes(&self) -> u16 {
        self.end_time.minutes().saturating_sub(self.start_time.minutes())
    }

    /// Whether `[start, end)` on `day` lies entirely inside this slot
    ///
    /// Partial overlap does not count: 09:00-10:30 does not cover 10:00-11:00.
    #[must_use]
    pub fn covers(&self, day: Weekday, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.day_of_week == day && self.start_time <= start && end <= self.end_time
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.day_of_week, self.start_time, self.end_time
        )
    }
}
