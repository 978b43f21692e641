//! Occupation model: a course section bound to classrooms at one weekly slot

use crate::core::calendar::WeekSet;
use serde::{Deserialize, Serialize};

/// Teacher label used when a section has no teacher
pub const NOT_ASSIGNED: &str = "Not assigned";

/// Stored discriminator for how an occupation's weeks are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekRangeType {
    /// Every teaching week of the semester
    Full,
    /// An explicit list of weeks
    SpecificWeeks,
}

/// Weeks an occupation holds its classrooms
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekRange {
    /// Every teaching week of the occupation's semester
    FullSemester,
    /// Only the listed weeks; an empty list occupies nothing
    Weeks(WeekSet),
}

impl WeekRange {
    /// Resolve the stored `is_full_semester` flag and week list
    ///
    /// The flag wins: a full-semester row ignores any leftover week numbers.
    #[must_use]
    pub fn from_parts(is_full_semester: bool, week_numbers: WeekSet) -> Self {
        if is_full_semester {
            Self::FullSemester
        } else {
            Self::Weeks(week_numbers)
        }
    }

    /// Whether this is a full-semester booking
    #[must_use]
    pub const fn is_full_semester(&self) -> bool {
        matches!(self, Self::FullSemester)
    }

    /// Stored discriminator
    #[must_use]
    pub const fn range_type(&self) -> WeekRangeType {
        match self {
            Self::FullSemester => WeekRangeType::Full,
            Self::Weeks(_) => WeekRangeType::SpecificWeeks,
        }
    }

    /// Explicit week numbers; empty for full-semester bookings
    #[must_use]
    pub fn week_numbers(&self) -> WeekSet {
        match self {
            Self::FullSemester => WeekSet::new(),
            Self::Weeks(weeks) => weeks.clone(),
        }
    }

    /// Weeks actually occupied in a semester of `teaching_weeks` weeks
    #[must_use]
    pub fn effective_weeks(&self, teaching_weeks: u8) -> WeekSet {
        match self {
            Self::FullSemester => WeekSet::full(teaching_weeks),
            Self::Weeks(weeks) => weeks.clone(),
        }
    }
}

/// Course-section details carried for human-readable messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    /// Subject name (e.g., "Drawing I")
    pub subject_name: String,

    /// Group code or label of the student group (e.g., "GR1-M")
    pub group_code: String,

    /// Teacher full name, if one is assigned
    #[serde(default)]
    pub teacher_name: Option<String>,
}

impl SectionSummary {
    /// Create a summary
    #[must_use]
    pub fn new(subject_name: &str, group_code: &str, teacher_name: Option<&str>) -> Self {
        Self {
            subject_name: subject_name.to_string(),
            group_code: group_code.to_string(),
            teacher_name: teacher_name.map(str::to_string),
        }
    }

    /// Teacher name or the [`NOT_ASSIGNED`] sentinel
    #[must_use]
    pub fn teacher_label(&self) -> &str {
        self.teacher_name.as_deref().unwrap_or(NOT_ASSIGNED)
    }
}

/// A scheduled course section holding one or more classrooms at one time slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupation {
    /// Storage identifier
    pub id: String,

    /// Linked classrooms; a split lab session books several at once
    pub classroom_ids: Vec<String>,

    /// Weekly slot
    pub time_slot_id: String,

    /// Owning semester
    pub semester_id: String,

    /// Occupied weeks
    pub weeks: WeekRange,

    /// Section details for messages and reports
    pub section: SectionSummary,
}

impl Occupation {
    /// Number of links from this occupation to `classroom_id`
    #[must_use]
    pub fn links_to(&self, classroom_id: &str) -> usize {
        self.classroom_ids
            .iter()
            .filter(|id| id.as_str() == classroom_id)
            .count()
    }

    /// Whether this occupation books `classroom_id`
    #[must_use]
    pub fn books(&self, classroom_id: &str) -> bool {
        self.links_to(classroom_id) > 0
    }

    /// Whether this is a full-semester booking
    #[must_use]
    pub const fn is_full_semester(&self) -> bool {
        self.weeks.is_full_semester()
    }
}
