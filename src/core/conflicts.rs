//! Classroom booking conflict detection
//!
//! A candidate booking (classroom, time slot, weeks) conflicts with an existing
//! occupation of the same classroom and time slot when their effective week
//! sets intersect. Whether occupations of other semesters are visible is an
//! explicit choice of the caller, see [`SemesterScope`].

use crate::config::FALLBACK_TEACHING_WEEKS;
use crate::core::calendar::WeekSet;
use crate::core::error::OccupancyError;
use crate::core::models::Occupation;
use crate::core::repository::OccupancyStore;
use crate::{debug, warn};
use serde::Serialize;
use std::collections::HashMap;

/// Which semesters a conflict check looks at
///
/// There is no default. Booking flows usually check one semester, audits of
/// cross-semester double bookings check all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemesterScope<'a> {
    /// Only occupations of this semester
    Scoped(&'a str),
    /// Occupations of every semester sharing the classroom and time slot
    Global,
}

impl<'a> SemesterScope<'a> {
    /// `Scoped` for `Some`, `Global` for `None`
    #[must_use]
    pub fn from_option(semester_id: Option<&'a str>) -> Self {
        semester_id.map_or(Self::Global, Self::Scoped)
    }

    /// Semester filter to hand to storage
    #[must_use]
    pub const fn semester_id(self) -> Option<&'a str> {
        match self {
            Self::Scoped(id) => Some(id),
            Self::Global => None,
        }
    }

    fn admits(self, semester_id: &str) -> bool {
        match self {
            Self::Scoped(id) => id == semester_id,
            Self::Global => true,
        }
    }
}

/// A candidate booking to check
#[derive(Debug, Clone)]
pub struct ConflictQuery<'a> {
    /// Classroom to book
    pub classroom_id: &'a str,
    /// Weekly slot to book
    pub time_slot_id: &'a str,
    /// Weeks the candidate wants
    pub week_numbers: &'a WeekSet,
    /// Semester visibility
    pub scope: SemesterScope<'a>,
    /// Occupation being edited, never reported against itself
    pub exclude_occupation_id: Option<&'a str>,
}

impl<'a> ConflictQuery<'a> {
    /// Build a query; the scope is mandatory
    #[must_use]
    pub const fn new(
        classroom_id: &'a str,
        time_slot_id: &'a str,
        week_numbers: &'a WeekSet,
        scope: SemesterScope<'a>,
    ) -> Self {
        Self {
            classroom_id,
            time_slot_id,
            week_numbers,
            scope,
            exclude_occupation_id: None,
        }
    }

    /// Exclude an occupation (the one being rescheduled)
    #[must_use]
    pub fn excluding(mut self, occupation_id: &'a str) -> Self {
        self.exclude_occupation_id = Some(occupation_id);
        self
    }

    /// Reject empty identifiers, an empty week set and week 0
    ///
    /// # Errors
    /// Returns [`OccupancyError::InvalidInput`] describing the first problem
    pub fn validate(&self) -> Result<(), OccupancyError> {
        if self.classroom_id.trim().is_empty() {
            return Err(OccupancyError::InvalidInput(
                "classroom id is required".to_string(),
            ));
        }
        if self.time_slot_id.trim().is_empty() {
            return Err(OccupancyError::InvalidInput(
                "time slot id is required".to_string(),
            ));
        }
        if self.week_numbers.is_empty() {
            return Err(OccupancyError::InvalidInput(
                "at least one week is required".to_string(),
            ));
        }
        if self.week_numbers.contains(0) {
            return Err(OccupancyError::InvalidInput(
                "week numbers start at 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// An existing occupation that collides with a candidate booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictingOccupation {
    /// Colliding occupation
    pub occupation_id: String,
    /// Classroom link the collision was found on
    pub classroom_id: String,
    /// Semester of the colliding occupation
    pub semester_id: String,
    /// Subject of the occupying section
    pub subject_name: String,
    /// Group code of the occupying section
    pub group_code: String,
    /// Weeks both bookings want
    pub conflicting_weeks: WeekSet,
}

impl ConflictingOccupation {
    /// Human-readable description, e.g. `Drawing I (group GR1) occupies weeks [5]`
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "{} (group {}) occupies weeks [{}]",
            self.subject_name, self.group_code, self.conflicting_weeks
        )
    }
}

/// Conflicts of one occupation merged across its classroom links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictGroup {
    /// Colliding occupation
    pub occupation_id: String,
    /// Subject of the occupying section
    pub subject_name: String,
    /// Group code of the occupying section
    pub group_code: String,
    /// Classroom links involved, in report order
    pub classroom_ids: Vec<String>,
    /// Union of the conflicting weeks over all links
    pub conflicting_weeks: WeekSet,
}

/// Find existing occupations colliding with `query`
///
/// Unknown classrooms or time slots produce no conflicts. Multi-classroom
/// occupations are reported once per matching classroom link; use
/// [`group_by_occupation`] for one entry per section.
///
/// # Errors
/// Returns [`OccupancyError::InvalidInput`] for an invalid query and storage
/// errors unchanged
pub fn find_conflicts<S>(
    store: &S,
    query: &ConflictQuery,
) -> Result<Vec<ConflictingOccupation>, OccupancyError>
where
    S: OccupancyStore + ?Sized,
{
    query.validate()?;

    let candidates = store.list_occupations(
        query.classroom_id,
        Some(query.time_slot_id),
        query.scope.semester_id(),
    )?;

    let mut teaching_weeks: HashMap<String, u8> = HashMap::new();
    for occupation in &candidates {
        if teaching_weeks.contains_key(&occupation.semester_id) {
            continue;
        }
        let weeks = if let Some(semester) = store.get_semester(&occupation.semester_id)? {
            semester.teaching_weeks
        } else {
            warn!(
                "Occupation {} references unknown semester {}; assuming {FALLBACK_TEACHING_WEEKS} weeks",
                occupation.id, occupation.semester_id
            );
            FALLBACK_TEACHING_WEEKS
        };
        teaching_weeks.insert(occupation.semester_id.clone(), weeks);
    }

    let conflicts = collect_conflicts(&candidates, query, |semester_id| {
        teaching_weeks
            .get(semester_id)
            .copied()
            .unwrap_or(FALLBACK_TEACHING_WEEKS)
    });

    debug!(
        "Conflict check classroom={} slot={} weeks=[{}] scope={:?}: {} conflict(s)",
        query.classroom_id,
        query.time_slot_id,
        query.week_numbers,
        query.scope,
        conflicts.len()
    );

    Ok(conflicts)
}

/// Core overlap rule over an already loaded set of occupations
///
/// Occupations are filtered by classroom link, time slot, scope and exclusion
/// here as well, so callers may pass a superset. `teaching_weeks` resolves a
/// semester id to its week count for full-semester bookings.
pub fn collect_conflicts<'o, I, F>(
    occupations: I,
    query: &ConflictQuery,
    teaching_weeks: F,
) -> Vec<ConflictingOccupation>
where
    I: IntoIterator<Item = &'o Occupation>,
    F: Fn(&str) -> u8,
{
    let mut conflicts = Vec::new();

    for occupation in occupations {
        if occupation.time_slot_id != query.time_slot_id
            || !query.scope.admits(&occupation.semester_id)
            || query.exclude_occupation_id == Some(occupation.id.as_str())
        {
            continue;
        }

        let links = occupation.links_to(query.classroom_id);
        if links == 0 {
            continue;
        }

        let effective = occupation
            .weeks
            .effective_weeks(teaching_weeks(&occupation.semester_id));
        let overlap = effective.intersection(query.week_numbers);
        if overlap.is_empty() {
            continue;
        }

        for _ in 0..links {
            conflicts.push(ConflictingOccupation {
                occupation_id: occupation.id.clone(),
                classroom_id: query.classroom_id.to_string(),
                semester_id: occupation.semester_id.clone(),
                subject_name: occupation.section.subject_name.clone(),
                group_code: occupation.section.group_code.clone(),
                conflicting_weeks: overlap.clone(),
            });
        }
    }

    conflicts
}

/// Merge conflicts per occupation, keeping first-seen order
#[must_use]
pub fn group_by_occupation(conflicts: &[ConflictingOccupation]) -> Vec<ConflictGroup> {
    let mut groups: Vec<ConflictGroup> = Vec::new();

    for conflict in conflicts {
        if let Some(group) = groups
            .iter_mut()
            .find(|g| g.occupation_id == conflict.occupation_id)
        {
            if !group.classroom_ids.contains(&conflict.classroom_id) {
                group.classroom_ids.push(conflict.classroom_id.clone());
            }
            for week in conflict.conflicting_weeks.iter() {
                group.conflicting_weeks.insert(week);
            }
        } else {
            groups.push(ConflictGroup {
                occupation_id: conflict.occupation_id.clone(),
                subject_name: conflict.subject_name.clone(),
                group_code: conflict.group_code.clone(),
                classroom_ids: vec![conflict.classroom_id.clone()],
                conflicting_weeks: conflict.conflicting_weeks.clone(),
            });
        }
    }

    groups
}

/// One message line per conflict
#[must_use]
pub fn describe_conflicts(conflicts: &[ConflictingOccupation]) -> Vec<String> {
    conflicts.iter().map(ConflictingOccupation::message).collect()
}
