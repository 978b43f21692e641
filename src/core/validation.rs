//! Pre-booking checks for assigning a student group to a classroom

use crate::core::calendar::WeekSet;
use crate::core::conflicts::{find_conflicts, ConflictQuery, SemesterScope};
use crate::core::error::OccupancyError;
use crate::core::repository::OccupancyStore;
use crate::debug;
use serde::Serialize;

/// What is about to be booked
#[derive(Debug, Clone)]
pub struct AssignmentRequest<'a> {
    /// Target classroom
    pub classroom_id: &'a str,
    /// Maximum number of students in the group
    pub group_size: u32,
    /// Equipment the classroom must have
    pub required_equipment: &'a [String],
    /// Equipment the classroom should have
    pub recommended_equipment: &'a [String],
    /// Slot to check for conflicts
    pub time_slot_id: Option<&'a str>,
    /// Weeks to check for conflicts
    pub week_numbers: Option<&'a WeekSet>,
    /// Semester visibility of the conflict check
    pub scope: SemesterScope<'a>,
}

impl<'a> AssignmentRequest<'a> {
    /// Request with no equipment needs and no conflict check
    #[must_use]
    pub const fn new(classroom_id: &'a str, group_size: u32, scope: SemesterScope<'a>) -> Self {
        Self {
            classroom_id,
            group_size,
            required_equipment: &[],
            recommended_equipment: &[],
            time_slot_id: None,
            week_numbers: None,
            scope,
        }
    }
}

/// Outcome of [`validate_assignment`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Problems that block the assignment
    pub errors: Vec<String>,
    /// Problems worth showing that do not block it
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// No errors
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check capacity, equipment and booking conflicts for an assignment
///
/// Conflicts are only checked when both a time slot and a non-empty week set
/// are given; only the first one is reported.
///
/// # Errors
/// Returns storage errors and [`OccupancyError::InvalidInput`] from the
/// conflict query (e.g. week 0)
pub fn validate_assignment<S>(
    store: &S,
    request: &AssignmentRequest,
) -> Result<ValidationResult, OccupancyError>
where
    S: OccupancyStore + ?Sized,
{
    let mut result = ValidationResult::default();

    let Some(classroom) = store.get_classroom(request.classroom_id)? else {
        result.errors.push("Classroom not found".to_string());
        return Ok(result);
    };

    if classroom.capacity < request.group_size {
        result.warnings.push(format!(
            "Classroom capacity ({}) is below the group's maximum size ({})",
            classroom.capacity, request.group_size
        ));
    }

    let missing = |items: &[String]| -> Vec<String> {
        items
            .iter()
            .filter(|item| !classroom.has_equipment(item))
            .cloned()
            .collect()
    };
    let missing_required = missing(request.required_equipment);
    if !missing_required.is_empty() {
        result.errors.push(format!(
            "Classroom lacks required equipment: {}",
            missing_required.join(", ")
        ));
    }
    let missing_recommended = missing(request.recommended_equipment);
    if !missing_recommended.is_empty() {
        result.warnings.push(format!(
            "Classroom lacks recommended equipment: {}",
            missing_recommended.join(", ")
        ));
    }

    if let (Some(time_slot_id), Some(weeks)) = (request.time_slot_id, request.week_numbers) {
        if !weeks.is_empty() {
            let query = ConflictQuery::new(request.classroom_id, time_slot_id, weeks, request.scope);
            if let Some(conflict) = find_conflicts(store, &query)?.first() {
                result.errors.push(format!(
                    "Classroom is already assigned to {} ({}) in weeks: {}",
                    conflict.subject_name, conflict.group_code, conflict.conflicting_weeks
                ));
            }
        }
    }

    debug!(
        "Validated assignment to {}: {} error(s), {} warning(s)",
        classroom.code,
        result.errors.len(),
        result.warnings.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calendar::TimeOfDay;
    use crate::core::models::{
        Classroom, RoomType, SectionSummary, Semester, TimeSlot, WeekRange, Weekday,
    };
    use crate::core::repository::{MemoryStore, NewOccupation};

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        let mut lab = Classroom::new("c1", "P.0.5", 20, RoomType::ComputerLab);
        lab.equipment = vec!["Projector".to_string(), "Rhino".to_string()];
        store.insert_classroom(lab);
        store.insert_time_slot(TimeSlot::new(
            "tue-15",
            Weekday::Tuesday,
            TimeOfDay::hour(15),
            TimeOfDay::hour(17),
        ));
        store.insert_semester(Semester::new("s1", 1, "2025-2026", 15));
        store
            .create_occupation(NewOccupation {
                classroom_ids: vec!["c1".to_string()],
                time_slot_id: "tue-15".to_string(),
                semester_id: "s1".to_string(),
                weeks: WeekRange::Weeks(WeekSet::range(1, 4)),
                section: SectionSummary::new("Modelling", "GR2", None),
            })
            .unwrap();
        store
    }

    #[test]
    fn test_unknown_classroom() {
        let result = validate_assignment(
            &store(),
            &AssignmentRequest::new("nope", 10, SemesterScope::Global),
        )
        .unwrap();
        assert_eq!(result.errors, vec!["Classroom not found"]);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_capacity_is_a_warning() {
        let result = validate_assignment(
            &store(),
            &AssignmentRequest::new("c1", 25, SemesterScope::Global),
        )
        .unwrap();
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("(20)"));
    }

    #[test]
    fn test_equipment_checks() {
        let required = vec!["projector".to_string(), "Plotter".to_string()];
        let recommended = vec!["Whiteboard".to_string()];
        let request = AssignmentRequest {
            required_equipment: &required,
            recommended_equipment: &recommended,
            ..AssignmentRequest::new("c1", 10, SemesterScope::Global)
        };
        let result = validate_assignment(&store(), &request).unwrap();
        assert_eq!(result.errors, vec!["Classroom lacks required equipment: Plotter"]);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_first_conflict_becomes_error() {
        let weeks = WeekSet::range(3, 6);
        let request = AssignmentRequest {
            time_slot_id: Some("tue-15"),
            week_numbers: Some(&weeks),
            ..AssignmentRequest::new("c1", 10, SemesterScope::Scoped("s1"))
        };
        let result = validate_assignment(&store(), &request).unwrap();
        assert_eq!(
            result.errors,
            vec!["Classroom is already assigned to Modelling (GR2) in weeks: 3, 4"]
        );
    }

    #[test]
    fn test_empty_weeks_skip_conflict_check() {
        let weeks = WeekSet::new();
        let request = AssignmentRequest {
            time_slot_id: Some("tue-15"),
            week_numbers: Some(&weeks),
            ..AssignmentRequest::new("c1", 10, SemesterScope::Global)
        };
        assert!(validate_assignment(&store(), &request).unwrap().is_valid());
    }
}
