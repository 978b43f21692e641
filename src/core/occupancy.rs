//! Hourly classroom occupancy
//!
//! Each classroom is sampled on a fixed grid of one-hour buckets, Monday to
//! Friday from 08:00 to 21:00. A bucket is occupied when a time slot of one of
//! the classroom's occupations contains it entirely. Weeks are not considered:
//! an occupation held in a single week still marks its hours as occupied.

use crate::core::calendar::TimeOfDay;
use crate::core::error::OccupancyError;
use crate::core::models::{Occupation, Semester, TimeSlot, Weekday, AFTERNOON_START};
use crate::core::repository::OccupancyStore;
use crate::{debug, warn};
use serde::Serialize;
use std::collections::HashMap;

/// First bucket start hour
pub const GRID_FIRST_HOUR: u16 = 8;

/// Last bucket start hour (the bucket ends at 21:00)
pub const GRID_LAST_HOUR: u16 = 20;

/// Semester numbers reported when no semester is requested
pub const FIXED_SEMESTER_NUMBERS: [u8; 2] = [1, 2];

/// One hour of the sampling grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyBucket {
    /// Weekday
    pub day: Weekday,
    /// Inclusive start
    pub start: TimeOfDay,
    /// Exclusive end
    pub end: TimeOfDay,
}

impl HourlyBucket {
    /// Stable identifier, e.g. `1-08:00-09:00`
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}-{}-{}", self.day.number(), self.start, self.end)
    }

    /// Whether the bucket counts towards the morning percentage
    #[must_use]
    pub fn is_morning(&self) -> bool {
        self.start < AFTERNOON_START
    }
}

/// The full grid, day-major: 5 days times 13 hours
#[must_use]
pub fn hourly_grid() -> Vec<HourlyBucket> {
    Weekday::ALL
        .into_iter()
        .flat_map(|day| {
            (GRID_FIRST_HOUR..=GRID_LAST_HOUR).map(move |hour| HourlyBucket {
                day,
                start: TimeOfDay::hour(hour),
                end: TimeOfDay::hour(hour + 1),
            })
        })
        .collect()
}

/// Section occupying a bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAssignment {
    /// Subject name
    pub subject_name: String,
    /// Teacher full name or "Not assigned"
    pub teacher_name: String,
    /// Student group label
    pub group_code: String,
}

/// Occupancy of one grid bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlotOccupancy {
    /// `{day}-{HH:MM}-{HH:MM}`
    pub id: String,
    /// Weekday
    pub day_of_week: Weekday,
    /// Bucket start
    pub start_time: TimeOfDay,
    /// Bucket end
    pub end_time: TimeOfDay,
    /// Whether any occupation covers the bucket
    pub is_occupied: bool,
    /// First covering occupation, if any
    pub assignment: Option<SlotAssignment>,
}

/// Occupancy percentages and buckets for one classroom
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassroomOccupancy {
    /// Classroom
    pub classroom_id: String,
    /// Occupied share of buckets starting before 14:00
    pub morning_percentage: u8,
    /// Occupied share of buckets starting at or after 14:00
    pub afternoon_percentage: u8,
    /// Occupied share of all buckets
    pub total_percentage: u8,
    /// Every bucket of the grid in grid order
    pub slots: Vec<TimeSlotOccupancy>,
}

impl ClassroomOccupancy {
    /// Occupied buckets only
    pub fn occupied_slots(&self) -> impl Iterator<Item = &TimeSlotOccupancy> {
        self.slots.iter().filter(|slot| slot.is_occupied)
    }
}

/// Occupancy of a classroom within one semester
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemesterOccupancy {
    /// Requested semester id, or the semester number for the fixed enumeration
    pub semester_id: String,
    /// Display name
    pub semester_name: String,
    /// Result for the classroom
    pub classroom_occupancy: ClassroomOccupancy,
}

/// Occupancy of one classroom across the reported semesters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassroomOccupancySummary {
    /// Classroom id
    pub classroom_id: String,
    /// Classroom code
    pub code: String,
    /// Classroom display name
    pub name: String,
    /// Per-semester results
    pub semesters: Vec<SemesterOccupancy>,
}

/// Rounded percentage, halves away from zero
#[must_use]
pub fn percentage(occupied: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (occupied * 200 + total) / (total * 2);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// Occupancy of `classroom_id`, one entry per semester in scope
///
/// With `semester_id` the result has a single entry for that semester.
/// Without it, semesters 1 and 2 are reported and each covers every stored
/// semester with that number. An unknown classroom gets an all-free grid.
///
/// # Errors
/// Returns storage errors unchanged
pub fn get_classroom_occupancy<S>(
    store: &S,
    classroom_id: &str,
    semester_id: Option<&str>,
) -> Result<Vec<SemesterOccupancy>, OccupancyError>
where
    S: OccupancyStore + ?Sized,
{
    let occupations = store.list_occupations(classroom_id, None, None)?;
    let slots = resolve_time_slots(store, &occupations)?;

    let result = if let Some(requested) = semester_id {
        let semester_name = store
            .get_semester(requested)?
            .map_or_else(|| requested.to_string(), |s| s.name);
        let in_scope: Vec<&Occupation> = occupations
            .iter()
            .filter(|o| o.semester_id == requested)
            .collect();
        vec![SemesterOccupancy {
            semester_id: requested.to_string(),
            semester_name,
            classroom_occupancy: classroom_occupancy(classroom_id, &in_scope, &slots),
        }]
    } else {
        let semesters = store.semesters()?;
        FIXED_SEMESTER_NUMBERS
            .into_iter()
            .map(|number| {
                let in_scope: Vec<&Occupation> = occupations
                    .iter()
                    .filter(|o| semester_number(&semesters, &o.semester_id) == Some(number))
                    .collect();
                SemesterOccupancy {
                    semester_id: number.to_string(),
                    semester_name: format!("Semester {number}"),
                    classroom_occupancy: classroom_occupancy(classroom_id, &in_scope, &slots),
                }
            })
            .collect()
    };

    debug!(
        "Occupancy for classroom {classroom_id}: {} semester(s) from {} occupation(s)",
        result.len(),
        occupations.len()
    );
    Ok(result)
}

/// Occupancy of every classroom, ordered by classroom code
///
/// # Errors
/// Returns storage errors unchanged
pub fn get_all_classrooms_occupancy<S>(
    store: &S,
    semester_id: Option<&str>,
) -> Result<Vec<ClassroomOccupancySummary>, OccupancyError>
where
    S: OccupancyStore + ?Sized,
{
    let mut classrooms = store.classrooms()?;
    classrooms.sort_by(|a, b| a.code.cmp(&b.code));

    classrooms
        .into_iter()
        .map(|classroom| {
            Ok(ClassroomOccupancySummary {
                semesters: get_classroom_occupancy(store, &classroom.id, semester_id)?,
                classroom_id: classroom.id,
                code: classroom.code,
                name: classroom.name,
            })
        })
        .collect()
}

fn semester_number(semesters: &[Semester], semester_id: &str) -> Option<u8> {
    semesters
        .iter()
        .find(|s| s.id == semester_id)
        .map(|s| s.number)
}

fn resolve_time_slots<S>(
    store: &S,
    occupations: &[Occupation],
) -> Result<HashMap<String, TimeSlot>, OccupancyError>
where
    S: OccupancyStore + ?Sized,
{
    let mut slots = HashMap::new();
    for occupation in occupations {
        if slots.contains_key(&occupation.time_slot_id) {
            continue;
        }
        if let Some(slot) = store.get_time_slot(&occupation.time_slot_id)? {
            slots.insert(slot.id.clone(), slot);
        } else {
            warn!(
                "Occupation {} references unknown time slot {}",
                occupation.id, occupation.time_slot_id
            );
        }
    }
    Ok(slots)
}

/// Grid evaluation for an already scoped list of occupations
fn classroom_occupancy(
    classroom_id: &str,
    occupations: &[&Occupation],
    time_slots: &HashMap<String, TimeSlot>,
) -> ClassroomOccupancy {
    let grid = hourly_grid();
    let mut slots = Vec::with_capacity(grid.len());
    let (mut morning, mut morning_occupied) = (0, 0);
    let (mut afternoon, mut afternoon_occupied) = (0, 0);

    for bucket in &grid {
        let covering = occupations.iter().find(|occupation| {
            time_slots
                .get(&occupation.time_slot_id)
                .is_some_and(|slot| slot.covers(bucket.day, bucket.start, bucket.end))
        });
        let is_occupied = covering.is_some();

        if bucket.is_morning() {
            morning += 1;
            morning_occupied += usize::from(is_occupied);
        } else {
            afternoon += 1;
            afternoon_occupied += usize::from(is_occupied);
        }

        slots.push(TimeSlotOccupancy {
            id: bucket.id(),
            day_of_week: bucket.day,
            start_time: bucket.start,
            end_time: bucket.end,
            is_occupied,
            assignment: covering.map(|occupation| SlotAssignment {
                subject_name: occupation.section.subject_name.clone(),
                teacher_name: occupation.section.teacher_label().to_string(),
                group_code: occupation.section.group_code.clone(),
            }),
        });
    }

    ClassroomOccupancy {
        classroom_id: classroom_id.to_string(),
        morning_percentage: percentage(morning_occupied, morning),
        afternoon_percentage: percentage(afternoon_occupied, afternoon),
        total_percentage: percentage(morning_occupied + afternoon_occupied, grid.len()),
        slots,
    }
}
