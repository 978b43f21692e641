//! TOML campus dataset loader
//!
//! Rows are deserialized into loose shapes first, then checked and converted
//! into the typed model. The first problem found is reported as
//! [`OccupancyError::Dataset`].

use super::MemoryStore;
use crate::core::calendar::WeekSet;
use crate::core::error::OccupancyError;
use crate::core::models::{
    Classroom, Occupation, SectionSummary, Semester, TimeSlot, WeekRange, WeekRangeType,
};
use crate::{debug, info};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDataset {
    #[serde(default)]
    semesters: Vec<SemesterRow>,
    #[serde(default)]
    classrooms: Vec<Classroom>,
    #[serde(default)]
    time_slots: Vec<TimeSlot>,
    #[serde(default)]
    occupations: Vec<OccupationRow>,
}

#[derive(Debug, Deserialize)]
struct SemesterRow {
    id: String,
    number: u8,
    academic_year: String,
    name: Option<String>,
    #[serde(default)]
    start_date: String,
    #[serde(default)]
    end_date: String,
    teaching_weeks: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct OccupationRow {
    id: String,
    classroom_ids: Vec<String>,
    time_slot_id: String,
    semester_id: String,
    subject_name: String,
    group_code: String,
    teacher_name: Option<String>,
    #[serde(default)]
    is_full_semester: bool,
    week_range_type: Option<WeekRangeType>,
    #[serde(default)]
    week_numbers: Vec<u8>,
}

/// Read and validate a dataset file
///
/// # Errors
/// Returns [`OccupancyError::Io`] when the file cannot be read, otherwise the
/// errors of [`parse_dataset`]
pub fn load_dataset(path: &Path, default_teaching_weeks: u8) -> Result<MemoryStore, OccupancyError> {
    info!("Loading dataset from {}", path.display());
    let contents = fs::read_to_string(path)?;
    parse_dataset(&contents, default_teaching_weeks)
}

/// Parse and validate dataset text
///
/// `default_teaching_weeks` applies to semesters without `teaching_weeks`.
/// Occupations are stored as found, overlapping ones included.
///
/// # Errors
/// Returns [`OccupancyError::Toml`] for malformed TOML and
/// [`OccupancyError::Dataset`] for the first inconsistent row
pub fn parse_dataset(
    contents: &str,
    default_teaching_weeks: u8,
) -> Result<MemoryStore, OccupancyError> {
    let raw: RawDataset = toml::from_str(contents)?;
    let store = MemoryStore::new();

    let mut semester_weeks: HashMap<String, u8> = HashMap::new();
    for row in raw.semesters {
        let semester = semester_from_row(row, default_teaching_weeks)?;
        if semester_weeks
            .insert(semester.id.clone(), semester.teaching_weeks)
            .is_some()
        {
            return Err(dataset_error(format!("duplicate semester id '{}'", semester.id)));
        }
        store.insert_semester(semester);
    }

    let mut classroom_ids = HashSet::new();
    let mut codes = HashSet::new();
    for classroom in raw.classrooms {
        if !classroom_ids.insert(classroom.id.clone()) {
            return Err(dataset_error(format!("duplicate classroom id '{}'", classroom.id)));
        }
        if !codes.insert(classroom.code.to_lowercase()) {
            return Err(dataset_error(format!(
                "duplicate classroom code '{}'",
                classroom.code
            )));
        }
        store.insert_classroom(classroom);
    }

    let mut slot_ids = HashSet::new();
    for slot in raw.time_slots {
        if slot.end_time <= slot.start_time {
            return Err(dataset_error(format!(
                "time slot '{}' ends at {} before it starts at {}",
                slot.id, slot.end_time, slot.start_time
            )));
        }
        if !slot_ids.insert(slot.id.clone()) {
            return Err(dataset_error(format!("duplicate time slot id '{}'", slot.id)));
        }
        store.insert_time_slot(slot);
    }

    let mut occupation_ids = HashSet::new();
    for row in raw.occupations {
        if !occupation_ids.insert(row.id.clone()) {
            return Err(dataset_error(format!("duplicate occupation id '{}'", row.id)));
        }
        let teaching_weeks = *semester_weeks.get(&row.semester_id).ok_or_else(|| {
            dataset_error(format!(
                "occupation '{}' references unknown semester '{}'",
                row.id, row.semester_id
            ))
        })?;
        if !slot_ids.contains(&row.time_slot_id) {
            return Err(dataset_error(format!(
                "occupation '{}' references unknown time slot '{}'",
                row.id, row.time_slot_id
            )));
        }
        if row.classroom_ids.is_empty() {
            return Err(dataset_error(format!("occupation '{}' has no classrooms", row.id)));
        }
        if let Some(missing) = row.classroom_ids.iter().find(|id| !classroom_ids.contains(*id)) {
            return Err(dataset_error(format!(
                "occupation '{}' references unknown classroom '{missing}'",
                row.id
            )));
        }
        store.seed_occupation(occupation_from_row(row, teaching_weeks)?);
    }

    debug!("Dataset loaded: {} occupation(s)", store.occupation_count());
    Ok(store)
}

fn dataset_error(message: String) -> OccupancyError {
    OccupancyError::Dataset(message)
}

fn semester_from_row(row: SemesterRow, default_teaching_weeks: u8) -> Result<Semester, OccupancyError> {
    if !(1..=2).contains(&row.number) {
        return Err(dataset_error(format!(
            "semester '{}' has number {}, expected 1 or 2",
            row.id, row.number
        )));
    }
    let teaching_weeks = row.teaching_weeks.unwrap_or(default_teaching_weeks);
    if !(1..=53).contains(&teaching_weeks) {
        return Err(dataset_error(format!(
            "semester '{}' has {teaching_weeks} teaching weeks, expected 1-53",
            row.id
        )));
    }
    Ok(Semester {
        name: row
            .name
            .unwrap_or_else(|| format!("Semester {}", row.number)),
        id: row.id,
        number: row.number,
        academic_year: row.academic_year,
        start_date: row.start_date,
        end_date: row.end_date,
        teaching_weeks,
    })
}

fn occupation_from_row(row: OccupationRow, teaching_weeks: u8) -> Result<Occupation, OccupancyError> {
    let declared = if row.is_full_semester {
        WeekRangeType::Full
    } else {
        WeekRangeType::SpecificWeeks
    };
    if let Some(range_type) = row.week_range_type {
        if range_type != declared {
            return Err(dataset_error(format!(
                "occupation '{}' has week_range_type {range_type:?} but is_full_semester = {}",
                row.id, row.is_full_semester
            )));
        }
    }

    let weeks: WeekSet = row.week_numbers.iter().copied().collect();
    if !row.is_full_semester {
        if let Some(week) = weeks.iter().find(|w| *w == 0 || *w > teaching_weeks) {
            return Err(dataset_error(format!(
                "occupation '{}' uses week {week}, semester '{}' has weeks 1-{teaching_weeks}",
                row.id, row.semester_id
            )));
        }
    }

    Ok(Occupation {
        weeks: WeekRange::from_parts(row.is_full_semester, weeks),
        section: SectionSummary {
            subject_name: row.subject_name,
            group_code: row.group_code,
            teacher_name: row.teacher_name,
        },
        id: row.id,
        classroom_ids: row.classroom_ids,
        time_slot_id: row.time_slot_id,
        semester_id: row.semester_id,
    })
}
