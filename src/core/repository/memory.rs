//! In-memory store used by the CLI and by tests
//!
//! All tables live behind one `RwLock`. Reads clone out of a read guard; the
//! booking writer re-runs the conflict check while holding the write guard, so
//! two concurrent bookings of the same classroom weeks cannot both commit.

use super::OccupancyStore;
use crate::core::calendar::WeekSet;
use crate::core::conflicts::{collect_conflicts, ConflictQuery, ConflictingOccupation, SemesterScope};
use crate::core::error::OccupancyError;
use crate::core::models::{
    Classroom, Occupation, SectionSummary, Semester, TimeSlot, WeekRange,
};
use crate::info;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Occupation to be created or used as the new state of an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOccupation {
    /// Classrooms to book
    pub classroom_ids: Vec<String>,
    /// Weekly slot
    pub time_slot_id: String,
    /// Owning semester
    pub semester_id: String,
    /// Weeks to occupy
    pub weeks: WeekRange,
    /// Section details
    pub section: SectionSummary,
}

#[derive(Debug, Default)]
struct Tables {
    classrooms: BTreeMap<String, Classroom>,
    time_slots: BTreeMap<String, TimeSlot>,
    semesters: BTreeMap<String, Semester>,
    /// Insertion order is kept; reports pick the first matching occupation
    occupations: Vec<Occupation>,
    next_id: u64,
}

impl Tables {
    fn teaching_weeks(&self, semester_id: &str) -> u8 {
        self.semesters
            .get(semester_id)
            .map_or(crate::config::FALLBACK_TEACHING_WEEKS, |s| s.teaching_weeks)
    }

    /// Check references and weeks, returning the candidate's effective weeks
    fn validate(&self, new: &NewOccupation) -> Result<WeekSet, OccupancyError> {
        if new.classroom_ids.is_empty() {
            return Err(OccupancyError::InvalidInput(
                "an occupation needs at least one classroom".to_string(),
            ));
        }
        for classroom_id in &new.classroom_ids {
            if !self.classrooms.contains_key(classroom_id) {
                return Err(OccupancyError::not_found("classroom", classroom_id.as_str()));
            }
        }
        if !self.time_slots.contains_key(&new.time_slot_id) {
            return Err(OccupancyError::not_found("time slot", new.time_slot_id.as_str()));
        }
        let semester = self
            .semesters
            .get(&new.semester_id)
            .ok_or_else(|| OccupancyError::not_found("semester", new.semester_id.as_str()))?;

        if let WeekRange::Weeks(weeks) = &new.weeks {
            if weeks.is_empty() {
                return Err(OccupancyError::InvalidInput(
                    "at least one week is required".to_string(),
                ));
            }
            if let Some(week) = weeks
                .iter()
                .find(|w| *w == 0 || *w > semester.teaching_weeks)
            {
                return Err(OccupancyError::InvalidInput(format!(
                    "week {week} is outside {} (weeks 1-{})",
                    semester.name, semester.teaching_weeks
                )));
            }
        }

        Ok(new.weeks.effective_weeks(semester.teaching_weeks))
    }

    /// Conflicts inside the semester of `new`, for each of its distinct classrooms
    fn conflicts_for(
        &self,
        new: &NewOccupation,
        weeks: &WeekSet,
        exclude: Option<&str>,
    ) -> Vec<ConflictingOccupation> {
        let mut seen: Vec<&str> = Vec::new();
        let mut conflicts = Vec::new();
        for classroom_id in &new.classroom_ids {
            if seen.contains(&classroom_id.as_str()) {
                continue;
            }
            seen.push(classroom_id);

            let mut query = ConflictQuery::new(
                classroom_id,
                &new.time_slot_id,
                weeks,
                SemesterScope::Scoped(&new.semester_id),
            );
            if let Some(id) = exclude {
                query = query.excluding(id);
            }
            conflicts.extend(collect_conflicts(&self.occupations, &query, |semester_id| {
                self.teaching_weeks(semester_id)
            }));
        }
        conflicts
    }

    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let id = format!("occ-{}", self.next_id);
            if !self.occupations.iter().any(|o| o.id == id) {
                return id;
            }
        }
    }
}

/// Thread-safe in-memory implementation of [`OccupancyStore`] plus the
/// booking write boundary
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add or replace a classroom
    pub fn insert_classroom(&self, classroom: Classroom) {
        self.write()
            .classrooms
            .insert(classroom.id.clone(), classroom);
    }

    /// Add or replace a time slot
    pub fn insert_time_slot(&self, time_slot: TimeSlot) {
        self.write()
            .time_slots
            .insert(time_slot.id.clone(), time_slot);
    }

    /// Add or replace a semester
    pub fn insert_semester(&self, semester: Semester) {
        self.write()
            .semesters
            .insert(semester.id.clone(), semester);
    }

    /// Store an occupation as-is, without reference or conflict checks
    ///
    /// Used when loading existing data, which may already contain double
    /// bookings that audits need to see.
    pub fn seed_occupation(&self, occupation: Occupation) {
        let mut tables = self.write();
        tables.occupations.retain(|o| o.id != occupation.id);
        tables.occupations.push(occupation);
    }

    /// Create an occupation if it collides with nothing
    ///
    /// The conflict check runs under the write lock, scoped to the booking's
    /// semester, so the same classroom, slot, semester and week are never
    /// committed twice. Other semesters and academic years are not consulted.
    ///
    /// # Errors
    /// - [`OccupancyError::NotFound`] for an unknown classroom, time slot or semester
    /// - [`OccupancyError::InvalidInput`] for no classrooms or an empty/out-of-range week set
    /// - [`OccupancyError::Conflict`] listing every collision; nothing is stored
    pub fn create_occupation(&self, new: NewOccupation) -> Result<Occupation, OccupancyError> {
        let mut tables = self.write();
        let weeks = tables.validate(&new)?;
        let conflicts = tables.conflicts_for(&new, &weeks, None);
        if !conflicts.is_empty() {
            return Err(OccupancyError::Conflict(conflicts));
        }

        let occupation = Occupation {
            id: tables.allocate_id(),
            classroom_ids: new.classroom_ids,
            time_slot_id: new.time_slot_id,
            semester_id: new.semester_id,
            weeks: new.weeks,
            section: new.section,
        };
        tables.occupations.push(occupation.clone());
        info!(
            "Created occupation {} ({} / {}) in {} classroom(s)",
            occupation.id,
            occupation.section.subject_name,
            occupation.section.group_code,
            occupation.classroom_ids.len()
        );
        Ok(occupation)
    }

    /// Reschedule an existing occupation, ignoring its current booking
    ///
    /// # Errors
    /// Same as [`create_occupation`](Self::create_occupation), plus
    /// [`OccupancyError::NotFound`] when `id` does not exist
    pub fn update_occupation(
        &self,
        id: &str,
        new: NewOccupation,
    ) -> Result<Occupation, OccupancyError> {
        let mut tables = self.write();
        let index = tables
            .occupations
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| OccupancyError::not_found("occupation", id))?;
        let weeks = tables.validate(&new)?;
        let conflicts = tables.conflicts_for(&new, &weeks, Some(id));
        if !conflicts.is_empty() {
            return Err(OccupancyError::Conflict(conflicts));
        }

        let occupation = Occupation {
            id: id.to_string(),
            classroom_ids: new.classroom_ids,
            time_slot_id: new.time_slot_id,
            semester_id: new.semester_id,
            weeks: new.weeks,
            section: new.section,
        };
        tables.occupations[index] = occupation.clone();
        info!("Updated occupation {id}");
        Ok(occupation)
    }

    /// Remove an occupation
    ///
    /// # Errors
    /// Returns [`OccupancyError::NotFound`] when `id` does not exist
    pub fn delete_occupation(&self, id: &str) -> Result<Occupation, OccupancyError> {
        let mut tables = self.write();
        let index = tables
            .occupations
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| OccupancyError::not_found("occupation", id))?;
        info!("Deleted occupation {id}");
        Ok(tables.occupations.remove(index))
    }

    /// Occupation by id
    #[must_use]
    pub fn get_occupation(&self, id: &str) -> Option<Occupation> {
        self.read().occupations.iter().find(|o| o.id == id).cloned()
    }

    /// Number of stored occupations
    #[must_use]
    pub fn occupation_count(&self) -> usize {
        self.read().occupations.len()
    }
}

impl OccupancyStore for MemoryStore {
    fn list_occupations(
        &self,
        classroom_id: &str,
        time_slot_id: Option<&str>,
        semester_id: Option<&str>,
    ) -> Result<Vec<Occupation>, OccupancyError> {
        Ok(self
            .read()
            .occupations
            .iter()
            .filter(|o| o.books(classroom_id))
            .filter(|o| time_slot_id.map_or(true, |ts| o.time_slot_id == ts))
            .filter(|o| semester_id.map_or(true, |s| o.semester_id == s))
            .cloned()
            .collect())
    }

    fn get_classroom(&self, id: &str) -> Result<Option<Classroom>, OccupancyError> {
        Ok(self.read().classrooms.get(id).cloned())
    }

    fn classrooms(&self) -> Result<Vec<Classroom>, OccupancyError> {
        Ok(self.read().classrooms.values().cloned().collect())
    }

    fn get_time_slot(&self, id: &str) -> Result<Option<TimeSlot>, OccupancyError> {
        Ok(self.read().time_slots.get(id).cloned())
    }

    fn time_slots(&self) -> Result<Vec<TimeSlot>, OccupancyError> {
        Ok(self.read().time_slots.values().cloned().collect())
    }

    fn get_semester(&self, id: &str) -> Result<Option<Semester>, OccupancyError> {
        Ok(self.read().semesters.get(id).cloned())
    }

    fn semesters(&self) -> Result<Vec<Semester>, OccupancyError> {
        Ok(self.read().semesters.values().cloned().collect())
    }
}
