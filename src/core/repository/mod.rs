//! Read boundary between the occupancy engine and storage
//!
//! The checker and the reporter only ever see an [`OccupancyStore`]. Storage
//! implementations hand back fully typed, already validated records so the
//! engine never has to second-guess core fields.

pub mod dataset;
pub mod memory;

use crate::core::error::OccupancyError;
use crate::core::models::{Classroom, Occupation, Semester, TimeSlot, Weekday};

pub use dataset::{load_dataset, parse_dataset};
pub use memory::{MemoryStore, NewOccupation};

/// Read access to classrooms, time slots, semesters and occupations
pub trait OccupancyStore {
    /// Occupations linked to `classroom_id`, optionally narrowed to one time
    /// slot and one semester
    ///
    /// An unknown classroom yields an empty list.
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be read
    fn list_occupations(
        &self,
        classroom_id: &str,
        time_slot_id: Option<&str>,
        semester_id: Option<&str>,
    ) -> Result<Vec<Occupation>, OccupancyError>;

    /// Classroom by id
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be read
    fn get_classroom(&self, id: &str) -> Result<Option<Classroom>, OccupancyError>;

    /// Every classroom
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be read
    fn classrooms(&self) -> Result<Vec<Classroom>, OccupancyError>;

    /// Time slot by id
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be read
    fn get_time_slot(&self, id: &str) -> Result<Option<TimeSlot>, OccupancyError>;

    /// Every time slot
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be read
    fn time_slots(&self) -> Result<Vec<TimeSlot>, OccupancyError>;

    /// Semester by id
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be read
    fn get_semester(&self, id: &str) -> Result<Option<Semester>, OccupancyError>;

    /// Every semester
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be read
    fn semesters(&self) -> Result<Vec<Semester>, OccupancyError>;

    /// Time slots on one weekday, ordered by start time
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be read
    fn time_slots_on(&self, day: Weekday) -> Result<Vec<TimeSlot>, OccupancyError> {
        let mut slots: Vec<TimeSlot> = self
            .time_slots()?
            .into_iter()
            .filter(|slot| slot.day_of_week == day)
            .collect();
        slots.sort_by_key(|slot| (slot.start_time, slot.end_time));
        Ok(slots)
    }

    /// Classroom by its human-readable code (case-insensitive)
    ///
    /// # Errors
    /// Returns an error if the underlying storage cannot be read
    fn find_classroom_by_code(&self, code: &str) -> Result<Option<Classroom>, OccupancyError> {
        Ok(self
            .classrooms()?
            .into_iter()
            .find(|room| room.code.eq_ignore_ascii_case(code)))
    }
}
