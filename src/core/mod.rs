//! Core occupancy domain shared by the library and the CLI

pub mod calendar;
pub mod conflicts;
pub mod error;
pub mod models;
pub mod occupancy;
pub mod report;
pub mod repository;
pub mod validation;

pub use calendar::{TimeOfDay, WeekSet};
pub use conflicts::{find_conflicts, ConflictQuery, ConflictingOccupation, SemesterScope};
pub use error::OccupancyError;
pub use occupancy::{get_all_classrooms_occupancy, get_classroom_occupancy};
pub use validation::{validate_assignment, AssignmentRequest, ValidationResult};
