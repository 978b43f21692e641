//! Data models for the campus: rooms, weekly slots, semesters and occupations

pub mod classroom;
pub mod occupation;
pub mod semester;
pub mod time_slot;

pub use classroom::{Classroom, RoomType};
pub use occupation::{Occupation, SectionSummary, WeekRange, WeekRangeType, NOT_ASSIGNED};
pub use semester::Semester;
pub use time_slot::{Shift, TimeSlot, Weekday, AFTERNOON_START};
