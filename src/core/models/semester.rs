//! Semester model

use crate::core::calendar::WeekSet;
use serde::{Deserialize, Serialize};

/// A bounded academic period; scopes which weeks an occupation refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    /// Storage identifier
    pub id: String,

    /// Semester number within the academic year (1 or 2)
    pub number: u8,

    /// Academic year label (e.g., "2025-2026")
    pub academic_year: String,

    /// Display name
    pub name: String,

    /// First day (ISO `YYYY-MM-DD`)
    #[serde(default)]
    pub start_date: String,

    /// Last day (ISO `YYYY-MM-DD`)
    #[serde(default)]
    pub end_date: String,

    /// Number of teaching weeks; full-semester bookings occupy `1..=teaching_weeks`
    pub teaching_weeks: u8,
}

impl Semester {
    /// Create a semester without a date range
    #[must_use]
    pub fn new(id: &str, number: u8, academic_year: &str, teaching_weeks: u8) -> Self {
        Self {
            id: id.to_string(),
            number,
            academic_year: academic_year.to_string(),
            name: format!("Semester {number}"),
            start_date: String::new(),
            end_date: String::new(),
            teaching_weeks,
        }
    }

    /// Every teaching week of the semester
    #[must_use]
    pub fn all_weeks(&self) -> WeekSet {
        WeekSet::full(self.teaching_weeks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_weeks() {
        let semester = Semester::new("s1", 1, "2025-2026", 15);
        assert_eq!(semester.name, "Semester 1");
        assert_eq!(semester.all_weeks().len(), 15);
        assert!(semester.all_weeks().contains(1));
    }
}
