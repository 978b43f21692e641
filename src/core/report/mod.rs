//! Occupancy report generation
//!
//! Renders the output of the occupancy reporter as plain text, Markdown or
//! HTML. Every format shows, per classroom and semester, the three
//! percentages and a weekday-by-hour grid of the occupied buckets.

pub mod formats;

use crate::core::calendar::TimeOfDay;
use crate::core::models::Weekday;
use crate::core::occupancy::{
    ClassroomOccupancy, ClassroomOccupancySummary, GRID_FIRST_HOUR, GRID_LAST_HOUR,
};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat, TextReporter};

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Report title, usually the dataset name
    pub title: &'a str,
    /// Requested semester, `None` for the fixed semester enumeration
    pub semester_filter: Option<&'a str>,
    /// Per-classroom results, already in display order
    pub classrooms: &'a [ClassroomOccupancySummary],
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        title: &'a str,
        semester_filter: Option<&'a str>,
        classrooms: &'a [ClassroomOccupancySummary],
    ) -> Self {
        Self {
            title,
            semester_filter,
            classrooms,
        }
    }

    /// Semester scope label
    #[must_use]
    pub fn scope_label(&self) -> String {
        self.semester_filter.map_or_else(
            || "Semesters 1 and 2".to_string(),
            |id| {
                self.classrooms
                    .iter()
                    .find_map(|c| c.semesters.first())
                    .map_or_else(|| id.to_string(), |s| s.semester_name.clone())
            },
        )
    }

    /// Number of classrooms in the report
    #[must_use]
    pub fn classroom_count(&self) -> usize {
        self.classrooms.len()
    }

    /// Mean total percentage over every classroom/semester pair, rounded
    #[must_use]
    pub fn average_total(&self) -> u8 {
        let totals: Vec<usize> = self
            .classrooms
            .iter()
            .flat_map(|c| &c.semesters)
            .map(|s| usize::from(s.classroom_occupancy.total_percentage))
            .collect();
        if totals.is_empty() {
            return 0;
        }
        let sum: usize = totals.iter().sum();
        u8::try_from((sum * 2 + totals.len()) / (totals.len() * 2)).unwrap_or(100)
    }
}

/// One hour row of the weekday grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    /// `HH:MM-HH:MM`
    pub label: String,
    /// One cell per weekday, Monday first
    pub cells: Vec<GridCell>,
}

/// One bucket of the weekday grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// Whether the bucket is occupied
    pub occupied: bool,
    /// `Subject (group)`, empty when free
    pub label: String,
    /// Teacher name, empty when free
    pub teacher: String,
}

/// Lay the buckets of `occupancy` out as hour rows by weekday columns
#[must_use]
pub fn grid_rows(occupancy: &ClassroomOccupancy) -> Vec<GridRow> {
    (GRID_FIRST_HOUR..=GRID_LAST_HOUR)
        .map(|hour| {
            let start = TimeOfDay::hour(hour);
            let cells = Weekday::ALL
                .into_iter()
                .map(|day| {
                    let assignment = occupancy
                        .slots
                        .iter()
                        .find(|slot| slot.day_of_week == day && slot.start_time == start)
                        .and_then(|slot| slot.assignment.as_ref());
                    assignment.map_or_else(
                        || GridCell {
                            occupied: false,
                            label: String::new(),
                            teacher: String::new(),
                        },
                        |a| GridCell {
                            occupied: true,
                            label: format!("{} ({})", a.subject_name, a.group_code),
                            teacher: a.teacher_name.clone(),
                        },
                    )
                })
                .collect();
            GridRow {
                label: format!("{start}-{}", TimeOfDay::hour(hour + 1)),
                cells,
            }
        })
        .collect()
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        std::fs::write(output_path, report_content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
