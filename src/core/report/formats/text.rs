//! Plain-text report for terminal output

use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Plain-text report generator
pub struct TextReporter;

impl TextReporter {
    /// Create a new text reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TextReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let mut out = String::new();
        writeln!(out, "{} - {}", ctx.title, ctx.scope_label())?;
        writeln!(
            out,
            "{:<12} {:<12} {:>8} {:>10} {:>6}",
            "Classroom", "Semester", "Morning", "Afternoon", "Total"
        )?;

        for classroom in ctx.classrooms {
            for semester in &classroom.semesters {
                let occ = &semester.classroom_occupancy;
                writeln!(
                    out,
                    "{:<12} {:<12} {:>7}% {:>9}% {:>5}%",
                    classroom.code,
                    semester.semester_name,
                    occ.morning_percentage,
                    occ.afternoon_percentage,
                    occ.total_percentage
                )?;
                for slot in occ.occupied_slots() {
                    if let Some(a) = &slot.assignment {
                        writeln!(
                            out,
                            "    {} {}-{}  {} ({}) - {}",
                            slot.day_of_week,
                            slot.start_time,
                            slot.end_time,
                            a.subject_name,
                            a.group_code,
                            a.teacher_name
                        )?;
                    }
                }
            }
        }

        Ok(out)
    }
}
