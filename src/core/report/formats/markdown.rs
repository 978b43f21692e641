//! Markdown report generator
//!
//! Generates occupancy reports as Markdown tables. These render well in
//! GitHub, GitLab, and VS Code.

use crate::core::models::Weekday;
use crate::core::report::{grid_rows, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/occupancy.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{title}}", &escape_cell(ctx.title));
        output = output.replace("{{scope}}", &ctx.scope_label());
        output = output.replace("{{classroom_count}}", &ctx.classroom_count().to_string());
        output = output.replace("{{average_total}}", &ctx.average_total().to_string());
        output = output.replace("{{version}}", crate::get_version());

        output = output.replace("{{summary_table}}", &Self::generate_summary_table(ctx));
        output = output.replace("{{classroom_sections}}", &Self::generate_sections(ctx));

        output
    }

    /// One row per classroom and semester
    fn generate_summary_table(ctx: &ReportContext) -> String {
        let mut table = String::new();

        table.push_str("| Classroom | Name | Semester | Morning | Afternoon | Total |\n");
        table.push_str("|---|---|---|---|---|---|\n");

        for classroom in ctx.classrooms {
            for semester in &classroom.semesters {
                let occ = &semester.classroom_occupancy;
                let _ = writeln!(
                    table,
                    "| {} | {} | {} | {}% | {}% | {}% |",
                    escape_cell(&classroom.code),
                    escape_cell(&classroom.name),
                    escape_cell(&semester.semester_name),
                    occ.morning_percentage,
                    occ.afternoon_percentage,
                    occ.total_percentage
                );
            }
        }

        table
    }

    /// Hour-by-weekday grid per classroom and semester; empty grids are skipped
    fn generate_sections(ctx: &ReportContext) -> String {
        let mut out = String::new();

        for classroom in ctx.classrooms {
            for semester in &classroom.semesters {
                let occ = &semester.classroom_occupancy;
                let _ = writeln!(
                    out,
                    "### {} · {}\n",
                    escape_cell(&classroom.code),
                    escape_cell(&semester.semester_name)
                );
                if occ.occupied_slots().next().is_none() {
                    out.push_str("_No occupied hours._\n\n");
                    continue;
                }

                out.push_str("| Hour |");
                for day in Weekday::ALL {
                    let _ = write!(out, " {day} |");
                }
                out.push_str("\n|---|---|---|---|---|---|\n");

                for row in grid_rows(occ) {
                    let _ = write!(out, "| {} |", row.label);
                    for cell in &row.cells {
                        if cell.occupied {
                            let _ = write!(out, " {} |", escape_cell(&cell.label));
                        } else {
                            out.push_str(" · |");
                        }
                    }
                    out.push('\n');
                }
                out.push('\n');
            }
        }

        out
    }
}

/// Keep pipes in names from breaking table columns
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
