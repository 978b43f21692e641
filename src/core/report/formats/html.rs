//! HTML report generator
//!
//! Renders a self-contained page with embedded CSS through the askama
//! template `templates/occupancy.html`. Names are HTML-escaped by askama.

use crate::core::models::Weekday;
use crate::core::report::{grid_rows, GridRow, ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;

/// One classroom/semester block of the page
struct HtmlSection {
    code: String,
    name: String,
    semester_name: String,
    morning: u8,
    afternoon: u8,
    total: u8,
    is_empty: bool,
    rows: Vec<GridRow>,
}

#[derive(Template)]
#[template(path = "occupancy.html")]
struct OccupancyPage<'a> {
    title: &'a str,
    scope: String,
    classroom_count: usize,
    average_total: u8,
    version: &'static str,
    days: Vec<&'static str>,
    sections: Vec<HtmlSection>,
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn build_sections(ctx: &ReportContext) -> Vec<HtmlSection> {
        ctx.classrooms
            .iter()
            .flat_map(|classroom| {
                classroom.semesters.iter().map(move |semester| {
                    let occ = &semester.classroom_occupancy;
                    HtmlSection {
                        code: classroom.code.clone(),
                        name: classroom.name.clone(),
                        semester_name: semester.semester_name.clone(),
                        morning: occ.morning_percentage,
                        afternoon: occ.afternoon_percentage,
                        total: occ.total_percentage,
                        is_empty: occ.occupied_slots().next().is_none(),
                        rows: grid_rows(occ),
                    }
                })
            })
            .collect()
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let page = OccupancyPage {
            title: ctx.title,
            scope: ctx.scope_label(),
            classroom_count: ctx.classroom_count(),
            average_total: ctx.average_total(),
            version: crate::get_version(),
            days: Weekday::ALL.iter().map(|d| d.short_name()).collect(),
            sections: Self::build_sections(ctx),
        };
        Ok(page.render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::fixtures;

    #[test]
    fn test_html_render() {
        let summaries = fixtures::summaries();
        let ctx = ReportContext::new("Campus <Main>", None, &summaries);
        let html = HtmlReporter::new().render(&ctx).unwrap();

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Campus &lt;Main&gt; Occupancy Report"));
        assert!(html.contains("Drawing I (GR1)"));
        assert!(html.contains("Anna Puig"));
        assert!(html.contains("No occupied hours."));
    }
}
