//! Occupancy command handler
//!
//! Computes hourly occupancy for one or every classroom and renders it in
//! the requested format.

use super::{classroom_by_code, load_store};
use room_occupancy::config::Config;
use room_occupancy::core::occupancy::{
    get_all_classrooms_occupancy, get_classroom_occupancy, ClassroomOccupancySummary,
};
use room_occupancy::core::report::{ReportContext, ReportFormat, ReportGenerator};
use room_occupancy::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Arguments of the occupancy command
pub struct OccupancyArgs<'a> {
    /// Dataset file, config default when `None`
    pub dataset: Option<&'a Path>,
    /// Only this classroom code
    pub classroom: Option<&'a str>,
    /// Semester id
    pub semester: Option<&'a str>,
    /// Format name
    pub format: &'a str,
    /// Output file
    pub output: Option<&'a Path>,
}

/// Run the occupancy command.
pub fn run(args: &OccupancyArgs, config: &Config) -> i32 {
    match generate(args, config) {
        Ok(Some(path)) => {
            println!("✓ Report generated: {}", path.display());
            0
        }
        Ok(None) => 0,
        Err(err) => {
            error!("Occupancy report failed: {err}");
            eprintln!("{err}");
            1
        }
    }
}

/// Render the report; returns the written file, or `None` when printed
fn generate(args: &OccupancyArgs, config: &Config) -> Result<Option<PathBuf>, String> {
    let format = ReportFormat::from_str(args.format).map_err(|e| format!("✗ {e}"))?;
    let (path, store) = load_store(args.dataset, config)?;

    let summaries: Vec<ClassroomOccupancySummary> = if let Some(code) = args.classroom {
        let classroom = classroom_by_code(&store, code)?;
        let semesters = get_classroom_occupancy(&store, &classroom.id, args.semester)
            .map_err(|e| format!("✗ {e}"))?;
        vec![ClassroomOccupancySummary {
            classroom_id: classroom.id,
            code: classroom.code,
            name: classroom.name,
            semesters,
        }]
    } else {
        get_all_classrooms_occupancy(&store, args.semester).map_err(|e| format!("✗ {e}"))?
    };
    info!(
        "Computed occupancy for {} classroom(s) from {}",
        summaries.len(),
        path.display()
    );

    let title = path
        .file_stem()
        .map_or_else(|| "Campus".to_string(), |s| s.to_string_lossy().to_string());
    let ctx = ReportContext::new(&title, args.semester, &summaries);
    let reporter = format.reporter();

    let output = match (args.output, format) {
        (Some(output), _) => output.to_path_buf(),
        (None, ReportFormat::Text) => {
            let text = reporter
                .render(&ctx)
                .map_err(|e| format!("✗ Failed to render report: {e}"))?;
            print!("{text}");
            return Ok(None);
        }
        (None, _) => {
            let reports_dir = PathBuf::from(&config.paths.reports_dir);
            std::fs::create_dir_all(&reports_dir).map_err(|e| {
                format!(
                    "✗ Failed to create reports directory {}: {e}",
                    reports_dir.display()
                )
            })?;
            reports_dir.join(format!("{title}_occupancy.{}", format.extension()))
        }
    };

    reporter
        .generate(&ctx, &output)
        .map_err(|e| format!("✗ Failed to write report {}: {e}", output.display()))?;
    Ok(Some(output))
}
