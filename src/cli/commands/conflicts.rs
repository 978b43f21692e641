//! Conflicts command handler

use super::{classroom_by_code, load_store};
use room_occupancy::config::Config;
use room_occupancy::core::calendar::WeekSet;
use room_occupancy::core::conflicts::{
    find_conflicts, group_by_occupation, ConflictQuery, SemesterScope,
};
use room_occupancy::core::repository::OccupancyStore;
use room_occupancy::{error, info, verbose};
use std::path::Path;

/// Arguments of the conflicts command
pub struct ConflictsArgs<'a> {
    /// Dataset file, config default when `None`
    pub dataset: Option<&'a Path>,
    /// Classroom code
    pub classroom: &'a str,
    /// Time slot id
    pub slot: &'a str,
    /// Week list text
    pub weeks: &'a str,
    /// Semester id; global scope when `None`
    pub semester: Option<&'a str>,
    /// Occupation to ignore
    pub exclude: Option<&'a str>,
}

/// Run the conflicts command.
///
/// Returns the process exit code: 0 when the booking is free, 2 on conflicts,
/// 1 on errors.
pub fn run(args: &ConflictsArgs, config: &Config) -> i32 {
    match check(args, config) {
        Ok(0) => 0,
        Ok(_) => 2,
        Err(err) => {
            error!("Conflict check failed: {err}");
            eprintln!("{err}");
            1
        }
    }
}

fn check(args: &ConflictsArgs, config: &Config) -> Result<usize, String> {
    let (path, store) = load_store(args.dataset, config)?;
    let classroom = classroom_by_code(&store, args.classroom)?;

    let weeks: WeekSet = args.weeks.parse().map_err(|e| format!("✗ {e}"))?;

    if let Some(semester) = args.semester {
        if store
            .get_semester(semester)
            .map_err(|e| format!("✗ {e}"))?
            .is_none()
        {
            return Err(format!("✗ Unknown semester: {semester}"));
        }
    }
    let slot_label = store
        .get_time_slot(args.slot)
        .map_err(|e| format!("✗ {e}"))?
        .map_or_else(|| args.slot.to_string(), |slot| slot.to_string());

    let scope = SemesterScope::from_option(args.semester);
    let mut query = ConflictQuery::new(&classroom.id, args.slot, &weeks, scope);
    if let Some(id) = args.exclude {
        query = query.excluding(id);
    }

    info!("Checking {} in {}", classroom.code, path.display());
    let conflicts = find_conflicts(&store, &query).map_err(|e| format!("✗ {e}"))?;
    verbose!("{} raw conflict(s) before grouping", conflicts.len());

    if conflicts.is_empty() {
        println!(
            "✓ {} is free at {slot_label} in weeks {weeks}",
            classroom.code
        );
        return Ok(0);
    }

    println!(
        "✗ {} is already booked at {slot_label}:",
        classroom.code
    );
    for conflict in &conflicts {
        println!("  - {} [{}]", conflict.message(), conflict.semester_id);
    }
    let groups = group_by_occupation(&conflicts);
    if groups.len() != conflicts.len() {
        println!(
            "  ({} conflict(s) from {} occupation(s))",
            conflicts.len(),
            groups.len()
        );
    }

    Ok(conflicts.len())
}
