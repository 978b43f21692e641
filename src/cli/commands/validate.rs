//! Validate command handler

use super::{classroom_by_code, load_store};
use room_occupancy::config::Config;
use room_occupancy::core::calendar::WeekSet;
use room_occupancy::core::conflicts::SemesterScope;
use room_occupancy::core::validation::{validate_assignment, AssignmentRequest};
use room_occupancy::error;
use std::path::Path;

/// Arguments of the validate command
pub struct ValidateArgs<'a> {
    /// Dataset file, config default when `None`
    pub dataset: Option<&'a Path>,
    /// Classroom code
    pub classroom: &'a str,
    /// Maximum group size
    pub group_size: u32,
    /// Required equipment
    pub required: &'a [String],
    /// Recommended equipment
    pub recommended: &'a [String],
    /// Time slot id for the conflict check
    pub slot: Option<&'a str>,
    /// Week list text for the conflict check
    pub weeks: Option<&'a str>,
    /// Semester id for the conflict check
    pub semester: Option<&'a str>,
}

/// Run the validate command. Exits non-zero when the assignment has errors.
pub fn run(args: &ValidateArgs, config: &Config) -> i32 {
    match validate(args, config) {
        Ok(true) => 0,
        Ok(false) => 2,
        Err(err) => {
            error!("Validation failed: {err}");
            eprintln!("{err}");
            1
        }
    }
}

fn validate(args: &ValidateArgs, config: &Config) -> Result<bool, String> {
    let (_, store) = load_store(args.dataset, config)?;
    let classroom = classroom_by_code(&store, args.classroom)?;
    let weeks: Option<WeekSet> = args
        .weeks
        .map(str::parse)
        .transpose()
        .map_err(|e: String| format!("✗ {e}"))?;

    let request = AssignmentRequest {
        required_equipment: args.required,
        recommended_equipment: args.recommended,
        time_slot_id: args.slot,
        week_numbers: weeks.as_ref(),
        ..AssignmentRequest::new(
            &classroom.id,
            args.group_size,
            SemesterScope::from_option(args.semester),
        )
    };
    let result = validate_assignment(&store, &request).map_err(|e| format!("✗ {e}"))?;

    for warning in &result.warnings {
        println!("⚠ {warning}");
    }
    for err in &result.errors {
        println!("✗ {err}");
    }
    if result.is_valid() {
        println!("✓ {} can host the group", classroom.code);
    }
    Ok(result.is_valid())
}
