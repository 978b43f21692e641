//! CLI command handlers for `roomocc`.
//!
//! Each command is implemented in its own submodule. Handlers report failures
//! as `✗` lines on stderr and log them; they never panic on bad input.

pub mod config;
pub mod conflicts;
pub mod occupancy;
pub mod validate;

use room_occupancy::config::Config;
use room_occupancy::core::models::Classroom;
use room_occupancy::core::repository::{load_dataset, MemoryStore, OccupancyStore};
use std::path::{Path, PathBuf};

/// Dataset path from the argument, falling back to config `dataset`
fn dataset_path(dataset: Option<&Path>, config: &Config) -> Result<PathBuf, String> {
    match dataset {
        Some(path) => Ok(path.to_path_buf()),
        None if !config.paths.dataset.is_empty() => Ok(PathBuf::from(&config.paths.dataset)),
        None => Err(
            "✗ No dataset given and no default set (roomocc config set dataset <FILE>)"
                .to_string(),
        ),
    }
}

/// Load the dataset named by the argument or the config
fn load_store(dataset: Option<&Path>, config: &Config) -> Result<(PathBuf, MemoryStore), String> {
    let path = dataset_path(dataset, config)?;
    let store = load_dataset(&path, config.occupancy.default_teaching_weeks)
        .map_err(|e| format!("✗ Failed to load dataset {}: {e}", path.display()))?;
    Ok((path, store))
}

/// Classroom by code, as a CLI error when absent
fn classroom_by_code(store: &MemoryStore, code: &str) -> Result<Classroom, String> {
    store
        .find_classroom_by_code(code)
        .map_err(|e| format!("✗ {e}"))?
        .ok_or_else(|| format!("✗ Unknown classroom code: {code}"))
}
