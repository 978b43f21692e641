//! Command-line interface entry point for `roomocc`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use room_occupancy::config::Config;
use room_occupancy::info;
use room_occupancy::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let code = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Conflicts {
            dataset,
            classroom,
            slot,
            weeks,
            semester,
            all_semesters: _,
            exclude,
        } => commands::conflicts::run(
            &commands::conflicts::ConflictsArgs {
                dataset: dataset.as_deref(),
                classroom: &classroom,
                slot: &slot,
                weeks: &weeks,
                semester: semester.as_deref(),
                exclude: exclude.as_deref(),
            },
            &config,
        ),
        Command::Occupancy {
            dataset,
            classroom,
            semester,
            format,
            output,
        } => commands::occupancy::run(
            &commands::occupancy::OccupancyArgs {
                dataset: dataset.as_deref(),
                classroom: classroom.as_deref(),
                semester: semester.as_deref(),
                format: &format,
                output: output.as_deref(),
            },
            &config,
        ),
        Command::Validate {
            dataset,
            classroom,
            group_size,
            required,
            recommended,
            slot,
            weeks,
            semester,
        } => commands::validate::run(
            &commands::validate::ValidateArgs {
                dataset: dataset.as_deref(),
                classroom: &classroom,
                group_size,
                required: &required,
                recommended: &recommended,
                slot: slot.as_deref(),
                weeks: weeks.as_deref(),
                semester: semester.as_deref(),
            },
            &config,
        ),
    };

    if code != 0 {
        std::process::exit(code);
    }
}
