//! CLI argument definitions for `roomocc`

use clap::{builder::BoolishValueParser, ArgGroup, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use room_occupancy::config::ConfigOverrides;
use room_occupancy::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `Level` for
/// runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `dataset`, `teaching_weeks`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Check a candidate booking for conflicts.
    ///
    /// Lists existing occupations of the classroom at the time slot whose
    /// weeks overlap the requested ones. Exits with status 2 on conflicts.
    #[command(group(
        ArgGroup::new("scope")
            .required(true)
            .args(["semester", "all_semesters"])
    ))]
    Conflicts {
        /// Dataset file (defaults to config `dataset`)
        #[arg(value_name = "DATASET")]
        dataset: Option<PathBuf>,

        /// Classroom code (e.g. P.1.4)
        #[arg(long, value_name = "CODE")]
        classroom: String,

        /// Time slot id
        #[arg(long, value_name = "ID")]
        slot: String,

        /// Weeks to book, e.g. `1-3,7`
        #[arg(long, value_name = "WEEKS")]
        weeks: String,

        /// Only look at occupations of this semester
        #[arg(long, value_name = "ID")]
        semester: Option<String>,

        /// Look at occupations of every semester
        #[arg(long)]
        all_semesters: bool,

        /// Occupation being rescheduled
        #[arg(long, value_name = "ID")]
        exclude: Option<String>,
    },
    /// Report hourly classroom occupancy.
    Occupancy {
        /// Dataset file (defaults to config `dataset`)
        #[arg(value_name = "DATASET")]
        dataset: Option<PathBuf>,

        /// Only this classroom code; every classroom when omitted
        #[arg(long, value_name = "CODE")]
        classroom: Option<String>,

        /// Semester id; semesters 1 and 2 when omitted
        #[arg(long, value_name = "ID")]
        semester: Option<String>,

        /// Report format: text, markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "text")]
        format: String,

        /// Output file (text goes to stdout, other formats to the reports dir when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Validate assigning a student group to a classroom.
    Validate {
        /// Dataset file (defaults to config `dataset`)
        #[arg(value_name = "DATASET")]
        dataset: Option<PathBuf>,

        /// Classroom code
        #[arg(long, value_name = "CODE")]
        classroom: String,

        /// Maximum number of students in the group
        #[arg(long, value_name = "N")]
        group_size: u32,

        /// Required equipment (repeatable)
        #[arg(long = "require", value_name = "ITEM")]
        required: Vec<String>,

        /// Recommended equipment (repeatable)
        #[arg(long = "recommend", value_name = "ITEM")]
        recommended: Vec<String>,

        /// Time slot id to check for conflicts
        #[arg(long, value_name = "ID", requires = "weeks")]
        slot: Option<String>,

        /// Weeks to check for conflicts
        #[arg(long, value_name = "WEEKS", requires = "slot")]
        weeks: Option<String>,

        /// Restrict the conflict check to one semester
        #[arg(long, value_name = "ID")]
        semester: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "roomocc",
    about = "Classroom occupancy and booking-conflict checker",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override config default dataset
    #[arg(long = "config-dataset", value_name = "FILE")]
    pub config_dataset: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` fields leave the loaded configuration untouched.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            reports_dir: self
                .reports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            dataset: self
                .config_dataset
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
