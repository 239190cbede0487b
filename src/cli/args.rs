//! CLI argument definitions for `studypath`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use studypath::config::ConfigOverrides;
use studypath::core::interests::InterestInput;
use studypath::core::models::CompletionStatus;
use studypath::core::recommender::Limit;
use studypath::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
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
        /// Optional configuration key to display (e.g., `level`, `data_file`, `default_limit`)
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
pub enum UserSubcommand {
    /// Register a student
    Add {
        /// User id
        #[arg(value_name = "USER")]
        user: String,
        /// Examination regulation the student studies under
        #[arg(long, value_name = "REGULATION")]
        regulation: Option<String>,
    },
    /// Remove a student together with their interests and progress
    Remove {
        /// User id
        #[arg(value_name = "USER")]
        user: String,
    },
    /// List registered students
    List,
}

#[derive(Debug, Subcommand)]
pub enum InterestsSubcommand {
    /// Replace all interests of a student.
    ///
    /// Each entry is `CAREER:LEVEL` with an optional `:primary` suffix.
    /// Unknown careers are skipped.
    Set {
        /// User id
        #[arg(value_name = "USER")]
        user: String,
        /// Interest entries, e.g. `data_scientist:80:primary ml_engineer:50`
        #[arg(value_name = "CAREER:LEVEL[:primary]", num_args = 0..)]
        entries: Vec<InterestInput>,
    },
    /// Add or update a single interest
    Add {
        /// User id
        #[arg(value_name = "USER")]
        user: String,
        /// Interest entry, e.g. `data_scientist:80:primary`
        #[arg(value_name = "CAREER:LEVEL[:primary]")]
        entry: InterestInput,
    },
    /// Remove a single interest
    Remove {
        /// User id
        #[arg(value_name = "USER")]
        user: String,
        /// Career id
        #[arg(value_name = "CAREER")]
        career: String,
    },
    /// Show the interests of a student
    Show {
        /// User id
        #[arg(value_name = "USER")]
        user: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProgressSubcommand {
    /// Record the status of a module
    Set {
        /// User id
        #[arg(value_name = "USER")]
        user: String,
        /// Module code
        #[arg(value_name = "MODULE")]
        module: String,
        /// not_started, in_progress, completed or failed
        #[arg(value_name = "STATUS")]
        status: CompletionStatus,
        /// Grade on the 1.0 to 5.0 scale
        #[arg(long, value_name = "GRADE")]
        grade: Option<f32>,
    },
    /// Show recorded progress of a student
    Show {
        /// User id
        #[arg(value_name = "USER")]
        user: String,
    },
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
    /// Import the module catalog and compute career relevance.
    ///
    /// Reads module records and career paths from JSON files. Safe to re-run.
    Import {
        /// Module records (JSON array)
        #[arg(value_name = "MODULES")]
        modules: PathBuf,

        /// Career paths (JSON array)
        #[arg(short, long, value_name = "FILE")]
        careers: Option<PathBuf>,

        /// Examination regulation to attach to the imported modules
        #[arg(long, value_name = "REGULATION")]
        regulation: Option<String>,

        /// Drop existing modules, careers and relevance edges first
        #[arg(long)]
        clear: bool,
    },
    /// Manage students.
    User {
        #[command(subcommand)]
        subcommand: UserSubcommand,
    },
    /// Manage career interests.
    Interests {
        #[command(subcommand)]
        subcommand: InterestsSubcommand,
    },
    /// Track module progress.
    Progress {
        #[command(subcommand)]
        subcommand: ProgressSubcommand,
    },
    /// Recommend modules for a student.
    ///
    /// Ranks open modules by their relevance to the student's career interests.
    Recommend {
        /// User id
        #[arg(value_name = "USER")]
        user: String,

        /// Maximum number of recommendations (positive integer; defaults to config)
        #[arg(short, long, value_name = "N")]
        limit: Option<Limit>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,

        /// Seed for the elective selection shown without interests
        #[arg(long, value_name = "SEED")]
        seed: Option<u64>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "studypath",
    about = "Career-relevance module recommendations",
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
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Use a different data file for this run
    #[arg(long = "data-file", value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Use a different keyword registry for this run
    #[arg(long = "keywords-file", value_name = "PATH")]
    pub keywords_file: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// # Returns
    /// A `ConfigOverrides` struct with values from CLI flags, where `None` means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            data_file: self
                .data_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            keywords_file: self
                .keywords_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
