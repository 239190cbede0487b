//! Student, interest and completion models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A student tracked by `studypath`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (e.g., a username)
    pub id: String,

    /// Examination regulation the student is enrolled under
    #[serde(default)]
    pub regulation: Option<String>,
}

impl User {
    /// Create a new user
    #[must_use]
    pub const fn new(id: String, regulation: Option<String>) -> Self {
        Self { id, regulation }
    }
}

/// A user's declared interest in a career path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCareerInterest {
    /// Owning user
    pub user_id: String,
    /// Career slug
    pub career_id: String,
    /// Interest level in 0..=100
    pub interest_level: u8,
    /// At most one primary interest per user
    #[serde(default)]
    pub is_primary: bool,
}

/// Progress of a user through a module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    /// Not yet started
    #[default]
    NotStarted,
    /// Currently being taken
    InProgress,
    /// Passed
    Completed,
    /// Failed attempt
    Failed,
}

impl CompletionStatus {
    /// Modules in this state are no longer recommendation candidates
    #[must_use]
    pub const fn excludes_from_candidates(self) -> bool {
        matches!(self, Self::InProgress | Self::Completed)
    }

    /// Snake-case identifier
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CompletionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "not_started" | "open" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "completed" | "done" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Unknown completion status: '{s}'")),
        }
    }
}

/// A user's status for a single module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserModuleCompletion {
    /// Owning user
    pub user_id: String,
    /// Module code
    pub module_code: String,
    /// Current status
    pub status: CompletionStatus,
    /// Completion time as seconds since the Unix epoch
    #[serde(default)]
    pub completed_at: Option<u64>,
    /// Grade, if one was recorded
    #[serde(default)]
    pub grade: Option<f32>,
}
