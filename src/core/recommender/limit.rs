//! Validated result-count limit

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Positive number of recommendations to return
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Limit(NonZeroUsize);

impl Limit {
    /// Limit applied when the caller gives none
    pub const DEFAULT: Self = match NonZeroUsize::new(10) {
        Some(n) => Self(n),
        None => unreachable!(),
    };

    /// Wrap a count
    ///
    /// # Errors
    /// Returns a `ValidationError` for zero
    pub fn new(value: usize) -> Result<Self, ValidationError> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or_else(|| ValidationError::new("limit", "must be a positive integer, got 0"))
    }

    /// Parse an optional raw value: absent means [`Limit::DEFAULT`].
    ///
    /// # Errors
    /// Returns a `ValidationError` for zero, negative or non-numeric input
    pub fn parse(raw: Option<&str>) -> Result<Self, ValidationError> {
        raw.map_or(Ok(Self::DEFAULT), str::parse)
    }

    /// The count
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Limit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(n) if n > 0 => usize::try_from(n)
                .map_err(|_| ValidationError::new("limit", format!("'{trimmed}' is too large")))
                .and_then(Self::new),
            Ok(_) => Err(ValidationError::new(
                "limit",
                format!("must be a positive integer, got {trimmed}"),
            )),
            Err(_) => Err(ValidationError::new(
                "limit",
                format!("'{trimmed}' is not an integer"),
            )),
        }
    }
}

impl TryFrom<usize> for Limit {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Limit> for usize {
    fn from(limit: Limit) -> Self {
        limit.get()
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
