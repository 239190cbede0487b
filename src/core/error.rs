//! Error types shared across the core modules

use thiserror::Error;

/// Input rejected at the boundary, before it reaches the engine or a store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field (e.g., "limit")
    pub field: &'static str,
    /// Human readable description
    pub message: String,
}

impl ValidationError {
    /// Create a validation error for `field`
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Failures raised by the data stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// An id-based lookup found nothing
    #[error("{kind} not found: '{id}'")]
    NotFound {
        /// Entity kind ("user", "module", "career")
        kind: &'static str,
        /// Identifier that was looked up
        id: String,
    },
    /// Attempt to create an entity that already exists
    #[error("{kind} already exists: '{id}'")]
    Conflict {
        /// Entity kind
        kind: &'static str,
        /// Conflicting identifier
        id: String,
    },
    /// Invalid data was offered to the store
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// Reading or writing the backing file failed
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The backing file could not be (de)serialized
    #[error("storage data is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Shorthand for a not-found error
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures of a recommendation request
#[derive(Debug, Error)]
pub enum RecommendError {
    /// No user with this id is registered
    #[error("unknown user: '{0}'")]
    UnknownUser(String),
    /// A store read failed; passed through unchanged
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures of the catalog import job
#[derive(Debug, Error)]
pub enum ImportError {
    /// An input file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: String,
        /// Underlying error
        source: std::io::Error,
    },
    /// An input file is not valid JSON of the expected shape
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that failed
        path: String,
        /// Underlying error
        source: serde_json::Error,
    },
    /// Writing to the store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("limit", "must be a positive integer");
        assert_eq!(err.to_string(), "invalid limit: must be a positive integer");
    }

    #[test]
    fn test_store_error_passes_through_recommend_error() {
        let err = RecommendError::from(StoreError::not_found("module", "M1"));
        assert_eq!(err.to_string(), "module not found: 'M1'");
    }

    #[test]
    fn test_not_found_display() {
        let err = StoreError::not_found("career", "astronaut");
        assert_eq!(err.to_string(), "career not found: 'astronaut'");
    }
}
