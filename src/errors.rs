use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for update validation, log IO, and baseline loading failures.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// Malformed or incomplete update payload; nothing is written to a log.
    #[error("invalid update: {reason}")]
    Validation {
        /// What was wrong with the payload.
        reason: String,
    },
    /// Category name outside the allowed set.
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    /// Baseline artifact absent or unparseable; fatal for the request.
    #[error("baseline artifact missing or unreadable at '{path}': {detail}")]
    MissingBaseline {
        /// Path the artifact was expected at.
        path: PathBuf,
        /// Underlying read or parse failure.
        detail: String,
    },
    /// Log file IO failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// JSON serialization failure while writing a record.
    #[error("record encoding failure: {0}")]
    Encode(#[from] serde_json::Error),
}

impl AtlasError {
    /// Build a validation rejection with an explanatory reason.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}
