//! Error types for tasks
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad config, blank description, unknown task number)
//! - 4: Operation failed (I/O, serialization, unreadable file, save failure)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tasks CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tasks operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Task description cannot be empty")]
    InvalidDescription,

    #[error("Task description is too long ({len} characters, max {max})")]
    DescriptionTooLong { len: usize, max: usize },

    #[error("No task number {index} (list has {len} task(s))")]
    TaskNotFound { index: usize, len: usize },

    // Operation failures (exit code 4)
    #[error("Failed to save tasks to {0}")]
    SaveFailed(PathBuf),

    #[error("Task file {path} is corrupt: {reason}")]
    CorruptTaskFile { path: PathBuf, reason: String },

    #[error("Task file {path} could not be read ({reason}); refusing to overwrite it")]
    UnreadableTaskFile { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_)
            | Error::InvalidDescription
            | Error::DescriptionTooLong { .. }
            | Error::TaskNotFound { .. } => exit_codes::USER_ERROR,

            Error::SaveFailed(_)
            | Error::CorruptTaskFile { .. }
            | Error::UnreadableTaskFile { .. }
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON error output, when the variant carries any
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::DescriptionTooLong { len, max } => {
                Some(serde_json::json!({ "len": len, "max": max }))
            }
            Error::TaskNotFound { index, len } => {
                Some(serde_json::json!({ "index": index, "len": len }))
            }
            Error::SaveFailed(path) | Error::UnreadableTaskFile { path, .. } => {
                Some(serde_json::json!({ "path": path }))
            }
            _ => None,
        }
    }
}

/// Result type alias for tasks operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
