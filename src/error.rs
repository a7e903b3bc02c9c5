//! Error types for nexusflow
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, unknown entity, bad config)
//! - 4: Operation failed (storage I/O, serialization)

use thiserror::Error;

/// Exit codes for the nexusflow CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for nexusflow operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Could not resolve a data directory; pass --data-dir or set NEXUSFLOW_DATA_DIR")]
    DataDirUnresolved,

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidArgument(_)
            | Error::InvalidConfig(_)
            | Error::ProjectNotFound(_)
            | Error::TaskNotFound(_)
            | Error::UserNotFound(_)
            | Error::DataDirUnresolved => exit_codes::USER_ERROR,

            // Operation failures
            Error::Io(_) | Error::Json(_) | Error::TomlParse(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured payload attached to JSON error output, when available
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::ProjectNotFound(id) | Error::TaskNotFound(id) | Error::UserNotFound(id) => {
                Some(serde_json::json!({ "id": id }))
            }
            _ => None,
        }
    }
}

/// Result type alias for nexusflow operations
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
