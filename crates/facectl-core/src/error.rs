//! Error types for facectl.
//!
//! Errors are organized by component so every failure can be reported as a
//! single line naming its context (operation path, file path, session id).

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to write the config file
    #[error("Unable to write config file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors from a single call to the remote API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, TLS or protocol failure before a status was received
    #[error("{operation}: request failed: {source}")]
    Transport {
        operation: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with something other than 200
    #[error("{operation}: unexpected status code: {status}")]
    Status { operation: String, status: u16 },

    /// The response body was not the expected JSON shape
    #[error("{operation}: failed to decode response: {message}")]
    Decode { operation: String, message: String },

    /// The image to upload could not be opened or read
    #[error("Failed to read image {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image is at or above the upload ceiling
    #[error("Image file size bigger than 3 MB: {path} ({size} bytes)")]
    FileTooLarge { path: PathBuf, size: u64 },

    /// The multipart body could not be assembled
    #[error("Failed to build upload for {path}: {message}")]
    Multipart { path: PathBuf, message: String },
}

/// Reasons a "detect one face and attach it to a person" step fails.
#[derive(Error, Debug)]
pub enum EnrollError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("unable to find face in picture")]
    NoFace,

    #[error("found too many faces in picture (found {0})")]
    TooManyFaces(usize),

    /// The service accepted the request but reported `success: false`
    #[error("api error")]
    Rejected,
}

/// Errors that abort a whole batch before any file is processed.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Invalid image pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Unusable `concurrent requests` setting
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors from a training job and its status polling.
#[derive(Error, Debug)]
pub enum TrainingError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("task failed! (session {session_id})")]
    Failed { session_id: String },

    #[error("gave up waiting for session {session_id} after {waited_secs}s")]
    TimedOut { session_id: String, waited_secs: u64 },
}

/// Convenience type alias for API call results.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
