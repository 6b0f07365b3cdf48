//! Core error types for studyflow-core.
//!
//! Expected scheduling outcomes (no bookings, no topics, exhausted
//! slots) are not errors and are reported by the shape of the result.
//! Errors here cover malformed configuration and the surrounding IO.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors raised before scheduling begins.
///
/// These are caller errors, distinct from "no slots found": the engine
/// refuses to schedule against a malformed [`SchedulingOptions`]
/// rather than silently producing a degenerate plan.
///
/// [`SchedulingOptions`]: crate::scheduler::SchedulingOptions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Daily study window is empty or inverted
    #[error("Invalid preferred window: start hour ({start_hour}) must be before end hour ({end_hour})")]
    InvalidPreferredWindow { start_hour: u32, end_hour: u32 },

    /// Invalid option value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
