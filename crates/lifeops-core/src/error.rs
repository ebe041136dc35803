//! Core error types for lifeops-core.
//!
//! The tick loop itself has no fatal conditions: unmet neuron
//! preconditions, an empty arbiter pool, and rejected suggestions are
//! all ordinary `None`/report outcomes, never errors. What remains is
//! the startup phase (collaborator snapshots) and configuration I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for lifeops-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Startup-phase collaborator failures. Fatal before the first
    /// tick; can never occur mid-cycle.
    #[error("Startup error: {0}")]
    Startup(#[from] StartupError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

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

/// Failures while seeding the initial [`crate::LifeState`] from
/// external snapshot sources.
#[derive(Error, Debug)]
pub enum StartupError {
    /// Calendar source could not supply the current block
    #[error("Calendar source unavailable: {0}")]
    CalendarUnavailable(String),

    /// Scene source could not supply a scene snapshot
    #[error("Scene source unavailable: {0}")]
    SceneUnavailable(String),
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
