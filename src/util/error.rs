//! Error types for the export scheduler.

use std::path::PathBuf;
use thiserror::Error;

use super::Tick;

/// Main error type for export scheduling operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Start of the export range lies after its end
    #[error("Invalid time range: start {start} is after end {end}")]
    InvalidTimeRange { start: Tick, end: Tick },

    /// Time step must be strictly positive
    #[error("Invalid time step: {0} (must be > 0)")]
    InvalidTimeStep(Tick),

    /// Samples per frame must be strictly positive
    #[error("Invalid samples per frame: {0} (must be > 0)")]
    InvalidSamplesPerFrame(f64),

    /// Ticks per frame must be strictly positive
    #[error("Invalid ticks per frame: {0} (must be > 0)")]
    InvalidTicksPerFrame(Tick),

    /// Export was cancelled before the timeline was exhausted
    #[error("Export cancelled at tick {time}")]
    Cancelled { time: Tick },

    /// A write or post-export callback failed
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Scene description is inconsistent
    #[error("Invalid scene: {0}")]
    InvalidScene(String),

    /// Scene file does not exist or cannot be accessed
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create a write failure error.
    pub fn write_failed(msg: impl Into<String>) -> Self {
        Self::WriteFailed(msg.into())
    }

    /// Create an invalid scene error.
    pub fn invalid_scene(msg: impl Into<String>) -> Self {
        Self::InvalidScene(msg.into())
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;
