//! Error types for the head-cursor library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Camera acquisition or capture failed
    #[error("Camera error: {0}")]
    Camera(String),

    /// Landmark detector failed to load or run
    #[error("Detector error: {0}")]
    Detector(String),

    /// Target surface (hit-testing, activation, scrolling) failed
    #[error("Surface error: {0}")]
    Surface(String),

    /// Filter construction or processing error
    #[error("Filter error: {0}")]
    Filter(String),

    /// Session lifecycle error
    #[error("Session error: {0}")]
    Session(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
