//! Error types for the media node

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Sensor error: {0}")]
    Sensor(#[from] SensorError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Frame and audio acquisition errors
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("No frame available")]
    NoFrame,

    #[error("Unexpected pixel format: {0}")]
    UnexpectedFormat(&'static str),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to open stream: {0}")]
    StreamError(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Capture channel disconnected")]
    Disconnected,
}

/// Sensor control errors
#[derive(Error, Debug)]
pub enum SensorError {
    #[error("Value {value} out of range for {param}")]
    OutOfRange { param: &'static str, value: i32 },

    #[error("Operation rejected: {0}")]
    Rejected(String),
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, Error>;
