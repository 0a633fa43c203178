//! Error types for the facial event detection library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Landmark frame is missing an index the metrics depend on
    #[error("Malformed frame: landmark index {required} required, frame has {actual} points")]
    MalformedFrame {
        /// Highest landmark index the metrics read
        required: usize,
        /// Number of points the frame actually carries
        actual: usize,
    },

    /// Landmark geometry yields a ratio that is not a finite number
    #[error("Degenerate frame: {metric} is {value}")]
    DegenerateFrame {
        /// Ratio that could not be computed
        metric: &'static str,
        /// The non-finite value
        value: f64,
    },

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic I/O error with description
    #[error("I/O error: {0}")]
    IoError(String),

    /// Stream record could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
