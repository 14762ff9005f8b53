//! Error types for chart rendering and input handling.

use std::fmt;
use std::io;

/// The main error type for kmplot operations.
#[derive(Debug)]
pub enum PlotError {
    /// Error during IO operations (reading config, writing SVG)
    Io(io::Error),
    /// Malformed JSON input or configuration
    Json(serde_json::Error),
    /// Input data violating a structural invariant
    InvalidData(String),
    /// Invalid configuration or parameters
    InvalidConfig(String),
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotError::Io(err) => write!(f, "IO error: {}", err),
            PlotError::Json(err) => write!(f, "JSON error: {}", err),
            PlotError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
            PlotError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for PlotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlotError::Io(err) => Some(err),
            PlotError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PlotError {
    fn from(err: io::Error) -> Self {
        PlotError::Io(err)
    }
}

impl From<serde_json::Error> for PlotError {
    fn from(err: serde_json::Error) -> Self {
        PlotError::Json(err)
    }
}

/// Result type alias for kmplot operations.
pub type PlotResult<T> = Result<T, PlotError>;
