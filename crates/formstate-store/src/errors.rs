//! Error handling for formstate-store
//!
//! Wraps formstate-core ExError with store-specific helpers

use formstate_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, path: &std::path::Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_node(path.display().to_string())
        .with_message(err.to_string())
}

/// Create an INI parse error at a 1-based line
pub fn parse_error(line: usize, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("ini_parse")
        .with_line(line)
        .with_message(reason.to_string())
}

/// Create a configuration error
pub fn config_error(reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::Configuration)
        .with_op("config")
        .with_message(reason)
}
