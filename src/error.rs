//! Unified error types for Paginator-Oxide

use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Paginator-Oxide
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    ///
    /// Contract violations detected eagerly at construction or `start`, such
    /// as a persistent session carrying a timeout.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Display surface errors
    ///
    /// A send/edit/delete failed in the external client. The core never
    /// retries; the condition propagates to the caller.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Control identifier not bound to any session
    #[error("Unknown control: {0}")]
    UnknownControl(String),

    /// Session used before `start`
    #[error("Session not started: {0}")]
    NotStarted(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new surface error
    pub fn surface<S: Into<String>>(msg: S) -> Self {
        Error::Surface(msg.into())
    }

    /// Create a new unknown control error
    pub fn unknown_control<S: Into<String>>(id: S) -> Self {
        Error::UnknownControl(id.into())
    }

    /// Create a new not-started error
    pub fn not_started<S: Into<String>>(msg: S) -> Self {
        Error::NotStarted(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::configuration("timeout and persistence are exclusive");
        assert_eq!(
            err.to_string(),
            "Configuration error: timeout and persistence are exclusive"
        );

        let err = Error::unknown_control("PREV_BTN:1:2");
        assert_eq!(err.to_string(), "Unknown control: PREV_BTN:1:2");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
