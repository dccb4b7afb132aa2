//! Error types for junitreport

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for junitreport operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for junitreport
#[derive(Error, Debug)]
pub enum Error {
    /// Report file was not found at the specified path.
    #[error("Report not found at {0}")]
    ReportNotFound(PathBuf),

    /// Configuration file error or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to parse report data that was otherwise well-formed XML.
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// XML reader error or malformed XML input.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Other error with custom message.
    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ReportNotFound(PathBuf::from("/tmp/results.xml"));
        assert_eq!(err.to_string(), "Report not found at /tmp/results.xml");
    }

    #[test]
    fn test_error_from_string() {
        let err: Error = "custom error".into();
        assert_eq!(err.to_string(), "custom error");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_parse_error_display() {
        let err = Error::Parse("unexpected element".to_string());
        assert_eq!(err.to_string(), "Parse error: unexpected element");
    }
}
