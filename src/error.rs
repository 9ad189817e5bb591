//! Error types for URL model operations.

use thiserror::Error;

/// Errors that can occur while parsing or mutating a [`UrlModel`](crate::UrlModel).
///
/// Malformed query tokens and hash segments never produce an error; they are
/// dropped or truncated during parsing. The variants here cover the only hard
/// failure modes: absolute-URL resolution and the fallible component setters
/// of the underlying URL object.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UrlModelError {
    /// Absolute-URL parsing or relative resolution failed.
    #[error("URL parsing failed: {0}")]
    Parse(String),

    /// The scheme was rejected by the underlying URL object.
    #[error("Invalid scheme: {0}")]
    InvalidScheme(String),

    /// The host could not be set on the underlying URL object.
    #[error("Invalid host: {0}")]
    InvalidHost(String),

    /// The port could not be set on the underlying URL object.
    #[error("Invalid port: {0}")]
    InvalidPort(String),
}

impl From<url::ParseError> for UrlModelError {
    fn from(err: url::ParseError) -> Self {
        UrlModelError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            UrlModelError::InvalidScheme("mailto".to_string()).to_string(),
            "Invalid scheme: mailto"
        );

        assert_eq!(
            UrlModelError::InvalidPort("99999".to_string()).to_string(),
            "Invalid port: 99999"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(
            UrlModelError::Parse("empty host".to_string()),
            UrlModelError::Parse("empty host".to_string())
        );
        assert_ne!(
            UrlModelError::InvalidHost("a".to_string()),
            UrlModelError::InvalidHost("b".to_string())
        );
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let url_error = url::ParseError::EmptyHost;
        let model_error: UrlModelError = url_error.into();

        match model_error {
            UrlModelError::Parse(_) => (),
            _ => panic!("Expected Parse variant"),
        }
    }
}
