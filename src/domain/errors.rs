// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for property resolution.
//!
//! Three layers of failure exist:
//!
//! - [`ValueParseError`] is produced by a [`ValueParser`](crate::ports::ValueParser) when a
//!   raw string cannot be converted. The configuration never hands it to callers directly.
//! - [`InvalidPropertyError`] is the strict-path failure returned by
//!   [`PropertyConfiguration::get_value`](crate::service::PropertyConfiguration::get_value).
//!   It wraps the parse error and names the offending key and source.
//! - [`ConfigError`] covers everything outside resolution: adapters failing to read their
//!   backing data, and validation reports converted into a single error.

use thiserror::Error;

/// A raw string could not be converted into the requested type.
///
/// # Examples
///
/// ```
/// use propcfg::domain::ValueParseError;
///
/// let error = ValueParseError::new("maybe", "boolean", "Expected true or false.");
/// assert_eq!(error.value, "maybe");
/// assert!(error.to_string().contains("boolean"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unable to parse '{value}' as {type_name}: {reason}")]
pub struct ValueParseError {
    /// The raw value that failed to parse
    pub value: String,
    /// Name of the type the parser was producing
    pub type_name: String,
    /// Human readable explanation
    pub reason: String,
}

impl ValueParseError {
    /// Creates a new parse error.
    pub fn new(
        value: impl Into<String>,
        type_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}

/// A property was provided but its raw value could not be parsed.
///
/// This is the only error the resolution engine surfaces on its own; every lenient
/// accessor degrades to an empty or default value instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for property '{key}' provided by '{source_name}': {error}")]
pub struct InvalidPropertyError {
    /// The property key
    pub key: String,
    /// Name of the property source that supplied the raw value
    pub source_name: String,
    /// The underlying parse failure
    #[source]
    pub error: ValueParseError,
}

impl InvalidPropertyError {
    /// Creates a new invalid property error.
    pub fn new(
        key: impl Into<String>,
        source_name: impl Into<String>,
        error: ValueParseError,
    ) -> Self {
        Self {
            key: key.into(),
            source_name: source_name.into(),
            error,
        }
    }

    /// Returns the raw value that failed to parse.
    pub fn raw_value(&self) -> &str {
        &self.error.value
    }
}

/// Errors raised while building sources or validating a configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A property source could not load its backing data.
    #[error("Property source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A configuration document could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A provided property failed validation.
    #[error(transparent)]
    InvalidProperty(#[from] InvalidPropertyError),

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_value_parse_error_display() {
        let error = ValueParseError::new("-1", "String", "Negative values are rejected.");
        assert_eq!(
            error.to_string(),
            "Unable to parse '-1' as String: Negative values are rejected."
        );
    }

    #[test]
    fn test_invalid_property_error_display() {
        let parse = ValueParseError::new("abc", "integer", "invalid digit found in string");
        let error = InvalidPropertyError::new("server.port", "env", parse);

        let message = error.to_string();
        assert!(message.contains("server.port"));
        assert!(message.contains("env"));
        assert!(message.contains("abc"));
        assert_eq!(error.raw_value(), "abc");
    }

    #[test]
    fn test_invalid_property_error_source_chain() {
        let parse = ValueParseError::new("abc", "integer", "bad");
        let error = InvalidPropertyError::new("server.port", "env", parse.clone());

        let source = error.source().unwrap();
        assert_eq!(source.to_string(), parse.to_string());
    }

    #[test]
    fn test_source_error() {
        let error = ConfigError::SourceError {
            source_name: "yaml-file".to_string(),
            message: "File too large".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Property source 'yaml-file' error: File too large"
        );
    }

    #[test]
    fn test_parse_error() {
        let error = ConfigError::ParseError {
            message: "Invalid YAML".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration: Invalid YAML"
        );
    }

    #[test]
    fn test_invalid_property_conversion() {
        let parse = ValueParseError::new("x", "boolean", "bad");
        let error: ConfigError = InvalidPropertyError::new("flag", "map", parse).into();
        assert!(matches!(error, ConfigError::InvalidProperty(_)));
        assert!(error.to_string().contains("flag"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = ConfigError::from(io_error);
        assert!(matches!(error, ConfigError::IoError(_)));
    }
}
