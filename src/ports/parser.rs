// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value parser trait definition.
//!
//! This module defines the `ValueParser` trait, the port through which a raw string
//! read from a property source becomes a typed value.

use crate::domain::ValueParseError;

/// Converts a raw property value into a typed value.
///
/// Parsers must be pure: the same input always produces the same output and parsing
/// never has side effects. The resolution engine relies on this to treat repeated
/// lookups as idempotent.
///
/// Any `Fn(&str) -> Result<T, ValueParseError>` closure is a parser.
///
/// # Examples
///
/// ```rust
/// use propcfg::domain::ValueParseError;
/// use propcfg::ports::ValueParser;
///
/// struct PortParser;
///
/// impl ValueParser<u16> for PortParser {
///     fn parse(&self, value: &str) -> Result<u16, ValueParseError> {
///         value
///             .trim()
///             .parse::<u16>()
///             .ok()
///             .filter(|port| *port != 0)
///             .ok_or_else(|| ValueParseError::new(value, "port", "Expected 1-65535."))
///     }
/// }
///
/// assert_eq!(PortParser.parse("8080").unwrap(), 8080);
/// assert!(PortParser.parse("0").is_err());
/// ```
pub trait ValueParser<T>: Send + Sync {
    /// Parses a raw value.
    fn parse(&self, value: &str) -> Result<T, ValueParseError>;

    /// Short description of the produced type, used in help output.
    fn describe_type(&self) -> Option<String> {
        None
    }
}

impl<T, F> ValueParser<T> for F
where
    F: Fn(&str) -> Result<T, ValueParseError> + Send + Sync,
{
    fn parse(&self, value: &str) -> Result<T, ValueParseError> {
        self(value)
    }
}
