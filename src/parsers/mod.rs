// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in value parsers.
//!
//! These cover the property types most configurations need: booleans, anything with a
//! `FromStr` implementation, plain strings, paths, delimited lists, and filterable
//! enum selections (`ALL`, `NONE`, or an explicit list).

pub mod filterable;
pub mod list;

pub use filterable::{FilterableEnumValue, FilterableEnumValueParser};
pub use list::ListValueParser;

use crate::domain::ValueParseError;
use crate::ports::ValueParser;
use std::fmt::Display;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::str::FromStr;

/// Returns the last path segment of `T`'s type name, without generic arguments.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec`.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path).to_string()
}

/// Parses booleans.
///
/// Recognizes the following values (case-insensitive, surrounding whitespace ignored):
/// - `true`: "true", "yes", "1", "on"
/// - `false`: "false", "no", "0", "off"
///
/// # Examples
///
/// ```
/// use propcfg::parsers::BooleanValueParser;
/// use propcfg::ports::ValueParser;
///
/// assert!(BooleanValueParser.parse(" YES ").unwrap());
/// assert!(!BooleanValueParser.parse("off").unwrap());
/// assert!(BooleanValueParser.parse("maybe").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanValueParser;

impl ValueParser<bool> for BooleanValueParser {
    fn parse(&self, value: &str) -> Result<bool, ValueParseError> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" => Ok(false),
            _ => Err(ValueParseError::new(
                value,
                "Boolean",
                "Expected one of true, false, yes, no, on, off, 1, 0.",
            )),
        }
    }

    fn describe_type(&self) -> Option<String> {
        Some("Boolean".to_string())
    }
}

/// Parses any type implementing [`FromStr`].
///
/// The raw value is trimmed before parsing. Errors and [`describe_type`] report the
/// type's short name, such as `IpAddr` or `u16`.
///
/// [`describe_type`]: ValueParser::describe_type
///
/// # Examples
///
/// ```
/// use propcfg::parsers::FromStrValueParser;
/// use propcfg::ports::ValueParser;
/// use std::net::IpAddr;
///
/// let parser = FromStrValueParser::<IpAddr>::new();
/// assert_eq!(parser.parse("127.0.0.1").unwrap().to_string(), "127.0.0.1");
/// assert!(parser.parse("not an ip").is_err());
/// ```
pub struct FromStrValueParser<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> FromStrValueParser<T> {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for FromStrValueParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FromStrValueParser<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for FromStrValueParser<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromStrValueParser")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> ValueParser<T> for FromStrValueParser<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn parse(&self, value: &str) -> Result<T, ValueParseError> {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ValueParseError::new(value, short_type_name::<T>(), e.to_string()))
    }

    fn describe_type(&self) -> Option<String> {
        Some(short_type_name::<T>())
    }
}

/// Accepts any value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValueParser;

impl ValueParser<String> for StringValueParser {
    fn parse(&self, value: &str) -> Result<String, ValueParseError> {
        Ok(value.to_string())
    }

    fn describe_type(&self) -> Option<String> {
        Some("String".to_string())
    }
}

/// Parses filesystem paths. Blank values are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathValueParser;

impl ValueParser<PathBuf> for PathValueParser {
    fn parse(&self, value: &str) -> Result<PathBuf, ValueParseError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueParseError::new(
                value,
                "Path",
                "A path cannot be empty.",
            ));
        }
        Ok(PathBuf::from(trimmed))
    }

    fn describe_type(&self) -> Option<String> {
        Some("Path".to_string())
    }
}
