// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filterable enum selections.
//!
//! Many options select a subset of a fixed set of choices: which detectors to run,
//! which tools to skip. A filterable value is either every choice (`ALL`), no choice
//! (`NONE`), or an explicit comma-separated list.

use crate::domain::ValueParseError;
use crate::parsers::short_type_name;
use crate::ports::ValueParser;
use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;

pub(crate) const ALL_KEYWORD: &str = "ALL";
pub(crate) const NONE_KEYWORD: &str = "NONE";

/// A selection of enum values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterableEnumValue<E> {
    /// Every value is selected.
    All,
    /// No value is selected.
    None,
    /// Exactly the listed values are selected.
    Values(Vec<E>),
}

impl<E: PartialEq> FilterableEnumValue<E> {
    /// Returns true if `value` is part of the selection.
    pub fn contains(&self, value: &E) -> bool {
        match self {
            FilterableEnumValue::All => true,
            FilterableEnumValue::None => false,
            FilterableEnumValue::Values(values) => values.contains(value),
        }
    }
}

impl<E: Clone> FilterableEnumValue<E> {
    /// Expands the selection against the full set of choices.
    ///
    /// # Examples
    ///
    /// ```
    /// use propcfg::parsers::FilterableEnumValue;
    ///
    /// let all = ["npm", "maven", "gradle"];
    /// assert_eq!(FilterableEnumValue::All.resolve(&all), vec!["npm", "maven", "gradle"]);
    /// assert!(FilterableEnumValue::<&str>::None.resolve(&all).is_empty());
    /// ```
    pub fn resolve(&self, all: &[E]) -> Vec<E> {
        match self {
            FilterableEnumValue::All => all.to_vec(),
            FilterableEnumValue::None => Vec::new(),
            FilterableEnumValue::Values(values) => values.clone(),
        }
    }
}

impl<E: Display> Display for FilterableEnumValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterableEnumValue::All => f.write_str(ALL_KEYWORD),
            FilterableEnumValue::None => f.write_str(NONE_KEYWORD),
            FilterableEnumValue::Values(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
        }
    }
}

/// Parses `ALL`, `NONE` (in any case), or a comma-separated list of `E`.
///
/// Values are parsed with `E`'s [`FromStr`], so their case handling is up to `E`.
///
/// `ALL` and `NONE` must stand alone; combining them with each other or with explicit
/// values is rejected.
///
/// # Examples
///
/// ```
/// use propcfg::parsers::{FilterableEnumValue, FilterableEnumValueParser};
/// use propcfg::ports::ValueParser;
///
/// let parser = FilterableEnumValueParser::<u8>::new();
/// assert_eq!(parser.parse("all").unwrap(), FilterableEnumValue::All);
/// assert_eq!(parser.parse("1,2").unwrap(), FilterableEnumValue::Values(vec![1, 2]));
/// assert!(parser.parse("ALL,1").is_err());
/// ```
pub struct FilterableEnumValueParser<E> {
    _marker: PhantomData<fn() -> E>,
}

impl<E> FilterableEnumValueParser<E> {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E> Default for FilterableEnumValueParser<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for FilterableEnumValueParser<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterableEnumValueParser")
            .field("type", &std::any::type_name::<E>())
            .finish()
    }
}

impl<E> ValueParser<FilterableEnumValue<E>> for FilterableEnumValueParser<E>
where
    E: FromStr,
    E::Err: Display,
{
    fn parse(&self, value: &str) -> Result<FilterableEnumValue<E>, ValueParseError> {
        let type_name = short_type_name::<E>();
        let tokens: Vec<&str> = value
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect();

        let is_keyword = |token: &&str| {
            token.eq_ignore_ascii_case(ALL_KEYWORD) || token.eq_ignore_ascii_case(NONE_KEYWORD)
        };
        if tokens.iter().any(is_keyword) {
            return match tokens.as_slice() {
                [only] if only.eq_ignore_ascii_case(ALL_KEYWORD) => Ok(FilterableEnumValue::All),
                [only] if only.eq_ignore_ascii_case(NONE_KEYWORD) => Ok(FilterableEnumValue::None),
                _ => Err(ValueParseError::new(
                    value,
                    type_name,
                    "ALL and NONE cannot be combined with other values.",
                )),
            };
        }

        tokens
            .into_iter()
            .map(|token| {
                token.parse::<E>().map_err(|e| {
                    ValueParseError::new(
                        value,
                        type_name.clone(),
                        format!("Unknown value '{}': {}", token, e),
                    )
                })
            })
            .collect::<Result<Vec<E>, _>>()
            .map(FilterableEnumValue::Values)
    }

    fn describe_type(&self) -> Option<String> {
        Some(short_type_name::<E>())
    }
}
