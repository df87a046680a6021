// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delimited list parsing.

use crate::domain::ValueParseError;
use crate::ports::ValueParser;

/// Parses a delimited list, handing each element to an inner parser.
///
/// Elements are trimmed and empty elements are skipped, so `"a, b,,c"` yields three
/// elements. The first element that fails to parse fails the whole list; the error
/// keeps the full raw value.
///
/// # Examples
///
/// ```
/// use propcfg::parsers::{FromStrValueParser, ListValueParser};
/// use propcfg::ports::ValueParser;
///
/// let parser = ListValueParser::new(FromStrValueParser::<u16>::new());
/// assert_eq!(parser.parse("80, 443").unwrap(), vec![80, 443]);
/// assert!(parser.parse("80, https").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ListValueParser<P> {
    inner: P,
    delimiter: char,
}

impl<P> ListValueParser<P> {
    /// Creates a comma-delimited list parser.
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            delimiter: ',',
        }
    }

    /// Sets the element delimiter.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl<T, P> ValueParser<Vec<T>> for ListValueParser<P>
where
    P: ValueParser<T>,
{
    fn parse(&self, value: &str) -> Result<Vec<T>, ValueParseError> {
        value
            .split(self.delimiter)
            .map(str::trim)
            .filter(|element| !element.is_empty())
            .map(|element| {
                self.inner.parse(element).map_err(|e| {
                    ValueParseError::new(
                        value,
                        format!("List<{}>", e.type_name),
                        format!("Element '{}' is invalid: {}", element, e.reason),
                    )
                })
            })
            .collect()
    }

    fn describe_type(&self) -> Option<String> {
        self.inner
            .describe_type()
            .map(|inner| format!("List<{}>", inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{BooleanValueParser, FromStrValueParser, StringValueParser};

    #[test]
    fn test_list_of_strings() {
        let parser = ListValueParser::new(StringValueParser);
        assert_eq!(
            parser.parse("alpha, beta ,gamma").unwrap(),
            vec!["alpha", "beta", "gamma"]
        );
    }

    #[test]
    fn test_empty_elements_skipped() {
        let parser = ListValueParser::new(StringValueParser);
        assert_eq!(parser.parse("a,,b, ,").unwrap(), vec!["a", "b"]);
        assert!(parser.parse("").unwrap().is_empty());
    }

    #[test]
    fn test_custom_delimiter() {
        let parser = ListValueParser::new(FromStrValueParser::<i32>::new()).delimiter(';');
        assert_eq!(parser.parse("1;2;3").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_invalid_element_fails_list() {
        let parser = ListValueParser::new(BooleanValueParser);
        let error = parser.parse("true, sometimes").unwrap_err();
        assert_eq!(error.value, "true, sometimes");
        assert_eq!(error.type_name, "List<Boolean>");
        assert!(error.reason.contains("sometimes"));
    }

    #[test]
    fn test_describe_type() {
        let parser = ListValueParser::new(BooleanValueParser);
        assert_eq!(
            ValueParser::<Vec<bool>>::describe_type(&parser).as_deref(),
            Some("List<Boolean>")
        );
    }
}
