// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed property descriptors.
//!
//! A property describes how to look up and interpret a configuration value. It holds
//! no state of its own and is typically defined once and reused for every lookup.
//!
//! The set of descriptors is closed:
//!
//! - [`NullableProperty`] may be absent. Lookups yield `Option<T>`.
//! - [`ValuedProperty`] always has a value, falling back to its default. Lookups yield `T`.
//! - [`PassthroughProperty`] names a family of keys sharing a dotted prefix. Its values
//!   stay raw strings.
//!
//! The [`Property`] trait is sealed; the resolution engine dispatches on these three
//! descriptors only.

use crate::domain::ValueParseError;
use crate::parsers::filterable::{ALL_KEYWORD, NONE_KEYWORD};
use crate::parsers::{
    BooleanValueParser, FilterableEnumValue, FilterableEnumValueParser, FromStrValueParser,
    StringValueParser,
};
use crate::ports::ValueParser;
use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::Arc;

mod sealed {
    pub trait Sealed {}
}

/// Which of the three descriptor variants a property is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// May be absent; see [`NullableProperty`].
    Nullable,
    /// Always has a value; see [`ValuedProperty`].
    Valued,
    /// Prefix-grouped raw values; see [`PassthroughProperty`].
    Passthrough,
}

/// Descriptive information attached to a property.
///
/// Metadata is used for help and diagnostic output only and never changes how a
/// property resolves.
///
/// # Examples
///
/// ```
/// use propcfg::domain::PropertyMetadata;
///
/// let metadata = PropertyMetadata::new()
///     .name("Log Level")
///     .description("Minimum level written to the log.")
///     .example_values(["INFO", "DEBUG"])
///     .only_example_values();
///
/// assert_eq!(metadata.name.as_deref(), Some("Log Level"));
/// assert!(metadata.only_example_values);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMetadata {
    /// Human readable name
    pub name: Option<String>,
    /// Longer description of what the property controls
    pub description: Option<String>,
    /// Typical values, shown in help output
    pub example_values: Vec<String>,
    /// Whether the example values are the only accepted values
    pub only_example_values: bool,
    /// Whether values are matched case-sensitively
    pub case_sensitive: bool,
}

impl PropertyMetadata {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the human readable name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the example values.
    pub fn example_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.example_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the example values as the complete set of accepted values.
    pub fn only_example_values(mut self) -> Self {
        self.only_example_values = true;
        self
    }

    /// Marks the property as case-sensitive.
    pub fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }
}

/// Common behavior of every property descriptor.
pub trait Property: sealed::Sealed + Send + Sync {
    /// The key looked up in property sources. For passthrough properties, the prefix.
    fn key(&self) -> &str;

    /// The descriptor variant.
    fn kind(&self) -> PropertyKind;

    /// Descriptive metadata.
    fn metadata(&self) -> &PropertyMetadata;

    /// Short description of the value type, if known.
    fn describe_type(&self) -> Option<String> {
        None
    }
}

/// A property whose raw value is parsed into a typed value.
///
/// `Value` is what the parser produces. `Output` is what a strict lookup returns:
/// `Option<T>` for nullable properties and `T` for valued properties.
pub trait TypedProperty: Property {
    /// The parsed value type.
    type Value;
    /// The result of a successful strict lookup.
    type Output;

    /// Parses a raw value with this property's parser.
    fn parse(&self, raw: &str) -> Result<Self::Value, ValueParseError>;

    /// The lookup result when no source provides the key.
    fn when_missing(&self) -> Self::Output;

    /// The lookup result for a successfully parsed value.
    fn when_present(&self, value: Self::Value) -> Self::Output;
}

/// A property that can be checked against a raw value without knowing its type.
///
/// Every [`TypedProperty`] is validatable, which lets heterogeneous properties be
/// validated together as `&dyn ValidatableProperty`.
pub trait ValidatableProperty: Property {
    /// Checks whether `raw` parses for this property.
    fn check(&self, raw: &str) -> Result<(), ValueParseError>;
}

impl<P: TypedProperty> ValidatableProperty for P {
    fn check(&self, raw: &str) -> Result<(), ValueParseError> {
        TypedProperty::parse(self, raw).map(|_| ())
    }
}

/// A property that may be absent.
///
/// # Examples
///
/// ```
/// use propcfg::domain::{NullableProperty, Property, PropertyKind};
///
/// let timeout = NullableProperty::<u64>::parsed("http.timeout.seconds");
/// assert_eq!(timeout.key(), "http.timeout.seconds");
/// assert_eq!(timeout.kind(), PropertyKind::Nullable);
/// ```
pub struct NullableProperty<T> {
    key: String,
    parser: Arc<dyn ValueParser<T>>,
    metadata: PropertyMetadata,
}

impl<T: 'static> NullableProperty<T> {
    /// Creates a nullable property with the given parser.
    pub fn new(key: impl Into<String>, parser: impl ValueParser<T> + 'static) -> Self {
        Self {
            key: key.into(),
            parser: Arc::new(parser),
            metadata: PropertyMetadata::default(),
        }
    }

    /// Attaches metadata.
    pub fn with_metadata(mut self, metadata: PropertyMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

impl<T> NullableProperty<T>
where
    T: FromStr + 'static,
    T::Err: Display,
{
    /// Creates a nullable property parsed with [`FromStr`].
    pub fn parsed(key: impl Into<String>) -> Self {
        Self::new(key, FromStrValueParser::<T>::new())
    }
}

impl NullableProperty<String> {
    /// Creates a nullable string property.
    pub fn string(key: impl Into<String>) -> Self {
        Self::new(key, StringValueParser)
    }
}

impl NullableProperty<bool> {
    /// Creates a nullable boolean property.
    pub fn boolean(key: impl Into<String>) -> Self {
        Self::new(key, BooleanValueParser)
    }
}

impl<T> Clone for NullableProperty<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            parser: Arc::clone(&self.parser),
            metadata: self.metadata.clone(),
        }
    }
}

impl<T> fmt::Debug for NullableProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullableProperty")
            .field("key", &self.key)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl<T> sealed::Sealed for NullableProperty<T> {}

impl<T> Property for NullableProperty<T> {
    fn key(&self) -> &str {
        &self.key
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::Nullable
    }

    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }

    fn describe_type(&self) -> Option<String> {
        self.parser.describe_type()
    }
}

impl<T> TypedProperty for NullableProperty<T> {
    type Value = T;
    type Output = Option<T>;

    fn parse(&self, raw: &str) -> Result<T, ValueParseError> {
        self.parser.parse(raw)
    }

    fn when_missing(&self) -> Option<T> {
        None
    }

    fn when_present(&self, value: T) -> Option<T> {
        Some(value)
    }
}

/// A property that always has a value, falling back to a default.
///
/// # Examples
///
/// ```
/// use propcfg::domain::ValuedProperty;
///
/// let port = ValuedProperty::parsed("server.port", 8080u16);
/// assert_eq!(*port.default_value(), 8080);
/// assert_eq!(port.describe_default(), "8080");
/// ```
pub struct ValuedProperty<T> {
    key: String,
    parser: Arc<dyn ValueParser<T>>,
    default_value: T,
    metadata: PropertyMetadata,
}

impl<T: 'static> ValuedProperty<T> {
    /// Creates a valued property with the given parser and default.
    pub fn new(
        key: impl Into<String>,
        parser: impl ValueParser<T> + 'static,
        default_value: T,
    ) -> Self {
        Self {
            key: key.into(),
            parser: Arc::new(parser),
            default_value,
            metadata: PropertyMetadata::default(),
        }
    }

    /// Attaches metadata.
    pub fn with_metadata(mut self, metadata: PropertyMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

impl<T> ValuedProperty<T> {
    /// Returns the default value.
    pub fn default_value(&self) -> &T {
        &self.default_value
    }
}

impl<T: Display> ValuedProperty<T> {
    /// Renders the default value for help output.
    pub fn describe_default(&self) -> String {
        self.default_value.to_string()
    }
}

impl<T> ValuedProperty<T>
where
    T: FromStr + 'static,
    T::Err: Display,
{
    /// Creates a valued property parsed with [`FromStr`].
    pub fn parsed(key: impl Into<String>, default_value: T) -> Self {
        Self::new(key, FromStrValueParser::<T>::new(), default_value)
    }
}

impl ValuedProperty<String> {
    /// Creates a string property with a default.
    pub fn string(key: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self::new(key, StringValueParser, default_value.into())
    }
}

impl ValuedProperty<bool> {
    /// Creates a boolean property with a default.
    pub fn boolean(key: impl Into<String>, default_value: bool) -> Self {
        Self::new(key, BooleanValueParser, default_value)
    }
}

impl<E> ValuedProperty<FilterableEnumValue<E>>
where
    E: FromStr + 'static,
    E::Err: Display,
{
    /// Creates a filterable enum property (`ALL`, `NONE`, or a list of values).
    ///
    /// Enum values are matched by `E`'s [`FromStr`], which decides case sensitivity.
    /// The `ALL` and `NONE` keywords are accepted in any case. The example values list
    /// only the two keywords; use
    /// [`filterable_enum_with_choices`](Self::filterable_enum_with_choices) to list
    /// the enum's values as well.
    pub fn filterable_enum(key: impl Into<String>, default_value: FilterableEnumValue<E>) -> Self {
        Self::filterable_enum_with_examples(key, default_value, Vec::new())
    }

    fn filterable_enum_with_examples(
        key: impl Into<String>,
        default_value: FilterableEnumValue<E>,
        mut examples: Vec<String>,
    ) -> Self {
        examples.extend([ALL_KEYWORD.to_string(), NONE_KEYWORD.to_string()]);
        Self::new(key, FilterableEnumValueParser::<E>::new(), default_value).with_metadata(
            PropertyMetadata::new()
                .example_values(examples)
                .only_example_values()
                .case_sensitive(),
        )
    }
}

impl<E> ValuedProperty<FilterableEnumValue<E>>
where
    E: FromStr + Display + 'static,
    E::Err: Display,
{
    /// Creates a filterable enum property whose example values are every choice
    /// followed by `ALL` and `NONE`.
    ///
    /// # Examples
    ///
    /// ```
    /// use propcfg::prelude::*;
    ///
    /// let property = ValuedProperty::filterable_enum_with_choices(
    ///     "levels",
    ///     FilterableEnumValue::All,
    ///     [1u8, 2, 3],
    /// );
    /// assert_eq!(property.metadata().example_values, ["1", "2", "3", "ALL", "NONE"]);
    /// ```
    pub fn filterable_enum_with_choices<I>(
        key: impl Into<String>,
        default_value: FilterableEnumValue<E>,
        choices: I,
    ) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let examples = choices.into_iter().map(|choice| choice.to_string()).collect();
        Self::filterable_enum_with_examples(key, default_value, examples)
    }
}

impl<T: Clone> Clone for ValuedProperty<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            parser: Arc::clone(&self.parser),
            default_value: self.default_value.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ValuedProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuedProperty")
            .field("key", &self.key)
            .field("default_value", &self.default_value)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl<T> sealed::Sealed for ValuedProperty<T> {}

impl<T: Send + Sync> Property for ValuedProperty<T> {
    fn key(&self) -> &str {
        &self.key
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::Valued
    }

    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }

    fn describe_type(&self) -> Option<String> {
        self.parser.describe_type()
    }
}

impl<T: Clone + Send + Sync> TypedProperty for ValuedProperty<T> {
    type Value = T;
    type Output = T;

    fn parse(&self, raw: &str) -> Result<T, ValueParseError> {
        self.parser.parse(raw)
    }

    fn when_missing(&self) -> T {
        self.default_value.clone()
    }

    fn when_present(&self, value: T) -> T {
        value
    }
}

/// A family of keys sharing a dotted prefix.
///
/// Prefix `pass` matches `pass.one`, `pass.two`, and so on. Values are never parsed.
/// Prefixes of different passthrough properties should not overlap (`pass` and
/// `pass.sub`); overlapping families are resolved independently.
///
/// # Examples
///
/// ```
/// use propcfg::domain::PassthroughProperty;
///
/// let docker = PassthroughProperty::new("docker.passthrough");
/// assert_eq!(docker.prefix(), "docker.passthrough");
/// assert_eq!(docker.strip("docker.passthrough.image"), Some("image"));
/// assert_eq!(docker.strip("docker.passthroughx"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassthroughProperty {
    prefix: String,
    metadata: PropertyMetadata,
}

impl PassthroughProperty {
    /// Creates a passthrough property for the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            metadata: PropertyMetadata::default(),
        }
    }

    /// Attaches metadata.
    pub fn with_metadata(mut self, metadata: PropertyMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Returns the prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Strips `prefix.` from `key`, returning the suffix when `key` belongs to this family.
    pub fn strip<'a>(&self, key: &'a str) -> Option<&'a str> {
        key.strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
    }
}

impl sealed::Sealed for PassthroughProperty {}

impl Property for PassthroughProperty {
    fn key(&self) -> &str {
        &self.prefix
    }

    fn kind(&self) -> PropertyKind {
        PropertyKind::Passthrough
    }

    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }
}
