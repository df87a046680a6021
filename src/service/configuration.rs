// SPDX-License-Identifier: MIT OR Apache-2.0

//! The property resolution engine.
//!
//! `PropertyConfiguration` holds an ordered stack of property sources and answers every
//! typed and raw lookup against it. Index 0 of the stack has the highest precedence:
//! when several sources define the same key, every accessor sees the value of the first
//! source that has it.

use crate::domain::{
    InvalidPropertyError, NullableProperty, PassthroughProperty, Property, TypedProperty,
    ValidatableProperty, ValueParseError, ValuedProperty,
};
use crate::ports::PropertySource;
use crate::service::builder::PropertyConfigurationBuilder;
use crate::service::resolved::ResolvedProperty;
use crate::service::validation::ValidationReport;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// A source that answered a key, and what it answered.
struct Resolution<'a> {
    source: &'a dyn PropertySource,
    value: Option<String>,
}

impl Resolution<'_> {
    fn origin(&self, key: &str) -> String {
        self.source
            .origin(key)
            .unwrap_or_else(|| self.source.name().to_string())
    }
}

/// Resolves typed properties against an ordered stack of property sources.
///
/// The configuration never mutates its sources, so it is safe to share between threads
/// and to query repeatedly; identical queries return identical results as long as the
/// sources themselves do not change.
///
/// # Strict and lenient access
///
/// [`get_value`](Self::get_value) fails with [`InvalidPropertyError`] when a provided
/// value does not parse, which suits validating configuration at startup.
/// [`get_value_or_empty`](Self::get_value_or_empty) and
/// [`get_value_or_default`](Self::get_value_or_default) never fail and fall back to
/// `None` or the property's default instead.
///
/// # Examples
///
/// ```rust
/// use propcfg::prelude::*;
///
/// let port = ValuedProperty::parsed("server.port", 8080u16);
/// let host = NullableProperty::string("server.host");
///
/// let config = PropertyConfiguration::builder()
///     .with_map("overrides", [("server.port", "9090")])
///     .with_map("defaults", [("server.port", "80"), ("server.host", "localhost")])
///     .build();
///
/// assert_eq!(config.get_value(&port).unwrap(), 9090);
/// assert_eq!(config.get_value(&host).unwrap().as_deref(), Some("localhost"));
/// assert_eq!(config.get_property_source(&port).as_deref(), Some("overrides"));
/// ```
#[derive(Clone, Default)]
pub struct PropertyConfiguration {
    /// Sources in precedence order (highest first)
    sources: Vec<Arc<dyn PropertySource>>,
}

impl PropertyConfiguration {
    /// Creates a configuration over `sources`, highest precedence first.
    pub fn new(sources: Vec<Arc<dyn PropertySource>>) -> Self {
        tracing::debug!(
            "Created property configuration with {} source(s): {:?}",
            sources.len(),
            sources.iter().map(|s| s.name()).collect::<Vec<_>>()
        );
        Self { sources }
    }

    /// Creates a configuration with no sources.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a new configuration builder.
    pub fn builder() -> PropertyConfigurationBuilder {
        PropertyConfigurationBuilder::new()
    }

    /// Creates a configuration from environment variables and the default YAML file.
    ///
    /// Environment variables take precedence over the file. A missing file is skipped.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    #[cfg_attr(not(feature = "yaml"), allow(unused_variables))]
    pub fn with_defaults(app_name: &str, qualifier: &str) -> Self {
        #[allow(unused_mut)]
        let mut builder = Self::builder();

        #[cfg(feature = "env")]
        {
            builder = builder.with_env_vars();
        }

        #[cfg(feature = "yaml")]
        {
            builder = builder.with_default_yaml(app_name, qualifier);
        }

        builder.build()
    }

    /// Returns the sources in precedence order.
    pub fn sources(&self) -> &[Arc<dyn PropertySource>] {
        &self.sources
    }

    /// Finds the highest-precedence source that has `key`.
    fn resolve(&self, key: &str) -> Option<Resolution<'_>> {
        let resolution = self
            .sources
            .iter()
            .find(|source| source.has_key(key))
            .map(|source| Resolution {
                source: source.as_ref(),
                value: source.value(key),
            });

        match &resolution {
            Some(found) => {
                tracing::trace!("Resolved key '{}' from source '{}'", key, found.source.name())
            }
            None => tracing::trace!("Key '{}' is not provided by any source", key),
        }

        resolution
    }

    /// Resolves and parses a typed property, returning the answering source with the
    /// parse outcome. `None` means the property is not provided.
    fn parse_property<P: TypedProperty>(
        &self,
        property: &P,
    ) -> Option<(&dyn PropertySource, Result<P::Value, ValueParseError>)> {
        let resolution = self.resolve(property.key())?;
        let raw = resolution.value?;
        Some((resolution.source, property.parse(&raw)))
    }

    //
    // Typed access
    //

    /// Returns the parsed value of a property, failing if the provided value is invalid.
    ///
    /// For a [`NullableProperty`] the result is `Option<T>`: `None` when no source
    /// provides the key. For a [`ValuedProperty`] the result is `T`: the default when no
    /// source provides the key. A provided value always overrides the default.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPropertyError`] when a source provides the key but its value
    /// fails to parse.
    pub fn get_value<P: TypedProperty>(
        &self,
        property: &P,
    ) -> Result<P::Output, InvalidPropertyError> {
        match self.parse_property(property) {
            None => Ok(property.when_missing()),
            Some((_, Ok(value))) => Ok(property.when_present(value)),
            Some((source, Err(error))) => {
                tracing::warn!(
                    "Property '{}' from source '{}' is invalid: {}",
                    property.key(),
                    source.name(),
                    error
                );
                Err(InvalidPropertyError::new(
                    property.key(),
                    source.name(),
                    error,
                ))
            }
        }
    }

    /// Returns the parsed value of a nullable property, or `None` if it is missing or
    /// does not parse.
    pub fn get_value_or_empty<T>(&self, property: &NullableProperty<T>) -> Option<T> {
        match self.parse_property(property)? {
            (_, Ok(value)) => Some(value),
            (source, Err(error)) => {
                tracing::debug!(
                    "Ignoring invalid value for '{}' from source '{}': {}",
                    property.key(),
                    source.name(),
                    error
                );
                None
            }
        }
    }

    /// Returns the parsed value of a valued property, or its default if it is missing
    /// or does not parse.
    pub fn get_value_or_default<T: Clone + Send + Sync>(&self, property: &ValuedProperty<T>) -> T {
        match self.parse_property(property) {
            None => property.default_value().clone(),
            Some((_, Ok(value))) => value,
            Some((source, Err(error))) => {
                tracing::debug!(
                    "Using default for '{}' after invalid value from source '{}': {}",
                    property.key(),
                    source.name(),
                    error
                );
                property.default_value().clone()
            }
        }
    }

    /// Returns the parse error for a provided but unparseable property.
    ///
    /// Returns `None` when the property is not provided or when it parses.
    pub fn get_property_error<P: TypedProperty>(&self, property: &P) -> Option<ValueParseError> {
        match self.parse_property(property)? {
            (_, Ok(_)) => None,
            (_, Err(error)) => Some(error),
        }
    }

    //
    // Provenance
    //

    /// Returns true if any source has `key`, whether or not its value parses.
    pub fn was_key_provided(&self, key: &str) -> bool {
        self.sources.iter().any(|source| source.has_key(key))
    }

    /// Returns true if any source has the property's key.
    pub fn was_property_provided<P: Property + ?Sized>(&self, property: &P) -> bool {
        self.was_key_provided(property.key())
    }

    /// Returns the name of the source that supplies the property's value.
    pub fn get_property_source<P: Property + ?Sized>(&self, property: &P) -> Option<String> {
        self.resolve(property.key())
            .map(|found| found.source.name().to_string())
    }

    /// Returns the origin of the property's value, falling back to the source name.
    pub fn get_property_origin<P: Property + ?Sized>(&self, property: &P) -> Option<String> {
        let key = property.key();
        self.resolve(key).map(|found| found.origin(key))
    }

    /// Returns the union of every source's enumerable keys.
    pub fn get_keys(&self) -> BTreeSet<String> {
        self.sources.iter().flat_map(|source| source.keys()).collect()
    }

    //
    // Raw access
    //

    /// Returns the raw, unparsed value of a property.
    pub fn get_raw_value<P: Property + ?Sized>(&self, property: &P) -> Option<String> {
        self.resolve(property.key())?.value
    }

    /// Returns every enumerable key mapped to its raw value.
    ///
    /// Each key is resolved the same way as a single lookup, so a source that hides
    /// its keys still shadows the sources below it.
    pub fn get_raw(&self) -> BTreeMap<String, String> {
        self.get_keys()
            .into_iter()
            .filter_map(|key| {
                let value = self.resolve(&key)?.value?;
                Some((key, value))
            })
            .collect()
    }

    /// Returns the raw values of the requested keys.
    ///
    /// Keys that no source provides are omitted.
    pub fn get_raw_for_keys<I, K>(&self, keys: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let wanted: BTreeSet<String> = keys.into_iter().map(|k| k.as_ref().to_string()).collect();
        self.get_raw_matching(|key| wanted.contains(key))
    }

    /// Returns the raw values whose keys satisfy `predicate`.
    pub fn get_raw_matching<F>(&self, predicate: F) -> BTreeMap<String, String>
    where
        F: Fn(&str) -> bool,
    {
        self.get_raw()
            .into_iter()
            .filter(|(key, _)| predicate(key))
            .collect()
    }

    /// Returns the raw values of a passthrough property's family, keyed by suffix.
    ///
    /// With prefix `pass`, `pass.one=1` becomes `one=1`. The family is the union across
    /// all sources; a suffix defined by several sources takes the value of the highest
    /// precedence one.
    pub fn get_raw_passthrough(&self, property: &PassthroughProperty) -> BTreeMap<String, String> {
        self.get_raw()
            .into_iter()
            .filter_map(|(key, value)| {
                property
                    .strip(&key)
                    .map(|suffix| (suffix.to_string(), value))
            })
            .collect()
    }

    //
    // Diagnostics
    //

    /// Checks every provided property and reports all that fail to parse.
    ///
    /// Properties that are not provided are never failures.
    pub fn validate(&self, properties: &[&dyn ValidatableProperty]) -> ValidationReport {
        let mut report = ValidationReport::new();
        for property in properties {
            let key = property.key();
            let Some(found) = self.resolve(key) else {
                report.record_checked();
                continue;
            };
            let Some(raw) = found.value.as_deref() else {
                report.record_checked();
                continue;
            };
            match property.check(raw) {
                Ok(()) => report.record_checked(),
                Err(error) => {
                    tracing::warn!(
                        "Validation failed for '{}' from source '{}': {}",
                        key,
                        found.source.name(),
                        error
                    );
                    report.record_failure(InvalidPropertyError::new(
                        key,
                        found.source.name(),
                        error,
                    ));
                }
            }
        }
        report
    }

    /// Lists every enumerable key with its resolved value and provenance, ordered by key.
    pub fn resolved_properties(&self) -> Vec<ResolvedProperty> {
        self.get_keys()
            .into_iter()
            .filter_map(|key| {
                let found = self.resolve(&key)?;
                let origin = found.origin(&key);
                let source = found.source.name().to_string();
                let value = found.value?;
                Some(ResolvedProperty {
                    key,
                    value,
                    source,
                    origin,
                })
            })
            .collect()
    }
}

impl fmt::Debug for PropertyConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyConfiguration")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
