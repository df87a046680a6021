// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory property source.

use crate::ports::PropertySource;
use std::collections::{BTreeMap, BTreeSet};

/// A property source backed by an in-memory map.
///
/// Useful for defaults, overrides and tests. Origins default to the source name and can
/// be set per key with [`with_origin`](Self::with_origin).
///
/// # Examples
///
/// ```rust
/// use propcfg::adapters::MapPropertySource;
/// use propcfg::ports::PropertySource;
///
/// let source = MapPropertySource::new("defaults", [("server.port", "8080")])
///     .with_origin("server.port", "built-in defaults");
///
/// assert!(source.has_key("server.port"));
/// assert_eq!(source.origin("server.port").as_deref(), Some("built-in defaults"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapPropertySource {
    name: String,
    values: BTreeMap<String, String>,
    origins: BTreeMap<String, String>,
}

impl MapPropertySource {
    /// Creates a source named `name` holding `values`.
    pub fn new<I, K, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            origins: BTreeMap::new(),
        }
    }

    /// Creates an empty source named `name`.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds or replaces a value.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Records where the value for `key` came from.
    pub fn with_origin(mut self, key: impl Into<String>, origin: impl Into<String>) -> Self {
        self.origins.insert(key.into(), origin.into());
        self
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the source holds no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertySource for MapPropertySource {
    fn has_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn origin(&self, key: &str) -> Option<String> {
        Some(
            self.origins
                .get(key)
                .cloned()
                .unwrap_or_else(|| self.name.clone()),
        )
    }

    fn keys(&self) -> BTreeSet<String> {
        self.values.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_source_values() {
        let source = MapPropertySource::new("map", [("a", "1"), ("b", "")]);
        assert_eq!(source.name(), "map");
        assert_eq!(source.len(), 2);
        assert!(source.has_key("b"));
        assert_eq!(source.value("a").as_deref(), Some("1"));
        assert_eq!(source.value("b").as_deref(), Some(""));
        assert_eq!(source.value("c"), None);
        assert!(!source.has_key("c"));
    }

    #[test]
    fn test_map_source_keys_sorted() {
        let source = MapPropertySource::new("map", [("z", "1"), ("a", "2")]);
        let keys: Vec<String> = source.keys().into_iter().collect();
        assert_eq!(keys, vec!["a".to_string(), "z".to_string()]);
    }

    #[test]
    fn test_map_source_empty() {
        let source = MapPropertySource::empty("nothing");
        assert!(source.is_empty());
        assert!(source.keys().is_empty());
        assert_eq!(source.name(), "nothing");
    }

    #[test]
    fn test_map_source_with_value_replaces() {
        let source = MapPropertySource::empty("map")
            .with_value("key", "first")
            .with_value("key", "second");
        assert_eq!(source.value("key").as_deref(), Some("second"));
        assert_eq!(source.len(), 1);
    }

    #[test]
    fn test_map_source_origin() {
        let source = MapPropertySource::new("map", [("a", "1"), ("b", "2")])
            .with_origin("a", "defaults.yaml");
        assert_eq!(source.origin("a").as_deref(), Some("defaults.yaml"));
        assert_eq!(source.origin("b").as_deref(), Some("map"));
    }
}
