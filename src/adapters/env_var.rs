// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable property source.
//!
//! This module provides a source that reads property values from the process
//! environment.

use crate::ports::PropertySource;
use once_cell::sync::OnceCell;
use std::collections::{BTreeMap, BTreeSet};
use std::env;

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// A snapshotted variable, keyed by its transformed property key.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EnvEntry {
    variable: String,
    value: String,
}

/// Property source for environment variables.
///
/// This source reads property values from environment variables. It supports
/// optional prefix filtering (e.g., only read variables starting with "APP_") and
/// key transformation (e.g., converting underscores to dots).
///
/// The environment is read once, on first access, so every lookup made through one
/// source sees the same snapshot.
///
/// # Examples
///
/// ```rust
/// use propcfg::adapters::EnvPropertySource;
///
/// // Read all environment variables
/// let source = EnvPropertySource::new();
///
/// // Read only variables with a specific prefix, as lowercase dotted keys
/// let source = EnvPropertySource::with_prefix("APP_").lowercase_keys(true);
/// ```
#[derive(Debug)]
pub struct EnvPropertySource {
    /// Optional prefix to filter environment variables
    prefix: Option<String>,
    /// Whether to convert keys to lowercase
    lowercase_keys: bool,
    /// Whether to replace underscores with dots
    replace_underscores: bool,
    /// Environment snapshot, loaded on first access
    snapshot: OnceCell<BTreeMap<String, EnvEntry>>,
}

impl EnvPropertySource {
    /// Creates a source over every environment variable.
    ///
    /// Underscores in variable names are replaced with dots by default.
    pub fn new() -> Self {
        Self {
            prefix: None,
            lowercase_keys: false,
            replace_underscores: true,
            snapshot: OnceCell::new(),
        }
    }

    /// Creates a source over the environment variables starting with `prefix`.
    ///
    /// The prefix is stripped before keys are transformed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use propcfg::adapters::EnvPropertySource;
    ///
    /// let source = EnvPropertySource::with_prefix("MYAPP_");
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::new()
        }
    }

    /// Sets whether to convert keys to lowercase.
    pub fn lowercase_keys(mut self, enabled: bool) -> Self {
        self.lowercase_keys = enabled;
        self
    }

    /// Sets whether to replace underscores with dots in keys.
    pub fn replace_underscores(mut self, enabled: bool) -> Self {
        self.replace_underscores = enabled;
        self
    }

    /// Creates a source with pre-populated values instead of the process environment.
    ///
    /// **Note**: This method is primarily intended for testing. Keys are used as given,
    /// without any transformation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use propcfg::adapters::EnvPropertySource;
    /// use propcfg::ports::PropertySource;
    /// use std::collections::BTreeMap;
    ///
    /// let values = BTreeMap::from([("test.key".to_string(), "test_value".to_string())]);
    /// let source = EnvPropertySource::with_values(values);
    /// assert_eq!(source.value("test.key").as_deref(), Some("test_value"));
    /// ```
    pub fn with_values(values: BTreeMap<String, String>) -> Self {
        let entries = values
            .into_iter()
            .map(|(key, value)| {
                let entry = EnvEntry {
                    variable: key.clone(),
                    value,
                };
                (key, entry)
            })
            .collect();

        Self {
            prefix: None,
            lowercase_keys: false,
            replace_underscores: false,
            snapshot: OnceCell::with_value(entries),
        }
    }

    /// Maps a variable name to its property key, or `None` if it is filtered out.
    fn transform_key(&self, variable: &str) -> Option<String> {
        let stripped = match &self.prefix {
            Some(prefix) => variable.strip_prefix(prefix.as_str())?,
            None => variable,
        };

        let mut key = stripped.to_string();
        if self.lowercase_keys {
            key = key.to_lowercase();
        }
        if self.replace_underscores {
            key = key.replace('_', ".");
        }
        Some(key)
    }

    fn load(&self) -> BTreeMap<String, EnvEntry> {
        let mut entries = BTreeMap::new();

        for (variable, value) in env::vars_os().filter_map(|(k, v)| {
            Some((k.into_string().ok()?, v.into_string().ok()?))
        }) {
            // Validate input sizes to prevent DoS
            if variable.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                    variable.len(),
                    value.len(),
                    MAX_ENV_KEY_LEN,
                    MAX_ENV_VALUE_LEN
                );
                continue;
            }

            let Some(key) = self.transform_key(&variable) else {
                continue;
            };
            if key.is_empty() {
                continue;
            }

            entries.insert(key, EnvEntry { variable, value });
        }

        tracing::debug!(
            "Loaded {} environment variables (prefix={:?}, lowercase={}, replace_underscores={})",
            entries.len(),
            self.prefix,
            self.lowercase_keys,
            self.replace_underscores
        );

        entries
    }

    fn snapshot(&self) -> &BTreeMap<String, EnvEntry> {
        self.snapshot.get_or_init(|| self.load())
    }
}

impl Default for EnvPropertySource {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertySource for EnvPropertySource {
    fn has_key(&self, key: &str) -> bool {
        self.snapshot().contains_key(key)
    }

    fn value(&self, key: &str) -> Option<String> {
        self.snapshot().get(key).map(|entry| entry.value.clone())
    }

    fn name(&self) -> &str {
        "env"
    }

    fn origin(&self, key: &str) -> Option<String> {
        self.snapshot()
            .get(key)
            .map(|entry| format!("environment variable {}", entry.variable))
    }

    fn keys(&self) -> BTreeSet<String> {
        self.snapshot().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to set and clean up environment variables
    struct EnvGuard {
        keys: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { keys: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.keys.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in &self.keys {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn test_env_source_name() {
        let source = EnvPropertySource::new();
        assert_eq!(source.name(), "env");
    }

    #[test]
    fn test_env_source_value() {
        let mut guard = EnvGuard::new();
        guard.set("PROPCFG_TEST_CONFIG_VAR", "test_value");

        let source = EnvPropertySource::new();
        assert!(source.has_key("PROPCFG.TEST.CONFIG.VAR"));
        assert_eq!(
            source.value("PROPCFG.TEST.CONFIG.VAR").as_deref(),
            Some("test_value")
        );
    }

    #[test]
    fn test_env_source_nonexistent() {
        let source = EnvPropertySource::new();
        assert!(!source.has_key("NONEXISTENT.VAR.12345"));
        assert_eq!(source.value("NONEXISTENT.VAR.12345"), None);
        assert_eq!(source.origin("NONEXISTENT.VAR.12345"), None);
    }

    #[test]
    fn test_env_source_with_prefix() {
        let mut guard = EnvGuard::new();
        guard.set("PCPREFIX_DATABASE_HOST", "localhost");
        guard.set("PCOTHER_VAR", "should_not_appear");

        let source = EnvPropertySource::with_prefix("PCPREFIX_");
        assert_eq!(source.value("DATABASE.HOST").as_deref(), Some("localhost"));
        assert!(!source.has_key("PCOTHER.VAR"));
        assert!(!source.has_key("OTHER.VAR"));
    }

    #[test]
    fn test_env_source_lowercase_keys() {
        let mut guard = EnvGuard::new();
        guard.set("PCLOWER_UPPER_CASE_KEY", "value");

        let source = EnvPropertySource::new().lowercase_keys(true);
        assert_eq!(
            source.value("pclower.upper.case.key").as_deref(),
            Some("value")
        );
    }

    #[test]
    fn test_env_source_no_replace_underscores() {
        let mut guard = EnvGuard::new();
        guard.set("PCRAW_MY_VAR", "value");

        let source = EnvPropertySource::new().replace_underscores(false);
        assert_eq!(source.value("PCRAW_MY_VAR").as_deref(), Some("value"));
        assert!(!source.has_key("PCRAW.MY.VAR"));
    }

    #[test]
    fn test_env_source_keys() {
        let mut guard = EnvGuard::new();
        guard.set("PCKEYS_KEY_1", "value1");
        guard.set("PCKEYS_KEY_2", "value2");

        let source = EnvPropertySource::with_prefix("PCKEYS_");
        let keys = source.keys();

        assert_eq!(keys.len(), 2);
        assert!(keys.contains("KEY.1"));
        assert!(keys.contains("KEY.2"));
    }

    #[test]
    fn test_env_source_snapshot_is_stable() {
        let mut guard = EnvGuard::new();
        guard.set("PCSNAP_VALUE", "initial");

        let source = EnvPropertySource::with_prefix("PCSNAP_");
        assert_eq!(source.value("VALUE").as_deref(), Some("initial"));

        guard.set("PCSNAP_VALUE", "updated");
        assert_eq!(source.value("VALUE").as_deref(), Some("initial"));
    }

    #[test]
    fn test_env_source_origin_names_variable() {
        let mut guard = EnvGuard::new();
        guard.set("PCORIGIN_DATABASE_HOST", "localhost");

        let source = EnvPropertySource::with_prefix("PCORIGIN_").lowercase_keys(true);
        assert_eq!(
            source.origin("database.host").as_deref(),
            Some("environment variable PCORIGIN_DATABASE_HOST")
        );
    }

    #[test]
    fn test_env_source_with_values() {
        let values = BTreeMap::from([("test.key".to_string(), "v".to_string())]);
        let source = EnvPropertySource::with_values(values);

        assert_eq!(source.value("test.key").as_deref(), Some("v"));
        assert_eq!(
            source.origin("test.key").as_deref(),
            Some("environment variable test.key")
        );
        assert_eq!(source.keys().len(), 1);
    }

    #[test]
    fn test_env_source_default() {
        let source = EnvPropertySource::default();
        assert_eq!(source.name(), "env");
    }
}
