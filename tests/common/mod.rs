// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for integration tests.

use propcfg::ports::PropertySource;
use std::collections::{BTreeMap, BTreeSet};
use std::env;

/// A property source with per-key origins that can refuse to enumerate its keys.
#[allow(dead_code)]
pub struct MockSource {
    name: String,
    values: BTreeMap<String, String>,
    origins: BTreeMap<String, String>,
    enumerable: bool,
}

#[allow(dead_code)]
impl MockSource {
    pub fn new(name: &str, pairs: &[(&str, &str)]) -> Self {
        Self {
            name: name.to_string(),
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            origins: BTreeMap::new(),
            enumerable: true,
        }
    }

    /// Answers lookups but reports no keys.
    pub fn non_enumerable(mut self) -> Self {
        self.enumerable = false;
        self
    }

    pub fn with_origin(mut self, key: &str, origin: &str) -> Self {
        self.origins.insert(key.to_string(), origin.to_string());
        self
    }
}

impl PropertySource for MockSource {
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
        self.origins.get(key).cloned()
    }

    fn keys(&self) -> BTreeSet<String> {
        if self.enumerable {
            self.values.keys().cloned().collect()
        } else {
            BTreeSet::new()
        }
    }
}

/// Sets environment variables for the lifetime of the guard.
#[allow(dead_code)]
pub struct EnvGuard {
    keys: Vec<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    pub fn new() -> Self {
        EnvGuard { keys: Vec::new() }
    }

    pub fn set(&mut self, key: &str, value: &str) {
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
