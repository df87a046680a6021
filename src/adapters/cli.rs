// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line argument property source.

use crate::ports::PropertySource;
use std::collections::{BTreeMap, BTreeSet};

/// Property source for command-line arguments.
///
/// Supported formats:
/// - `--key=value`: Long form with equals sign
/// - `--key value`: Long form with space-separated value
/// - `-k value`: Short form with space-separated value
///
/// A flag followed by another flag, or by nothing, has no value and is ignored, as
/// are positional arguments. When a key is repeated the last value wins.
///
/// # Examples
///
/// ```rust
/// use propcfg::adapters::CommandLinePropertySource;
/// use propcfg::ports::PropertySource;
///
/// let source = CommandLinePropertySource::from_args(["--database.host=localhost", "--port", "5432"]);
/// assert_eq!(source.value("port").as_deref(), Some("5432"));
/// assert_eq!(source.origin("port").as_deref(), Some("command line argument --port"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandLinePropertySource {
    /// Parsed values, keyed without leading dashes
    values: BTreeMap<String, String>,
    /// The flag each key was given with, e.g. `--port` or `-p`
    flags: BTreeMap<String, String>,
}

impl CommandLinePropertySource {
    /// Creates a source with no arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source from the given arguments.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut source = Self::new();
        source.parse_args(args);
        tracing::debug!("Parsed {} command-line properties", source.values.len());
        source
    }

    /// Creates a source from the process's arguments, skipping the program name.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use propcfg::adapters::CommandLinePropertySource;
    ///
    /// let source = CommandLinePropertySource::from_env_args();
    /// ```
    pub fn from_env_args() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    fn insert(&mut self, flag: &str, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.flags.insert(key.to_string(), flag.to_string());
    }

    fn parse_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter().peekable();

        while let Some(arg) = args.next() {
            let arg = arg.as_ref();

            let key = if let Some(long) = arg.strip_prefix("--") {
                // --key=value
                if let Some((key, value)) = long.split_once('=') {
                    self.insert(&format!("--{}", key), key, value);
                    continue;
                }
                long
            } else if let Some(short) = arg.strip_prefix('-').filter(|s| s.chars().count() == 1) {
                short
            } else {
                continue;
            };

            if key.is_empty() {
                continue;
            }

            // --key value / -k value, unless the next argument is another flag
            if let Some(value) = args.next_if(|next| !next.as_ref().starts_with('-')) {
                self.insert(arg, key, value.as_ref());
            }
        }
    }
}

impl PropertySource for CommandLinePropertySource {
    fn has_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn name(&self) -> &str {
        "cli"
    }

    fn origin(&self, key: &str) -> Option<String> {
        self.flags
            .get(key)
            .map(|flag| format!("command line argument {}", flag))
    }

    fn keys(&self) -> BTreeSet<String> {
        self.values.keys().cloned().collect()
    }
}
