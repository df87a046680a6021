// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builder for property configurations.

use crate::adapters::MapPropertySource;
use crate::ports::PropertySource;
use crate::service::configuration::PropertyConfiguration;
use std::sync::Arc;

#[cfg(feature = "yaml")]
use crate::domain::Result;

/// Builder for constructing a [`PropertyConfiguration`].
///
/// Sources are stacked in the order they are added: the first source added has the
/// highest precedence.
///
/// # Examples
///
/// ```rust
/// use propcfg::service::PropertyConfigurationBuilder;
///
/// let config = PropertyConfigurationBuilder::new()
///     .with_map("overrides", [("log.level", "DEBUG")])
///     .with_map("defaults", [("log.level", "INFO")])
///     .build();
///
/// assert_eq!(config.sources().len(), 2);
/// ```
#[derive(Default)]
pub struct PropertyConfigurationBuilder {
    sources: Vec<Arc<dyn PropertySource>>,
}

impl PropertyConfigurationBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property source below every source added so far.
    pub fn with_source(self, source: impl PropertySource + 'static) -> Self {
        self.with_shared_source(Arc::new(source))
    }

    /// Adds a property source that is shared with other configurations.
    pub fn with_shared_source(mut self, source: Arc<dyn PropertySource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds an in-memory source.
    pub fn with_map<I, K, V>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.with_source(MapPropertySource::new(name, values))
    }

    /// Adds command-line arguments as a property source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use propcfg::service::PropertyConfigurationBuilder;
    ///
    /// let config = PropertyConfigurationBuilder::new()
    ///     .with_cli_args(["--server.port=9000"])
    ///     .build();
    /// assert!(config.was_key_provided("server.port"));
    /// ```
    #[cfg(feature = "cli")]
    pub fn with_cli_args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        use crate::adapters::CommandLinePropertySource;
        self.with_source(CommandLinePropertySource::from_args(args))
    }

    /// Adds environment variables as a property source.
    ///
    /// Variable names are lowercased and underscores become dots, so `SERVER_PORT`
    /// answers `server.port`.
    #[cfg(feature = "env")]
    pub fn with_env_vars(self) -> Self {
        use crate::adapters::EnvPropertySource;
        self.with_source(EnvPropertySource::new().lowercase_keys(true))
    }

    /// Adds environment variables starting with `prefix` as a property source.
    ///
    /// The prefix is stripped before the key transformations of
    /// [`with_env_vars`](Self::with_env_vars) are applied.
    #[cfg(feature = "env")]
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        use crate::adapters::EnvPropertySource;
        self.with_source(EnvPropertySource::with_prefix(prefix).lowercase_keys(true))
    }

    /// Adds a YAML file as a property source.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid YAML.
    #[cfg(feature = "yaml")]
    pub fn with_yaml_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        use crate::adapters::YamlPropertySource;
        let source = YamlPropertySource::from_file(path)?;
        Ok(self.with_source(source))
    }

    /// Adds the YAML file from the OS-appropriate configuration directory, if it exists.
    #[cfg(feature = "yaml")]
    pub fn with_default_yaml(self, app_name: &str, qualifier: &str) -> Self {
        use crate::adapters::YamlPropertySource;
        match YamlPropertySource::from_default_location(app_name, qualifier) {
            Ok(source) => self.with_source(source),
            Err(e) => {
                tracing::debug!("Skipping default YAML configuration for '{}': {}", app_name, e);
                self
            }
        }
    }

    /// Builds the configuration.
    pub fn build(self) -> PropertyConfiguration {
        PropertyConfiguration::new(self.sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_new() {
        let config = PropertyConfigurationBuilder::new().build();
        assert!(config.sources().is_empty());
    }

    #[test]
    fn test_builder_order_is_precedence() {
        let config = PropertyConfigurationBuilder::new()
            .with_map("first", [("key", "first")])
            .with_map("second", [("key", "second")])
            .build();

        let names: Vec<&str> = config.sources().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(config.get_raw().get("key").map(String::as_str), Some("first"));
    }

    #[test]
    fn test_builder_shared_source() {
        let shared: Arc<dyn PropertySource> =
            Arc::new(MapPropertySource::new("shared", [("a", "1")]));
        let first = PropertyConfigurationBuilder::new()
            .with_shared_source(Arc::clone(&shared))
            .build();
        let second = PropertyConfigurationBuilder::new()
            .with_shared_source(shared)
            .build();

        assert!(first.was_key_provided("a"));
        assert!(second.was_key_provided("a"));
    }

    #[test]
    #[cfg(feature = "cli")]
    fn test_builder_with_cli_args() {
        let config = PropertyConfigurationBuilder::new()
            .with_cli_args(vec!["--key", "value"])
            .build();
        assert_eq!(config.sources()[0].name(), "cli");
        assert!(config.was_key_provided("key"));
    }

    #[test]
    #[cfg(feature = "env")]
    fn test_builder_with_env_vars() {
        let config = PropertyConfigurationBuilder::new().with_env_vars().build();
        assert_eq!(config.sources().len(), 1);
        assert_eq!(config.sources()[0].name(), "env");
    }

    #[test]
    #[cfg(feature = "yaml")]
    fn test_builder_with_missing_yaml_file() {
        let result = PropertyConfigurationBuilder::new()
            .with_yaml_file("/nonexistent/path/to/config.yaml");
        assert!(result.is_err());
    }
}
