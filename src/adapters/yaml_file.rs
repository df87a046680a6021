// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML file property source.
//!
//! Nested mappings are flattened into dotted keys, and sequence items are addressed by
//! index, so
//!
//! ```yaml
//! database:
//!   hosts:
//!     - primary
//! ```
//!
//! yields the property `database.hosts.0 = primary`.

use crate::domain::{ConfigError, Result};
use crate::ports::PropertySource;
use directories::ProjectDirs;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for YAML configuration files (10MB)
/// This prevents denial of service attacks via extremely large files
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

const SOURCE_NAME: &str = "yaml-file";

/// Default file name looked up in the configuration directory.
const DEFAULT_FILE_NAME: &str = "config.yaml";

/// Flattens a YAML value into dotted keys.
fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, result: &mut BTreeMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, val) in map {
                let key_str = match key {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                let new_prefix = if prefix.is_empty() {
                    key_str
                } else {
                    format!("{}.{}", prefix, key_str)
                };
                flatten_yaml(val, &new_prefix, result);
            }
        }
        serde_yaml::Value::Sequence(seq) => {
            for (i, val) in seq.iter().enumerate() {
                let new_prefix = format!("{}.{}", prefix, i);
                flatten_yaml(val, &new_prefix, result);
            }
        }
        serde_yaml::Value::String(s) => {
            result.insert(prefix.to_string(), s.clone());
        }
        serde_yaml::Value::Number(n) => {
            result.insert(prefix.to_string(), n.to_string());
        }
        serde_yaml::Value::Bool(b) => {
            result.insert(prefix.to_string(), b.to_string());
        }
        serde_yaml::Value::Null => {
            result.insert(prefix.to_string(), String::new());
        }
        serde_yaml::Value::Tagged(tagged) => flatten_yaml(&tagged.value, prefix, result),
    }
}

fn parse_yaml(content: &str) -> Result<BTreeMap<String, String>> {
    let value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse YAML: {}", e),
            source: Some(Box::new(e)),
        })?;

    let mut result = BTreeMap::new();
    flatten_yaml(&value, "", &mut result);
    Ok(result)
}

fn file_name_of(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}

fn source_error(message: String, error: std::io::Error) -> ConfigError {
    ConfigError::SourceError {
        source_name: SOURCE_NAME.to_string(),
        message,
        source: Some(Box::new(error)),
    }
}

/// Reads a file after checking that it is within [`MAX_YAML_FILE_SIZE`].
fn read_bounded(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| {
        source_error(
            format!("Failed to read file metadata: {}", file_name_of(path)),
            e,
        )
    })?;

    if metadata.len() > MAX_YAML_FILE_SIZE {
        return Err(ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!(
                "Configuration file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_YAML_FILE_SIZE
            ),
            source: None,
        });
    }

    fs::read_to_string(path).map_err(|e| {
        source_error(
            format!("Failed to read configuration file: {}", file_name_of(path)),
            e,
        )
    })
}

fn config_dir(app_name: &str, qualifier: &str) -> Result<PathBuf> {
    let proj_dirs =
        ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: "Failed to determine project directories".to_string(),
            source: None,
        })?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

/// Property source for YAML files.
///
/// The file is read and flattened once, when the source is created. The origin of
/// every value is the path of the file it was read from.
///
/// # Examples
///
/// ```rust
/// use propcfg::adapters::YamlPropertySource;
/// use propcfg::ports::PropertySource;
///
/// let source = YamlPropertySource::from_yaml_str("database:\n  port: 5432").unwrap();
/// assert_eq!(source.value("database.port").as_deref(), Some("5432"));
/// ```
///
/// ```rust,no_run
/// use propcfg::adapters::YamlPropertySource;
///
/// // Load from a specific file
/// let source = YamlPropertySource::from_file("/path/to/config.yaml").unwrap();
///
/// // Load from default OS location
/// let source = YamlPropertySource::from_default_location("myapp", "com.example").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct YamlPropertySource {
    name: String,
    /// Path to the YAML file, if read from disk
    file_path: Option<PathBuf>,
    values: BTreeMap<String, String>,
}

impl YamlPropertySource {
    /// Creates a source from a YAML file.
    ///
    /// # Errors
    ///
    /// Fails if the path cannot be resolved, the file is larger than 10MB, or the
    /// content is not valid YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref();

        // Canonicalize path to prevent directory traversal attacks
        let canonical_path = file_path.canonicalize().map_err(|e| {
            source_error(
                format!("Invalid or inaccessible path: {}", file_name_of(file_path)),
                e,
            )
        })?;

        let content = read_bounded(&canonical_path)?;
        let values = parse_yaml(&content)?;

        tracing::debug!(
            "Loaded {} properties from YAML file '{}'",
            values.len(),
            canonical_path.display()
        );

        Ok(Self {
            name: SOURCE_NAME.to_string(),
            file_path: Some(canonical_path),
            values,
        })
    }

    /// Creates a source from YAML text.
    ///
    /// # Errors
    ///
    /// Fails if the content is not valid YAML.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(Self {
            name: SOURCE_NAME.to_string(),
            file_path: None,
            values: parse_yaml(content)?,
        })
    }

    /// Creates a source from `config.yaml` in the OS-appropriate configuration directory.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name (e.g., "myapp")
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        Self::with_filename(app_name, qualifier, DEFAULT_FILE_NAME)
    }

    /// Creates a source from `filename` in the OS-appropriate configuration directory.
    pub fn with_filename(app_name: &str, qualifier: &str, filename: &str) -> Result<Self> {
        Self::from_file(config_dir(app_name, qualifier)?.join(filename))
    }

    /// Renames the source, e.g. to tell two YAML files apart.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the path of the file this source was read from.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}

impl PropertySource for YamlPropertySource {
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
        if !self.has_key(key) {
            return None;
        }
        Some(match &self.file_path {
            Some(path) => path.display().to_string(),
            None => self.name.clone(),
        })
    }

    fn keys(&self) -> BTreeSet<String> {
        self.values.keys().cloned().collect()
    }
}
