// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolved property listings for diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

const MASK: &str = "********";

/// Key fragments whose values are hidden when displayed.
const SECRET_MARKERS: &[&str] = &["password", "secret", "token", "api.key", "apikey", "credential"];

/// A key with its resolved raw value and provenance.
///
/// Produced by
/// [`PropertyConfiguration::resolved_properties`](crate::service::PropertyConfiguration::resolved_properties).
/// The `Display` form masks values of keys that look secret; [`masked`](Self::masked)
/// does the same before serializing.
///
/// # Examples
///
/// ```
/// use propcfg::service::ResolvedProperty;
///
/// let property = ResolvedProperty {
///     key: "db.password".to_string(),
///     value: "hunter2".to_string(),
///     source: "env".to_string(),
///     origin: "environment variable DB_PASSWORD".to_string(),
/// };
/// assert!(property.is_secret());
/// assert_eq!(
///     property.to_string(),
///     "db.password = ******** [env: environment variable DB_PASSWORD]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedProperty {
    /// The property key
    pub key: String,
    /// The raw value from the winning source
    pub value: String,
    /// Name of the winning source
    pub source: String,
    /// Origin reported by the winning source
    pub origin: String,
}

impl ResolvedProperty {
    /// Returns true if the key looks like it holds a secret.
    pub fn is_secret(&self) -> bool {
        let key = self.key.to_lowercase();
        SECRET_MARKERS.iter().any(|marker| key.contains(marker))
    }

    /// Returns the value, or a mask if the key looks secret.
    pub fn display_value(&self) -> &str {
        if self.is_secret() {
            MASK
        } else {
            &self.value
        }
    }

    /// Returns a copy whose value is masked if the key looks secret.
    pub fn masked(&self) -> Self {
        Self {
            value: self.display_value().to_string(),
            ..self.clone()
        }
    }
}

impl fmt::Display for ResolvedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.origin == self.source {
            write!(f, "{} = {} [{}]", self.key, self.display_value(), self.source)
        } else {
            write!(
                f,
                "{} = {} [{}: {}]",
                self.key,
                self.display_value(),
                self.source,
                self.origin
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(key: &str, value: &str, source: &str, origin: &str) -> ResolvedProperty {
        ResolvedProperty {
            key: key.to_string(),
            value: value.to_string(),
            source: source.to_string(),
            origin: origin.to_string(),
        }
    }

    #[test]
    fn test_display_plain() {
        let property = resolved("log.level", "INFO", "defaults", "defaults");
        assert_eq!(property.to_string(), "log.level = INFO [defaults]");
    }

    #[test]
    fn test_display_with_origin() {
        let property = resolved("log.level", "INFO", "yaml-file", "/etc/app/config.yaml");
        assert_eq!(
            property.to_string(),
            "log.level = INFO [yaml-file: /etc/app/config.yaml]"
        );
    }

    #[test]
    fn test_secret_detection() {
        assert!(resolved("blackduck.api.token", "t", "env", "env").is_secret());
        assert!(resolved("DB.PASSWORD", "p", "env", "env").is_secret());
        assert!(!resolved("server.port", "80", "env", "env").is_secret());
    }

    #[test]
    fn test_masked_copy() {
        let property = resolved("service.secret", "abc", "env", "env");
        let masked = property.masked();
        assert_eq!(masked.value, MASK);
        assert_eq!(masked.key, property.key);
        assert_eq!(property.value, "abc");
    }
}
