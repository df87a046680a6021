// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property source trait definition.
//!
//! This module defines the `PropertySource` trait, the primary port for anything that can
//! supply raw configuration values: in-memory maps, environment variables, files, or an
//! adapter around another configuration system.

use std::collections::BTreeSet;

/// A named, read-only source of raw string property values.
///
/// A source must answer consistently for the lifetime of every configuration that
/// holds it: [`value`](PropertySource::value) returns `Some` exactly when
/// [`has_key`](PropertySource::has_key) is true.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Sources that perform live lookups against
/// mutable state are responsible for their own synchronization.
///
/// # Enumeration
///
/// [`keys`](PropertySource::keys) is best-effort. A source that cannot enumerate its
/// keys returns an empty set, and a key missing from that set may still be answered by
/// `has_key`.
///
/// # Examples
///
/// ```rust
/// use propcfg::ports::PropertySource;
/// use std::collections::BTreeSet;
///
/// struct Fixed;
///
/// impl PropertySource for Fixed {
///     fn has_key(&self, key: &str) -> bool {
///         key == "app.name"
///     }
///
///     fn value(&self, key: &str) -> Option<String> {
///         self.has_key(key).then(|| "demo".to_string())
///     }
///
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn keys(&self) -> BTreeSet<String> {
///         BTreeSet::from(["app.name".to_string()])
///     }
/// }
///
/// let source = Fixed;
/// assert_eq!(source.value("app.name").as_deref(), Some("demo"));
/// assert_eq!(source.origin("app.name").as_deref(), Some("fixed"));
/// ```
pub trait PropertySource: Send + Sync {
    /// Returns true if this source can answer [`value`](PropertySource::value) for `key`.
    fn has_key(&self, key: &str) -> bool;

    /// Returns the raw value for `key`, if present.
    fn value(&self, key: &str) -> Option<String>;

    /// Returns the stable, non-empty identifier of this source.
    ///
    /// The name is reported as the source of every value this source resolves, and is
    /// the fallback origin.
    fn name(&self) -> &str;

    /// Returns fine-grained provenance for `key`, such as a file path or variable name.
    ///
    /// The default implementation reports the source name.
    fn origin(&self, _key: &str) -> Option<String> {
        Some(self.name().to_string())
    }

    /// Returns every key this source can enumerate.
    fn keys(&self) -> BTreeSet<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Opaque;

    impl PropertySource for Opaque {
        fn has_key(&self, key: &str) -> bool {
            key.starts_with("live.")
        }

        fn value(&self, key: &str) -> Option<String> {
            key.strip_prefix("live.").map(str::to_uppercase)
        }

        fn name(&self) -> &str {
            "opaque"
        }

        fn keys(&self) -> BTreeSet<String> {
            BTreeSet::new()
        }
    }

    #[test]
    fn test_non_enumerable_source_still_answers() {
        let source = Opaque;
        assert!(source.keys().is_empty());
        assert!(source.has_key("live.value"));
        assert_eq!(source.value("live.value").as_deref(), Some("VALUE"));
    }

    #[test]
    fn test_default_origin_is_name() {
        let source = Opaque;
        assert_eq!(source.origin("live.value").as_deref(), Some("opaque"));
    }

    #[test]
    fn test_property_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn PropertySource>();
    }
}
