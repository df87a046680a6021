// SPDX-License-Identifier: MIT OR Apache-2.0

//! A typed, multi-source property configuration crate.
//!
//! Applications declare their configuration as typed property descriptors and resolve
//! them against an ordered stack of property sources. The first source that has a key
//! supplies its value; the descriptor's parser turns that raw string into a typed value.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Property descriptors and error types (`NullableProperty`,
//!   `ValuedProperty`, `PassthroughProperty`, `InvalidPropertyError`)
//! - **Ports**: Trait definitions that define interfaces (`PropertySource`, `ValueParser`)
//! - **Adapters**: Implementations for specific property sources (maps, env vars, YAML, CLI)
//! - **Parsers**: Built-in value parsers (booleans, `FromStr` types, lists, filterable enums)
//! - **Service**: The resolution engine, `PropertyConfiguration`, and its builder
//!
//! # Features
//!
//! - **Typed Properties**: Nullable properties resolve to `Option<T>`, valued properties
//!   fall back to a default
//! - **Precedence**: The first source added to a configuration wins
//! - **Provenance**: Every resolved value reports the source and origin it came from
//! - **Strict and Lenient Access**: Fail on invalid values, or fall back to empty/default
//! - **Passthrough Families**: Collect every `prefix.*` key for hand-off to another system
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//! - `env`: Enable environment variable support (default)
//! - `cli`: Enable command-line argument support (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use propcfg::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let port = ValuedProperty::parsed("server.port", 8080u16);
//! let debug = ValuedProperty::boolean("server.debug", false);
//! let name = NullableProperty::string("server.name");
//!
//! let config = PropertyConfiguration::builder()
//!     .with_map("cli", [("server.debug", "yes")])
//!     .with_map("defaults", [("server.port", "9000")])
//!     .build();
//!
//! assert_eq!(config.get_value(&port)?, 9000);
//! assert!(config.get_value(&debug)?);
//! assert_eq!(config.get_value(&name)?, None);
//! assert_eq!(config.get_property_source(&debug).as_deref(), Some("cli"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod parsers;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::MapPropertySource;
    pub use crate::domain::{
        ConfigError, InvalidPropertyError, NullableProperty, PassthroughProperty, Property,
        PropertyKind, PropertyMetadata, Result, TypedProperty, ValidatableProperty,
        ValueParseError, ValuedProperty,
    };
    pub use crate::parsers::{
        BooleanValueParser, FilterableEnumValue, FilterableEnumValueParser, FromStrValueParser,
        ListValueParser, PathValueParser, StringValueParser,
    };
    pub use crate::ports::{PropertySource, ValueParser};
    pub use crate::service::{
        PropertyConfiguration, PropertyConfigurationBuilder, ResolvedProperty, ValidationReport,
    };

    // Re-export adapters based on feature flags
    #[cfg(feature = "cli")]
    pub use crate::adapters::CommandLinePropertySource;
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvPropertySource;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlPropertySource;
}
