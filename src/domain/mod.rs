// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! This module defines the property descriptors and error types used throughout the
//! crate. It is independent of any concrete property source.

pub mod errors;
pub mod property;

// Re-export commonly used types
pub use errors::{ConfigError, InvalidPropertyError, Result, ValueParseError};
pub use property::{
    NullableProperty, PassthroughProperty, Property, PropertyKind, PropertyMetadata,
    TypedProperty, ValidatableProperty, ValuedProperty,
};
