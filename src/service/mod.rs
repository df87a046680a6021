// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the resolution engine.
//!
//! [`PropertyConfiguration`] resolves typed properties against an ordered stack of
//! property sources; [`PropertyConfigurationBuilder`] assembles that stack.

pub mod builder;
pub mod configuration;
pub mod resolved;
pub mod validation;

// Re-export commonly used types
pub use builder::PropertyConfigurationBuilder;
pub use configuration::PropertyConfiguration;
pub use resolved::ResolvedProperty;
pub use validation::ValidationReport;
