// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing property source implementations.
//!
//! This module contains concrete implementations of the
//! [`PropertySource`](crate::ports::PropertySource) port. Adapters only supply raw
//! values; precedence and parsing are handled by the service layer.

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "env")]
pub mod env_var;
pub mod map;
#[cfg(feature = "yaml")]
pub mod yaml_file;

// Re-export adapters based on feature flags
#[cfg(feature = "cli")]
pub use cli::CommandLinePropertySource;
#[cfg(feature = "env")]
pub use env_var::EnvPropertySource;
pub use map::MapPropertySource;
#[cfg(feature = "yaml")]
pub use yaml_file::YamlPropertySource;
