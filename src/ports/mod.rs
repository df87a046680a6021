// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! The resolution engine depends only on these traits. Adapters in the
//! [`adapters`](crate::adapters) layer and the built-in [`parsers`](crate::parsers)
//! implement them.

pub mod parser;
pub mod source;

pub use parser::ValueParser;
pub use source::PropertySource;
