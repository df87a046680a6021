// SPDX-License-Identifier: MIT OR Apache-2.0

//! Eager validation results.

use crate::domain::{ConfigError, InvalidPropertyError, Result};
use std::fmt;

/// The outcome of validating a set of properties against a configuration.
///
/// Produced by [`PropertyConfiguration::validate`](crate::service::PropertyConfiguration::validate).
/// Every failure is collected so that all misconfigured properties can be reported at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    checked: usize,
    failures: Vec<InvalidPropertyError>,
}

impl ValidationReport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_checked(&mut self) {
        self.checked += 1;
    }

    pub(crate) fn record_failure(&mut self, failure: InvalidPropertyError) {
        self.checked += 1;
        self.failures.push(failure);
    }

    /// Returns true if no property failed.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of properties checked.
    pub fn checked(&self) -> usize {
        self.checked
    }

    /// The properties that failed, in the order they were checked.
    pub fn failures(&self) -> &[InvalidPropertyError] {
        &self.failures
    }

    /// Converts the report into a result, failing with the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProperty`] if any property failed.
    pub fn into_result(self) -> Result<()> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(ConfigError::InvalidProperty(failure)),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "All {} properties are valid", self.checked);
        }
        write!(
            f,
            "{} of {} properties are invalid",
            self.failures.len(),
            self.checked
        )?;
        for failure in &self.failures {
            write!(f, "\n  {}", failure)?;
        }
        Ok(())
    }
}
