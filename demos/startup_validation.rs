// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup validation example.
//!
//! This example demonstrates checking every declared property at startup so that
//! all misconfigured values are reported together, instead of failing on the first
//! one that happens to be read.
//!
//! To run this example:
//! ```bash
//! cargo run --example startup_validation
//! ```

use propcfg::prelude::*;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Detector {
    Git,
    Maven,
    Npm,
}

const ALL_DETECTORS: [Detector; 3] = [Detector::Git, Detector::Maven, Detector::Npm];

impl FromStr for Detector {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "GIT" => Ok(Detector::Git),
            "MAVEN" => Ok(Detector::Maven),
            "NPM" => Ok(Detector::Npm),
            other => Err(format!("expected GIT, MAVEN or NPM, got {}", other)),
        }
    }
}

impl fmt::Display for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Detector::Git => "GIT",
            Detector::Maven => "MAVEN",
            Detector::Npm => "NPM",
        };
        f.write_str(name)
    }
}

fn main() {
    println!("=== propcfg: Startup Validation ===\n");

    let timeout = ValuedProperty::parsed("scan.timeout", 300u64).with_metadata(
        PropertyMetadata::new()
            .name("Scan Timeout")
            .description("Seconds to wait for a scan to finish."),
    );
    let offline = ValuedProperty::boolean("scan.offline", false);
    let excluded = ValuedProperty::filterable_enum_with_choices(
        "detector.excluded",
        FilterableEnumValue::None,
        ALL_DETECTORS,
    );
    let token = NullableProperty::string("server.api.token");

    let config = PropertyConfiguration::builder()
        .with_map(
            "settings",
            [
                ("scan.timeout", "five minutes"),
                ("scan.offline", "maybe"),
                ("detector.excluded", "NPM, GIT"),
                ("server.api.token", "s3cr3t"),
            ],
        )
        .build();

    let report = config.validate(&[&timeout, &offline, &excluded, &token]);
    println!("{}\n", report);
    println!(
        "{} accepts: {}\n",
        excluded.key(),
        excluded.metadata().example_values.join(", ")
    );

    // Lenient access keeps the application running on defaults
    let excluded_detectors = config.get_value_or_default(&excluded);
    println!("Excluded detectors: {}", excluded_detectors);
    println!(
        "Running: {:?}",
        ALL_DETECTORS
            .into_iter()
            .filter(|d| !excluded_detectors.contains(d))
            .collect::<Vec<_>>()
    );
    println!(
        "{} = {}s",
        timeout.metadata().name.as_deref().unwrap_or(timeout.key()),
        config.get_value_or_default(&timeout)
    );

    println!("\nResolved properties (secrets masked):");
    for resolved in config.resolved_properties() {
        println!("  {}", resolved);
    }

    if let Err(e) = report.into_result() {
        println!("\nStartup would abort with: {}", e);
    }
}
