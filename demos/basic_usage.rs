// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the propcfg crate.
//!
//! This example demonstrates:
//! - Declaring typed properties
//! - Resolving them against in-memory sources
//! - Strict access versus lenient access with defaults
//! - Asking where a value came from
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use propcfg::prelude::*;
use std::path::PathBuf;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== propcfg: Basic Usage ===\n");

    // Properties are declared once, typically as statics or fields of a settings struct
    let app_name = ValuedProperty::string("app.name", "DefaultApp");
    let db_port = ValuedProperty::parsed("database.port", 3000u16);
    let debug = ValuedProperty::boolean("enable.debug", false);
    let timeout = NullableProperty::<f64>::parsed("api.timeout");
    let output_dir = NullableProperty::new("output.dir", PathValueParser);
    let hosts = ValuedProperty::new(
        "cluster.hosts",
        ListValueParser::new(StringValueParser),
        vec!["localhost".to_string()],
    );

    let config = PropertyConfiguration::builder()
        .with_map(
            "overrides",
            [("enable.debug", "yes"), ("database.port", "not-a-port")],
        )
        .with_map(
            "defaults",
            [
                ("app.name", "MyApplication"),
                ("database.port", "5432"),
                ("api.timeout", "30.5"),
                ("cluster.hosts", "a.example.com, b.example.com"),
            ],
        )
        .build();

    println!("--- Example 1: Typed Values ---");
    println!("app.name      = {}", config.get_value(&app_name)?);
    println!("enable.debug  = {}", config.get_value(&debug)?);
    println!("api.timeout   = {:?}", config.get_value(&timeout)?);
    println!("cluster.hosts = {:?}", config.get_value(&hosts)?);

    let output: Option<PathBuf> = config.get_value(&output_dir)?;
    println!("output.dir    = {:?} (not provided)", output);

    println!("\n--- Example 2: Strict vs Lenient Access ---");
    match config.get_value(&db_port) {
        Ok(port) => println!("database.port = {}", port),
        Err(e) => println!("Strict access failed: {}", e),
    }
    println!(
        "Lenient access falls back to the default: {}",
        config.get_value_or_default(&db_port)
    );
    if let Some(error) = config.get_property_error(&db_port) {
        println!("The offending value was '{}' ({})", error.value, error.reason);
    }

    println!("\n--- Example 3: Provenance ---");
    for property in [&app_name as &dyn ValidatableProperty, &debug, &db_port] {
        println!(
            "{} provided={} source={:?}",
            property.key(),
            config.was_property_provided(property),
            config.get_property_source(property)
        );
    }

    println!("\n--- Example 4: Everything Resolved ---");
    for resolved in config.resolved_properties() {
        println!("{}", resolved);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
