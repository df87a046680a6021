// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multi-source configuration example.
//!
//! This example demonstrates:
//! - Stacking CLI arguments, environment variables and a YAML file
//! - How the first source added overrides the ones after it
//! - Reporting the source and origin of each value
//! - Passing a whole `prefix.*` family through to another component
//!
//! To run this example:
//! ```bash
//! # Set some environment variables (these override YAML)
//! export APP_NAME="EnvApp"
//! export DATABASE_HOST="db.example.com"
//!
//! # Run with CLI args (these override both YAML and env vars)
//! cargo run --example multi_source -- --app.name=CliApp --app.port=9000
//! ```

use propcfg::prelude::*;
use std::env;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    println!("=== propcfg: Multi-Source Example ===\n");

    let yaml_content = r#"
app:
  name: "YamlApp"
  version: "1.0.0"
  port: 8080

database:
  host: "localhost"
  port: 5432
  username: "admin"

pool:
  max.connections: 20
  idle.timeout: 30s
"#;

    // Write to a temporary file
    let temp_file = tempfile::NamedTempFile::new()?;
    std::fs::write(temp_file.path(), yaml_content)?;

    println!("Created temporary YAML config file at: {:?}\n", temp_file.path());

    // Precedence order (highest to lowest) is the order the sources are added
    println!("Building configuration with three sources:");
    println!("  1. CLI arguments - highest");
    println!("  2. Environment variables");
    println!("  3. YAML file - lowest\n");

    let config = PropertyConfiguration::builder()
        .with_cli_args(env::args().skip(1))
        .with_env_vars()
        .with_yaml_file(temp_file.path())?
        .build();

    let app_name = ValuedProperty::string("app.name", "UnnamedApp");
    let app_port = ValuedProperty::parsed("app.port", 80u16);
    let app_version = NullableProperty::string("app.version");
    let db_host = ValuedProperty::string("database.host", "127.0.0.1");
    let pool = PassthroughProperty::new("pool");

    println!("=== Configuration Values (showing precedence) ===\n");
    print_property(&config, &app_name, config.get_value(&app_name)?);
    print_property(&config, &app_port, config.get_value(&app_port)?);
    print_property(&config, &app_version, config.get_value(&app_version)?);
    print_property(&config, &db_host, config.get_value(&db_host)?);

    println!("\n--- pool.* passthrough ---");
    for (suffix, value) in config.get_raw_passthrough(&pool) {
        println!("  {} = {}", suffix, value);
    }

    println!("\n=== Precedence Summary ===");
    println!("When the same key exists in multiple sources:");
    println!("  • CLI arguments ALWAYS win");
    println!("  • Environment variables override YAML");
    println!("  • YAML file has the lowest precedence");

    Ok(())
}

/// Prints a resolved value with the source and origin it came from
fn print_property<P, V>(config: &PropertyConfiguration, property: &P, value: V)
where
    P: Property,
    V: std::fmt::Debug,
{
    println!("--- {} ---", property.key());
    println!("  Current value: {:?}", value);
    match config.get_property_origin(property) {
        Some(origin) => println!(
            "  Source: {} ({})",
            config.get_property_source(property).unwrap_or_default(),
            origin
        ),
        None => println!("  Source: (default)"),
    }
}
