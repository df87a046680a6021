// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests use property-based testing to verify that resolution and the built-in
//! parsers handle arbitrary inputs correctly.

use propcfg::prelude::*;
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

fn map_source(name: &str, values: &BTreeMap<String, String>) -> Arc<dyn PropertySource> {
    Arc::new(MapPropertySource::new(name, values.clone()))
}

// Keys made of dotted lowercase segments
fn key_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,6}", 1..4).prop_map(|parts| parts.join("."))
}

fn values_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(key_strategy(), "\\PC{0,12}", 0..8)
}

// The highest-precedence source that has a key always supplies its value
proptest! {
    #[test]
    fn test_first_source_with_key_wins(
        high in values_strategy(),
        low in values_strategy(),
    ) {
        let config = PropertyConfiguration::new(vec![map_source("high", &high), map_source("low", &low)]);
        let raw = config.get_raw();

        for key in high.keys().chain(low.keys()) {
            let property = NullableProperty::string(key.clone());
            let (expected_value, expected_source) = match high.get(key) {
                Some(value) => (value, "high"),
                None => (&low[key], "low"),
            };
            let value = config.get_value(&property).unwrap();
            let source = config.get_property_source(&property);
            prop_assert_eq!(value.as_ref(), Some(expected_value));
            prop_assert_eq!(source.as_deref(), Some(expected_source));
            prop_assert_eq!(raw.get(key), Some(expected_value));
        }
    }
}

// get_raw covers exactly the union of enumerable keys
proptest! {
    #[test]
    fn test_raw_keys_are_union(
        high in values_strategy(),
        low in values_strategy(),
    ) {
        let config = PropertyConfiguration::new(vec![map_source("high", &high), map_source("low", &low)]);

        let raw_keys: Vec<String> = config.get_raw().into_keys().collect();
        let union: Vec<String> = config.get_keys().into_iter().collect();
        prop_assert_eq!(raw_keys, union);
    }
}

// Lenient accessors never fail and never differ from strict access on valid input
proptest! {
    #[test]
    fn test_lenient_access_never_panics(raw in "\\PC*", default in any::<i32>()) {
        let property = ValuedProperty::parsed("number", default);
        let config = PropertyConfiguration::builder()
            .with_map("map", [("number", raw.as_str())])
            .build();

        let lenient = config.get_value_or_default(&property);
        match config.get_value(&property) {
            Ok(strict) => prop_assert_eq!(strict, lenient),
            Err(_) => {
                prop_assert_eq!(lenient, default);
                prop_assert!(config.get_property_error(&property).is_some());
            }
        }
    }
}

proptest! {
    #[test]
    fn test_integer_values_parse(n in any::<i64>()) {
        let property = NullableProperty::<i64>::parsed("n");
        let config = PropertyConfiguration::builder()
            .with_map("map", [("n", n.to_string())])
            .build();
        prop_assert_eq!(config.get_value(&property).unwrap(), Some(n));
    }
}

proptest! {
    #[test]
    fn test_boolean_case_insensitive(b in any::<bool>(), upper in any::<bool>()) {
        let text = if b { "true" } else { "false" };
        let text = if upper { text.to_uppercase() } else { text.to_string() };
        prop_assert_eq!(BooleanValueParser.parse(&text).unwrap(), b);
    }
}

proptest! {
    #[test]
    fn test_list_parser_element_count(parts in prop::collection::vec("[a-z0-9]{1,8}", 0..10)) {
        let parser = ListValueParser::new(StringValueParser);
        let parsed: Vec<String> = parser.parse(&parts.join(", ")).unwrap();
        prop_assert_eq!(parsed, parts);
    }
}

// Passthrough suffixes always reconstruct their full key
proptest! {
    #[test]
    fn test_passthrough_suffixes(values in values_strategy(), prefix in "[a-z]{1,4}") {
        let config = PropertyConfiguration::new(vec![map_source("map", &values)]);
        let passthrough = PassthroughProperty::new(prefix.clone());

        for (suffix, value) in config.get_raw_passthrough(&passthrough) {
            let full = format!("{}.{}", prefix, suffix);
            prop_assert_eq!(values.get(&full), Some(&value));
        }
    }
}

// Repeated queries give identical answers
proptest! {
    #[test]
    fn test_queries_are_repeatable(values in values_strategy()) {
        let config = PropertyConfiguration::new(vec![map_source("map", &values)]);
        prop_assert_eq!(config.get_raw(), config.get_raw());
        prop_assert_eq!(config.get_keys(), config.get_keys());
        prop_assert_eq!(config.resolved_properties(), config.resolved_properties());
    }
}
