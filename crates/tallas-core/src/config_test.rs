use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "TALLAS_ENV"));
}

#[test]
fn build_app_config_defaults() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.default_cups, vec![34, 36]);
    assert_eq!(cfg.base_sizes, BaseSize::ALL.to_vec());
}

#[test]
fn default_cups_override_is_sorted_and_deduplicated() {
    let mut map = HashMap::new();
    map.insert("TALLAS_DEFAULT_CUPS", "38, 34,38 ,36");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.default_cups, vec![34, 36, 38]);
}

#[test]
fn default_cups_can_be_empty() {
    let mut map = HashMap::new();
    map.insert("TALLAS_DEFAULT_CUPS", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.default_cups.is_empty());
}

#[test]
fn default_cups_invalid() {
    let mut map = HashMap::new();
    map.insert("TALLAS_DEFAULT_CUPS", "34,treinta");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TALLAS_DEFAULT_CUPS"),
        "expected InvalidEnvVar(TALLAS_DEFAULT_CUPS), got: {result:?}"
    );
}

#[test]
fn default_cups_rejects_zero() {
    let mut map = HashMap::new();
    map.insert("TALLAS_DEFAULT_CUPS", "0,34");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn base_sizes_override_keeps_order() {
    let mut map = HashMap::new();
    map.insert("TALLAS_BASE_SIZES", "m,s,M");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_sizes, vec![BaseSize::M, BaseSize::S]);
}

#[test]
fn base_sizes_invalid() {
    let mut map = HashMap::new();
    map.insert("TALLAS_BASE_SIZES", "XS,XL");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TALLAS_BASE_SIZES"),
        "expected InvalidEnvVar(TALLAS_BASE_SIZES), got: {result:?}"
    );
}

#[test]
fn base_sizes_empty_is_rejected() {
    let mut map = HashMap::new();
    map.insert("TALLAS_BASE_SIZES", " , ");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn log_level_override() {
    let mut map = HashMap::new();
    map.insert("TALLAS_LOG_LEVEL", "debug");
    map.insert("TALLAS_ENV", "production");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.env, Environment::Production);
}

#[test]
fn production_defaults_to_warn_log_level() {
    let mut map = HashMap::new();
    map.insert("TALLAS_ENV", "production");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "warn");
}

#[test]
fn test_environment_defaults_to_info_log_level() {
    let mut map = HashMap::new();
    map.insert("TALLAS_ENV", "test");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "info");
}
