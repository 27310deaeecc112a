use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    assert_eq!(
        ServerConfig::from_lookup(lookup(&[])),
        Ok(ServerConfig { port: DEFAULT_PORT, site_root: None, compression: false })
    );
}

#[test]
fn reads_all_variables() {
    let config = ServerConfig::from_lookup(lookup(&[
        ("PORT", "8080"),
        ("SITE_ROOT", " /srv/site "),
        ("MENTORHUB_COMPRESSION", "on"),
    ]))
    .unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.site_root.as_deref(), Some("/srv/site"));
    assert!(config.compression);
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let config = ServerConfig::from_lookup(lookup(&[("PORT", "  "), ("SITE_ROOT", ""), ("MENTORHUB_COMPRESSION", "")])).unwrap();
    assert_eq!(config, ServerConfig { port: DEFAULT_PORT, site_root: None, compression: false });
}

#[test]
fn invalid_port_is_reported() {
    assert_eq!(
        ServerConfig::from_lookup(lookup(&[("PORT", "http")])),
        Err(ConfigError::InvalidPort { key: "PORT", value: "http".to_owned() })
    );
    assert!(ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).is_err());
}

#[test]
fn invalid_compression_flag_is_reported() {
    let err = ServerConfig::from_lookup(lookup(&[("MENTORHUB_COMPRESSION", "maybe")])).unwrap_err();
    assert_eq!(err.to_string(), "invalid MENTORHUB_COMPRESSION: \"maybe\" is not a boolean");
}

// =============================================================================
// Process environment: unique prefixes avoid races with parallel tests.
// =============================================================================

fn prefixed(prefix: &'static str) -> impl Fn(&str) -> Option<String> {
    move |key| std::env::var(format!("{prefix}{key}")).ok()
}

#[test]
fn reads_process_environment() {
    let prefix = "__TEST_MH_ENV_481__";
    unsafe {
        std::env::set_var(format!("{prefix}PORT"), "4100");
        std::env::set_var(format!("{prefix}MENTORHUB_COMPRESSION"), "YES");
    }
    let config = ServerConfig::from_lookup(prefixed(prefix)).unwrap();
    assert_eq!(config, ServerConfig { port: 4100, site_root: None, compression: true });
    unsafe {
        std::env::remove_var(format!("{prefix}PORT"));
        std::env::remove_var(format!("{prefix}MENTORHUB_COMPRESSION"));
    }
}

#[test]
fn boolean_variants_are_case_insensitive() {
    for (val, expected) in [("1", true), ("True", true), (" off ", false), ("NO", false)] {
        assert_eq!(parse_bool(val), Some(expected), "value {val:?}");
    }
    assert_eq!(parse_bool("maybe"), None);
}
