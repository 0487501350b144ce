use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

// =============================================================
// Environment
// =============================================================

#[test]
fn environment_parses_aliases() {
    assert_eq!("production".parse::<Environment>(), Ok(Environment::Production));
    assert_eq!(" PROD ".parse::<Environment>(), Ok(Environment::Production));
    assert_eq!("dev".parse::<Environment>(), Ok(Environment::Development));
    assert_eq!("Demo".parse::<Environment>(), Ok(Environment::Demo));
}

#[test]
fn environment_rejects_unknown_value() {
    assert!(matches!(
        "staging".parse::<Environment>(),
        Err(ConfigError::Invalid { key: ENV_KEY, .. })
    ));
}

#[test]
fn only_production_disables_mock_accounts() {
    assert!(!Environment::Production.allows_mock_accounts());
    assert!(Environment::Development.allows_mock_accounts());
    assert!(Environment::Demo.allows_mock_accounts());
}

// =============================================================
// PortalConfig::from_lookup
// =============================================================

#[test]
fn empty_lookup_yields_defaults() {
    let config = PortalConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config, PortalConfig::default());
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.storage_key, "mockUserEmail");
    assert_eq!(config.routes.login, "/login");
    assert_eq!(config.gate_debounce_cycles, 1);
    assert_eq!(config.identity_base_url, "/api/identity");
}

#[test]
fn lookup_overrides_are_applied() {
    let config = PortalConfig::from_lookup(lookup(&[
        (ENV_KEY, "production"),
        (IDENTITY_URL_KEY, "https://id.example.com/v1/"),
        (GATE_DEBOUNCE_KEY, "3"),
    ]))
    .unwrap();
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.identity_base_url, "https://id.example.com/v1");
    assert_eq!(config.gate_debounce_cycles, 3);
}

#[test]
fn blank_values_count_as_missing() {
    let config = PortalConfig::from_lookup(lookup(&[(ENV_KEY, "  "), (GATE_DEBOUNCE_KEY, "")])).unwrap();
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.gate_debounce_cycles, 1);
}

#[test]
fn malformed_debounce_is_rejected() {
    let err = PortalConfig::from_lookup(lookup(&[(GATE_DEBOUNCE_KEY, "-1")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { key: GATE_DEBOUNCE_KEY, .. }));
}
