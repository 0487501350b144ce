use access::Environment;

use super::*;

#[test]
fn unknown_keys_have_no_build_value() {
    assert_eq!(build_time_value("SOMETHING_ELSE"), None);
}

#[test]
fn invalid_values_fall_back_to_defaults() {
    let config = config_or_default(|key| (key == ENV_KEY).then(|| "staging".to_owned()));
    assert_eq!(config, PortalConfig::default());
}

#[test]
fn valid_values_are_used() {
    let config = config_or_default(|key| (key == ENV_KEY).then(|| "demo".to_owned()));
    assert_eq!(config.environment, Environment::Demo);
}
