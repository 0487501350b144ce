//! Build-time portal configuration for the browser bundle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle has no process environment, so `HRPORTAL_*` values are
//! captured when the crate is compiled. The server reads the same keys at
//! runtime; both go through `PortalConfig::from_lookup`.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use access::PortalConfig;
use access::config::{ENV_KEY, GATE_DEBOUNCE_KEY, IDENTITY_URL_KEY};

fn build_time_value(key: &str) -> Option<String> {
    let value = match key {
        ENV_KEY => option_env!("HRPORTAL_ENV"),
        IDENTITY_URL_KEY => option_env!("HRPORTAL_IDENTITY_URL"),
        GATE_DEBOUNCE_KEY => option_env!("HRPORTAL_GATE_DEBOUNCE"),
        _ => None,
    };
    value.map(str::to_owned)
}

/// Resolve config from `lookup`, falling back to defaults on invalid values.
pub(crate) fn config_or_default<F>(lookup: F) -> PortalConfig
where
    F: Fn(&str) -> Option<String>,
{
    PortalConfig::from_lookup(lookup).unwrap_or_else(|e| {
        log::error!("invalid portal configuration, using defaults: {e}");
        PortalConfig::default()
    })
}

/// The portal configuration baked into this build.
pub fn portal_config() -> PortalConfig {
    config_or_default(build_time_value)
}
