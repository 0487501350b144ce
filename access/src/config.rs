//! Deployment mode and portal settings.
//!
//! DESIGN
//! ======
//! The environment is an explicit value handed to the resolver at
//! construction instead of an ambient mode flag, so tests can pin it.
//! Settings are read through a lookup closure: the server passes process
//! environment variables, the browser build passes values captured at
//! compile time.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;
use std::str::FromStr;

pub const ENV_KEY: &str = "HRPORTAL_ENV";
pub const IDENTITY_URL_KEY: &str = "HRPORTAL_IDENTITY_URL";
pub const GATE_DEBOUNCE_KEY: &str = "HRPORTAL_GATE_DEBOUNCE";

pub const DEFAULT_IDENTITY_BASE_URL: &str = "/api/identity";
pub const DEFAULT_STORAGE_KEY: &str = "mockUserEmail";
pub const DEFAULT_BYPASS_PROFILE_KEY: &str = "mockBypassProfile";
pub const DEFAULT_GATE_DEBOUNCE_CYCLES: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: '{value}' ({reason})")]
    Invalid { key: &'static str, value: String, reason: &'static str },
}

/// Deployment mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    /// Real identity service; mock accounts and bypass parameters are ignored.
    Production,
    /// Local development with mock accounts.
    #[default]
    Development,
    /// Hosted demo with mock accounts.
    Demo,
}

impl Environment {
    #[must_use]
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Whether the mock account table, persisted mock session and bypass
    /// parameters are honoured.
    #[must_use]
    pub fn allows_mock_accounts(self) -> bool {
        !self.is_production()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Demo => "demo",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            "demo" => Ok(Self::Demo),
            _ => Err(ConfigError::Invalid {
                key: ENV_KEY,
                value: raw.to_owned(),
                reason: "expected production, development or demo",
            }),
        }
    }
}

/// Routes the auth flow navigates between.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthRoutes {
    pub login: String,
    pub logout: String,
    /// Safe default page linked from the access-denied panel.
    pub home: String,
}

impl Default for AuthRoutes {
    fn default() -> Self {
        Self { login: "/login".to_owned(), logout: "/logout".to_owned(), home: "/".to_owned() }
    }
}

/// Settings shared by the resolver, the gate and the client adapters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalConfig {
    pub environment: Environment,
    pub routes: AuthRoutes,
    /// Local store key holding the active mock account's email.
    pub storage_key: String,
    /// Local store key holding a bypass-seeded profile (JSON).
    pub bypass_profile_key: String,
    /// Evaluations after mount during which the gate stays in Checking.
    pub gate_debounce_cycles: u32,
    /// Base URL of the remote identity service.
    pub identity_base_url: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl PortalConfig {
    #[must_use]
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            routes: AuthRoutes::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            bypass_profile_key: DEFAULT_BYPASS_PROFILE_KEY.to_owned(),
            gate_debounce_cycles: DEFAULT_GATE_DEBOUNCE_CYCLES,
            identity_base_url: DEFAULT_IDENTITY_BASE_URL.to_owned(),
        }
    }

    /// Build from a key lookup.
    ///
    /// Recognised keys:
    /// - `HRPORTAL_ENV`: `production`, `development` (default) or `demo`
    /// - `HRPORTAL_IDENTITY_URL`: identity service base URL (default `/api/identity`)
    /// - `HRPORTAL_GATE_DEBOUNCE`: settle cycles before the gate leaves Checking (default 1)
    ///
    /// Blank values count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a present value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match value(ENV_KEY) {
            Some(raw) => raw.parse()?,
            None => Environment::default(),
        };
        let mut config = Self::for_environment(environment);

        if let Some(url) = value(IDENTITY_URL_KEY) {
            config.identity_base_url = url.trim().trim_end_matches('/').to_owned();
        }
        if let Some(raw) = value(GATE_DEBOUNCE_KEY) {
            config.gate_debounce_cycles = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: GATE_DEBOUNCE_KEY,
                value: raw.clone(),
                reason: "expected a non-negative integer",
            })?;
        }
        Ok(config)
    }
}
