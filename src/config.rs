//! Server configuration parsed from environment variables.
//!
//! The portal keys are the same ones the client captures at build time, so a
//! server started with `HRPORTAL_ENV=production` and a client built without it
//! disagree. The server only logs what it sees; the browser decides.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use access::PortalConfig;

pub const PORT_KEY: &str = "PORT";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT '{0}'")]
    InvalidPort(String),
    #[error(transparent)]
    Portal(#[from] access::ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub portal: PortalConfig,
}

impl ServerConfig {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `HRPORTAL_ENV`: `production`, `development` (default) or `demo`
    /// - `HRPORTAL_IDENTITY_URL`: default `/api/identity`
    /// - `HRPORTAL_GATE_DEBOUNCE`: default 1
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(PORT_KEY) {
            Some(raw) if !raw.trim().is_empty() => {
                raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw.clone()))?
            }
            _ => DEFAULT_PORT,
        };
        let portal = PortalConfig::from_lookup(&lookup)?;
        Ok(Self { port, portal })
    }
}
