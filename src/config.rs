//! Heartbeat configuration

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Default heartbeat period: one minute.
const DEFAULT_PERIOD_MS: u64 = 60_000;

/// Configuration for the presence heartbeat.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeartbeatConfig {
    /// Heartbeat period in milliseconds.
    pub period_ms: u64,
    /// Presence endpoint the reporter POSTs to.
    pub endpoint: String,
    /// Optional bearer token for the presence endpoint.
    pub token: Option<String>,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_PERIOD_MS,
            endpoint: "http://127.0.0.1:8080/api/v1/presence".to_string(),
            token: None,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("heartbeat period must be greater than zero")]
    ZeroPeriod,
    #[error("presence endpoint must not be empty")]
    EmptyEndpoint,
}

impl HeartbeatConfig {
    /// Heartbeat period as a [`Duration`].
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }

    /// Validate the configuration before wiring up the heartbeat.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        Ok(())
    }
}
