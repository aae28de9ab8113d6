//! Centralized server configuration.
//!
//! Strongly-typed configuration for the server, loaded via the `config`
//! crate from environment variables (nested sections use `__`, e.g.
//! `ASSISTANT__API_KEY`, `DIRECTORY__URL`). Required credentials missing
//! from the environment fail the load, so a misconfigured deployment dies
//! at startup instead of on its first chat turn.

use amber_dialer_assistant::AssistantApiConfig;
use amber_dialer_directory::RestKvConfig;
use amber_dialer_relay::PollConfig;
use serde::Deserialize;
use std::time::Duration;

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Public base URL of this deployment, used to build shareable demo
    /// links.
    pub public_base_url: String,

    /// Base URL for per-company booking links.
    #[serde(default = "default_calendar_base_url")]
    pub calendar_base_url: String,

    /// External assistant API connection.
    pub assistant: AssistantApiConfig,

    /// Backing key-value store connection.
    pub directory: RestKvConfig,

    /// Run polling schedule.
    #[serde(default)]
    pub poll: PollSettings,
}

/// Run polling configuration, in plain units for the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct PollSettings {
    /// Delay before the first status check, in milliseconds.
    #[serde(default = "default_poll_initial_ms")]
    pub initial_interval_ms: u64,

    /// Ceiling for the doubling delay, in milliseconds.
    #[serde(default = "default_poll_max_interval_ms")]
    pub max_interval_ms: u64,

    /// Maximum number of status checks per turn.
    #[serde(default = "default_poll_max_attempts")]
    pub max_attempts: u32,

    /// Wall-clock budget for the whole wait, in milliseconds.
    #[serde(default = "default_poll_max_total_ms")]
    pub max_total_ms: u64,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_calendar_base_url() -> String {
    "https://calendly.com".to_string()
}

fn default_poll_initial_ms() -> u64 {
    200
}

fn default_poll_max_interval_ms() -> u64 {
    3_000
}

fn default_poll_max_attempts() -> u32 {
    25
}

fn default_poll_max_total_ms() -> u64 {
    30_000
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            initial_interval_ms: default_poll_initial_ms(),
            max_interval_ms: default_poll_max_interval_ms(),
            max_attempts: default_poll_max_attempts(),
            max_total_ms: default_poll_max_total_ms(),
        }
    }
}

impl PollSettings {
    /// Converts the environment-facing settings into the relay's schedule.
    #[must_use]
    pub fn to_poll_config(&self) -> PollConfig {
        PollConfig {
            initial_interval: Duration::from_millis(self.initial_interval_ms),
            max_interval: Duration::from_millis(self.max_interval_ms),
            max_attempts: self.max_attempts,
            max_total: Duration::from_millis(self.max_total_ms),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
