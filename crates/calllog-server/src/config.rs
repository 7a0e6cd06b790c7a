//! Server configuration
//!
//! Read from environment variables (a `.env` file is loaded first by `main`).
//!
//! | Variable | Default |
//! |---|---|
//! | `CALLLOG_BIND_ADDR` | `0.0.0.0:8080` |
//! | `CALLLOG_DATABASE_URL` | `sqlite::memory:` |
//! | `CALLLOG_LOG_FORMAT` | `pretty` (`pretty` or `json`) |
//! | `RUST_LOG` | `info,calllog=debug,calllog_server=debug` |
//! | `CALLLOG_RANDOM_SEED` | unset (seeded from OS entropy) |
//! | `CALLLOG_<BEHAVIOR>_DELAY_MS` | see `LatencyProfile::default()` |
//!
//! Delay overrides use `min..max` syntax, e.g. `CALLLOG_SLOW_DELAY_MS=200..500`.

use std::net::SocketAddr;

use thiserror::Error;

use calllog::{DelayRange, LatencyProfile};

use crate::telemetry::{LogFormat, TelemetryConfig, DEFAULT_FILTER};

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl ToString) -> Self {
        Self::Invalid {
            key,
            message: message.to_string(),
        }
    }
}

/// Configuration for the HTTP server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub log_format: LogFormat,
    /// `EnvFilter` directive
    pub log_filter: String,
    /// Fixed seed for reproducible simulations
    pub random_seed: Option<u64>,
    pub latency: LatencyProfile,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            log_format: LogFormat::Pretty,
            log_filter: DEFAULT_FILTER.to_string(),
            random_seed: None,
            latency: LatencyProfile::default(),
        }
    }
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unset or blank keys keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = get("CALLLOG_BIND_ADDR") {
            config.bind_addr = addr
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("CALLLOG_BIND_ADDR", e))?;
        }
        if let Some(url) = get("CALLLOG_DATABASE_URL") {
            config.database_url = url.trim().to_string();
        }
        if let Some(format) = get("CALLLOG_LOG_FORMAT") {
            config.log_format = format
                .parse()
                .map_err(|e| ConfigError::invalid("CALLLOG_LOG_FORMAT", e))?;
        }
        if let Some(filter) = get("RUST_LOG") {
            config.log_filter = filter;
        }
        if let Some(seed) = get("CALLLOG_RANDOM_SEED") {
            config.random_seed = Some(
                seed.trim()
                    .parse()
                    .map_err(|e| ConfigError::invalid("CALLLOG_RANDOM_SEED", e))?,
            );
        }

        let delay = |key: &'static str| -> Result<Option<DelayRange>, ConfigError> {
            get(key)
                .map(|v| v.parse::<DelayRange>().map_err(|e| ConfigError::invalid(key, e)))
                .transpose()
        };

        let defaults = LatencyProfile::default();
        config.latency = LatencyProfile {
            normal: delay("CALLLOG_NORMAL_DELAY_MS")?.unwrap_or(defaults.normal),
            error: delay("CALLLOG_ERROR_DELAY_MS")?.unwrap_or(defaults.error),
            slow: delay("CALLLOG_SLOW_DELAY_MS")?.unwrap_or(defaults.slow),
            fast: delay("CALLLOG_FAST_DELAY_MS")?.unwrap_or(defaults.fast),
            random_slow: delay("CALLLOG_RANDOM_SLOW_DELAY_MS")?.unwrap_or(defaults.random_slow),
            random_error_wait: delay("CALLLOG_RANDOM_ERROR_DELAY_MS")?
                .unwrap_or(defaults.random_error_wait),
        };

        Ok(config)
    }

    pub fn telemetry(&self) -> TelemetryConfig {
        TelemetryConfig::default()
            .with_filter(self.log_filter.clone())
            .with_format(self.log_format)
    }
}
