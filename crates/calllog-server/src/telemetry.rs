//! Telemetry initialization.
//!
//! Installs the global tracing subscriber: an `EnvFilter` plus either a
//! human-readable or a JSON formatting layer.

use std::str::FromStr;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,calllog=debug,calllog_server=debug";

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    /// One JSON object per event, with span fields attached
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}' (expected pretty or json)", other)),
        }
    }
}

/// Configuration for telemetry initialization.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive, e.g. `info,calllog_server=debug`
    pub filter_directive: String,
    pub format: LogFormat,
    /// Whether to use ANSI colors (pretty format only)
    pub ansi_colors: bool,
    /// Whether to include the target (module path)
    pub include_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter_directive: DEFAULT_FILTER.to_string(),
            format: LogFormat::Pretty,
            ansi_colors: true,
            include_target: true,
        }
    }
}

impl TelemetryConfig {
    pub fn with_filter(mut self, directive: impl Into<String>) -> Self {
        self.filter_directive = directive.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        if format == LogFormat::Json {
            self.ansi_colors = false;
        }
        self
    }

    /// Build the filter this config describes
    pub fn env_filter(&self) -> anyhow::Result<EnvFilter> {
        Ok(EnvFilter::try_new(&self.filter_directive)?)
    }
}

/// Initialize the global subscriber.
///
/// Fails if the filter directive does not parse or a global subscriber is
/// already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = config.env_filter()?;

    let fmt_layer = match config.format {
        LogFormat::Pretty => fmt::layer()
            .with_ansi(config.ansi_colors)
            .with_target(config.include_target)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(config.include_target)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
