// ABOUTME: Logging configuration and structured logging setup for observability
// ABOUTME: Configures log levels and output formats from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitsync Project

//! Production-ready logging configuration with structured output

use anyhow::Result;
use std::env;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
}

/// Log output format options
#[derive(Debug, Clone)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    /// (`RUST_LOG`, `LOG_FORMAT`).
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        Self { level, format }
    }

    /// Install a global subscriber with this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when a subscriber is already installed or the
    /// level filter cannot be parsed.
    pub fn init(&self) -> Result<()> {
        let filter = EnvFilter::try_new(&self.level)?;

        let registry = tracing_subscriber::registry().with(filter);

        match self.format {
            LogFormat::Json => {
                registry.with(fmt::layer().with_target(true).json()).try_init()?;
            }
            LogFormat::Pretty => {
                registry.with(fmt::layer().with_target(true)).try_init()?;
            }
            LogFormat::Compact => {
                registry.with(fmt::layer().with_target(true).compact()).try_init()?;
            }
        }

        Ok(())
    }
}

/// Initialize logging from environment variables.
///
/// # Errors
///
/// See [`LoggingConfig::init`].
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}
