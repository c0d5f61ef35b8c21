// ABOUTME: Environment-driven configuration for the storage layer
// ABOUTME: Environment variables only; no configuration files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitsync Project

//! # Configuration
//!
//! Environment-only configuration. The single required setting is the
//! database URL; everything else (log level, format) lives in
//! [`crate::logging`].

use anyhow::{bail, Result};
use std::env;

/// Default on-disk database for local development.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:fitsync.db";

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// sqlx database URL (`sqlite:...`)
    pub database_url: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// `DATABASE_URL` falls back to [`DEFAULT_DATABASE_URL`] when unset;
    /// an empty value is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error when `DATABASE_URL` is set but empty.
    pub fn from_env() -> Result<Self> {
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => {
                if url.trim().is_empty() {
                    bail!("DATABASE_URL is set but empty");
                }
                url
            }
            Err(_) => DEFAULT_DATABASE_URL.to_owned(),
        };

        Ok(Self { database_url })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_url() {
        // Do not rely on process env in tests; exercise the fallback path
        // through the constant instead.
        assert_eq!(DEFAULT_DATABASE_URL, "sqlite:fitsync.db");
        let config = Config {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
        };
        assert!(config.database_url.starts_with("sqlite:"));
    }
}
