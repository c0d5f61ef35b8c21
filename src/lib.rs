// ABOUTME: Main library entry point for the fitsync goal synchronization engine
// ABOUTME: Exposes the unit converter, sync strategies, goal services and storage layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitsync Project

#![deny(unsafe_code)]

//! # Fitsync
//!
//! Goal progress synchronization engine for a fitness tracking backend.
//!
//! A user declares goals ("Bench press 100kg", "Run 50 km", "Work out 20
//! days") and logs workouts, exercises and body measurements. This crate
//! recomputes each goal's current value from that activity history and
//! persists it when it changed, deriving achievement from the goal's
//! direction (increasing when the initial value is at or below the target,
//! decreasing otherwise).
//!
//! ## Architecture
//!
//! - **Units**: pure weight (kg/lbs) and distance (km/miles) conversion
//! - **Strategies**: one calculator per recognized goal unit, dispatched
//!   from a fixed registry keyed by the unit string
//! - **Sync service**: orchestrates strategy dispatch, change detection,
//!   achievement derivation and persistence, absorbing per-goal failures
//! - **Goal service**: CRUD surface sharing the same achievement and
//!   status rules
//! - **Storage**: `ActivityStore` trait with a sqlx/SQLite implementation
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitsync::config::Config;
//! use fitsync::database::sqlite::SqliteStore;
//! use fitsync::database::ActivityStore;
//! use fitsync::sync::service::GoalSyncService;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     fitsync::logging::init_from_env()?;
//!
//!     let config = Config::from_env()?;
//!     let store = SqliteStore::new(&config.database_url).await?;
//!     store.migrate().await?;
//!
//!     let service = GoalSyncService::new(Arc::new(store));
//!     let report = service.sync_user_goals(uuid::Uuid::new_v4()).await?;
//!     println!("updated {} goal(s)", report.updated);
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Storage abstraction and SQLite implementation
pub mod database;

/// Error types shared across the crate
pub mod errors;

/// Goal CRUD service and status policy
pub mod goals;

/// Logging configuration with structured output
pub mod logging;

/// Core data models
pub mod models;

/// Goal synchronization engine
pub mod sync;

/// Weight and distance unit conversion
pub mod units;
