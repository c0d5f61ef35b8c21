// ABOUTME: Error taxonomy for unit conversion and the goal CRUD surface
// ABOUTME: Converter misconfiguration is a hard error; data conditions stay recoverable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitsync Project

//! # Error Handling
//!
//! Two classes of failure exist in this crate and they are deliberately
//! kept apart:
//!
//! - [`ConversionError`] signals a conversion pair the [`crate::units`]
//!   module does not support. It indicates a programming error in strategy
//!   configuration (or malformed unit data reaching a converter) and is
//!   propagated by the converter rather than swallowed.
//! - [`GoalError`] covers the goal CRUD surface: missing rows, rejected
//!   input, and underlying store failures.
//!
//! Strategy-level "no usable data" is *not* an error: strategies return
//! `Ok(None)` and the orchestrator treats the goal as unchanged. Store and
//! persistence failures during a sync are absorbed per goal inside
//! [`crate::sync::service::GoalSyncService`] so a single bad record never
//! aborts the batch.

use thiserror::Error;
use uuid::Uuid;

/// Unit conversion failure.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The requested conversion pair is not recognized.
    #[error("cannot convert {quantity} from {from} to {to}")]
    UnsupportedUnit {
        /// Which conversion family was asked ("weight" or "distance")
        quantity: &'static str,
        /// Source unit as given by the caller
        from: String,
        /// Target unit as given by the caller
        to: String,
    },
}

/// Goal CRUD failure.
#[derive(Debug, Error)]
pub enum GoalError {
    /// No live goal with this id belongs to the user.
    #[error("goal {0} not found")]
    NotFound(Uuid),

    /// Target date cannot be in the past.
    #[error("target date cannot be in the past")]
    PastTargetDate,

    /// Underlying store failure.
    #[error("database error: {0}")]
    Database(#[from] anyhow::Error),
}
