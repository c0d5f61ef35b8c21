// ABOUTME: Goal synchronization engine: strategy dispatch and achievement semantics
// ABOUTME: Defines the SyncContext bundle, the SyncStrategy trait and the achievement rule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitsync Project

//! # Goal Synchronization
//!
//! Reconciles a user's declared goals against observed activity data.
//! Each recognized goal unit has its own [`SyncStrategy`] that derives a
//! current value from the activity history; the
//! [`service::GoalSyncService`] dispatches goals to strategies, compares
//! against the stored value and persists only on change.
//!
//! ## Failure containment
//!
//! A strategy returning `Ok(None)` means "no usable data" and leaves the
//! goal unchanged. A strategy returning `Err` (store failure, malformed
//! unit configuration) is caught at the single-goal boundary: logged,
//! counted as not updated, and never allowed to abort the rest of the
//! batch. This partial-failure design is deliberate.

use crate::database::ActivityStore;
use crate::models::Goal;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub mod service;
pub mod strategies;

/// Ephemeral bundle passed to a strategy: store handle, requesting user
/// and the goal being synced. Passed explicitly so strategies stay free
/// of ambient state and trivially testable with a fake store.
pub struct SyncContext<'a> {
    /// Data-access handle
    pub store: &'a dyn ActivityStore,
    /// User whose activity history is consulted
    pub user_id: Uuid,
    /// Goal being synced
    pub goal: &'a Goal,
}

/// A pluggable calculator deriving a goal's current value from activity
/// data for one unit type.
#[async_trait]
pub trait SyncStrategy: Send + Sync {
    /// Compute the current value for the goal in `ctx`.
    ///
    /// `Ok(None)` means the goal is not computable from the available
    /// data (never an error). Individual missing or malformed records are
    /// skipped; only data-access failures may return `Err`.
    async fn calculate(&self, ctx: &SyncContext<'_>) -> Result<Option<f64>>;
}

/// Direction-aware achievement check.
///
/// Direction is inferred from `initial <= target` at call time: increasing
/// goals are achieved when the current value reaches or exceeds the
/// target, decreasing goals when it reaches or drops below it. Applied
/// identically wherever achievement is derived (creation, manual progress
/// update, sync).
#[must_use]
pub fn is_goal_achieved(initial_value: f64, current_value: f64, target_value: f64) -> bool {
    if initial_value <= target_value {
        current_value >= target_value
    } else {
        current_value <= target_value
    }
}
