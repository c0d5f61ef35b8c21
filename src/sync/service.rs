// ABOUTME: Goal sync orchestration: strategy dispatch, change detection, persistence
// ABOUTME: Absorbs per-goal failures so a single bad record never aborts a batch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitsync Project

//! # Goal Sync Service
//!
//! Loads a user's live goals, dispatches each to the strategy registered
//! for its unit, and persists the freshly computed value when it differs
//! from the stored one. Unknown units are not an error: they mean the
//! goal type is not sync-eligible and the goal is skipped silently.

use super::strategies::{
    DistanceStrategy, DurationStrategy, MaxRepsStrategy, UniqueDaysStrategy, WeightStrategy,
    WorkoutCountStrategy,
};
use super::{is_goal_achieved, SyncContext, SyncStrategy};
use crate::database::ActivityStore;
use crate::models::{Goal, GoalSyncDetail, SyncReport};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Orchestrates goal synchronization for a user.
pub struct GoalSyncService {
    store: Arc<dyn ActivityStore>,
    strategies: HashMap<&'static str, Box<dyn SyncStrategy>>,
}

impl GoalSyncService {
    /// Create a service with the full strategy registry.
    #[must_use]
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        let mut strategies: HashMap<&'static str, Box<dyn SyncStrategy>> = HashMap::new();
        strategies.insert("workouts", Box::new(WorkoutCountStrategy));
        strategies.insert("minutes", Box::new(DurationStrategy));
        strategies.insert("days", Box::new(UniqueDaysStrategy));
        strategies.insert("kg", Box::new(WeightStrategy::new("kg")));
        strategies.insert("lbs", Box::new(WeightStrategy::new("lbs")));
        strategies.insert("reps", Box::new(MaxRepsStrategy));
        strategies.insert("km", Box::new(DistanceStrategy::new("km")));
        strategies.insert("miles", Box::new(DistanceStrategy::new("miles")));

        Self { store, strategies }
    }

    /// Sync all live goals for a user.
    ///
    /// Per-goal failures are logged and absorbed; the report always has
    /// `success: true` with the count and details of what actually
    /// changed.
    ///
    /// # Errors
    ///
    /// Only the initial goal load can fail; everything after is contained
    /// at the single-goal boundary.
    pub async fn sync_user_goals(&self, user_id: Uuid) -> Result<SyncReport> {
        let goals = self.store.get_user_goals(user_id).await?;

        if goals.is_empty() {
            return Ok(SyncReport {
                success: true,
                updated: 0,
                message: "No goals found".to_owned(),
                details: Vec::new(),
            });
        }

        let mut details = Vec::new();
        for goal in &goals {
            if let Some(detail) = self.sync_single_goal(user_id, goal).await {
                details.push(detail);
            }
        }

        Ok(SyncReport {
            success: true,
            updated: details.len(),
            message: format!("Synced {} goal(s)", details.len()),
            details,
        })
    }

    /// Sync one goal. Returns the detail record when a new value was
    /// persisted, `None` for every no-op outcome (unsupported unit, not
    /// computable, unchanged value, or an absorbed failure).
    pub async fn sync_single_goal(&self, user_id: Uuid, goal: &Goal) -> Option<GoalSyncDetail> {
        let unit = goal.unit.to_lowercase();
        let Some(strategy) = self.strategies.get(unit.as_str()) else {
            debug!("no sync strategy for unit: {unit}");
            return None;
        };

        let ctx = SyncContext {
            store: self.store.as_ref(),
            user_id,
            goal,
        };

        let new_value = match strategy.calculate(&ctx).await {
            Ok(value) => value?,
            Err(e) => {
                error!("error calculating goal {}: {e:#}", goal.id);
                return None;
            }
        };

        // Exact equality on purpose: recomputing from source data is
        // deterministic, so an equal value means nothing to write.
        if goal.current_value == Some(new_value) {
            return None;
        }

        let achieved = is_goal_achieved(goal.initial_value, new_value, goal.target_value);

        match self
            .store
            .update_goal_progress(user_id, goal.id, new_value, achieved, None)
            .await
        {
            Ok(_) => {
                info!(
                    "synced goal '{}': {:?} -> {} {}{}",
                    goal.title,
                    goal.current_value,
                    new_value,
                    goal.unit,
                    if achieved { " (achieved)" } else { "" }
                );

                Some(GoalSyncDetail {
                    goal_id: goal.id,
                    title: goal.title.clone(),
                    old_value: goal.current_value,
                    new_value,
                    unit: goal.unit.clone(),
                    achieved,
                })
            }
            Err(e) => {
                error!("error updating goal {}: {e:#}", goal.id);
                None
            }
        }
    }
}
