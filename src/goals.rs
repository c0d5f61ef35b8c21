// ABOUTME: Goal CRUD service: create, update, progress updates and soft deletion
// ABOUTME: Recomputes achieved/status from the write-once initial value on every mutation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitsync Project

//! # Goal Service
//!
//! Direct goal mutation shares the achievement rule with the sync engine
//! and derives the richer status on top of it: `Completed` when achieved,
//! `Behind` when a target date is strictly past, `Active` otherwise.
//! Status is recomputed on every create/update, never cached independent
//! of its inputs.
//!
//! `initial_value` is set once at creation (to the starting
//! `current_value`) and has no update path: it anchors the direction of
//! progress, and mutating it would silently flip achievement semantics.

use crate::database::ActivityStore;
use crate::errors::GoalError;
use crate::models::{Goal, GoalCreate, GoalStatus, GoalUpdate};
use crate::sync::is_goal_achieved;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Derive a goal's status from its progress and deadline.
#[must_use]
pub fn calculate_goal_status(
    initial_value: f64,
    current_value: f64,
    target_value: f64,
    target_date: Option<DateTime<Utc>>,
) -> GoalStatus {
    if is_goal_achieved(initial_value, current_value, target_value) {
        return GoalStatus::Completed;
    }

    if let Some(target) = target_date {
        if Utc::now() > target {
            return GoalStatus::Behind;
        }
    }

    GoalStatus::Active
}

/// CRUD surface over a user's goals.
pub struct GoalService {
    store: Arc<dyn ActivityStore>,
}

impl GoalService {
    /// Create a service over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self { store }
    }

    /// Create a goal. `current_value` defaults to 0 and doubles as the
    /// write-once `initial_value`.
    ///
    /// # Errors
    ///
    /// [`GoalError::PastTargetDate`] for a deadline before now, or
    /// [`GoalError::Database`] on a store failure.
    pub async fn create_goal(&self, user_id: Uuid, data: GoalCreate) -> Result<Goal, GoalError> {
        validate_target_date(data.target_date)?;

        let current_value = data.current_value.unwrap_or(0.0);
        let status = calculate_goal_status(
            current_value,
            current_value,
            data.target_value,
            data.target_date,
        );

        let now = Utc::now();
        let goal = Goal {
            id: Uuid::new_v4(),
            user_id,
            title: data.title,
            description: data.description,
            initial_value: current_value,
            current_value: Some(current_value),
            target_value: data.target_value,
            unit: data.unit,
            target_date: data.target_date,
            achieved: status == GoalStatus::Completed,
            status,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.store.create_goal(&goal).await?;
        info!("created goal '{}' for user {user_id}", goal.title);
        Ok(goal)
    }

    /// All live goals for a user, newest first.
    ///
    /// # Errors
    ///
    /// [`GoalError::Database`] on a store failure.
    pub async fn get_goals(&self, user_id: Uuid) -> Result<Vec<Goal>, GoalError> {
        Ok(self.store.get_user_goals(user_id).await?)
    }

    /// A single live goal.
    ///
    /// # Errors
    ///
    /// [`GoalError::NotFound`] when no live goal matches, or
    /// [`GoalError::Database`] on a store failure.
    pub async fn get_goal(&self, user_id: Uuid, goal_id: Uuid) -> Result<Goal, GoalError> {
        self.store
            .get_goal(user_id, goal_id)
            .await?
            .ok_or(GoalError::NotFound(goal_id))
    }

    /// Apply a partial update, re-deriving achieved/status from the
    /// immutable `initial_value`.
    ///
    /// # Errors
    ///
    /// [`GoalError::NotFound`], [`GoalError::PastTargetDate`] or
    /// [`GoalError::Database`].
    pub async fn update_goal(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        data: GoalUpdate,
    ) -> Result<Goal, GoalError> {
        let mut goal = self.get_goal(user_id, goal_id).await?;

        let target_date = data.target_date.or(goal.target_date);
        validate_target_date(target_date)?;

        if let Some(title) = data.title {
            goal.title = title;
        }
        if let Some(description) = data.description {
            goal.description = Some(description);
        }
        if let Some(target_value) = data.target_value {
            goal.target_value = target_value;
        }
        if let Some(current_value) = data.current_value {
            goal.current_value = Some(current_value);
        }
        if let Some(unit) = data.unit {
            goal.unit = unit;
        }
        goal.target_date = target_date;

        goal.status = calculate_goal_status(
            goal.initial_value,
            goal.current_value.unwrap_or(0.0),
            goal.target_value,
            goal.target_date,
        );
        goal.achieved = goal.status == GoalStatus::Completed;
        goal.updated_at = Utc::now();

        if !self.store.update_goal(&goal).await? {
            return Err(GoalError::NotFound(goal_id));
        }

        Ok(goal)
    }

    /// Progress-only update with the same status derivation.
    ///
    /// # Errors
    ///
    /// [`GoalError::NotFound`] or [`GoalError::Database`].
    pub async fn update_goal_progress(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        current_value: f64,
    ) -> Result<Goal, GoalError> {
        let goal = self.get_goal(user_id, goal_id).await?;

        let status = calculate_goal_status(
            goal.initial_value,
            current_value,
            goal.target_value,
            goal.target_date,
        );
        let achieved = status == GoalStatus::Completed;

        let updated = self
            .store
            .update_goal_progress(user_id, goal_id, current_value, achieved, Some(status))
            .await?;
        if !updated {
            return Err(GoalError::NotFound(goal_id));
        }

        self.get_goal(user_id, goal_id).await
    }

    /// Soft-delete a goal: sets `deleted_at` and archives it. Rows are
    /// never hard-deleted.
    ///
    /// # Errors
    ///
    /// [`GoalError::NotFound`] or [`GoalError::Database`].
    pub async fn delete_goal(&self, user_id: Uuid, goal_id: Uuid) -> Result<(), GoalError> {
        if !self.store.soft_delete_goal(user_id, goal_id).await? {
            return Err(GoalError::NotFound(goal_id));
        }

        info!("archived goal {goal_id} for user {user_id}");
        Ok(())
    }
}

fn validate_target_date(target_date: Option<DateTime<Utc>>) -> Result<(), GoalError> {
    match target_date {
        Some(target) if target < Utc::now() => Err(GoalError::PastTargetDate),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_completed_increasing() {
        let status = calculate_goal_status(0.0, 50.0, 50.0, None);
        assert_eq!(status, GoalStatus::Completed);
    }

    #[test]
    fn test_status_completed_decreasing() {
        let status = calculate_goal_status(80.0, 69.5, 70.0, None);
        assert_eq!(status, GoalStatus::Completed);
    }

    #[test]
    fn test_status_behind_past_deadline() {
        let yesterday = Utc::now() - Duration::days(1);
        let status = calculate_goal_status(0.0, 10.0, 50.0, Some(yesterday));
        assert_eq!(status, GoalStatus::Behind);
    }

    #[test]
    fn test_status_active_future_deadline() {
        let next_month = Utc::now() + Duration::days(30);
        let status = calculate_goal_status(0.0, 10.0, 50.0, Some(next_month));
        assert_eq!(status, GoalStatus::Active);
    }

    #[test]
    fn test_status_active_without_deadline() {
        let status = calculate_goal_status(0.0, 10.0, 50.0, None);
        assert_eq!(status, GoalStatus::Active);
    }

    #[test]
    fn test_completed_wins_over_past_deadline() {
        let yesterday = Utc::now() - Duration::days(1);
        let status = calculate_goal_status(0.0, 60.0, 50.0, Some(yesterday));
        assert_eq!(status, GoalStatus::Completed);
    }
}
