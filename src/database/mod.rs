// ABOUTME: Storage abstraction for goals, workouts, exercises and measurements
// ABOUTME: All implementations filter soft-deleted rows and scope writes by owner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitsync Project

//! # Activity Store
//!
//! Abstraction over the relational backing store. The sync engine and the
//! goal CRUD service only ever talk to this trait, which keeps strategies
//! free of hidden dependencies and testable against any implementation.
//!
//! Conventions every implementation must uphold:
//!
//! - Reads exclude soft-deleted rows (`deleted_at IS NULL`)
//! - Writes are scoped by id *and* owning user
//! - Exercise searches are not owner-scoped; callers intersect the
//!   returned `workout_id`s via [`ActivityStore::filter_user_workout_ids`]

use crate::models::{
    BodyMeasurement, BodyWeightSample, Exercise, ExerciseRecord, Goal, GoalStatus, Workout,
    WorkoutSummary,
};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub mod sqlite;

/// Storage interface consumed by the sync engine and goal services.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Run schema migrations. Idempotent.
    async fn migrate(&self) -> Result<()>;

    // ================================
    // Goals
    // ================================

    /// Insert a goal row.
    async fn create_goal(&self, goal: &Goal) -> Result<Uuid>;

    /// All live goals for a user, newest first.
    async fn get_user_goals(&self, user_id: Uuid) -> Result<Vec<Goal>>;

    /// A single live goal by id, scoped to its owner.
    async fn get_goal(&self, user_id: Uuid, goal_id: Uuid) -> Result<Option<Goal>>;

    /// Overwrite the mutable columns of a live goal. Returns `false` when
    /// no matching live row exists. `initial_value` is write-once and is
    /// deliberately not part of this operation.
    async fn update_goal(&self, goal: &Goal) -> Result<bool>;

    /// Persist a progress update: `current_value`, `achieved` and
    /// `updated_at`, scoped by goal id and owner. The sync path leaves
    /// `status` untouched (`None`); the CRUD path recomputes and writes it.
    async fn update_goal_progress(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        current_value: f64,
        achieved: bool,
        status: Option<GoalStatus>,
    ) -> Result<bool>;

    /// Soft-delete a goal (sets `deleted_at`, status becomes archived).
    async fn soft_delete_goal(&self, user_id: Uuid, goal_id: Uuid) -> Result<bool>;

    // ================================
    // Workouts & exercises
    // ================================

    /// Insert a workout row.
    async fn create_workout(&self, workout: &Workout) -> Result<Uuid>;

    /// Soft-delete a workout and leave its exercises orphaned behind the
    /// ownership filter.
    async fn soft_delete_workout(&self, user_id: Uuid, workout_id: Uuid) -> Result<bool>;

    /// {id, date, duration} projection of a user's live workouts.
    async fn workout_summaries(&self, user_id: Uuid) -> Result<Vec<WorkoutSummary>>;

    /// Replace a workout's exercise list wholesale (delete + recreate).
    async fn replace_exercises(&self, workout_id: Uuid, exercises: &[Exercise]) -> Result<()>;

    /// Exercises whose name contains `name_filter` (case-insensitive),
    /// across *all* users. `None` matches every exercise.
    async fn find_exercises(&self, name_filter: Option<&str>) -> Result<Vec<ExerciseRecord>>;

    /// Intersect candidate workout ids with the user's live workouts.
    async fn filter_user_workout_ids(
        &self,
        user_id: Uuid,
        workout_ids: &[Uuid],
    ) -> Result<Vec<Uuid>>;

    // ================================
    // Body measurements
    // ================================

    /// Insert a measurement row.
    async fn create_measurement(&self, measurement: &BodyMeasurement) -> Result<Uuid>;

    /// Most recent live measurement with a recorded weight.
    async fn latest_body_weight(&self, user_id: Uuid) -> Result<Option<BodyWeightSample>>;
}
