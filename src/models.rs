// ABOUTME: Core data models for goals, workouts, exercises and body measurements
// ABOUTME: Defines the sync result records and the CRUD DTOs shared with callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitsync Project

//! # Data Models
//!
//! Core data structures shared by the storage layer, the goal CRUD surface
//! and the sync engine.
//!
//! ## Design Principles
//!
//! - **Soft deletes everywhere**: rows carry a `deleted_at` marker and are
//!   never hard-deleted; every query filters on it
//! - **Derived fields stay derived**: `achieved` and `status` are always
//!   recomputed from `initial_value`, `current_value`, `target_value` and
//!   `target_date`, never cached independently of their inputs
//! - **Write-once anchor**: `initial_value` is fixed at goal creation and
//!   determines the direction of progress; no update path exists for it
//! - **Serializable**: all models support JSON serialization

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle status of a goal, derived on every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    /// In progress, target not yet reached
    Active,
    /// Target reached (direction-aware)
    Completed,
    /// Target date passed without reaching the target
    Behind,
    /// Soft-deleted
    Archived,
}

impl GoalStatus {
    /// Database representation of this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Behind => "behind",
            Self::Archived => "archived",
        }
    }
}

impl Display for GoalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "behind" => Ok(Self::Behind),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown goal status: {other}")),
        }
    }
}

/// A user-defined target tracked by a numeric unit.
///
/// Direction is inferred from `initial_value` vs `target_value` at
/// evaluation time: increasing when `initial_value <= target_value`,
/// decreasing otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Free text; drives exercise-name extraction during sync
    pub title: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Value at goal creation; write-once, anchors the direction of progress
    pub initial_value: f64,
    /// Last computed or observed value
    pub current_value: Option<f64>,
    /// Target to reach (or drop to, for decreasing goals)
    pub target_value: f64,
    /// Short unit code: workouts, minutes, days, kg, lbs, reps, km, miles.
    /// Any other string has no strategy and is never synced.
    pub unit: String,
    /// Optional deadline
    pub target_date: Option<DateTime<Utc>>,
    /// Whether the target has been reached (derived)
    pub achieved: bool,
    /// Lifecycle status (derived)
    pub status: GoalStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; `None` means live
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Payload for creating a new goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalCreate {
    /// Goal title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Target value
    pub target_value: f64,
    /// Unit code
    pub unit: String,
    /// Optional deadline
    pub target_date: Option<DateTime<Utc>>,
    /// Starting value; defaults to 0 when unset
    pub current_value: Option<f64>,
}

/// Partial update for an existing goal. Only provided fields change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalUpdate {
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New target value
    pub target_value: Option<f64>,
    /// New current value
    pub current_value: Option<f64>,
    /// New unit code
    pub unit: Option<String>,
    /// New deadline
    pub target_date: Option<DateTime<Utc>>,
}

/// A logged training session. Owns zero or more [`Exercise`] rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Calendar day the workout took place
    pub date: NaiveDate,
    /// Total duration in minutes, when tracked
    pub duration_minutes: Option<i64>,
    /// Subjective effort rating, when tracked
    pub effort_level: Option<i64>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; `None` means live
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A single exercise entry within a workout.
///
/// Exercise lists are replaced wholesale when a workout's exercises are
/// updated; there is no per-exercise diffing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier
    pub id: Uuid,
    /// Parent workout
    pub workout_id: Uuid,
    /// Exercise name, matched by case-insensitive substring during sync
    pub name: String,
    /// Category (strength, cardio, ...), when tracked
    pub exercise_type: Option<String>,
    /// Number of sets
    pub sets: Option<i64>,
    /// Repetitions per set (best set for max-rep goals)
    pub reps: Option<i64>,
    /// Weight moved
    pub weight: Option<f64>,
    /// Unit of `weight` (kg or lbs); kg when absent
    pub weight_unit: Option<String>,
    /// Distance covered
    pub distance: Option<f64>,
    /// Unit of `distance` (km or miles); km when absent
    pub distance_unit: Option<String>,
}

/// A body measurement sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyMeasurement {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// When the measurement was taken
    pub measured_at: DateTime<Utc>,
    /// Body weight, when measured
    pub weight: Option<f64>,
    /// Unit of `weight`; kg when absent
    pub weight_unit: Option<String>,
    /// Body fat percentage, when measured
    pub body_fat_percent: Option<f64>,
    /// Muscle mass, when measured
    pub muscle_mass: Option<f64>,
    /// Soft-delete marker; `None` means live
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Workout projection used by the count, duration and unique-day strategies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// Workout id
    pub id: Uuid,
    /// Calendar day
    pub date: NaiveDate,
    /// Duration in minutes, when tracked
    pub duration_minutes: Option<i64>,
}

/// Exercise projection returned by name-filtered searches.
///
/// Rows are *not* pre-filtered by owner; callers must intersect
/// `workout_id` with the requesting user's live workouts before using any
/// value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Parent workout (used for the ownership filter)
    pub workout_id: Uuid,
    /// Exercise name
    pub name: String,
    /// Weight moved
    pub weight: Option<f64>,
    /// Unit of `weight`
    pub weight_unit: Option<String>,
    /// Repetitions
    pub reps: Option<i64>,
    /// Distance covered
    pub distance: Option<f64>,
    /// Unit of `distance`
    pub distance_unit: Option<String>,
}

/// Most recent body weight on record for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyWeightSample {
    /// Measured weight
    pub weight: f64,
    /// Unit the weight was recorded in
    pub unit: String,
    /// When it was measured
    pub measured_at: DateTime<Utc>,
}

/// Aggregate result of a bulk goal sync.
///
/// `success` is always `true`: per-goal failures are absorbed and simply
/// not counted, never reported as partial failure to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// Always `true`
    pub success: bool,
    /// Number of goals whose value changed and was persisted
    pub updated: usize,
    /// Human-readable summary
    pub message: String,
    /// One entry per updated goal
    pub details: Vec<GoalSyncDetail>,
}

/// Detail record for one goal updated during a sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSyncDetail {
    /// Goal id
    pub goal_id: Uuid,
    /// Goal title
    pub title: String,
    /// Value stored before the sync
    pub old_value: Option<f64>,
    /// Freshly computed value
    pub new_value: f64,
    /// Goal unit
    pub unit: String,
    /// Whether the new value reaches the target
    pub achieved: bool,
}
