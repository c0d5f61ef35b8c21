// ABOUTME: Per-unit sync strategies deriving a goal's current value from activity data
// ABOUTME: Covers workout counts, minutes, unique days, weight, reps and distance goals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitsync Project

//! # Sync Strategies
//!
//! One strategy per recognized goal unit:
//!
//! | unit | computation |
//! |---|---|
//! | `workouts` | count of live workouts |
//! | `minutes` | sum of workout durations, null as 0 |
//! | `days` | count of distinct workout dates |
//! | `kg` / `lbs` | latest body weight, or max weight for the named exercise |
//! | `reps` | max reps for the named exercise |
//! | `km` / `miles` | total distance, optionally filtered by exercise name |
//!
//! Weight, reps and distance goals extract an exercise name from the goal
//! title by stripping numeric tokens and unit words. The heuristic is
//! intentionally preserved as-is: titles whose exercise name itself
//! contains a number get mangled, and existing goal data relies on the
//! current behavior.
//!
//! Every exercise-based computation filters candidate records down to
//! workouts owned by the requesting user and not soft-deleted; a name
//! match against another user's workout never contributes to the value.

use super::{SyncContext, SyncStrategy};
use crate::models::ExerciseRecord;
use crate::units::{round1, UnitConverter};
use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use uuid::Uuid;

/// Regex patterns for goal-title parsing.
/// Stored as Option to handle compilation failures gracefully (should never fail for static patterns)
static NUMBER_TOKEN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: 100, 42.2
    Regex::new(r"\d+(\.\d+)?").ok()
});

static UNIT_TOKEN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Unit words recognized by the strategy registry
    Regex::new(r"(?i)\b(kg|lbs|km|miles|reps|minutes|days|workouts)\b").ok()
});

static BODY_WEIGHT_LANGUAGE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    // Matches: "Lose weight", "Body recomposition", "Gain 5kg"
    Regex::new(r"(?i)weight|body|lose|gain").ok()
});

/// Extract an exercise name from a goal title by stripping numbers and
/// unit words. `None` when nothing remains.
pub(crate) fn extract_exercise_name(title: &str) -> Option<String> {
    let mut cleaned = title.to_owned();
    if let Some(pattern) = NUMBER_TOKEN.as_ref() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }
    if let Some(pattern) = UNIT_TOKEN.as_ref() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }

    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_owned())
    }
}

/// Whether a goal title talks about body weight rather than an exercise.
pub(crate) fn is_body_weight_goal(title: &str) -> bool {
    BODY_WEIGHT_LANGUAGE
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(title))
}

/// Workout ids among `records` that belong to the user's live workouts.
async fn owned_workout_ids(
    ctx: &SyncContext<'_>,
    records: &[ExerciseRecord],
) -> Result<HashSet<Uuid>> {
    let candidates: Vec<Uuid> = records.iter().map(|e| e.workout_id).collect();
    if candidates.is_empty() {
        return Ok(HashSet::new());
    }

    let owned = ctx
        .store
        .filter_user_workout_ids(ctx.user_id, &candidates)
        .await?;
    Ok(owned.into_iter().collect())
}

/// Counts the user's live workouts.
pub struct WorkoutCountStrategy;

#[async_trait]
impl SyncStrategy for WorkoutCountStrategy {
    async fn calculate(&self, ctx: &SyncContext<'_>) -> Result<Option<f64>> {
        let workouts = ctx.store.workout_summaries(ctx.user_id).await?;
        Ok(Some(workouts.len() as f64))
    }
}

/// Sums workout duration in minutes, treating missing durations as 0.
pub struct DurationStrategy;

#[async_trait]
impl SyncStrategy for DurationStrategy {
    async fn calculate(&self, ctx: &SyncContext<'_>) -> Result<Option<f64>> {
        let workouts = ctx.store.workout_summaries(ctx.user_id).await?;
        let total: i64 = workouts.iter().filter_map(|w| w.duration_minutes).sum();
        Ok(Some(total as f64))
    }
}

/// Counts distinct workout days (set cardinality, not workout count).
pub struct UniqueDaysStrategy;

#[async_trait]
impl SyncStrategy for UniqueDaysStrategy {
    async fn calculate(&self, ctx: &SyncContext<'_>) -> Result<Option<f64>> {
        let workouts = ctx.store.workout_summaries(ctx.user_id).await?;
        let unique_days: HashSet<_> = workouts.iter().map(|w| w.date).collect();
        Ok(Some(unique_days.len() as f64))
    }
}

/// Weight goals: latest body weight for body-weight language in the
/// title, otherwise the max weight logged for the named exercise.
pub struct WeightStrategy {
    target_unit: String,
}

impl WeightStrategy {
    /// Strategy reporting values in `target_unit` (kg or lbs).
    #[must_use]
    pub fn new(target_unit: &str) -> Self {
        Self {
            target_unit: target_unit.to_lowercase(),
        }
    }

    async fn body_weight(&self, ctx: &SyncContext<'_>) -> Result<Option<f64>> {
        let Some(sample) = ctx.store.latest_body_weight(ctx.user_id).await? else {
            return Ok(None);
        };

        let mut weight = sample.weight;
        if sample.unit.to_lowercase() != self.target_unit {
            weight = UnitConverter::convert_weight(weight, &sample.unit, &self.target_unit)?;
        }

        Ok(Some(round1(weight)))
    }

    async fn exercise_max_weight(
        &self,
        ctx: &SyncContext<'_>,
        exercise_name: &str,
    ) -> Result<Option<f64>> {
        let records = ctx.store.find_exercises(Some(exercise_name)).await?;
        let records: Vec<_> = records.into_iter().filter(|e| e.weight.is_some()).collect();
        let owned = owned_workout_ids(ctx, &records).await?;
        if owned.is_empty() {
            return Ok(None);
        }

        let mut max_weight = 0.0_f64;
        for exercise in &records {
            if !owned.contains(&exercise.workout_id) {
                continue;
            }

            let mut weight = exercise.weight.unwrap_or(0.0);
            let unit = exercise.weight_unit.as_deref().unwrap_or("kg");
            if unit.to_lowercase() != self.target_unit {
                weight = UnitConverter::convert_weight(weight, unit, &self.target_unit)?;
            }

            max_weight = max_weight.max(weight);
        }

        if max_weight > 0.0 {
            Ok(Some(round1(max_weight)))
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl SyncStrategy for WeightStrategy {
    async fn calculate(&self, ctx: &SyncContext<'_>) -> Result<Option<f64>> {
        let Some(exercise_name) = extract_exercise_name(&ctx.goal.title) else {
            return Ok(None);
        };

        if is_body_weight_goal(&ctx.goal.title) {
            self.body_weight(ctx).await
        } else {
            self.exercise_max_weight(ctx, &exercise_name).await
        }
    }
}

/// Max reps logged for the exercise named in the goal title.
pub struct MaxRepsStrategy;

#[async_trait]
impl SyncStrategy for MaxRepsStrategy {
    async fn calculate(&self, ctx: &SyncContext<'_>) -> Result<Option<f64>> {
        let Some(exercise_name) = extract_exercise_name(&ctx.goal.title) else {
            return Ok(None);
        };

        let records = ctx.store.find_exercises(Some(&exercise_name)).await?;
        let records: Vec<_> = records.into_iter().filter(|e| e.reps.is_some()).collect();
        let owned = owned_workout_ids(ctx, &records).await?;
        if owned.is_empty() {
            return Ok(None);
        }

        let max_reps = records
            .iter()
            .filter(|e| owned.contains(&e.workout_id))
            .filter_map(|e| e.reps)
            .max()
            .unwrap_or(0);

        if max_reps > 0 {
            Ok(Some(max_reps as f64))
        } else {
            Ok(None)
        }
    }
}

/// Total distance over matching exercises. The exercise name is optional:
/// without one the goal aggregates across all exercises with a distance.
pub struct DistanceStrategy {
    target_unit: String,
}

impl DistanceStrategy {
    /// Strategy reporting values in `target_unit` (km or miles).
    #[must_use]
    pub fn new(target_unit: &str) -> Self {
        Self {
            target_unit: target_unit.to_lowercase(),
        }
    }
}

#[async_trait]
impl SyncStrategy for DistanceStrategy {
    async fn calculate(&self, ctx: &SyncContext<'_>) -> Result<Option<f64>> {
        let exercise_name = extract_exercise_name(&ctx.goal.title);

        let records = ctx.store.find_exercises(exercise_name.as_deref()).await?;
        let records: Vec<_> = records
            .into_iter()
            .filter(|e| e.distance.is_some())
            .collect();
        let owned = owned_workout_ids(ctx, &records).await?;
        if owned.is_empty() {
            return Ok(None);
        }

        let mut total_distance = 0.0_f64;
        for exercise in &records {
            if !owned.contains(&exercise.workout_id) {
                continue;
            }

            let mut distance = exercise.distance.unwrap_or(0.0);
            let unit = exercise.distance_unit.as_deref().unwrap_or("km");
            if unit.to_lowercase() != self.target_unit {
                distance = UnitConverter::convert_distance(distance, unit, &self.target_unit)?;
            }

            total_distance += distance;
        }

        if total_distance > 0.0 {
            Ok(Some(round1(total_distance)))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_strips_numbers_and_units() {
        assert_eq!(
            extract_exercise_name("Bench press 100kg").as_deref(),
            Some("Bench press")
        );
        assert_eq!(
            extract_exercise_name("Squat 140 KG").as_deref(),
            Some("Squat")
        );
        assert_eq!(
            extract_exercise_name("20 Pull-ups reps").as_deref(),
            Some("Pull-ups")
        );
    }

    #[test]
    fn test_extract_empty_when_only_tokens() {
        assert_eq!(extract_exercise_name("100 kg"), None);
        assert_eq!(extract_exercise_name("50 workouts"), None);
        assert_eq!(extract_exercise_name("   "), None);
    }

    #[test]
    fn test_extract_keeps_decimal_free_remainder() {
        // The heuristic strips digits inside names too; preserved behavior.
        assert_eq!(
            extract_exercise_name("Run 42.2 km").as_deref(),
            Some("Run")
        );
    }

    #[test]
    fn test_body_weight_detection() {
        assert!(is_body_weight_goal("Lose weight"));
        assert!(is_body_weight_goal("BODY recomposition"));
        assert!(is_body_weight_goal("gain 5kg"));
        assert!(!is_body_weight_goal("Bench press 100kg"));
    }
}
