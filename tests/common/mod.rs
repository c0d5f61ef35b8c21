// ABOUTME: Shared test-data constructors for integration tests
// ABOUTME: Centralizes goal, workout, exercise and measurement creation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitsync Project

#![allow(dead_code)] // each integration test binary uses a subset

use fitsync::database::sqlite::SqliteStore;
use fitsync::database::ActivityStore;
use fitsync::models::{BodyMeasurement, Exercise, Goal, GoalStatus, Workout};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

/// Fresh in-memory store with migrations applied.
pub async fn memory_store() -> SqliteStore {
    let store = SqliteStore::new("sqlite::memory:")
        .await
        .expect("in-memory store");
    store.migrate().await.expect("migrations");
    store
}

/// Create a test goal with sensible defaults.
pub fn test_goal(user_id: Uuid, title: &str, unit: &str, target_value: f64) -> Goal {
    Goal {
        id: Uuid::new_v4(),
        user_id,
        title: title.to_owned(),
        description: None,
        initial_value: 0.0,
        current_value: Some(0.0),
        target_value,
        unit: unit.to_owned(),
        target_date: None,
        achieved: false,
        status: GoalStatus::Active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
}

/// Create a test workout on the given day.
pub fn test_workout(user_id: Uuid, date: NaiveDate, duration_minutes: Option<i64>) -> Workout {
    Workout {
        id: Uuid::new_v4(),
        user_id,
        date,
        duration_minutes,
        effort_level: Some(3),
        notes: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
}

/// Create a weighted strength exercise for a workout.
pub fn weight_exercise(workout_id: Uuid, name: &str, weight: f64, weight_unit: &str) -> Exercise {
    Exercise {
        id: Uuid::new_v4(),
        workout_id,
        name: name.to_owned(),
        exercise_type: Some("strength".to_owned()),
        sets: Some(3),
        reps: Some(5),
        weight: Some(weight),
        weight_unit: Some(weight_unit.to_owned()),
        distance: None,
        distance_unit: None,
    }
}

/// Create a rep-focused bodyweight exercise for a workout.
pub fn reps_exercise(workout_id: Uuid, name: &str, reps: i64) -> Exercise {
    Exercise {
        id: Uuid::new_v4(),
        workout_id,
        name: name.to_owned(),
        exercise_type: Some("strength".to_owned()),
        sets: Some(1),
        reps: Some(reps),
        weight: None,
        weight_unit: None,
        distance: None,
        distance_unit: None,
    }
}

/// Create a cardio exercise with a distance for a workout.
pub fn distance_exercise(
    workout_id: Uuid,
    name: &str,
    distance: f64,
    distance_unit: &str,
) -> Exercise {
    Exercise {
        id: Uuid::new_v4(),
        workout_id,
        name: name.to_owned(),
        exercise_type: Some("cardio".to_owned()),
        sets: None,
        reps: None,
        weight: None,
        weight_unit: None,
        distance: Some(distance),
        distance_unit: Some(distance_unit.to_owned()),
    }
}

/// Create a body measurement with a weight reading.
pub fn test_measurement(user_id: Uuid, weight: f64, unit: &str) -> BodyMeasurement {
    BodyMeasurement {
        id: Uuid::new_v4(),
        user_id,
        measured_at: Utc::now(),
        weight: Some(weight),
        weight_unit: Some(unit.to_owned()),
        body_fat_percent: None,
        muscle_mass: None,
        deleted_at: None,
    }
}

/// Date helper.
pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
