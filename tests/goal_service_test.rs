// ABOUTME: Integration tests for the goal CRUD service and status policy
// ABOUTME: Exercises creation defaults, partial updates, progress and soft deletion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitsync Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use common::memory_store;
use chrono::{Duration, Utc};
use fitsync::errors::GoalError;
use fitsync::goals::GoalService;
use fitsync::models::{GoalCreate, GoalStatus, GoalUpdate};
use std::sync::Arc;
use uuid::Uuid;

fn create_payload(title: &str, unit: &str, target_value: f64) -> GoalCreate {
    GoalCreate {
        title: title.to_owned(),
        description: None,
        target_value,
        unit: unit.to_owned(),
        target_date: None,
        current_value: None,
    }
}

#[tokio::test]
async fn test_create_goal_defaults() {
    let store = Arc::new(memory_store().await);
    let service = GoalService::new(store);
    let user_id = Uuid::new_v4();

    let goal = service
        .create_goal(user_id, create_payload("Bench press 100kg", "kg", 100.0))
        .await
        .unwrap();

    assert_eq!(goal.current_value, Some(0.0));
    assert_eq!(goal.initial_value, 0.0);
    assert_eq!(goal.status, GoalStatus::Active);
    assert!(!goal.achieved);
    assert!(goal.deleted_at.is_none());
}

#[tokio::test]
async fn test_create_goal_rejects_past_target_date() {
    let store = Arc::new(memory_store().await);
    let service = GoalService::new(store);

    let mut payload = create_payload("Run 50 km", "km", 50.0);
    payload.target_date = Some(Utc::now() - Duration::days(2));

    let err = service.create_goal(Uuid::new_v4(), payload).await.unwrap_err();
    assert!(matches!(err, GoalError::PastTargetDate));
}

#[tokio::test]
async fn test_create_goal_already_at_target_is_completed() {
    let store = Arc::new(memory_store().await);
    let service = GoalService::new(store);

    let mut payload = create_payload("Complete 10 workouts", "workouts", 10.0);
    payload.current_value = Some(10.0);

    let goal = service.create_goal(Uuid::new_v4(), payload).await.unwrap();
    assert_eq!(goal.status, GoalStatus::Completed);
    assert!(goal.achieved);
}

#[tokio::test]
async fn test_get_goals_newest_first_excludes_deleted() {
    let store = Arc::new(memory_store().await);
    let service = GoalService::new(store);
    let user_id = Uuid::new_v4();

    let first = service
        .create_goal(user_id, create_payload("Run 50 km", "km", 50.0))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = service
        .create_goal(user_id, create_payload("Train 20 days", "days", 20.0))
        .await
        .unwrap();

    service.delete_goal(user_id, first.id).await.unwrap();

    let goals = service.get_goals(user_id).await.unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].id, second.id);
}

#[tokio::test]
async fn test_update_goal_recomputes_status() {
    let store = Arc::new(memory_store().await);
    let service = GoalService::new(store);
    let user_id = Uuid::new_v4();

    let goal = service
        .create_goal(user_id, create_payload("Pushups 50 reps", "reps", 50.0))
        .await
        .unwrap();

    let updated = service
        .update_goal(
            user_id,
            goal.id,
            GoalUpdate {
                current_value: Some(50.0),
                ..GoalUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, GoalStatus::Completed);
    assert!(updated.achieved);
    // The write-once anchor never moves.
    assert_eq!(updated.initial_value, 0.0);
}

#[tokio::test]
async fn test_update_goal_not_found() {
    let store = Arc::new(memory_store().await);
    let service = GoalService::new(store);

    let err = service
        .update_goal(Uuid::new_v4(), Uuid::new_v4(), GoalUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GoalError::NotFound(_)));
}

#[tokio::test]
async fn test_progress_update_decreasing_goal() {
    let store = Arc::new(memory_store().await);
    let service = GoalService::new(store);
    let user_id = Uuid::new_v4();

    let mut payload = create_payload("Lose weight", "kg", 70.0);
    payload.current_value = Some(80.0);
    let goal = service.create_goal(user_id, payload).await.unwrap();
    assert_eq!(goal.initial_value, 80.0);
    assert_eq!(goal.status, GoalStatus::Active);

    let updated = service
        .update_goal_progress(user_id, goal.id, 69.5)
        .await
        .unwrap();

    assert_eq!(updated.current_value, Some(69.5));
    assert_eq!(updated.status, GoalStatus::Completed);
    assert!(updated.achieved);
}

#[tokio::test]
async fn test_delete_goal_is_soft() {
    let store = Arc::new(memory_store().await);
    let service = GoalService::new(store);
    let user_id = Uuid::new_v4();

    let goal = service
        .create_goal(user_id, create_payload("Run 50 km", "km", 50.0))
        .await
        .unwrap();

    service.delete_goal(user_id, goal.id).await.unwrap();

    let err = service.get_goal(user_id, goal.id).await.unwrap_err();
    assert!(matches!(err, GoalError::NotFound(_)));

    // Deleting again is NotFound, not an error cascade.
    let err = service.delete_goal(user_id, goal.id).await.unwrap_err();
    assert!(matches!(err, GoalError::NotFound(_)));
}

#[tokio::test]
async fn test_goals_are_owner_scoped() {
    let store = Arc::new(memory_store().await);
    let service = GoalService::new(store);
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let goal = service
        .create_goal(owner, create_payload("Run 50 km", "km", 50.0))
        .await
        .unwrap();

    let err = service.get_goal(stranger, goal.id).await.unwrap_err();
    assert!(matches!(err, GoalError::NotFound(_)));

    let err = service
        .update_goal_progress(stranger, goal.id, 10.0)
        .await
        .unwrap_err();
    assert!(matches!(err, GoalError::NotFound(_)));
}
