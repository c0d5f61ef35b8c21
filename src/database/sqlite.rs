// ABOUTME: SQLite implementation of the ActivityStore trait using sqlx
// ABOUTME: Hand-written migrations, TEXT timestamps and owner-scoped writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitsync Project

//! SQLite database implementation
//!
//! Identifiers are stored as TEXT uuids, timestamps as RFC 3339 TEXT and
//! workout dates as `YYYY-MM-DD` TEXT. `LIKE` on the exercise name column
//! gives the case-insensitive substring match the sync strategies rely on.

use super::ActivityStore;
use crate::models::{
    BodyMeasurement, BodyWeightSample, Exercise, ExerciseRecord, Goal, GoalStatus, Workout,
    WorkoutSummary,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use uuid::Uuid;

/// SQLite-backed activity store.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to the given database URL (e.g. `sqlite::memory:` or
    /// `sqlite:fitsync.db`).
    ///
    /// # Errors
    ///
    /// Returns an error when the connection cannot be established.
    pub async fn new(database_url: &str) -> Result<Self> {
        // A single connection keeps in-memory databases coherent: every
        // pooled connection to sqlite::memory: would otherwise see its own
        // empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .with_context(|| format!("failed to connect to {database_url}"))?;

        Ok(Self { pool })
    }

    /// Access the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_goal(row: &SqliteRow) -> Result<Goal> {
    let status: String = row.try_get("status")?;

    Ok(Goal {
        id: parse_uuid(&row.try_get::<String, _>("id")?)?,
        user_id: parse_uuid(&row.try_get::<String, _>("user_id")?)?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        initial_value: row.try_get("initial_value")?,
        current_value: row.try_get("current_value")?,
        target_value: row.try_get("target_value")?,
        unit: row.try_get("unit")?,
        target_date: parse_opt_datetime(row.try_get("target_date")?)?,
        achieved: row.try_get("achieved")?,
        status: GoalStatus::from_str(&status).map_err(|e| anyhow::anyhow!(e))?,
        created_at: parse_datetime(&row.try_get::<String, _>("created_at")?)?,
        updated_at: parse_datetime(&row.try_get::<String, _>("updated_at")?)?,
        deleted_at: parse_opt_datetime(row.try_get("deleted_at")?)?,
    })
}

fn parse_uuid(value: &str) -> Result<Uuid> {
    Uuid::parse_str(value).with_context(|| format!("invalid uuid: {value}"))
}

fn parse_datetime(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("invalid timestamp: {value}"))?
        .with_timezone(&Utc))
}

fn parse_opt_datetime(value: Option<String>) -> Result<Option<DateTime<Utc>>> {
    value.as_deref().map(parse_datetime).transpose()
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("invalid date: {value}"))
}

#[async_trait]
impl ActivityStore for SqliteStore {
    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS goals (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT,
                initial_value REAL NOT NULL,
                current_value REAL,
                target_value REAL NOT NULL,
                unit TEXT NOT NULL,
                target_date TEXT,
                achieved BOOLEAN NOT NULL DEFAULT 0,
                status TEXT NOT NULL DEFAULT 'active',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_goals_user ON goals(user_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                date TEXT NOT NULL,
                duration_minutes INTEGER,
                effort_level INTEGER,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_workouts_user ON workouts(user_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS exercises (
                id TEXT PRIMARY KEY,
                workout_id TEXT NOT NULL,
                name TEXT NOT NULL,
                exercise_type TEXT,
                sets INTEGER,
                reps INTEGER,
                weight REAL,
                weight_unit TEXT,
                distance REAL,
                distance_unit TEXT,
                FOREIGN KEY (workout_id) REFERENCES workouts(id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_exercises_workout ON exercises(workout_id)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS body_measurements (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                measured_at TEXT NOT NULL,
                weight REAL,
                weight_unit TEXT,
                body_fat_percent REAL,
                muscle_mass REAL,
                deleted_at TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_measurements_user ON body_measurements(user_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn create_goal(&self, goal: &Goal) -> Result<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO goals (
                id, user_id, title, description, initial_value, current_value,
                target_value, unit, target_date, achieved, status,
                created_at, updated_at, deleted_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
        )
        .bind(goal.id.to_string())
        .bind(goal.user_id.to_string())
        .bind(&goal.title)
        .bind(&goal.description)
        .bind(goal.initial_value)
        .bind(goal.current_value)
        .bind(goal.target_value)
        .bind(&goal.unit)
        .bind(goal.target_date.map(|d| d.to_rfc3339()))
        .bind(goal.achieved)
        .bind(goal.status.as_str())
        .bind(goal.created_at.to_rfc3339())
        .bind(goal.updated_at.to_rfc3339())
        .bind(goal.deleted_at.map(|d| d.to_rfc3339()))
        .execute(&self.pool)
        .await?;

        Ok(goal.id)
    }

    async fn get_user_goals(&self, user_id: Uuid) -> Result<Vec<Goal>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM goals
            WHERE user_id = ?1 AND deleted_at IS NULL
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_goal).collect()
    }

    async fn get_goal(&self, user_id: Uuid, goal_id: Uuid) -> Result<Option<Goal>> {
        let row = sqlx::query(
            r#"
            SELECT * FROM goals
            WHERE id = ?1 AND user_id = ?2 AND deleted_at IS NULL
            "#,
        )
        .bind(goal_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_goal).transpose()
    }

    async fn update_goal(&self, goal: &Goal) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE goals
            SET title = ?1, description = ?2, target_value = ?3, current_value = ?4,
                unit = ?5, target_date = ?6, achieved = ?7, status = ?8, updated_at = ?9
            WHERE id = ?10 AND user_id = ?11 AND deleted_at IS NULL
            "#,
        )
        .bind(&goal.title)
        .bind(&goal.description)
        .bind(goal.target_value)
        .bind(goal.current_value)
        .bind(&goal.unit)
        .bind(goal.target_date.map(|d| d.to_rfc3339()))
        .bind(goal.achieved)
        .bind(goal.status.as_str())
        .bind(goal.updated_at.to_rfc3339())
        .bind(goal.id.to_string())
        .bind(goal.user_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_goal_progress(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        current_value: f64,
        achieved: bool,
        status: Option<GoalStatus>,
    ) -> Result<bool> {
        let result = match status {
            Some(status) => {
                sqlx::query(
                    r#"
                    UPDATE goals
                    SET current_value = ?1, achieved = ?2, status = ?3, updated_at = ?4
                    WHERE id = ?5 AND user_id = ?6 AND deleted_at IS NULL
                    "#,
                )
                .bind(current_value)
                .bind(achieved)
                .bind(status.as_str())
                .bind(Utc::now().to_rfc3339())
                .bind(goal_id.to_string())
                .bind(user_id.to_string())
                .execute(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    UPDATE goals
                    SET current_value = ?1, achieved = ?2, updated_at = ?3
                    WHERE id = ?4 AND user_id = ?5 AND deleted_at IS NULL
                    "#,
                )
                .bind(current_value)
                .bind(achieved)
                .bind(Utc::now().to_rfc3339())
                .bind(goal_id.to_string())
                .bind(user_id.to_string())
                .execute(&self.pool)
                .await?
            }
        };

        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete_goal(&self, user_id: Uuid, goal_id: Uuid) -> Result<bool> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            r#"
            UPDATE goals
            SET deleted_at = ?1, status = 'archived', updated_at = ?2
            WHERE id = ?3 AND user_id = ?4 AND deleted_at IS NULL
            "#,
        )
        .bind(&now)
        .bind(&now)
        .bind(goal_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_workout(&self, workout: &Workout) -> Result<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO workouts (
                id, user_id, date, duration_minutes, effort_level, notes,
                created_at, updated_at, deleted_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(workout.id.to_string())
        .bind(workout.user_id.to_string())
        .bind(workout.date.to_string())
        .bind(workout.duration_minutes)
        .bind(workout.effort_level)
        .bind(&workout.notes)
        .bind(workout.created_at.to_rfc3339())
        .bind(workout.updated_at.to_rfc3339())
        .bind(workout.deleted_at.map(|d| d.to_rfc3339()))
        .execute(&self.pool)
        .await?;

        Ok(workout.id)
    }

    async fn soft_delete_workout(&self, user_id: Uuid, workout_id: Uuid) -> Result<bool> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            r#"
            UPDATE workouts
            SET deleted_at = ?1, updated_at = ?2
            WHERE id = ?3 AND user_id = ?4 AND deleted_at IS NULL
            "#,
        )
        .bind(&now)
        .bind(&now)
        .bind(workout_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn workout_summaries(&self, user_id: Uuid) -> Result<Vec<WorkoutSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, duration_minutes FROM workouts
            WHERE user_id = ?1 AND deleted_at IS NULL
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(WorkoutSummary {
                    id: parse_uuid(&row.try_get::<String, _>("id")?)?,
                    date: parse_date(&row.try_get::<String, _>("date")?)?,
                    duration_minutes: row.try_get("duration_minutes")?,
                })
            })
            .collect()
    }

    async fn replace_exercises(&self, workout_id: Uuid, exercises: &[Exercise]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM exercises WHERE workout_id = ?1")
            .bind(workout_id.to_string())
            .execute(&mut *tx)
            .await?;

        for exercise in exercises {
            sqlx::query(
                r#"
                INSERT INTO exercises (
                    id, workout_id, name, exercise_type, sets, reps,
                    weight, weight_unit, distance, distance_unit
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                "#,
            )
            .bind(exercise.id.to_string())
            .bind(workout_id.to_string())
            .bind(&exercise.name)
            .bind(&exercise.exercise_type)
            .bind(exercise.sets)
            .bind(exercise.reps)
            .bind(exercise.weight)
            .bind(&exercise.weight_unit)
            .bind(exercise.distance)
            .bind(&exercise.distance_unit)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_exercises(&self, name_filter: Option<&str>) -> Result<Vec<ExerciseRecord>> {
        let rows = match name_filter {
            Some(name) => {
                sqlx::query(
                    r#"
                    SELECT workout_id, name, weight, weight_unit, reps, distance, distance_unit
                    FROM exercises
                    WHERE name LIKE '%' || ?1 || '%'
                    "#,
                )
                .bind(name)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT workout_id, name, weight, weight_unit, reps, distance, distance_unit
                    FROM exercises
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter()
            .map(|row| {
                Ok(ExerciseRecord {
                    workout_id: parse_uuid(&row.try_get::<String, _>("workout_id")?)?,
                    name: row.try_get("name")?,
                    weight: row.try_get("weight")?,
                    weight_unit: row.try_get("weight_unit")?,
                    reps: row.try_get("reps")?,
                    distance: row.try_get("distance")?,
                    distance_unit: row.try_get("distance_unit")?,
                })
            })
            .collect()
    }

    async fn filter_user_workout_ids(
        &self,
        user_id: Uuid,
        workout_ids: &[Uuid],
    ) -> Result<Vec<Uuid>> {
        if workout_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (2..=workout_ids.len() + 1)
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT id FROM workouts WHERE user_id = ?1 AND deleted_at IS NULL AND id IN ({placeholders})"
        );

        let mut query = sqlx::query(&sql).bind(user_id.to_string());
        for id in workout_ids {
            query = query.bind(id.to_string());
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| parse_uuid(&row.try_get::<String, _>("id")?))
            .collect()
    }

    async fn create_measurement(&self, measurement: &BodyMeasurement) -> Result<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO body_measurements (
                id, user_id, measured_at, weight, weight_unit,
                body_fat_percent, muscle_mass, deleted_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(measurement.id.to_string())
        .bind(measurement.user_id.to_string())
        .bind(measurement.measured_at.to_rfc3339())
        .bind(measurement.weight)
        .bind(&measurement.weight_unit)
        .bind(measurement.body_fat_percent)
        .bind(measurement.muscle_mass)
        .bind(measurement.deleted_at.map(|d| d.to_rfc3339()))
        .execute(&self.pool)
        .await?;

        Ok(measurement.id)
    }

    async fn latest_body_weight(&self, user_id: Uuid) -> Result<Option<BodyWeightSample>> {
        let row = sqlx::query(
            r#"
            SELECT weight, weight_unit, measured_at FROM body_measurements
            WHERE user_id = ?1 AND weight IS NOT NULL AND deleted_at IS NULL
            ORDER BY measured_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let weight: f64 = row.try_get("weight")?;
                let unit: Option<String> = row.try_get("weight_unit")?;
                Ok(Some(BodyWeightSample {
                    weight,
                    unit: unit.unwrap_or_else(|| "kg".to_owned()),
                    measured_at: parse_datetime(&row.try_get::<String, _>("measured_at")?)?,
                }))
            }
            None => Ok(None),
        }
    }
}
