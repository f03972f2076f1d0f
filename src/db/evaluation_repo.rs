// src/db/evaluation_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::evaluation::Evaluation};

#[derive(Clone)]
pub struct EvaluationRepository {
    pool: PgPool,
}

impl EvaluationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Evaluation>, AppError> {
        let evaluations =
            sqlx::query_as::<_, Evaluation>("SELECT * FROM evaluations ORDER BY date DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(evaluations)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Evaluation>, AppError> {
        let maybe_evaluation =
            sqlx::query_as::<_, Evaluation>("SELECT * FROM evaluations WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(maybe_evaluation)
    }

    pub async fn create(
        &self,
        note: i32,
        comment: &str,
        date: DateTime<Utc>,
        appointment_id: Uuid,
        garage_id: Uuid,
    ) -> Result<Evaluation, AppError> {
        let evaluation = sqlx::query_as::<_, Evaluation>(
            "INSERT INTO evaluations (note, comment, date, appointment_id, garage_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(note)
        .bind(comment)
        .bind(date)
        .bind(appointment_id)
        .bind(garage_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(evaluation)
    }

    pub async fn update(
        &self,
        id: Uuid,
        note: i32,
        comment: &str,
        date: DateTime<Utc>,
        appointment_id: Uuid,
        garage_id: Uuid,
    ) -> Result<Option<Evaluation>, AppError> {
        let maybe_evaluation = sqlx::query_as::<_, Evaluation>(
            "UPDATE evaluations \
             SET note = $2, comment = $3, date = $4, appointment_id = $5, garage_id = $6, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(note)
        .bind(comment)
        .bind(date)
        .bind(appointment_id)
        .bind(garage_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_evaluation)
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM evaluations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
