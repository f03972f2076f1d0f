// src/db/appointment_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::appointment::{Appointment, AppointmentStatus},
};

#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Appointment>, AppError> {
        let appointments =
            sqlx::query_as::<_, Appointment>("SELECT * FROM appointments ORDER BY scheduled_at")
                .fetch_all(&self.pool)
                .await?;
        Ok(appointments)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, AppError> {
        let maybe_appointment =
            sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(maybe_appointment)
    }

    // O status NÃO é parâmetro: todo agendamento nasce 'pending'.
    pub async fn create(
        &self,
        scheduled_at: DateTime<Utc>,
        comment: Option<&str>,
        client_id: Uuid,
        garage_id: Uuid,
        service_id: Uuid,
        specific_service_id: Uuid,
    ) -> Result<Appointment, AppError> {
        let appointment = sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments \
                 (scheduled_at, status, comment, client_id, garage_id, service_id, specific_service_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(scheduled_at)
        .bind(AppointmentStatus::Pending)
        .bind(comment)
        .bind(client_id)
        .bind(garage_id)
        .bind(service_id)
        .bind(specific_service_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(appointment)
    }

    // Substituição completa (semântica do PUT). Retorna None se o id não existe.
    pub async fn update(
        &self,
        id: Uuid,
        scheduled_at: DateTime<Utc>,
        status: AppointmentStatus,
        comment: Option<&str>,
        client_id: Uuid,
        garage_id: Uuid,
        service_id: Uuid,
        specific_service_id: Uuid,
    ) -> Result<Option<Appointment>, AppError> {
        let maybe_appointment = sqlx::query_as::<_, Appointment>(
            "UPDATE appointments \
             SET scheduled_at = $2, status = $3, comment = $4, client_id = $5, \
                 garage_id = $6, service_id = $7, specific_service_id = $8, updated_at = now() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(scheduled_at)
        .bind(status)
        .bind(comment)
        .bind(client_id)
        .bind(garage_id)
        .bind(service_id)
        .bind(specific_service_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_appointment)
    }

    // Retorna quantas linhas sumiram (0 = id inexistente).
    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
