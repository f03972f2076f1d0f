// src/handlers/appointment.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, json::Json},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::appointment::{Appointment, CreateAppointmentPayload, UpdateAppointmentPayload},
};

pub async fn get_all(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = app_state.appointment_service.find_all().await?;
    Ok(Json(appointments))
}

pub async fn get_by_id(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = app_state.appointment_service.find_by_id(id).await?;
    Ok(Json(appointment))
}

// Criação: o cliente dono vem do token, nunca do corpo da requisição.
pub async fn create(
    State(app_state): State<AppState>,
    AuthenticatedUser(current): AuthenticatedUser,
    Json(payload): Json<CreateAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let appointment = app_state
        .appointment_service
        .create(
            &current,
            payload.scheduled_at,
            payload.garage_id,
            payload.service_id,
            payload.specific_service_id,
            payload.comment.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

// Atualização (rota protegida pelo admin_guard): substituição completa.
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentPayload>,
) -> Result<Json<Appointment>, AppError> {
    payload.validate()?;

    let appointment = app_state
        .appointment_service
        .update(
            id,
            payload.scheduled_at,
            payload.status,
            payload.comment.as_deref(),
            payload.client_id,
            payload.garage_id,
            payload.service_id,
            payload.specific_service_id,
        )
        .await?;

    Ok(Json(appointment))
}

// Remoção (rota protegida pelo admin_guard)
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.appointment_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
