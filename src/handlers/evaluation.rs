// src/handlers/evaluation.rs

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
    models::evaluation::{Evaluation, EvaluationPayload},
};

pub async fn get_all(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<Evaluation>>, AppError> {
    let evaluations = app_state.evaluation_repo.find_all().await?;
    Ok(Json(evaluations))
}

pub async fn get_by_id(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Evaluation>, AppError> {
    let evaluation = app_state
        .evaluation_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Avaliação"))?;
    Ok(Json(evaluation))
}

pub async fn create(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Json(payload): Json<EvaluationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Confere as referências antes de inserir, para nomear a que falhou.
    app_state
        .appointment_service
        .find_by_id(payload.appointment_id)
        .await?;
    app_state
        .garage_repo
        .find_by_id(payload.garage_id)
        .await?
        .ok_or(AppError::NotFound("Garagem"))?;

    let evaluation = app_state
        .evaluation_repo
        .create(
            payload.note,
            &payload.comment,
            payload.date,
            payload.appointment_id,
            payload.garage_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(evaluation)))
}

// Atualização (rota protegida pelo admin_guard)
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EvaluationPayload>,
) -> Result<Json<Evaluation>, AppError> {
    payload.validate()?;

    let evaluation = app_state
        .evaluation_repo
        .update(
            id,
            payload.note,
            &payload.comment,
            payload.date,
            payload.appointment_id,
            payload.garage_id,
        )
        .await?
        .ok_or(AppError::NotFound("Avaliação"))?;

    Ok(Json(evaluation))
}

// Remoção (rota protegida pelo admin_guard)
pub async fn delete(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = app_state.evaluation_repo.delete(id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Avaliação"));
    }
    Ok(StatusCode::NO_CONTENT)
}
