// src/handlers/service.rs

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
    models::garage::{Service, ServicePayload, SpecificService, SpecificServicePayload},
};

// --- Serviços gerais ---

pub async fn get_all(State(app_state): State<AppState>) -> Result<Json<Vec<Service>>, AppError> {
    let services = app_state.service_repo.find_all().await?;
    Ok(Json(services))
}

pub async fn get_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Service>, AppError> {
    let service = app_state
        .service_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Serviço"))?;
    Ok(Json(service))
}

// Criação (rota protegida pelo admin_guard)
pub async fn create(
    State(app_state): State<AppState>,
    Json(payload): Json<ServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let service = app_state.service_repo.create(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

// Atualização (rota protegida pelo admin_guard)
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ServicePayload>,
) -> Result<Json<Service>, AppError> {
    payload.validate()?;
    let service = app_state
        .service_repo
        .update(id, &payload.name)
        .await?
        .ok_or(AppError::NotFound("Serviço"))?;
    Ok(Json(service))
}

// --- Serviços específicos ---

pub async fn get_all_specific(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<SpecificService>>, AppError> {
    let specifics = app_state.service_repo.find_all_specific().await?;
    Ok(Json(specifics))
}

pub async fn get_specific_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SpecificService>, AppError> {
    let specific = app_state
        .service_repo
        .find_specific_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Serviço específico"))?;
    Ok(Json(specific))
}

// Criação (rota protegida pelo admin_guard). O serviço pai é verificado
// antes, para a mensagem apontar a referência quebrada.
pub async fn create_specific(
    State(app_state): State<AppState>,
    Json(payload): Json<SpecificServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .service_repo
        .find_by_id(payload.service_id)
        .await?
        .ok_or(AppError::NotFound("Serviço"))?;

    let specific = app_state
        .service_repo
        .create_specific(&payload.name, payload.service_id)
        .await?;

    Ok((StatusCode::CREATED, Json(specific)))
}

// Atualização (rota protegida pelo admin_guard)
pub async fn update_specific(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SpecificServicePayload>,
) -> Result<Json<SpecificService>, AppError> {
    payload.validate()?;

    app_state
        .service_repo
        .find_by_id(payload.service_id)
        .await?
        .ok_or(AppError::NotFound("Serviço"))?;

    let specific = app_state
        .service_repo
        .update_specific(id, &payload.name, payload.service_id)
        .await?
        .ok_or(AppError::NotFound("Serviço específico"))?;

    Ok(Json(specific))
}
