// src/handlers/garage.rs

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
    models::garage::{Garage, GaragePayload},
};

pub async fn get_all(State(app_state): State<AppState>) -> Result<Json<Vec<Garage>>, AppError> {
    let garages = app_state.garage_repo.find_all().await?;
    Ok(Json(garages))
}

pub async fn get_by_id(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Garage>, AppError> {
    let garage = app_state
        .garage_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Garagem"))?;
    Ok(Json(garage))
}

pub async fn get_by_city(
    State(app_state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<Vec<Garage>>, AppError> {
    let garages = app_state.garage_repo.find_by_city(&city).await?;
    Ok(Json(garages))
}

// Criação (rota protegida pelo admin_guard)
pub async fn create(
    State(app_state): State<AppState>,
    Json(payload): Json<GaragePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let garage = app_state
        .garage_repo
        .create(
            &payload.name,
            &payload.address,
            &payload.phone,
            &payload.city,
            &payload.postal_code,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(garage)))
}

// Atualização (rota protegida pelo admin_guard)
pub async fn update(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GaragePayload>,
) -> Result<Json<Garage>, AppError> {
    payload.validate()?;

    let garage = app_state
        .garage_repo
        .update(
            id,
            &payload.name,
            &payload.address,
            &payload.phone,
            &payload.city,
            &payload.postal_code,
        )
        .await?
        .ok_or(AppError::NotFound("Garagem"))?;

    Ok(Json(garage))
}
