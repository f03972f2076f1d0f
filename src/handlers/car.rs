// src/handlers/car.rs

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
    models::{
        auth::RoleName,
        car::{Car, CarPayload},
    },
};

pub async fn get_all(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<Car>>, AppError> {
    let cars = app_state.car_repo.find_all().await?;
    Ok(Json(cars))
}

pub async fn get_by_id(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Car>, AppError> {
    let car = app_state
        .car_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Carro"))?;
    Ok(Json(car))
}

// Criação: o dono é sempre o principal autenticado.
pub async fn create(
    State(app_state): State<AppState>,
    AuthenticatedUser(current): AuthenticatedUser,
    Json(payload): Json<CarPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let car = app_state
        .car_repo
        .create(
            &app_state.db_pool,
            &payload.make,
            &payload.model,
            payload.year,
            &payload.license_plate,
            current.user.id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(car)))
}

// Atualização: apenas o dono do carro ou um admin.
pub async fn update(
    State(app_state): State<AppState>,
    AuthenticatedUser(current): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CarPayload>,
) -> Result<Json<Car>, AppError> {
    payload.validate()?;

    let car = app_state
        .car_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Carro"))?;

    if car.owner_id != current.user.id && current.role != RoleName::Admin {
        return Err(AppError::InsufficientPrivileges);
    }

    let updated = app_state
        .car_repo
        .update(
            id,
            &payload.make,
            &payload.model,
            payload.year,
            &payload.license_plate,
        )
        .await?
        .ok_or(AppError::NotFound("Carro"))?;

    Ok(Json(updated))
}
