// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, json::Json},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{
        AuthResponse, ForgotPasswordPayload, LoginPayload, RegisterPayload, RegisterResponse,
        ResetPasswordPayload, RoleName, UserClient,
    },
};

// Handler de registro: devolve 201 com token, conta sanitizada e o carro
// padrão criado na mesma transação.
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (token, user, car) = app_state
        .auth_service
        .register(&payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { token, user, car }),
    ))
}

// Handler de login
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let (token, user) = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token, user }))
}

// Esqueci minha senha: 200 sempre, conhecendo o e-mail ou não.
pub async fn forgot_password(
    State(app_state): State<AppState>,
    Json(payload): Json<ForgotPasswordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state.auth_service.forgot_password(&payload.email).await?;

    Ok(Json(json!({
        "message": "Se o e-mail estiver cadastrado, um link de redefinição foi enviado."
    })))
}

pub async fn reset_password(
    State(app_state): State<AppState>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state
        .auth_service
        .reset_password(&payload.reset_token, &payload.new_password)
        .await?;

    Ok(Json(json!({ "message": "Senha redefinida com sucesso." })))
}

// Visão do principal decodificado, devolvida por /verify-token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalView {
    pub id: Uuid,
    pub email: String,
    pub role: RoleName,
}

// O auth_guard já validou o token e re-resolveu a conta; aqui é só ecoar.
pub async fn verify_token(
    AuthenticatedUser(current): AuthenticatedUser,
) -> Json<serde_json::Value> {
    Json(json!({
        "message": "Token válido",
        "user": PrincipalView {
            id: current.user.id,
            email: current.user.email,
            role: current.role,
        },
    }))
}

// Handler da rota protegida /me
pub async fn get_me(AuthenticatedUser(current): AuthenticatedUser) -> Json<UserClient> {
    Json(current.user)
}
