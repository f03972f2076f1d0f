// src/middleware/rbac.rs

use axum::{extract::Request, middleware::Next, response::Response};

use crate::{
    common::error::AppError,
    models::auth::{CurrentUser, RoleName},
};

// Portão de papel: deve rodar estritamente DEPOIS do auth_guard, que é quem
// anexa o principal. Sem principal = não autenticado; papel errado =
// privilégios insuficientes. Sem estado, sem efeitos colaterais.
pub async fn admin_guard(request: Request, next: Next) -> Result<Response, AppError> {
    let Some(current_user) = request.extensions().get::<CurrentUser>() else {
        return Err(AppError::NotAuthenticated);
    };

    if current_user.role != RoleName::Admin {
        return Err(AppError::InsufficientPrivileges);
    }

    Ok(next.run(request).await)
}
