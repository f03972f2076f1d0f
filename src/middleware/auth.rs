// src/middleware/auth.rs

use axum::{
    extract::{Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{common::error::AppError, config::AppState, models::auth::CurrentUser};

// Extrai o token do cabeçalho `Authorization: Bearer <token>`.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

// O middleware de autenticação: valida o token, re-resolve a conta no banco
// e anexa o principal aos "extensions" da requisição.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = extract_bearer(request.headers()) else {
        return Err(AppError::InvalidToken);
    };

    // validate_token já distingue TokenExpired / InvalidToken / UserNotFound
    let current_user = app_state.auth_service.validate_token(token).await?;

    request.extensions_mut().insert(current_user);
    Ok(next.run(request).await)
}

// Extrator para obter o principal autenticado diretamente nos handlers
pub struct AuthenticatedUser(pub CurrentUser);

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extrai_o_token_do_cabecalho_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn cabecalho_ausente_ou_malformado_nao_extrai_nada() {
        let headers = HeaderMap::new();
        assert_eq!(extract_bearer(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_bearer(&headers), None);

        // Sem o espaço depois de "Bearer" não é um bearer token válido.
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearerabc"));
        assert_eq!(extract_bearer(&headers), None);
    }
}
