use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// Cada variante conhece o status HTTP que deve produzir (veja IntoResponse).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Corpo JSON ausente, malformado ou com campo obrigatório faltando.
    #[error("Corpo da requisição inválido")]
    JsonRejection(#[from] axum::extract::rejection::JsonRejection),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Token expirado")]
    TokenExpired,

    // O token era válido, mas a conta referenciada não existe mais.
    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Usuário não autenticado")]
    NotAuthenticated,

    #[error("Privilégios insuficientes")]
    InsufficientPrivileges,

    // Guarda o nome da entidade para a mensagem indicar QUAL referência falhou.
    #[error("{0} não encontrado(a)")]
    NotFound(&'static str),

    #[error("Placa já cadastrada")]
    LicensePlateTaken,

    #[error("Token de redefinição inválido ou expirado")]
    InvalidResetToken,

    #[error("Transição de status inválida: {0} -> {1}")]
    InvalidStatusTransition(&'static str, &'static str),

    // Dado de seed obrigatório ausente. Classe "configuração": o seed roda
    // no startup, então isso indica um banco fora do esperado.
    #[error("Papel obrigatório ausente no banco: {0}")]
    RoleMissing(&'static str),

    #[error("Esgotadas as tentativas de gerar uma placa única")]
    PlateGenerationExhausted,

    #[error("Falha no envio de e-mail: {0}")]
    EmailDispatch(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::JsonRejection(rejection) => {
                (StatusCode::BAD_REQUEST, rejection.body_text())
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::BAD_REQUEST, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            AppError::TokenExpired => {
                (StatusCode::UNAUTHORIZED, "Token de autenticação expirado.".to_string())
            }
            AppError::UserNotFound => {
                (StatusCode::UNAUTHORIZED, "Conta não encontrada.".to_string())
            }
            AppError::NotAuthenticated => (
                StatusCode::FORBIDDEN,
                "Acesso negado, usuário não autenticado.".to_string(),
            ),
            AppError::InsufficientPrivileges => (
                StatusCode::FORBIDDEN,
                "Acesso negado, privilégios insuficientes.".to_string(),
            ),
            AppError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{} não encontrado(a).", entity))
            }
            AppError::LicensePlateTaken => {
                (StatusCode::BAD_REQUEST, "Esta placa já está cadastrada.".to_string())
            }
            AppError::InvalidResetToken => (
                StatusCode::BAD_REQUEST,
                "Token de redefinição de senha inválido ou expirado.".to_string(),
            ),
            AppError::InvalidStatusTransition(from, to) => (
                StatusCode::BAD_REQUEST,
                format!("Transição de status inválida: '{}' -> '{}'.", from, to),
            ),

            // Todos os outros erros (DatabaseError, EmailDispatch, etc.) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe algo genérico.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn erros_de_autenticacao_viram_401() {
        assert_eq!(status_of(AppError::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AppError::InvalidToken), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AppError::TokenExpired), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(AppError::UserNotFound), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn erros_de_autorizacao_viram_403() {
        assert_eq!(status_of(AppError::NotAuthenticated), StatusCode::FORBIDDEN);
        assert_eq!(status_of(AppError::InsufficientPrivileges), StatusCode::FORBIDDEN);
    }

    #[test]
    fn erros_de_dominio_viram_400_ou_404() {
        assert_eq!(status_of(AppError::EmailAlreadyExists), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(AppError::InvalidResetToken), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(AppError::InvalidStatusTransition("done", "pending")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(AppError::NotFound("Garagem")), StatusCode::NOT_FOUND);
    }

    #[test]
    fn erros_de_infra_viram_500_opacos() {
        assert_eq!(
            status_of(AppError::RoleMissing("client")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::PlateGenerationExhausted),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::EmailDispatch("timeout".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
