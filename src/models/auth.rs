// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Os papéis são um conjunto fechado. A checagem de autorização compara o
// enum, nunca uma string solta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "role_name", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoleName {
    Client,
    ProInvited,
    Pro,
    Admin,
}

impl RoleName {
    // Todos os papéis que o seed do startup garante existirem.
    pub const ALL: [RoleName; 4] = [
        RoleName::Client,
        RoleName::ProInvited,
        RoleName::Pro,
        RoleName::Admin,
    ];
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Role {
    pub id: Uuid,
    pub name: RoleName,
}

// Representa a conta unificada usuário-cliente vinda do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserClient {
    pub id: Uuid,
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub image_name: Option<String>,
    pub role_id: Uuid,

    // Estado do fluxo de redefinição de senha. Nunca sai na resposta.
    #[serde(skip_serializing)]
    pub reset_password_token: Option<String>,
    #[serde(skip_serializing)]
    pub reset_password_expires: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// O principal autenticado: conta + papel resolvido, anexado à requisição
// pelo auth_guard e lido pelos handlers via extractor.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: UserClient,
    pub role: RoleName,
}

// Dados para registro de um novo usuário-cliente
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(
        min = 4,
        max = 100,
        message = "A senha deve ter entre 4 e 100 caracteres."
    ))]
    pub password: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordPayload {
    #[validate(length(min = 1, message = "O token de redefinição é obrigatório."))]
    pub reset_token: String,
    #[validate(length(
        min = 4,
        max = 100,
        message = "A senha deve ter entre 4 e 100 caracteres."
    ))]
    pub new_password: String,
}

// Resposta de autenticação: token + visão sanitizada da conta
// (o hash nunca sai, garantido pelo skip_serializing no model).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: UserClient,
}

// Registro também devolve o carro padrão criado na mesma transação.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub token: String,
    pub user: UserClient,
    pub car: crate::models::car::Car,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,     // Subject (ID da conta)
    pub email: String, // E-mail embutido junto
    pub exp: usize,    // Expiration time (quando o token expira)
    pub iat: usize,    // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn registro_rejeita_email_invalido() {
        let payload = RegisterPayload {
            email: "nao-e-um-email".into(),
            password: "senha123".into(),
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn registro_rejeita_senha_fora_dos_limites() {
        let curta = RegisterPayload {
            email: "a@x.com".into(),
            password: "abc".into(),
        };
        assert!(curta.validate().is_err());

        let longa = RegisterPayload {
            email: "a@x.com".into(),
            password: "x".repeat(101),
        };
        assert!(longa.validate().is_err());

        let ok = RegisterPayload {
            email: "a@x.com".into(),
            password: "pass".into(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn papel_serializa_em_snake_case() {
        assert_eq!(
            serde_json::to_string(&RoleName::ProInvited).unwrap(),
            "\"pro_invited\""
        );
        assert_eq!(serde_json::to_string(&RoleName::Admin).unwrap(), "\"admin\"");
    }
}
