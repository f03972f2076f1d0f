// src/db/user_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::UserClient};

// O repositório de contas, responsável por todas as interações com a
// tabela 'users_clients'.
#[derive(Clone)]
pub struct UserClientRepository {
    pool: PgPool,
}

impl UserClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca uma conta pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserClient>, AppError> {
        let maybe_user =
            sqlx::query_as::<_, UserClient>("SELECT * FROM users_clients WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(maybe_user)
    }

    // Busca uma conta pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserClient>, AppError> {
        let maybe_user =
            sqlx::query_as::<_, UserClient>("SELECT * FROM users_clients WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(maybe_user)
    }

    // Cria uma nova conta. Recebe um executor genérico para poder participar
    // da transação de registro (conta + carro padrão, tudo ou nada).
    // A constraint UNIQUE no e-mail é a garantia autoritativa de unicidade:
    // não fazemos check-then-create, inserimos e mapeamos a violação.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        email: &str,
        password_hash: &str,
        name: &str,
        last_name: &str,
        phone: Option<&str>,
        address: Option<&str>,
        role_id: Uuid,
    ) -> Result<UserClient, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, UserClient>(
            "INSERT INTO users_clients (email, password_hash, name, last_name, phone, address, role_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(last_name)
        .bind(phone)
        .bind(address)
        .bind(role_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Converte a violação de chave única do e-mail num erro amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })
    }

    // Persiste o token de redefinição de senha e sua validade.
    pub async fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users_clients \
             SET reset_password_token = $2, reset_password_expires = $3, updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(token)
        .bind(expires)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    // Busca a conta dona de um token de redefinição (comparação exata).
    pub async fn find_by_reset_token(&self, token: &str) -> Result<Option<UserClient>, AppError> {
        let maybe_user = sqlx::query_as::<_, UserClient>(
            "SELECT * FROM users_clients WHERE reset_password_token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_user)
    }

    // Grava a nova senha E limpa o token num único UPDATE: é a limpeza
    // que torna o token de uso único.
    pub async fn update_password_and_clear_token(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE users_clients \
             SET password_hash = $2, reset_password_token = NULL, \
                 reset_password_expires = NULL, updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
