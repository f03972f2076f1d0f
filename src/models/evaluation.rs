// src/models/evaluation.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub id: Uuid,
    pub note: i32,
    pub comment: String,
    pub date: DateTime<Utc>,
    pub appointment_id: Uuid,
    pub garage_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationPayload {
    #[validate(range(min = 0, max = 5, message = "A nota deve estar entre 0 e 5."))]
    pub note: i32,
    #[validate(length(min = 1, message = "O comentário é obrigatório."))]
    pub comment: String,
    pub date: DateTime<Utc>,
    pub appointment_id: Uuid,
    pub garage_id: Uuid,
}
