// src/models/appointment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// O status do agendamento é um conjunto fechado com máquina de estados
// explícita. O valor inicial é SEMPRE Pending, nunca vindo do cliente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "appointment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    InProgress,
    Done,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::InProgress => "in_progress",
            AppointmentStatus::Done => "done",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    // Tabela de transições permitidas. Done e Cancelled são terminais.
    // Permanecer no mesmo status conta como no-op e é permitido.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (AppointmentStatus::Pending, AppointmentStatus::InProgress)
                | (AppointmentStatus::Pending, AppointmentStatus::Cancelled)
                | (AppointmentStatus::InProgress, AppointmentStatus::Done)
                | (AppointmentStatus::InProgress, AppointmentStatus::Cancelled)
        )
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub comment: Option<String>,
    pub client_id: Uuid,
    pub garage_id: Uuid,
    pub service_id: Uuid,
    pub specific_service_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Criação: o cliente dono vem do token, o status é fixado em Pending.
// Campos ausentes são rejeitados pela desserialização antes de tocar o banco.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentPayload {
    pub scheduled_at: DateTime<Utc>,
    pub garage_id: Uuid,
    pub service_id: Uuid,
    pub specific_service_id: Uuid,
    #[validate(length(max = 500, message = "O comentário deve ter no máximo 500 caracteres."))]
    pub comment: Option<String>,
}

// Atualização (admin): semântica de substituição completa, todos os campos
// são reenviados.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentPayload {
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[validate(length(max = 500, message = "O comentário deve ter no máximo 500 caracteres."))]
    pub comment: Option<String>,
    pub client_id: Uuid,
    pub garage_id: Uuid,
    pub service_id: Uuid,
    pub specific_service_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transicoes_permitidas_a_partir_de_pending() {
        let s = AppointmentStatus::Pending;
        assert!(s.can_transition_to(AppointmentStatus::InProgress));
        assert!(s.can_transition_to(AppointmentStatus::Cancelled));
        assert!(!s.can_transition_to(AppointmentStatus::Done));
    }

    #[test]
    fn transicoes_permitidas_a_partir_de_in_progress() {
        let s = AppointmentStatus::InProgress;
        assert!(s.can_transition_to(AppointmentStatus::Done));
        assert!(s.can_transition_to(AppointmentStatus::Cancelled));
        assert!(!s.can_transition_to(AppointmentStatus::Pending));
    }

    #[test]
    fn done_e_cancelled_sao_terminais() {
        for s in [AppointmentStatus::Done, AppointmentStatus::Cancelled] {
            assert!(!s.can_transition_to(AppointmentStatus::Pending));
            assert!(!s.can_transition_to(AppointmentStatus::InProgress));
            // Reenviar o mesmo status é um no-op válido.
            assert!(s.can_transition_to(s));
        }
    }

    #[test]
    fn status_serializa_em_snake_case() {
        assert_eq!(
            serde_json::to_string(&AppointmentStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        let parsed: AppointmentStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, AppointmentStatus::Cancelled);
    }

    #[test]
    fn status_desconhecido_e_rejeitado() {
        // O enum é fechado: qualquer string fora do conjunto falha na
        // desserialização, diferente de um campo de texto livre.
        assert!(serde_json::from_str::<AppointmentStatus>("\"confirmed\"").is_err());
    }
}
