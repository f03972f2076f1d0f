// src/services/appointment.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AppointmentRepository, GarageRepository, ServiceRepository},
    models::{
        appointment::{Appointment, AppointmentStatus},
        auth::CurrentUser,
    },
    services::email::{self, EmailService},
};

#[derive(Clone)]
pub struct AppointmentService {
    appointment_repo: AppointmentRepository,
    garage_repo: GarageRepository,
    service_repo: ServiceRepository,
    email_service: EmailService,
}

impl AppointmentService {
    pub fn new(
        appointment_repo: AppointmentRepository,
        garage_repo: GarageRepository,
        service_repo: ServiceRepository,
        email_service: EmailService,
    ) -> Self {
        Self {
            appointment_repo,
            garage_repo,
            service_repo,
            email_service,
        }
    }

    // Criação de agendamento: cada referência é resolvida separadamente para
    // a mensagem de erro apontar exatamente qual entidade não existe. Só
    // depois de todas resolverem é que a linha é inserida (sem escrita parcial).
    pub async fn create(
        &self,
        current: &CurrentUser,
        scheduled_at: DateTime<Utc>,
        garage_id: Uuid,
        service_id: Uuid,
        specific_service_id: Uuid,
        comment: Option<&str>,
    ) -> Result<Appointment, AppError> {
        let garage = self
            .garage_repo
            .find_by_id(garage_id)
            .await?
            .ok_or(AppError::NotFound("Garagem"))?;

        let service = self
            .service_repo
            .find_by_id(service_id)
            .await?
            .ok_or(AppError::NotFound("Serviço"))?;

        let specific_service = self
            .service_repo
            .find_specific_by_id(specific_service_id)
            .await?
            .ok_or(AppError::NotFound("Serviço específico"))?;

        let appointment = self
            .appointment_repo
            .create(
                scheduled_at,
                comment,
                current.user.id,
                garage.id,
                service.id,
                specific_service.id,
            )
            .await?;

        // Notificação de confirmação: fire-and-forget. Uma falha no provedor
        // de e-mail é logada e NUNCA derruba o 201 do agendamento já criado.
        let email_service = self.email_service.clone();
        let to_email = current.user.email.clone();
        let html = email::appointment_confirmation_html(
            &current.user.name,
            &appointment
                .scheduled_at
                .format("%d/%m/%Y às %H:%M")
                .to_string(),
            appointment.status.as_str(),
            &garage.name,
            &service.name,
            &specific_service.name,
        );
        tokio::spawn(async move {
            if let Err(e) = email_service
                .send(&to_email, "Confirmação de agendamento", &html)
                .await
            {
                tracing::error!("Falha ao enviar confirmação de agendamento: {}", e);
            }
        });

        Ok(appointment)
    }

    pub async fn find_all(&self) -> Result<Vec<Appointment>, AppError> {
        self.appointment_repo.find_all().await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Appointment, AppError> {
        self.appointment_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Agendamento"))
    }

    // Atualização (admin): substituição completa, com a transição de status
    // checada contra a tabela da máquina de estados.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        scheduled_at: DateTime<Utc>,
        status: AppointmentStatus,
        comment: Option<&str>,
        client_id: Uuid,
        garage_id: Uuid,
        service_id: Uuid,
        specific_service_id: Uuid,
    ) -> Result<Appointment, AppError> {
        let existing = self
            .appointment_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Agendamento"))?;

        if !existing.status.can_transition_to(status) {
            return Err(AppError::InvalidStatusTransition(
                existing.status.as_str(),
                status.as_str(),
            ));
        }

        self.appointment_repo
            .update(
                id,
                scheduled_at,
                status,
                comment,
                client_id,
                garage_id,
                service_id,
                specific_service_id,
            )
            .await?
            .ok_or(AppError::NotFound("Agendamento"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.appointment_repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Agendamento"));
        }
        Ok(())
    }
}
