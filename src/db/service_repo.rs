// src/db/service_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::garage::{Service, SpecificService},
};

// Repositório do catálogo de serviços: serviços gerais e suas
// sub-categorias (serviços específicos).
#[derive(Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

impl ServiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Service>, AppError> {
        let services = sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(services)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>, AppError> {
        let maybe_service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_service)
    }

    pub async fn create(&self, name: &str) -> Result<Service, AppError> {
        let service =
            sqlx::query_as::<_, Service>("INSERT INTO services (name) VALUES ($1) RETURNING *")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;
        Ok(service)
    }

    pub async fn update(&self, id: Uuid, name: &str) -> Result<Option<Service>, AppError> {
        let maybe_service = sqlx::query_as::<_, Service>(
            "UPDATE services SET name = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_service)
    }

    // --- Serviços específicos ---

    pub async fn find_all_specific(&self) -> Result<Vec<SpecificService>, AppError> {
        let specifics =
            sqlx::query_as::<_, SpecificService>("SELECT * FROM specific_services ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(specifics)
    }

    pub async fn find_specific_by_id(&self, id: Uuid) -> Result<Option<SpecificService>, AppError> {
        let maybe_specific =
            sqlx::query_as::<_, SpecificService>("SELECT * FROM specific_services WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(maybe_specific)
    }

    pub async fn create_specific(
        &self,
        name: &str,
        service_id: Uuid,
    ) -> Result<SpecificService, AppError> {
        let specific = sqlx::query_as::<_, SpecificService>(
            "INSERT INTO specific_services (name, service_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(service_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(specific)
    }

    pub async fn update_specific(
        &self,
        id: Uuid,
        name: &str,
        service_id: Uuid,
    ) -> Result<Option<SpecificService>, AppError> {
        let maybe_specific = sqlx::query_as::<_, SpecificService>(
            "UPDATE specific_services \
             SET name = $2, service_id = $3, updated_at = now() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(service_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_specific)
    }
}
