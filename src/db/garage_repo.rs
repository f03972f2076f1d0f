// src/db/garage_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::garage::Garage};

#[derive(Clone)]
pub struct GarageRepository {
    pool: PgPool,
}

impl GarageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Garage>, AppError> {
        let garages = sqlx::query_as::<_, Garage>("SELECT * FROM garages ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(garages)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Garage>, AppError> {
        let maybe_garage = sqlx::query_as::<_, Garage>("SELECT * FROM garages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_garage)
    }

    pub async fn find_by_city(&self, city: &str) -> Result<Vec<Garage>, AppError> {
        let garages = sqlx::query_as::<_, Garage>(
            "SELECT * FROM garages WHERE LOWER(city) = LOWER($1) ORDER BY name",
        )
        .bind(city)
        .fetch_all(&self.pool)
        .await?;
        Ok(garages)
    }

    pub async fn create(
        &self,
        name: &str,
        address: &str,
        phone: &str,
        city: &str,
        postal_code: &str,
    ) -> Result<Garage, AppError> {
        let garage = sqlx::query_as::<_, Garage>(
            "INSERT INTO garages (name, address, phone, city, postal_code) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(city)
        .bind(postal_code)
        .fetch_one(&self.pool)
        .await?;
        Ok(garage)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        address: &str,
        phone: &str,
        city: &str,
        postal_code: &str,
    ) -> Result<Option<Garage>, AppError> {
        let maybe_garage = sqlx::query_as::<_, Garage>(
            "UPDATE garages \
             SET name = $2, address = $3, phone = $4, city = $5, postal_code = $6, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(address)
        .bind(phone)
        .bind(city)
        .bind(postal_code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_garage)
    }
}
