// src/db/car_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::car::Car};

#[derive(Clone)]
pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>("SELECT * FROM cars ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        Ok(cars)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, AppError> {
        let maybe_car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_car)
    }

    // Consulta usada pelo loop de geração de placas: dentro da transação de
    // registro, para enxergar inserções ainda não commitadas.
    pub async fn license_plate_exists<'e, E>(
        &self,
        executor: E,
        plate: &str,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM cars WHERE license_plate = $1)")
                .bind(plate)
                .fetch_one(executor)
                .await?;
        Ok(exists.0)
    }

    // Cria um carro. Participa da transação de registro via executor genérico.
    pub async fn create<'e, E>(
        &self,
        executor: E,
        make: &str,
        model: &str,
        year: i32,
        license_plate: &str,
        owner_id: Uuid,
    ) -> Result<Car, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let car = sqlx::query_as::<_, Car>(
            "INSERT INTO cars (make, model, year, license_plate, owner_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(make)
        .bind(model)
        .bind(year)
        .bind(license_plate)
        .bind(owner_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // A constraint UNIQUE da placa é a garantia final contra colisões
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::LicensePlateTaken;
                }
            }
            e.into()
        })?;
        Ok(car)
    }

    // Substituição completa dos campos editáveis; retorna None se o id não existe.
    pub async fn update(
        &self,
        id: Uuid,
        make: &str,
        model: &str,
        year: i32,
        license_plate: &str,
    ) -> Result<Option<Car>, AppError> {
        let maybe_car = sqlx::query_as::<_, Car>(
            "UPDATE cars \
             SET make = $2, model = $3, year = $4, license_plate = $5, updated_at = now() \
             WHERE id = $1 \
             RETURNING *",
        )
        .bind(id)
        .bind(make)
        .bind(model)
        .bind(year)
        .bind(license_plate)
        .fetch_optional(&self.pool)
        .await?;
        Ok(maybe_car)
    }
}
