// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        AppointmentRepository, CarRepository, EvaluationRepository, GarageRepository,
        RoleRepository, ServiceRepository, UserClientRepository,
    },
    services::{appointment::AppointmentService, auth::AuthService, email::EmailService},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub appointment_service: AppointmentService,
    pub role_repo: RoleRepository,
    pub garage_repo: GarageRepository,
    pub service_repo: ServiceRepository,
    pub car_repo: CarRepository,
    pub evaluation_repo: EvaluationRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // Configuração obrigatória: sem ela o processo NÃO deve subir.
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Configuração do caminho de e-mail: só obrigatória na hora de enviar.
        let brevo_api_key = env::var("BREVO_API_KEY").ok();
        if brevo_api_key.is_none() {
            tracing::warn!("⚠️ BREVO_API_KEY ausente: envio de e-mails ficará indisponível");
        }
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());
        let mail_from =
            env::var("MAIL_FROM").unwrap_or_else(|_| "contato@mecafixpro.com".to_string());
        let mail_from_name = env::var("MAIL_FROM_NAME").unwrap_or_else(|_| "MecaFixPro".to_string());

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserClientRepository::new(db_pool.clone());
        let role_repo = RoleRepository::new(db_pool.clone());
        let car_repo = CarRepository::new(db_pool.clone());
        let garage_repo = GarageRepository::new(db_pool.clone());
        let service_repo = ServiceRepository::new(db_pool.clone());
        let appointment_repo = AppointmentRepository::new(db_pool.clone());
        let evaluation_repo = EvaluationRepository::new(db_pool.clone());

        let email_service = EmailService::new(brevo_api_key, mail_from, mail_from_name);

        let auth_service = AuthService::new(
            user_repo,
            role_repo.clone(),
            car_repo.clone(),
            email_service.clone(),
            jwt_secret,
            base_url,
            db_pool.clone(),
        );

        let appointment_service = AppointmentService::new(
            appointment_repo,
            garage_repo.clone(),
            service_repo.clone(),
            email_service,
        );

        Ok(Self {
            db_pool,
            auth_service,
            appointment_service,
            role_repo,
            garage_repo,
            service_repo,
            car_repo,
            evaluation_repo,
        })
    }
}
