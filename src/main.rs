// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;

mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::{auth::auth_guard, rbac::admin_guard};
use crate::models::auth::RoleName;

// Garante que os papéis do conjunto fechado existem antes de servir tráfego.
// Find-or-create idempotente: rodar de novo a cada start não tem efeito.
async fn seed_roles(app_state: &AppState) -> anyhow::Result<()> {
    for role in RoleName::ALL {
        app_state.role_repo.find_or_create(role).await?;
    }
    tracing::info!("✅ Papéis padrão garantidos no banco");
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    seed_roles(&app_state)
        .await
        .expect("Falha ao semear os papéis padrão.");

    // Rotas de autenticação (públicas)
    let auth_public_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/forgot-password", post(handlers::auth::forgot_password))
        .route("/reset-password", post(handlers::auth::reset_password));

    // Rotas de autenticação protegidas pelo auth_guard
    let auth_protected_routes = Router::new()
        .route("/verify-token", get(handlers::auth::verify_token))
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Agendamentos: leitura e criação para qualquer autenticado;
    // mutação restrita ao admin (camadas aplicadas de dentro para fora,
    // então auth_guard roda ANTES do admin_guard).
    let appointment_routes = Router::new()
        .route("/", get(handlers::appointment::get_all))
        .route("/{id}", get(handlers::appointment::get_by_id))
        .route("/add", post(handlers::appointment::create))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let appointment_admin_routes = Router::new()
        .route("/update/{id}", put(handlers::appointment::update))
        .route("/delete/{id}", delete(handlers::appointment::delete))
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Garagens: consulta pública, mutação de admin
    let garage_public_routes = Router::new()
        .route("/", get(handlers::garage::get_all))
        .route("/{id}", get(handlers::garage::get_by_id))
        .route("/city/{city}", get(handlers::garage::get_by_city));

    let garage_admin_routes = Router::new()
        .route("/add", post(handlers::garage::create))
        .route("/update/{id}", put(handlers::garage::update))
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Catálogo de serviços: consulta pública, mutação de admin
    let service_public_routes = Router::new()
        .route("/", get(handlers::service::get_all))
        .route("/{id}", get(handlers::service::get_by_id));

    let service_admin_routes = Router::new()
        .route("/add", post(handlers::service::create))
        .route("/update/{id}", put(handlers::service::update))
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let specific_service_public_routes = Router::new()
        .route("/", get(handlers::service::get_all_specific))
        .route("/{id}", get(handlers::service::get_specific_by_id));

    let specific_service_admin_routes = Router::new()
        .route("/add", post(handlers::service::create_specific))
        .route("/update/{id}", put(handlers::service::update_specific))
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Carros: tudo atrás do auth_guard (dono checado no handler)
    let car_routes = Router::new()
        .route("/", get(handlers::car::get_all))
        .route("/{id}", get(handlers::car::get_by_id))
        .route("/add", post(handlers::car::create))
        .route("/update/{id}", put(handlers::car::update))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Avaliações: leitura e criação autenticadas, mutação de admin
    let evaluation_routes = Router::new()
        .route("/", get(handlers::evaluation::get_all))
        .route("/{id}", get(handlers::evaluation::get_by_id))
        .route("/add", post(handlers::evaluation::create))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let evaluation_admin_routes = Router::new()
        .route("/update/{id}", put(handlers::evaluation::update))
        .route("/delete/{id}", delete(handlers::evaluation::delete))
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest(
            "/api/auth",
            auth_public_routes.merge(auth_protected_routes),
        )
        .nest(
            "/api/appointment",
            appointment_routes.merge(appointment_admin_routes),
        )
        .nest("/api/garage", garage_public_routes.merge(garage_admin_routes))
        .nest(
            "/api/service",
            service_public_routes.merge(service_admin_routes),
        )
        .nest(
            "/api/specific-service",
            specific_service_public_routes.merge(specific_service_admin_routes),
        )
        .nest("/api/car", car_routes)
        .nest(
            "/api/evaluation",
            evaluation_routes.merge(evaluation_admin_routes),
        )
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
