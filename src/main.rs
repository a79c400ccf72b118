//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppState, Settings};
use crate::docs::ApiDoc;
use crate::middleware::{basic_auth::basic_auth_guard, locale::locale_redirect};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env só existe em desenvolvimento
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("padel_calculator=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with_target(false)
        .compact()
        .init();

    let settings = Settings::from_env()?;
    let app_state = AppState::new(&settings).await?;

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!().run(&app_state.db_pool).await?;
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    if !app_state.analytics_auth.is_configured() {
        tracing::warn!("⚠️ ANALYTICS_USER/ANALYTICS_PASSWORD não definidos: o dashboard vai responder 500");
    }

    // Mantém o scheduler vivo até o fim do processo
    let _scheduler = match settings.retention_cron.as_deref() {
        Some(cron) => Some(
            services::retention_job::start_retention_scheduler(
                app_state.analytics_service.clone(),
                cron,
            )
            .await?,
        ),
        None => {
            tracing::info!("Job de retenção desligado (RETENTION_CRON=off)");
            None
        }
    };

    let app = router(app_state);

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(app_state: AppState) -> Router {
    // Rotas do dashboard (protegidas por Basic Auth)
    let analytics_routes = Router::new()
        .route("/stats", get(handlers::analytics::get_stats))
        .route("/views", get(handlers::analytics::get_daily_views))
        .route(
            "/cleanup",
            get(handlers::analytics::cleanup_preview).post(handlers::analytics::run_cleanup),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.analytics_auth.clone(),
            basic_auth_guard,
        ));

    let api_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/track", post(handlers::analytics::track))
        .route("/probability", post(handlers::probability::get_probability))
        .nest("/analytics", analytics_routes);

    Router::new()
        .nest("/api", api_routes)
        .merge(handlers::pages::routes())
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .nest_service("/images", ServeDir::new("public/images"))
        .fallback(handlers::pages::not_found)
        // O middleware de idioma precisa ver todo request, inclusive o fallback
        .layer(axum_middleware::from_fn_with_state(
            app_state.locale.clone(),
            locale_redirect,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
