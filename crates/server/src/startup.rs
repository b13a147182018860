use std::net::SocketAddr;

use axum::http::HeaderValue;
use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, CorsConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use service::runtime;

/// Single configured front-end origin; methods and headers are mirrored
/// because credentials rule out wildcards.
pub fn build_cors(cfg: &CorsConfig) -> Result<CorsLayer, StartupError> {
    let origin = cfg
        .allowed_origin
        .trim()
        .parse::<HeaderValue>()
        .map_err(|e| StartupError::InvalidConfig(format!("cors.allowed_origin: {e}")))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Connect, migrate and assemble the router for a validated config.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    runtime::ensure_env(cfg.database.data_dir().as_deref()).await?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    models::db::test_connection(&db)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Database(format!("migrations failed: {e}")))?;
    info!(url = %cfg.database.url, "database ready");

    let cors = build_cors(&cfg.cors)?;
    Ok(routes::build_router(AppState::new(db), cors))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let app = build_app(&cfg).await?;

    let addr: SocketAddr = cfg
        .server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server bind address: {e}")))?;
    info!(%addr, origin = %cfg.cors.allowed_origin, "starting recipe catalog server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}
