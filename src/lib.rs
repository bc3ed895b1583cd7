pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod http;
mod middleware;
pub mod models;
pub mod state;

use std::sync::Arc;

use axum::{Json, Router, http::StatusCode};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;

use crate::{
    config::AppConfig,
    db::{MemoryReviewStore, PgReviewStore},
    errors::AppError,
    middleware::cors_layer,
    state::{AppState, ReviewStoreHandle},
};

/// Router with every route and layer, minus CORS which depends on config.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(http::create_http_routes(state))
        .fallback(|| async { (StatusCode::NOT_FOUND, Json(json!({ "msg": "Not found" }))) })
        .layer(TraceLayer::new_for_http())
}

async fn connect_store(config: &AppConfig) -> Result<ReviewStoreHandle, AppError> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, reviews are kept in memory only");
        return Ok(Arc::new(MemoryReviewStore::new()));
    };

    let postgres = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(database_url)
        .await?;

    let store = PgReviewStore::new(postgres);
    store.ensure_schema().await?;
    tracing::info!("Connected to Postgres review store");

    Ok(Arc::new(store))
}

pub async fn start_server() -> Result<(), AppError> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    let reviews = connect_store(&config).await?;
    let state = AppState::new(reviews, config.jwt_secret.as_str());

    let app = create_app(state).layer(cors_layer(&config.allowed_origins));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .map_err(|e| AppError::EnvError(format!("Failed to bind port {}: {}", config.port, e)))?;

    tracing::info!("Product reviews server listening on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            AppError::InternalError
        })?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
