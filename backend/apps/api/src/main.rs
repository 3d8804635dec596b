//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; application-level errors flow
//! through `registrar::RegistrarError`.

use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use base64::Engine;
use base64::engine::general_purpose;
use registrar::{
    DatabaseConfig, PgRegistrarRepository, RegistrarConfig, connect_with_retry, registrar_router,
};
use serde_json::json;
use sqlx::PgPool;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,registrar=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database configuration from the environment
    let db_config = DatabaseConfig {
        host: env::var("DB_HOST").context("DB_HOST must be set")?,
        port: match env::var("DB_PORT") {
            Ok(port) => port.parse().context("DB_PORT must be a port number")?,
            Err(_) => 5432,
        },
        user: env::var("DB_USER").context("DB_USER must be set")?,
        password: env::var("DB_PASSWORD").context("DB_PASSWORD must be set")?,
        database: env::var("DB_NAME").context("DB_NAME must be set")?,
    };

    // Bounded-retry connect: transient failures back off, bad
    // credentials fail immediately
    let pool = connect_with_retry(&db_config).await?;

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Session configuration
    let registrar_config = if cfg!(debug_assertions) {
        RegistrarConfig::development()
    } else {
        // In production the session secret has no compiled-in default:
        // refuse to start without one.
        let secret_b64 =
            env::var("SESSION_SECRET").context("SESSION_SECRET must be set (base64, 32 bytes)")?;
        let secret_bytes = general_purpose::STANDARD
            .decode(&secret_b64)
            .context("SESSION_SECRET is not valid base64")?;
        let session_secret: [u8; 32] = secret_bytes
            .as_slice()
            .try_into()
            .context("SESSION_SECRET must decode to exactly 32 bytes")?;
        RegistrarConfig::new(session_secret)
    };

    let repo = PgRegistrarRepository::new(pool.clone());

    // Build router
    let app = Router::new()
        .merge(registrar_router(repo, registrar_config))
        .merge(
            Router::new()
                .route("/test-db", get(test_db))
                .with_state(pool.clone()),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /test-db
///
/// Store reachability probe. Driver detail stays in the server log; the
/// body carries only the outcome.
async fn test_db(State(pool): State<PgPool>) -> impl IntoResponse {
    match sqlx::query_scalar::<_, String>("SELECT version()")
        .fetch_one(&pool)
        .await
    {
        Ok(version) => (
            StatusCode::OK,
            Json(json!({ "status": "success", "version": version })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Database probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "error" })),
            )
        }
    }
}
