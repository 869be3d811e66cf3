//! API Server Entry Point
//!
//! Uses `anyhow` for startup errors; request-level errors are rendered by
//! the domain crates through `kernel::error::AppError`.

use anyhow::Context;
use api::{ServerConfig, build_router};
use auth::PgAuthRepository;
use sqlx::postgres::PgPoolOptions;
use todo::{FsPhotoStorage, PgTodoRepository};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,todo=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    tracing::debug!(?config, "Configuration loaded");

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    tracing::info!("Migrations completed");

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("failed to create {}", config.upload_dir.display()))?;

    let storage = FsPhotoStorage::new(&config.upload_dir, config.uploads_url());
    let app = build_router(
        &config,
        PgAuthRepository::new(pool.clone()),
        PgTodoRepository::new(pool),
        storage,
    );

    // Start server
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
