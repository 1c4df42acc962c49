//! Product catalog server: loads settings, builds the gateway, service and router, then serves.

use product_catalog::{
    app_router, apply_migrations, ensure_database_exists, seed_sample_data, AppState,
    InMemoryProductRepository, PgProductRepository, ProductRepository, ProductService, Settings,
    StorageBackend,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("product_catalog=info,tower_http=info")),
        )
        .init();

    let repo = build_repository(&settings).await?;
    if settings.seed_sample_data {
        seed_sample_data(repo.as_ref()).await?;
    }

    let service = ProductService::new(repo).with_timeout(settings.query_timeout);
    let app = app_router(AppState::new(service), settings.body_limit_bytes);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(backend = ?settings.storage, "listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn build_repository(settings: &Settings) -> Result<Arc<dyn ProductRepository>, Box<dyn std::error::Error>> {
    match settings.storage {
        StorageBackend::Memory => Ok(Arc::new(InMemoryProductRepository::new())),
        StorageBackend::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&settings.database_url)
                .await?;
            apply_migrations(&pool, &settings.schema).await?;
            Ok(Arc::new(PgProductRepository::new(pool, &settings.schema)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
