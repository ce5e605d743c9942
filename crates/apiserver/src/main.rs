use anyhow::{Context, Result};
use apiserver::handler::AppRouter;
use dotenv::dotenv;
use shared::{
    config::{Config, ConnectionManager},
    state::AppState,
    utils::init_logger,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    init_logger("apiserver");

    let config = Config::init().context("Failed to load configuration")?;

    let pool = ConnectionManager::new_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to create database connection pool")?;

    if config.run_migrations {
        info!("🔄 Running database migrations");
        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let port = config.port;

    let state = AppState::new(pool, &config)
        .await
        .context("Failed to create AppState")?;

    AppRouter::serve(port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down server...");

    Ok(())
}
