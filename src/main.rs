use alerta_segura_rd::config::AppConfig;
use alerta_segura_rd::db::{self, ConnectionProvider};
use alerta_segura_rd::repository::{AlertRepository, UserRepository};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    info!("Starting Alerta Segura RD...");

    // Init DB
    let provider = ConnectionProvider::new(config);
    let pool = provider.acquire().await?;
    db::bootstrap_schema(&pool).await?;

    let alerts = AlertRepository::new(pool.clone()).count().await?;
    let users = UserRepository::new(pool).count_active().await?;
    info!("Database ready: {} alerts, {} active users", alerts, users);

    provider.release().await;
    Ok(())
}
