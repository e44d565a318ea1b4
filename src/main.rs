use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use hilo::api::AppState;
use hilo::config::HiloConfig;
use hilo::{storage, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = HiloConfig::load().context("Failed to load configuration")?;

    init_tracing(&config);

    let pool = storage::connect(&config.database)
        .await
        .context("Failed to open the observations database")?;
    storage::verify_schema(&pool)
        .await
        .context("Observations database does not match the declared schema")?;

    web::run(AppState { pool }, &config.server.host, config.server.port).await
}

fn init_tracing(config: &HiloConfig) {
    // RUST_LOG wins over the configured level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
