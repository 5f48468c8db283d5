use std::sync::Arc;

use anyhow::Context;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use intake_service::config::{Config, DatabaseConfig};
use intake_service::domain::IntakeService;
use intake_service::inbound;
use intake_service::outbound::{MySqlStore, PostgresStore, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Parse our configuration from the environment.
    let config = Config::from_env().context("expected to be able to generate config")?;
    tracing::trace!("initialized config");

    let (min_connections, max_connections) = config.environment.pool_sizes();

    let store = match &config.database {
        DatabaseConfig::Postgres(url) => {
            let pool = PgPoolOptions::new()
                .min_connections(min_connections)
                .max_connections(max_connections)
                .connect(url)
                .await
                .context("could not connect to postgres")?;
            tracing::trace!(min_connections, max_connections, "initialized postgres pool");
            Store::Postgres(PostgresStore::new(pool))
        }
        DatabaseConfig::MySql(url) => {
            let pool = MySqlPoolOptions::new()
                .min_connections(min_connections)
                .max_connections(max_connections)
                .connect(url)
                .await
                .context("could not connect to mysql")?;
            tracing::trace!(min_connections, max_connections, "initialized mysql pool");
            Store::MySql(MySqlStore::new(pool))
        }
        DatabaseConfig::Unconfigured => {
            tracing::warn!("DATABASE_URL is not set, running without a database");
            Store::Unconfigured
        }
    };

    let service = Arc::new(IntakeService::new(store));
    inbound::setup_and_serve(&config, service).await
}
