use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::config::{ConnectionTarget, DatabaseSettings, WorklogConfig};
use crate::errors::Result;

/// Wrapper around the process-wide Postgres connection pool.
#[derive(Clone)]
pub struct DatabasePool {
    pool: Pool<Postgres>,
}

impl DatabasePool {
    /// Establishes the pool described by the service configuration.
    pub async fn connect(config: &WorklogConfig) -> Result<Self> {
        Self::connect_with_settings(&config.database).await
    }

    /// Establishes a pool from explicit database settings.
    pub async fn connect_with_settings(settings: &DatabaseSettings) -> Result<Self> {
        let options = connect_options(settings)?;
        info!(mode = settings.mode(), "connecting to postgres");
        let pool = pool_options().connect_with(options).await?;
        Ok(Self { pool })
    }

    /// Establishes a pool directly from a database URL.
    pub async fn connect_with_url(database_url: &str) -> Result<Self> {
        Self::connect_with_settings(&DatabaseSettings::from_url(database_url)).await
    }

    pub fn inner(&self) -> &Pool<Postgres> {
        &self.pool
    }

    /// Waits for checked-out connections to return and closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn pool_options() -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
}

/// Translates resolved settings into sqlx connect options.
pub fn connect_options(settings: &DatabaseSettings) -> Result<PgConnectOptions> {
    let base = match &settings.target {
        ConnectionTarget::Url(url) => return Ok(PgConnectOptions::from_str(url)?),
        ConnectionTarget::Socket(dir) => PgConnectOptions::new().socket(dir),
        ConnectionTarget::Tcp { host, port } => PgConnectOptions::new().host(host).port(*port),
    };

    let mut options = base
        .password(&settings.password)
        .database(&settings.database);
    if let Some(user) = &settings.user {
        options = options.username(user.name());
    }

    Ok(options)
}
