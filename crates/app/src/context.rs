//! App Context

use std::sync::Arc;

use sqlx::{PgPool, migrate::MigrateError};
use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, HealthCheck, PgHealthCheck, PoolSettings},
    subscriptions::{PgSubscriptionsService, SubscriptionsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub subscriptions: Arc<dyn SubscriptionsService>,
    pub health: Arc<dyn HealthCheck>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails, or
    /// when `run_migrations` is set and a migration fails to apply.
    pub async fn from_database_url(
        url: &str,
        settings: PoolSettings,
        run_migrations: bool,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url, settings)
            .await
            .map_err(AppInitError::Database)?;

        if run_migrations {
            info!("applying database migrations");

            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrate)?;
        }

        Ok(Self::from_pool(pool))
    }

    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            subscriptions: Arc::new(PgSubscriptionsService::new(pool.clone())),
            health: Arc::new(PgHealthCheck::new(pool)),
        }
    }
}
