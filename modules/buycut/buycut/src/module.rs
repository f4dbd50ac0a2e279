//! Module assembly: storage, image storage, auth and services wired together.

use std::sync::Arc;

use axum::Router;
use buycut_sdk::BuycutClient;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::api::rest::routes;
use crate::config::BuycutConfig;
use crate::domain::service::{AppServices, Collaborators};
use crate::health::{HealthProbe, run_health_job};
use crate::infra::auth::{BcryptHasher, JwtTokens};
use crate::infra::images::CloudinaryImageStorage;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{
    SeaOrmBrandRepository, SeaOrmCompanyRepository, SeaOrmUserRepository,
};
use crate::local_client::BuycutLocalClient;

/// The buycut module, ready to serve.
pub struct BuycutModule {
    services: Arc<AppServices>,
    tokens: Arc<JwtTokens>,
    health: Option<HealthProbe>,
}

impl BuycutModule {
    /// Wire the module on top of an open database connection.
    ///
    /// # Errors
    /// Fails when the configuration is invalid or the image storage client
    /// cannot be built.
    pub fn new(db: &DatabaseConnection, cfg: &BuycutConfig) -> anyhow::Result<Self> {
        info!("Initializing buycut module");
        cfg.validate().map_err(anyhow::Error::msg)?;

        let tokens = Arc::new(JwtTokens::new(&cfg.jwt));
        let images = CloudinaryImageStorage::new(&cfg.image_storage)?;

        let deps = Collaborators {
            companies: Arc::new(SeaOrmCompanyRepository::new(db.clone())),
            brands: Arc::new(SeaOrmBrandRepository::new(db.clone())),
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            images: Arc::new(images),
            tokens: tokens.clone(),
            hasher: Arc::new(BcryptHasher::default()),
        };
        let services = Arc::new(AppServices::new(deps, &cfg.service_config()));

        info!("Buycut module initialized");
        Ok(Self {
            services,
            tokens,
            health: cfg.health.enabled.then(|| HealthProbe::from(&cfg.health)),
        })
    }

    /// Apply pending schema migrations.
    ///
    /// # Errors
    /// Returns the database error of the first failing migration.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running buycut database migrations");
        Migrator::up(db, None).await?;
        info!("Buycut database migrations completed");
        Ok(())
    }

    /// REST routes, including `/health` and `/openapi.json`.
    #[must_use]
    pub fn router(&self) -> Router {
        routes::router(self.services.clone(), self.tokens.clone())
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn BuycutClient> {
        Arc::new(BuycutLocalClient::new(self.services.clone()))
    }

    /// Start the periodic health probe unless it is disabled.
    #[must_use]
    pub fn spawn_health_job(&self, cancel: CancellationToken) -> Option<JoinHandle<()>> {
        let probe = self.health?;
        Some(tokio::spawn(run_health_job(self.client(), probe, cancel)))
    }
}
