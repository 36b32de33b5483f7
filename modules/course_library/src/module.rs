use std::sync::Arc;

use anyhow::bail;
use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use shaping::PropertyMappingRegistry;
use tracing::info;

use crate::api::rest::dto::{self, AuthorDto};
use crate::api::rest::routes;
use crate::config::CourseLibraryConfig;
use crate::domain::models::Author;
use crate::domain::service::Service;
use crate::infra::storage::SeaOrmCourseLibraryRepository;
use crate::infra::storage::migrations::Migrator;

/// The course library module: wires storage, the domain service and the
/// sort mapping registry, and exposes the REST router.
#[derive(Clone)]
pub struct CourseLibrary {
    db: DatabaseConnection,
    service: Arc<Service>,
    mappings: Arc<PropertyMappingRegistry>,
}

impl CourseLibrary {
    /// # Errors
    /// When a built-in property mapping table is malformed or `config` is
    /// inconsistent.
    pub fn new(db: DatabaseConnection, config: CourseLibraryConfig) -> anyhow::Result<Self> {
        info!("Initializing course library module");

        let mappings = dto::property_mappings()?;
        Self::check_config(&config, &mappings)?;
        let repo = SeaOrmCourseLibraryRepository::new(db.clone());
        let service = Service::new(Arc::new(repo), config);

        Ok(Self {
            db,
            service: Arc::new(service),
            mappings: Arc::new(mappings),
        })
    }

    /// Check that paging bounds are consistent and the default sort
    /// expression maps onto author storage fields.
    ///
    /// # Errors
    /// A description of the first inconsistency found.
    pub fn validate_config(config: &CourseLibraryConfig) -> anyhow::Result<()> {
        Self::check_config(config, &dto::property_mappings()?)
    }

    fn check_config(
        config: &CourseLibraryConfig,
        mappings: &PropertyMappingRegistry,
    ) -> anyhow::Result<()> {
        if config.max_page_size == 0 {
            bail!("course_library.max_page_size must be at least 1");
        }
        if config.default_page_size == 0 || config.default_page_size > config.max_page_size {
            bail!(
                "course_library.default_page_size must be within 1..={}",
                config.max_page_size
            );
        }
        let default_order_by = Some(config.default_order_by.as_str());
        if !mappings.valid_mapping_exists::<AuthorDto, Author>(default_order_by)? {
            bail!(
                "course_library.default_order_by '{}' does not map onto author fields",
                config.default_order_by
            );
        }
        Ok(())
    }

    /// Apply pending migrations.
    ///
    /// # Errors
    /// Database failures.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        info!("Running course library database migrations");
        Migrator::up(&self.db, None).await?;
        info!("Course library database migrations completed successfully");
        Ok(())
    }

    /// Drop every table and re-apply all migrations.
    ///
    /// # Errors
    /// Database failures.
    pub async fn reset(&self) -> anyhow::Result<()> {
        info!("Resetting course library database");
        Migrator::fresh(&self.db).await?;
        Ok(())
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    #[must_use]
    pub fn mappings(&self) -> Arc<PropertyMappingRegistry> {
        Arc::clone(&self.mappings)
    }

    /// REST routes with the service and mapping registry attached.
    #[must_use]
    pub fn router(&self) -> Router {
        info!("Registering course library REST routes");
        routes::register_routes(Router::new(), self.service(), self.mappings())
    }
}
