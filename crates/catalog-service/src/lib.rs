//! # catalog-service: Service Boundary for the Review Catalog
//!
//! The controller-equivalent layer over `catalog-db`. Each operation opens
//! its own `Session`, performs the caller-side checks and maps failures to
//! [`ServiceError`] with HTTP-style status codes.
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CategoryService::create(category)                                      │
//! │       │                                                                 │
//! │       ├── validate fields ───────────────► Validation (400)            │
//! │       ├── scan natural keys ─────────────► Conflict (422)              │
//! │       ├── check referenced ids ──────────► NotFound (404)              │
//! │       ├── repository create + commit                                   │
//! │       │        └── 0 rows ───────────────► StorageFailure (500)        │
//! │       ▼                                                                 │
//! │  Ok(category with assigned id)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use catalog_service::{Catalog, CatalogConfig};
//!
//! let config = CatalogConfig::load(None)?;
//! catalog_service::logging::init_tracing(&config.logging.level);
//!
//! let catalog = Catalog::open(&config).await?;
//! let electric = catalog.categories().create(Category::new("Electric")).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod category;
pub mod config;
pub mod country;
pub mod error;
pub mod logging;
pub mod owner;
pub mod pokemon;
pub mod review;
pub mod reviewer;

// =============================================================================
// Re-exports
// =============================================================================

pub use category::CategoryService;
pub use config::{CatalogConfig, ConfigError};
pub use country::CountryService;
pub use error::{ErrorCode, ErrorResponse, ServiceError, ServiceResult};
pub use owner::OwnerService;
pub use pokemon::PokemonService;
pub use review::ReviewService;
pub use reviewer::ReviewerService;

use catalog_db::Database;
use tracing::info;

// =============================================================================
// Catalog
// =============================================================================

/// Entry point holding the database handle; hands out the services.
#[derive(Debug, Clone)]
pub struct Catalog {
    db: Database,
}

impl Catalog {
    /// Wraps an existing database handle.
    pub fn new(db: Database) -> Self {
        Catalog { db }
    }

    /// Connects (and migrates) using the configuration.
    pub async fn open(config: &CatalogConfig) -> ServiceResult<Self> {
        let db = Database::new(config.db_config()).await?;
        info!(path = %config.database.path.display(), "Catalog opened");
        Ok(Catalog { db })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn categories(&self) -> CategoryService {
        CategoryService::new(self.db.clone())
    }

    pub fn countries(&self) -> CountryService {
        CountryService::new(self.db.clone())
    }

    pub fn owners(&self) -> OwnerService {
        OwnerService::new(self.db.clone())
    }

    pub fn pokemon(&self) -> PokemonService {
        PokemonService::new(self.db.clone())
    }

    pub fn reviews(&self) -> ReviewService {
        ReviewService::new(self.db.clone())
    }

    pub fn reviewers(&self) -> ReviewerService {
        ReviewerService::new(self.db.clone())
    }
}
