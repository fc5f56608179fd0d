//! # catalog-db: Database Layer for the Review Catalog
//!
//! This crate provides database access for the review catalog.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Review Catalog Data Flow                         │
//! │                                                                         │
//! │  Service operation (catalog-service)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   catalog-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌────────────────┐   ┌────────────────┐   │   │
//! │  │   │   Database   │   │  Repositories  │   │   Resolvers    │   │   │
//! │  │   │  (pool.rs)   │   │ Category  ...  │   │ PokemonCategory│   │   │
//! │  │   │              │   │ Pokemon        │──►│ PokemonOwner   │   │   │
//! │  │   │  session() ──┼──►│ Review  ...    │   └───────┬────────┘   │   │
//! │  │   └──────────────┘   └───────┬────────┘           │            │   │
//! │  │                              ▼                    ▼            │   │
//! │  │                     ┌──────────────────────────────────┐       │   │
//! │  │                     │ Session (one transaction, commit)│       │   │
//! │  │                     └──────────────────────────────────┘       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`session`] - Unit of work over one transaction
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Entity repositories
//! - [`relationship`] - Junction-table resolvers
//! - [`aggregation`] - Rating query
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/catalog.db")).await?;
//!
//! let mut session = db.session();
//! let categories = session.categories().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregation;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod relationship;
pub mod repository;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use session::{Record, Session};

pub use relationship::{PokemonCategoryResolver, PokemonOwnerResolver};
pub use repository::{
    CategoryRepository, CountryRepository, OwnerRepository, PokemonRepository, ReviewRepository,
    ReviewerRepository,
};
