//! # Category Service
//!
//! ## Delete Guard
//! ```text
//! delete(id)
//!    ├── unknown id ─────────────────────► NotFound
//!    ├── pokemon still linked ───────────► ReferentialIntegrity
//!    └── remove + commit ── 0 rows ──────► StorageFailure
//! ```

use tracing::{info, warn};

use catalog_core::validation::{ensure_unique, validate_category, validate_matching_id};
use catalog_core::{Category, EntityId, EntityKind, Pokemon};
use catalog_db::Database;

use crate::error::{ensure_saved, ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct CategoryService {
    db: Database,
}

impl CategoryService {
    pub fn new(db: Database) -> Self {
        CategoryService { db }
    }

    /// All categories, ordered by name.
    pub async fn list(&self) -> ServiceResult<Vec<Category>> {
        let mut session = self.db.session();
        Ok(session.categories().list().await?)
    }

    pub async fn get(&self, id: EntityId) -> ServiceResult<Category> {
        let mut session = self.db.session();
        session
            .categories()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Category, id))
    }

    /// Pokemon in the category.
    pub async fn pokemon(&self, id: EntityId) -> ServiceResult<Vec<Pokemon>> {
        let mut session = self.db.session();
        if !session.categories().exists(id).await? {
            return Err(ServiceError::not_found(EntityKind::Category, id));
        }
        Ok(session.categories().pokemon(id).await?)
    }

    /// Creates a category unless one with the same name already exists
    /// (trimmed, case-insensitive). Returns it with its assigned id.
    pub async fn create(&self, mut category: Category) -> ServiceResult<Category> {
        validate_category(&category)?;

        let mut session = self.db.session();
        let existing = session.categories().list().await?;
        if let Err(e) = ensure_unique(&category, &existing) {
            warn!(name = %category.name, "Category already exists");
            return Err(e.into());
        }

        let saved = session.categories().create(&mut category).await?;
        ensure_saved(saved, "Something went wrong while saving")?;

        info!(id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn update(&self, id: EntityId, category: Category) -> ServiceResult<()> {
        validate_matching_id(EntityKind::Category, id, category.id)?;

        let mut session = self.db.session();
        if !session.categories().exists(id).await? {
            return Err(ServiceError::not_found(EntityKind::Category, id));
        }
        validate_category(&category)?;

        let saved = session.categories().update(&category).await?;
        ensure_saved(saved, "Something went wrong while updating category")
    }

    pub async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        let mut session = self.db.session();
        let category = session
            .categories()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Category, id))?;

        if session.pokemon_categories().has_pokemon(id).await? {
            warn!(id = %id, "Refusing to delete category with linked pokemon");
            return Err(ServiceError::still_referenced(
                EntityKind::Category,
                id,
                "pokemon are still linked to it",
            ));
        }

        let saved = session.categories().delete(&category).await?;
        ensure_saved(saved, "Something went wrong while deleting category")?;

        info!(id = %id, "Category deleted");
        Ok(())
    }
}
