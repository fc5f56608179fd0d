//! # Category Repository
//!
//! Database operations for categories.
//!
//! ## Key Operations
//! - Listing (ordered by name)
//! - Pokemon in a category, via `pokemon_categories`
//! - CRUD, committed through the session

use tracing::debug;

use crate::error::DbResult;
use crate::relationship::PokemonCategoryResolver;
use crate::session::{Record, Session, SqliteQuery};
use catalog_core::{Category, EntityId, Pokemon};

impl Record for Category {
    const TABLE: &'static str = "categories";
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const VALUE_COLUMNS: &'static [&'static str] = &["name"];
    const GENERATED_KEY: bool = true;

    fn key(&self) -> Vec<EntityId> {
        vec![self.id]
    }

    fn bind_values<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(self.name.clone())
    }
}

/// Repository for category database operations.
///
/// ## Usage
/// ```rust,ignore
/// let mut session = db.session();
///
/// let mut electric = Category::new("Electric");
/// session.categories().create(&mut electric).await?;
///
/// let members = session.categories().pokemon(electric.id).await?;
/// ```
#[derive(Debug)]
pub struct CategoryRepository<'s> {
    session: &'s mut Session,
}

impl<'s> CategoryRepository<'s> {
    /// Creates a new CategoryRepository over a session.
    pub fn new(session: &'s mut Session) -> Self {
        CategoryRepository { session }
    }

    /// Lists all categories, ordered by name.
    pub async fn list(&mut self) -> DbResult<Vec<Category>> {
        let categories = self
            .session
            .fetch_all(sqlx::query_as::<_, Category>(
                "SELECT id, name FROM categories ORDER BY name, id",
            ))
            .await?;

        debug!(count = categories.len(), "Listed categories");
        Ok(categories)
    }

    /// Gets a category by ID.
    pub async fn get_by_id(&mut self, id: EntityId) -> DbResult<Option<Category>> {
        debug!(id = %id, "Getting category by ID");

        self.session
            .fetch_optional(
                sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?")
                    .bind(id),
            )
            .await
    }

    /// Checks whether a category with this ID exists.
    pub async fn exists(&mut self, id: EntityId) -> DbResult<bool> {
        self.session
            .fetch_scalar(
                sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?)",
                )
                .bind(id),
            )
            .await
    }

    /// Pokemon linked to the category, ordered by id.
    pub async fn pokemon(&mut self, id: EntityId) -> DbResult<Vec<Pokemon>> {
        PokemonCategoryResolver::new(&mut *self.session).pokemon_of(id).await
    }

    /// Inserts a category and commits.
    ///
    /// On success the storage-assigned id is written back into `category`.
    pub async fn create(&mut self, category: &mut Category) -> DbResult<bool> {
        debug!(name = %category.name, "Creating category");

        let id = self.session.add(&*category).await?;
        let saved = self.session.commit().await? > 0;
        if saved {
            category.id = id;
        }

        Ok(saved)
    }

    /// Replaces the category's fields and commits.
    pub async fn update(&mut self, category: &Category) -> DbResult<bool> {
        debug!(id = %category.id, "Updating category");

        self.session.update(category).await?;
        Ok(self.session.commit().await? > 0)
    }

    /// Removes the category and commits.
    ///
    /// Callers must check [`PokemonCategoryResolver::has_pokemon`] first;
    /// linked rows make the delete fail on the foreign key.
    pub async fn delete(&mut self, category: &Category) -> DbResult<bool> {
        debug!(id = %category.id, "Deleting category");

        self.session.remove(category).await?;
        Ok(self.session.commit().await? > 0)
    }
}
