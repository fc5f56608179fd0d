//! Pokemon ↔ category junction (`pokemon_categories`).

use tracing::debug;

use crate::error::DbResult;
use crate::session::{Record, Session, SqliteQuery};
use catalog_core::{Category, EntityId, Pokemon, PokemonCategory};

impl Record for PokemonCategory {
    const TABLE: &'static str = "pokemon_categories";
    const KEY_COLUMNS: &'static [&'static str] = &["pokemon_id", "category_id"];
    const VALUE_COLUMNS: &'static [&'static str] = &[];
    const GENERATED_KEY: bool = false;

    fn key(&self) -> Vec<EntityId> {
        vec![self.pokemon_id, self.category_id]
    }

    fn bind_values<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
    }
}

#[derive(Debug)]
pub struct PokemonCategoryResolver<'s> {
    session: &'s mut Session,
}

impl<'s> PokemonCategoryResolver<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        PokemonCategoryResolver { session }
    }

    /// Pokemon linked to a category, ordered by id.
    pub async fn pokemon_of(&mut self, category_id: EntityId) -> DbResult<Vec<Pokemon>> {
        let pokemon = self
            .session
            .fetch_all(
                sqlx::query_as::<_, Pokemon>(
                    r#"
                    SELECT p.id, p.name, p.birth_date
                    FROM pokemon p
                    INNER JOIN pokemon_categories pc ON pc.pokemon_id = p.id
                    WHERE pc.category_id = ?
                    ORDER BY p.id
                    "#,
                )
                .bind(category_id),
            )
            .await?;

        debug!(category_id = %category_id, count = pokemon.len(), "Resolved pokemon of category");
        Ok(pokemon)
    }

    /// Categories a pokemon belongs to, ordered by name.
    pub async fn categories_of(&mut self, pokemon_id: EntityId) -> DbResult<Vec<Category>> {
        let categories = self
            .session
            .fetch_all(
                sqlx::query_as::<_, Category>(
                    r#"
                    SELECT c.id, c.name
                    FROM categories c
                    INNER JOIN pokemon_categories pc ON pc.category_id = c.id
                    WHERE pc.pokemon_id = ?
                    ORDER BY c.name, c.id
                    "#,
                )
                .bind(pokemon_id),
            )
            .await?;

        debug!(pokemon_id = %pokemon_id, count = categories.len(), "Resolved categories of pokemon");
        Ok(categories)
    }

    /// True when at least one pokemon is linked to the category.
    pub async fn has_pokemon(&mut self, category_id: EntityId) -> DbResult<bool> {
        self.session
            .fetch_scalar(
                sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM pokemon_categories WHERE category_id = ?)",
                )
                .bind(category_id),
            )
            .await
    }

    /// Stages a junction row.
    pub async fn link(&mut self, pokemon_id: EntityId, category_id: EntityId) -> DbResult<()> {
        self.session
            .add(&PokemonCategory::new(pokemon_id, category_id))
            .await?;
        Ok(())
    }

    /// Stages removal of every category link of a pokemon. Returns rows staged.
    pub async fn unlink_pokemon(&mut self, pokemon_id: EntityId) -> DbResult<u64> {
        let result = self
            .session
            .execute(
                sqlx::query("DELETE FROM pokemon_categories WHERE pokemon_id = ?").bind(pokemon_id),
            )
            .await?;
        Ok(result.rows_affected())
    }
}
