//! # Pokemon Repository
//!
//! Database operations for pokemon.
//!
//! ## Creation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  create(owner_id, category_id, &mut pokemon)            │
//! │                                                                         │
//! │  1. owner exists?     no → DbError::NotFound, nothing staged           │
//! │  2. category exists?  no → DbError::NotFound, nothing staged           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. INSERT pokemon                    (staged, id assigned)            │
//! │  4. INSERT pokemon_owners      (id, owner_id)                          │
//! │  5. INSERT pokemon_categories  (id, category_id)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  6. commit  ← 3 rows or none                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Deletion
//! Reviews of the pokemon must already be gone. `delete` removes both kinds
//! of junction row and the pokemon row in one commit.

use tracing::debug;

use crate::aggregation;
use crate::error::{DbError, DbResult};
use crate::relationship::{PokemonCategoryResolver, PokemonOwnerResolver};
use crate::repository::{CategoryRepository, OwnerRepository, ReviewRepository};
use crate::session::{Record, Session, SqliteQuery};
use catalog_core::{Category, EntityId, EntityKind, Owner, Pokemon, Rating, Review};

impl Record for Pokemon {
    const TABLE: &'static str = "pokemon";
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const VALUE_COLUMNS: &'static [&'static str] = &["name", "birth_date"];
    const GENERATED_KEY: bool = true;

    fn key(&self) -> Vec<EntityId> {
        vec![self.id]
    }

    fn bind_values<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(self.name.clone()).bind(self.birth_date)
    }
}

/// Repository for pokemon database operations.
///
/// ## Usage
/// ```rust,ignore
/// let mut session = db.session();
///
/// let mut pikachu = Pokemon::new("Pikachu", NaiveDate::from_ymd_opt(1903, 1, 1).unwrap());
/// session.pokemon().create(ash.id, electric.id, &mut pikachu).await?;
///
/// let rating = session.pokemon().rating(pikachu.id).await?;
/// println!("{}", rating); // "4.33"
/// ```
#[derive(Debug)]
pub struct PokemonRepository<'s> {
    session: &'s mut Session,
}

impl<'s> PokemonRepository<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        PokemonRepository { session }
    }

    /// Lists all pokemon, ordered by id.
    pub async fn list(&mut self) -> DbResult<Vec<Pokemon>> {
        let pokemon = self
            .session
            .fetch_all(sqlx::query_as::<_, Pokemon>(
                "SELECT id, name, birth_date FROM pokemon ORDER BY id",
            ))
            .await?;

        debug!(count = pokemon.len(), "Listed pokemon");
        Ok(pokemon)
    }

    pub async fn get_by_id(&mut self, id: EntityId) -> DbResult<Option<Pokemon>> {
        debug!(id = %id, "Getting pokemon by ID");

        self.session
            .fetch_optional(
                sqlx::query_as::<_, Pokemon>("SELECT id, name, birth_date FROM pokemon WHERE id = ?")
                    .bind(id),
            )
            .await
    }

    /// Gets a pokemon by exact name. The lowest id wins if names repeat.
    pub async fn get_by_name(&mut self, name: &str) -> DbResult<Option<Pokemon>> {
        debug!(name = %name, "Getting pokemon by name");

        self.session
            .fetch_optional(
                sqlx::query_as::<_, Pokemon>(
                    "SELECT id, name, birth_date FROM pokemon WHERE name = ? ORDER BY id LIMIT 1",
                )
                .bind(name.to_string()),
            )
            .await
    }

    pub async fn exists(&mut self, id: EntityId) -> DbResult<bool> {
        self.session
            .fetch_scalar(
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM pokemon WHERE id = ?)")
                    .bind(id),
            )
            .await
    }

    /// Average review rating. Empty (mean 0) when there are no reviews.
    pub async fn rating(&mut self, id: EntityId) -> DbResult<Rating> {
        aggregation::pokemon_rating(&mut *self.session, id).await
    }

    /// Reviews of the pokemon, ordered by id.
    pub async fn reviews(&mut self, id: EntityId) -> DbResult<Vec<Review>> {
        ReviewRepository::new(&mut *self.session)
            .of_pokemon(id)
            .await
    }

    /// Owners of the pokemon, ordered by id.
    pub async fn owners(&mut self, id: EntityId) -> DbResult<Vec<Owner>> {
        PokemonOwnerResolver::new(&mut *self.session)
            .owners_of(id)
            .await
    }

    /// Categories of the pokemon, ordered by name.
    pub async fn categories(&mut self, id: EntityId) -> DbResult<Vec<Category>> {
        PokemonCategoryResolver::new(&mut *self.session)
            .categories_of(id)
            .await
    }

    /// Inserts the pokemon with one owner link and one category link, then
    /// commits all three rows together.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - the owner or category id does not resolve;
    ///   nothing was staged
    pub async fn create(
        &mut self,
        owner_id: EntityId,
        category_id: EntityId,
        pokemon: &mut Pokemon,
    ) -> DbResult<bool> {
        debug!(
            name = %pokemon.name,
            owner_id = %owner_id,
            category_id = %category_id,
            "Creating pokemon"
        );

        if !OwnerRepository::new(&mut *self.session).exists(owner_id).await? {
            return Err(DbError::not_found(EntityKind::Owner.as_str(), owner_id));
        }
        if !CategoryRepository::new(&mut *self.session)
            .exists(category_id)
            .await?
        {
            return Err(DbError::not_found(EntityKind::Category.as_str(), category_id));
        }

        let id = self.session.add(&*pokemon).await?;
        PokemonOwnerResolver::new(&mut *self.session)
            .link(id, owner_id)
            .await?;
        PokemonCategoryResolver::new(&mut *self.session)
            .link(id, category_id)
            .await?;

        let saved = self.session.commit().await? > 0;
        if saved {
            pokemon.id = id;
        }

        Ok(saved)
    }

    pub async fn update(&mut self, pokemon: &Pokemon) -> DbResult<bool> {
        debug!(id = %pokemon.id, "Updating pokemon");

        self.session.update(pokemon).await?;
        Ok(self.session.commit().await? > 0)
    }

    /// Removes the pokemon and all of its junction rows in one commit.
    pub async fn delete(&mut self, pokemon: &Pokemon) -> DbResult<bool> {
        debug!(id = %pokemon.id, "Deleting pokemon");

        PokemonCategoryResolver::new(&mut *self.session)
            .unlink_pokemon(pokemon.id)
            .await?;
        PokemonOwnerResolver::new(&mut *self.session)
            .unlink_pokemon(pokemon.id)
            .await?;

        self.session.remove(pokemon).await?;
        Ok(self.session.commit().await? > 0)
    }
}
