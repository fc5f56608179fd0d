//! # Pokemon Service
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create(owner_id, category_id, pokemon)                                 │
//! │     name clash (trim, ignore case) ──► Conflict                        │
//! │     unknown owner / category ────────► NotFound (nothing written)      │
//! │     pokemon + 2 links, one commit                                       │
//! │                                                                         │
//! │  rating(id)                                                             │
//! │     Rating { total, count }; present with rating.hundredths()          │
//! │                                                                         │
//! │  delete(id)                                                             │
//! │     1. its reviews        (delete_many, skipped when empty)            │
//! │     2. its links + row    (one commit)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};

use catalog_core::validation::{ensure_unique, validate_matching_id, validate_pokemon};
use catalog_core::{Category, EntityId, EntityKind, Owner, Pokemon, Rating, Review};
use catalog_db::Database;

use crate::error::{ensure_saved, ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct PokemonService {
    db: Database,
}

impl PokemonService {
    pub fn new(db: Database) -> Self {
        PokemonService { db }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Pokemon>> {
        let mut session = self.db.session();
        Ok(session.pokemon().list().await?)
    }

    pub async fn get(&self, id: EntityId) -> ServiceResult<Pokemon> {
        let mut session = self.db.session();
        session
            .pokemon()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Pokemon, id))
    }

    /// Exact-name lookup.
    pub async fn get_by_name(&self, name: &str) -> ServiceResult<Pokemon> {
        let mut session = self.db.session();
        session
            .pokemon()
            .get_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::NotFound {
                entity: EntityKind::Pokemon.to_string(),
                id: name.to_string(),
            })
    }

    /// Average review rating; empty (0) without reviews.
    pub async fn rating(&self, id: EntityId) -> ServiceResult<Rating> {
        let mut session = self.db.session();
        if !session.pokemon().exists(id).await? {
            return Err(ServiceError::not_found(EntityKind::Pokemon, id));
        }
        Ok(session.pokemon().rating(id).await?)
    }

    pub async fn reviews(&self, id: EntityId) -> ServiceResult<Vec<Review>> {
        let mut session = self.db.session();
        if !session.pokemon().exists(id).await? {
            return Err(ServiceError::not_found(EntityKind::Pokemon, id));
        }
        Ok(session.pokemon().reviews(id).await?)
    }

    pub async fn owners(&self, id: EntityId) -> ServiceResult<Vec<Owner>> {
        let mut session = self.db.session();
        if !session.pokemon().exists(id).await? {
            return Err(ServiceError::not_found(EntityKind::Pokemon, id));
        }
        Ok(session.pokemon().owners(id).await?)
    }

    pub async fn categories(&self, id: EntityId) -> ServiceResult<Vec<Category>> {
        let mut session = self.db.session();
        if !session.pokemon().exists(id).await? {
            return Err(ServiceError::not_found(EntityKind::Pokemon, id));
        }
        Ok(session.pokemon().categories(id).await?)
    }

    /// Creates a pokemon owned by `owner_id` in `category_id`.
    pub async fn create(
        &self,
        owner_id: EntityId,
        category_id: EntityId,
        mut pokemon: Pokemon,
    ) -> ServiceResult<Pokemon> {
        validate_pokemon(&pokemon)?;

        let mut session = self.db.session();
        let existing = session.pokemon().list().await?;
        if let Err(e) = ensure_unique(&pokemon, &existing) {
            warn!(name = %pokemon.name, "Pokemon already exists");
            return Err(e.into());
        }

        let saved = session
            .pokemon()
            .create(owner_id, category_id, &mut pokemon)
            .await?;
        ensure_saved(saved, "Something went wrong while saving")?;

        info!(
            id = %pokemon.id,
            name = %pokemon.name,
            owner_id = %owner_id,
            category_id = %category_id,
            "Pokemon created"
        );
        Ok(pokemon)
    }

    pub async fn update(&self, id: EntityId, pokemon: Pokemon) -> ServiceResult<()> {
        validate_matching_id(EntityKind::Pokemon, id, pokemon.id)?;

        let mut session = self.db.session();
        if !session.pokemon().exists(id).await? {
            return Err(ServiceError::not_found(EntityKind::Pokemon, id));
        }
        validate_pokemon(&pokemon)?;

        let saved = session.pokemon().update(&pokemon).await?;
        ensure_saved(saved, "Something went wrong while updating pokemon")
    }

    /// Deletes the pokemon's reviews, then the pokemon with its links.
    pub async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        let mut session = self.db.session();
        let pokemon = session
            .pokemon()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Pokemon, id))?;

        let reviews = session.pokemon().reviews(id).await?;
        if !reviews.is_empty() {
            let removed = session.reviews().delete_many(&reviews).await?;
            ensure_saved(removed, "Something went wrong when deleting reviews")?;
        }

        let saved = session.pokemon().delete(&pokemon).await?;
        ensure_saved(saved, "Something went wrong while deleting pokemon")?;

        info!(id = %id, reviews = reviews.len(), "Pokemon deleted");
        Ok(())
    }
}
