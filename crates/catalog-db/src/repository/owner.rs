//! # Owner Repository
//!
//! Database operations for owners.
//!
//! ## Deletion
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  delete(owner)                                                          │
//! │       │                                                                 │
//! │       ├── DELETE FROM pokemon_owners WHERE owner_id = ?   (staged)     │
//! │       ├── DELETE FROM owners WHERE id = ?                 (staged)     │
//! │       ▼                                                                 │
//! │  commit  ← both or neither                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::error::DbResult;
use crate::relationship::PokemonOwnerResolver;
use crate::session::{Record, Session, SqliteQuery};
use catalog_core::{EntityId, Owner, Pokemon};

impl Record for Owner {
    const TABLE: &'static str = "owners";
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const VALUE_COLUMNS: &'static [&'static str] = &["first_name", "last_name", "country_id"];
    const GENERATED_KEY: bool = true;

    fn key(&self) -> Vec<EntityId> {
        vec![self.id]
    }

    fn bind_values<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.first_name.clone())
            .bind(self.last_name.clone())
            .bind(self.country_id)
    }
}

/// Repository for owner database operations.
#[derive(Debug)]
pub struct OwnerRepository<'s> {
    session: &'s mut Session,
}

impl<'s> OwnerRepository<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        OwnerRepository { session }
    }

    /// Lists all owners, ordered by id.
    pub async fn list(&mut self) -> DbResult<Vec<Owner>> {
        let owners = self
            .session
            .fetch_all(sqlx::query_as::<_, Owner>(
                "SELECT id, first_name, last_name, country_id FROM owners ORDER BY id",
            ))
            .await?;

        debug!(count = owners.len(), "Listed owners");
        Ok(owners)
    }

    pub async fn get_by_id(&mut self, id: EntityId) -> DbResult<Option<Owner>> {
        debug!(id = %id, "Getting owner by ID");

        self.session
            .fetch_optional(
                sqlx::query_as::<_, Owner>(
                    "SELECT id, first_name, last_name, country_id FROM owners WHERE id = ?",
                )
                .bind(id),
            )
            .await
    }

    pub async fn exists(&mut self, id: EntityId) -> DbResult<bool> {
        self.session
            .fetch_scalar(
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM owners WHERE id = ?)")
                    .bind(id),
            )
            .await
    }

    /// Pokemon owned by the owner, ordered by id.
    pub async fn pokemon(&mut self, id: EntityId) -> DbResult<Vec<Pokemon>> {
        PokemonOwnerResolver::new(&mut *self.session)
            .pokemon_of(id)
            .await
    }

    pub async fn create(&mut self, owner: &mut Owner) -> DbResult<bool> {
        debug!(
            first_name = %owner.first_name,
            last_name = %owner.last_name,
            country_id = %owner.country_id,
            "Creating owner"
        );

        let id = self.session.add(&*owner).await?;
        let saved = self.session.commit().await? > 0;
        if saved {
            owner.id = id;
        }

        Ok(saved)
    }

    pub async fn update(&mut self, owner: &Owner) -> DbResult<bool> {
        debug!(id = %owner.id, "Updating owner");

        self.session.update(owner).await?;
        Ok(self.session.commit().await? > 0)
    }

    /// Removes the owner together with its `pokemon_owners` rows, in one commit.
    pub async fn delete(&mut self, owner: &Owner) -> DbResult<bool> {
        debug!(id = %owner.id, "Deleting owner");

        let unlinked = PokemonOwnerResolver::new(&mut *self.session)
            .unlink_owner(owner.id)
            .await?;
        if unlinked > 0 {
            debug!(id = %owner.id, unlinked, "Staged owner's pokemon links for removal");
        }

        self.session.remove(owner).await?;
        Ok(self.session.commit().await? > 0)
    }
}
