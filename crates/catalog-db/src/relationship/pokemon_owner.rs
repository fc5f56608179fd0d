//! Pokemon ↔ owner junction (`pokemon_owners`).

use tracing::debug;

use crate::error::DbResult;
use crate::session::{Record, Session, SqliteQuery};
use catalog_core::{EntityId, Owner, Pokemon, PokemonOwner};

impl Record for PokemonOwner {
    const TABLE: &'static str = "pokemon_owners";
    const KEY_COLUMNS: &'static [&'static str] = &["pokemon_id", "owner_id"];
    const VALUE_COLUMNS: &'static [&'static str] = &[];
    const GENERATED_KEY: bool = false;

    fn key(&self) -> Vec<EntityId> {
        vec![self.pokemon_id, self.owner_id]
    }

    fn bind_values<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
    }
}

#[derive(Debug)]
pub struct PokemonOwnerResolver<'s> {
    session: &'s mut Session,
}

impl<'s> PokemonOwnerResolver<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        PokemonOwnerResolver { session }
    }

    /// Pokemon owned by an owner, ordered by id.
    pub async fn pokemon_of(&mut self, owner_id: EntityId) -> DbResult<Vec<Pokemon>> {
        let pokemon = self
            .session
            .fetch_all(
                sqlx::query_as::<_, Pokemon>(
                    r#"
                    SELECT p.id, p.name, p.birth_date
                    FROM pokemon p
                    INNER JOIN pokemon_owners po ON po.pokemon_id = p.id
                    WHERE po.owner_id = ?
                    ORDER BY p.id
                    "#,
                )
                .bind(owner_id),
            )
            .await?;

        debug!(owner_id = %owner_id, count = pokemon.len(), "Resolved pokemon of owner");
        Ok(pokemon)
    }

    /// Owners of a pokemon, ordered by id.
    pub async fn owners_of(&mut self, pokemon_id: EntityId) -> DbResult<Vec<Owner>> {
        let owners = self
            .session
            .fetch_all(
                sqlx::query_as::<_, Owner>(
                    r#"
                    SELECT o.id, o.first_name, o.last_name, o.country_id
                    FROM owners o
                    INNER JOIN pokemon_owners po ON po.owner_id = o.id
                    WHERE po.pokemon_id = ?
                    ORDER BY o.id
                    "#,
                )
                .bind(pokemon_id),
            )
            .await?;

        debug!(pokemon_id = %pokemon_id, count = owners.len(), "Resolved owners of pokemon");
        Ok(owners)
    }

    /// Stages a junction row.
    pub async fn link(&mut self, pokemon_id: EntityId, owner_id: EntityId) -> DbResult<()> {
        self.session
            .add(&PokemonOwner::new(pokemon_id, owner_id))
            .await?;
        Ok(())
    }

    /// Stages removal of every owner link of a pokemon.
    pub async fn unlink_pokemon(&mut self, pokemon_id: EntityId) -> DbResult<u64> {
        let result = self
            .session
            .execute(sqlx::query("DELETE FROM pokemon_owners WHERE pokemon_id = ?").bind(pokemon_id))
            .await?;
        Ok(result.rows_affected())
    }

    /// Stages removal of every pokemon link of an owner.
    pub async fn unlink_owner(&mut self, owner_id: EntityId) -> DbResult<u64> {
        let result = self
            .session
            .execute(sqlx::query("DELETE FROM pokemon_owners WHERE owner_id = ?").bind(owner_id))
            .await?;
        Ok(result.rows_affected())
    }
}
