//! # Country Repository
//!
//! Database operations for countries. Countries relate to owners one-to-many
//! through `owners.country_id`.

use tracing::debug;

use crate::error::DbResult;
use crate::session::{Record, Session, SqliteQuery};
use catalog_core::{Country, EntityId, Owner};

impl Record for Country {
    const TABLE: &'static str = "countries";
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

/// Repository for country database operations.
#[derive(Debug)]
pub struct CountryRepository<'s> {
    session: &'s mut Session,
}

impl<'s> CountryRepository<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        CountryRepository { session }
    }

    /// Lists all countries, ordered by id.
    pub async fn list(&mut self) -> DbResult<Vec<Country>> {
        let countries = self
            .session
            .fetch_all(sqlx::query_as::<_, Country>(
                "SELECT id, name FROM countries ORDER BY id",
            ))
            .await?;

        debug!(count = countries.len(), "Listed countries");
        Ok(countries)
    }

    pub async fn get_by_id(&mut self, id: EntityId) -> DbResult<Option<Country>> {
        debug!(id = %id, "Getting country by ID");

        self.session
            .fetch_optional(
                sqlx::query_as::<_, Country>("SELECT id, name FROM countries WHERE id = ?")
                    .bind(id),
            )
            .await
    }

    pub async fn exists(&mut self, id: EntityId) -> DbResult<bool> {
        self.session
            .fetch_scalar(
                sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM countries WHERE id = ?)",
                )
                .bind(id),
            )
            .await
    }

    /// Owners living in the country, ordered by id.
    pub async fn owners(&mut self, id: EntityId) -> DbResult<Vec<Owner>> {
        let owners = self
            .session
            .fetch_all(
                sqlx::query_as::<_, Owner>(
                    r#"
                    SELECT id, first_name, last_name, country_id
                    FROM owners
                    WHERE country_id = ?
                    ORDER BY id
                    "#,
                )
                .bind(id),
            )
            .await?;

        debug!(id = %id, count = owners.len(), "Listed owners of country");
        Ok(owners)
    }

    /// The country an owner belongs to. `None` when the owner is unknown.
    pub async fn of_owner(&mut self, owner_id: EntityId) -> DbResult<Option<Country>> {
        debug!(owner_id = %owner_id, "Getting country of owner");

        self.session
            .fetch_optional(
                sqlx::query_as::<_, Country>(
                    r#"
                    SELECT c.id, c.name
                    FROM countries c
                    INNER JOIN owners o ON o.country_id = c.id
                    WHERE o.id = ?
                    "#,
                )
                .bind(owner_id),
            )
            .await
    }

    /// True when at least one owner references the country.
    pub async fn has_owners(&mut self, id: EntityId) -> DbResult<bool> {
        self.session
            .fetch_scalar(
                sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM owners WHERE country_id = ?)",
                )
                .bind(id),
            )
            .await
    }

    pub async fn create(&mut self, country: &mut Country) -> DbResult<bool> {
        debug!(name = %country.name, "Creating country");

        let id = self.session.add(&*country).await?;
        let saved = self.session.commit().await? > 0;
        if saved {
            country.id = id;
        }

        Ok(saved)
    }

    pub async fn update(&mut self, country: &Country) -> DbResult<bool> {
        debug!(id = %country.id, "Updating country");

        self.session.update(country).await?;
        Ok(self.session.commit().await? > 0)
    }

    pub async fn delete(&mut self, country: &Country) -> DbResult<bool> {
        debug!(id = %country.id, "Deleting country");

        self.session.remove(country).await?;
        Ok(self.session.commit().await? > 0)
    }
}
