//! # Country Service

use tracing::{info, warn};

use catalog_core::validation::{ensure_unique, validate_country, validate_matching_id};
use catalog_core::{Country, EntityId, EntityKind, Owner};
use catalog_db::Database;

use crate::error::{ensure_saved, ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct CountryService {
    db: Database,
}

impl CountryService {
    pub fn new(db: Database) -> Self {
        CountryService { db }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Country>> {
        let mut session = self.db.session();
        Ok(session.countries().list().await?)
    }

    pub async fn get(&self, id: EntityId) -> ServiceResult<Country> {
        let mut session = self.db.session();
        session
            .countries()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Country, id))
    }

    /// Owners living in the country.
    pub async fn owners(&self, id: EntityId) -> ServiceResult<Vec<Owner>> {
        let mut session = self.db.session();
        if !session.countries().exists(id).await? {
            return Err(ServiceError::not_found(EntityKind::Country, id));
        }
        Ok(session.countries().owners(id).await?)
    }

    /// The country an owner belongs to.
    pub async fn of_owner(&self, owner_id: EntityId) -> ServiceResult<Country> {
        let mut session = self.db.session();
        if !session.owners().exists(owner_id).await? {
            return Err(ServiceError::not_found(EntityKind::Owner, owner_id));
        }
        session
            .countries()
            .of_owner(owner_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Country, owner_id))
    }

    pub async fn create(&self, mut country: Country) -> ServiceResult<Country> {
        validate_country(&country)?;

        let mut session = self.db.session();
        let existing = session.countries().list().await?;
        if let Err(e) = ensure_unique(&country, &existing) {
            warn!(name = %country.name, "Country already exists");
            return Err(e.into());
        }

        let saved = session.countries().create(&mut country).await?;
        ensure_saved(saved, "Something went wrong while saving")?;

        info!(id = %country.id, name = %country.name, "Country created");
        Ok(country)
    }

    pub async fn update(&self, id: EntityId, country: Country) -> ServiceResult<()> {
        validate_matching_id(EntityKind::Country, id, country.id)?;

        let mut session = self.db.session();
        if !session.countries().exists(id).await? {
            return Err(ServiceError::not_found(EntityKind::Country, id));
        }
        validate_country(&country)?;

        let saved = session.countries().update(&country).await?;
        ensure_saved(saved, "Something went wrong while updating country")
    }

    /// Deletes a country no owner references.
    pub async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        let mut session = self.db.session();
        let country = session
            .countries()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Country, id))?;

        if session.countries().has_owners(id).await? {
            warn!(id = %id, "Refusing to delete country with owners");
            return Err(ServiceError::still_referenced(
                EntityKind::Country,
                id,
                "owners still belong to it",
            ));
        }

        let saved = session.countries().delete(&country).await?;
        ensure_saved(saved, "Something went wrong while deleting country")?;

        info!(id = %id, "Country deleted");
        Ok(())
    }
}
