//! # Owner Service

use tracing::{info, warn};

use catalog_core::validation::{ensure_unique, validate_matching_id, validate_owner};
use catalog_core::{EntityId, EntityKind, Owner, Pokemon};
use catalog_db::Database;

use crate::error::{ensure_saved, ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct OwnerService {
    db: Database,
}

impl OwnerService {
    pub fn new(db: Database) -> Self {
        OwnerService { db }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Owner>> {
        let mut session = self.db.session();
        Ok(session.owners().list().await?)
    }

    pub async fn get(&self, id: EntityId) -> ServiceResult<Owner> {
        let mut session = self.db.session();
        session
            .owners()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Owner, id))
    }

    /// Pokemon the owner owns.
    pub async fn pokemon(&self, id: EntityId) -> ServiceResult<Vec<Pokemon>> {
        let mut session = self.db.session();
        if !session.owners().exists(id).await? {
            return Err(ServiceError::not_found(EntityKind::Owner, id));
        }
        Ok(session.owners().pokemon(id).await?)
    }

    /// Creates an owner living in `country_id`.
    ///
    /// Duplicates are matched on the (first name, last name) pair.
    pub async fn create(&self, country_id: EntityId, mut owner: Owner) -> ServiceResult<Owner> {
        owner.country_id = country_id;
        validate_owner(&owner)?;

        let mut session = self.db.session();
        let existing = session.owners().list().await?;
        if let Err(e) = ensure_unique(&owner, &existing) {
            warn!(
                first_name = %owner.first_name,
                last_name = %owner.last_name,
                "Owner already exists"
            );
            return Err(e.into());
        }

        if !session.countries().exists(country_id).await? {
            return Err(ServiceError::not_found(EntityKind::Country, country_id));
        }

        let saved = session.owners().create(&mut owner).await?;
        ensure_saved(saved, "Something went wrong while saving")?;

        info!(id = %owner.id, country_id = %country_id, "Owner created");
        Ok(owner)
    }

    pub async fn update(&self, id: EntityId, owner: Owner) -> ServiceResult<()> {
        validate_matching_id(EntityKind::Owner, id, owner.id)?;

        let mut session = self.db.session();
        if !session.owners().exists(id).await? {
            return Err(ServiceError::not_found(EntityKind::Owner, id));
        }
        validate_owner(&owner)?;
        if !session.countries().exists(owner.country_id).await? {
            return Err(ServiceError::not_found(EntityKind::Country, owner.country_id));
        }

        let saved = session.owners().update(&owner).await?;
        ensure_saved(saved, "Something went wrong while updating owner")
    }

    /// Deletes the owner and its pokemon links. The pokemon themselves stay.
    pub async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        let mut session = self.db.session();
        let owner = session
            .owners()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Owner, id))?;

        let saved = session.owners().delete(&owner).await?;
        ensure_saved(saved, "Something went wrong while deleting owner")?;

        info!(id = %id, "Owner deleted");
        Ok(())
    }
}
