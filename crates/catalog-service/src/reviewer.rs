//! # Reviewer Service
//!
//! ## Delete Cascade
//! ```text
//! delete(id)
//!    │
//!    ├── unknown id ──────────────────────────► NotFound
//!    │
//!    ├── 1. reviews = reviewer's reviews
//!    ├── 2. delete_many(reviews)   (skipped when empty)
//!    │        └── 0 rows ─────────────────────► StorageFailure, reviewer kept
//!    └── 3. delete(reviewer)
//!             └── 0 rows ─────────────────────► StorageFailure
//! ```

use tracing::{info, warn};

use catalog_core::validation::{ensure_unique, validate_matching_id, validate_reviewer};
use catalog_core::{EntityId, EntityKind, Review, Reviewer};
use catalog_db::Database;

use crate::error::{ensure_saved, ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct ReviewerService {
    db: Database,
}

impl ReviewerService {
    pub fn new(db: Database) -> Self {
        ReviewerService { db }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Reviewer>> {
        let mut session = self.db.session();
        Ok(session.reviewers().list().await?)
    }

    pub async fn get(&self, id: EntityId) -> ServiceResult<Reviewer> {
        let mut session = self.db.session();
        session
            .reviewers()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Reviewer, id))
    }

    /// Reviews written by the reviewer.
    pub async fn reviews(&self, id: EntityId) -> ServiceResult<Vec<Review>> {
        let mut session = self.db.session();
        if !session.reviewers().exists(id).await? {
            return Err(ServiceError::not_found(EntityKind::Reviewer, id));
        }
        Ok(session.reviewers().reviews(id).await?)
    }

    /// Creates a reviewer. Duplicates are matched on last name only.
    pub async fn create(&self, mut reviewer: Reviewer) -> ServiceResult<Reviewer> {
        validate_reviewer(&reviewer)?;

        let mut session = self.db.session();
        let existing = session.reviewers().list().await?;
        if let Err(e) = ensure_unique(&reviewer, &existing) {
            warn!(last_name = %reviewer.last_name, "Reviewer already exists");
            return Err(e.into());
        }

        let saved = session.reviewers().create(&mut reviewer).await?;
        ensure_saved(saved, "Something went wrong while saving")?;

        info!(id = %reviewer.id, "Reviewer created");
        Ok(reviewer)
    }

    pub async fn update(&self, id: EntityId, reviewer: Reviewer) -> ServiceResult<()> {
        validate_matching_id(EntityKind::Reviewer, id, reviewer.id)?;

        let mut session = self.db.session();
        if !session.reviewers().exists(id).await? {
            return Err(ServiceError::not_found(EntityKind::Reviewer, id));
        }
        validate_reviewer(&reviewer)?;

        let saved = session.reviewers().update(&reviewer).await?;
        ensure_saved(saved, "Something went wrong while updating reviewer")
    }

    /// Deletes the reviewer's reviews, then the reviewer.
    pub async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        let mut session = self.db.session();
        let reviewer = session
            .reviewers()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Reviewer, id))?;

        let reviews = session.reviewers().reviews(id).await?;
        if !reviews.is_empty() {
            let removed = session.reviews().delete_many(&reviews).await?;
            ensure_saved(removed, "Something went wrong when deleting reviews")?;
        }

        let saved = session.reviewers().delete(&reviewer).await?;
        ensure_saved(saved, "Something went wrong while deleting reviewer")?;

        info!(id = %id, reviews = reviews.len(), "Reviewer deleted");
        Ok(())
    }
}
