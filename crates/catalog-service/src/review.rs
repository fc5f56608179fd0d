//! # Review Service

use tracing::{info, warn};

use catalog_core::validation::{ensure_unique, validate_matching_id, validate_review};
use catalog_core::{EntityId, EntityKind, Review};
use catalog_db::{Database, Session};

use crate::error::{ensure_saved, ServiceError, ServiceResult};

#[derive(Debug, Clone)]
pub struct ReviewService {
    db: Database,
}

impl ReviewService {
    pub fn new(db: Database) -> Self {
        ReviewService { db }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Review>> {
        let mut session = self.db.session();
        Ok(session.reviews().list().await?)
    }

    pub async fn get(&self, id: EntityId) -> ServiceResult<Review> {
        let mut session = self.db.session();
        session
            .reviews()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Review, id))
    }

    /// Creates a review of `pokemon_id` written by `reviewer_id`.
    ///
    /// Duplicates are matched on title. The rating must be 1 to 5.
    pub async fn create(
        &self,
        reviewer_id: EntityId,
        pokemon_id: EntityId,
        mut review: Review,
    ) -> ServiceResult<Review> {
        review.reviewer_id = reviewer_id;
        review.pokemon_id = pokemon_id;
        validate_review(&review)?;

        let mut session = self.db.session();
        let existing = session.reviews().list().await?;
        if let Err(e) = ensure_unique(&review, &existing) {
            warn!(title = %review.title, "Review already exists");
            return Err(e.into());
        }

        ensure_references(&mut session, &review).await?;

        let saved = session.reviews().create(&mut review).await?;
        ensure_saved(saved, "Something went wrong while saving")?;

        info!(
            id = %review.id,
            pokemon_id = %pokemon_id,
            reviewer_id = %reviewer_id,
            "Review created"
        );
        Ok(review)
    }

    pub async fn update(&self, id: EntityId, review: Review) -> ServiceResult<()> {
        validate_matching_id(EntityKind::Review, id, review.id)?;

        let mut session = self.db.session();
        if !session.reviews().exists(id).await? {
            return Err(ServiceError::not_found(EntityKind::Review, id));
        }
        validate_review(&review)?;
        ensure_references(&mut session, &review).await?;

        let saved = session.reviews().update(&review).await?;
        ensure_saved(saved, "Something went wrong while updating review")
    }

    pub async fn delete(&self, id: EntityId) -> ServiceResult<()> {
        let mut session = self.db.session();
        let review = session
            .reviews()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Review, id))?;

        let saved = session.reviews().delete(&review).await?;
        ensure_saved(saved, "Something went wrong while deleting review")?;

        info!(id = %id, "Review deleted");
        Ok(())
    }
}

async fn ensure_references(session: &mut Session, review: &Review) -> ServiceResult<()> {
    if !session.reviewers().exists(review.reviewer_id).await? {
        return Err(ServiceError::not_found(EntityKind::Reviewer, review.reviewer_id));
    }
    if !session.pokemon().exists(review.pokemon_id).await? {
        return Err(ServiceError::not_found(EntityKind::Pokemon, review.pokemon_id));
    }
    Ok(())
}
