//! # Reviewer Repository
//!
//! Database operations for reviewers. A reviewer's reviews must be removed
//! before the reviewer itself; the service layer drives that cascade with
//! [`crate::repository::ReviewRepository::delete_many`].

use tracing::debug;

use crate::error::DbResult;
use crate::session::{Record, Session, SqliteQuery};
use catalog_core::{EntityId, Review, Reviewer};

impl Record for Reviewer {
    const TABLE: &'static str = "reviewers";
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const VALUE_COLUMNS: &'static [&'static str] = &["first_name", "last_name"];
    const GENERATED_KEY: bool = true;

    fn key(&self) -> Vec<EntityId> {
        vec![self.id]
    }

    fn bind_values<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.first_name.clone())
            .bind(self.last_name.clone())
    }
}

/// Repository for reviewer database operations.
#[derive(Debug)]
pub struct ReviewerRepository<'s> {
    session: &'s mut Session,
}

impl<'s> ReviewerRepository<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        ReviewerRepository { session }
    }

    /// Lists all reviewers, ordered by id.
    pub async fn list(&mut self) -> DbResult<Vec<Reviewer>> {
        let reviewers = self
            .session
            .fetch_all(sqlx::query_as::<_, Reviewer>(
                "SELECT id, first_name, last_name FROM reviewers ORDER BY id",
            ))
            .await?;

        debug!(count = reviewers.len(), "Listed reviewers");
        Ok(reviewers)
    }

    pub async fn get_by_id(&mut self, id: EntityId) -> DbResult<Option<Reviewer>> {
        debug!(id = %id, "Getting reviewer by ID");

        self.session
            .fetch_optional(
                sqlx::query_as::<_, Reviewer>(
                    "SELECT id, first_name, last_name FROM reviewers WHERE id = ?",
                )
                .bind(id),
            )
            .await
    }

    pub async fn exists(&mut self, id: EntityId) -> DbResult<bool> {
        self.session
            .fetch_scalar(
                sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM reviewers WHERE id = ?)",
                )
                .bind(id),
            )
            .await
    }

    /// Reviews written by the reviewer, ordered by id.
    pub async fn reviews(&mut self, id: EntityId) -> DbResult<Vec<Review>> {
        let reviews = self
            .session
            .fetch_all(
                sqlx::query_as::<_, Review>(
                    r#"
                    SELECT id, title, text, rating, pokemon_id, reviewer_id
                    FROM reviews
                    WHERE reviewer_id = ?
                    ORDER BY id
                    "#,
                )
                .bind(id),
            )
            .await?;

        debug!(id = %id, count = reviews.len(), "Listed reviews of reviewer");
        Ok(reviews)
    }

    pub async fn create(&mut self, reviewer: &mut Reviewer) -> DbResult<bool> {
        debug!(last_name = %reviewer.last_name, "Creating reviewer");

        let id = self.session.add(&*reviewer).await?;
        let saved = self.session.commit().await? > 0;
        if saved {
            reviewer.id = id;
        }

        Ok(saved)
    }

    pub async fn update(&mut self, reviewer: &Reviewer) -> DbResult<bool> {
        debug!(id = %reviewer.id, "Updating reviewer");

        self.session.update(reviewer).await?;
        Ok(self.session.commit().await? > 0)
    }

    pub async fn delete(&mut self, reviewer: &Reviewer) -> DbResult<bool> {
        debug!(id = %reviewer.id, "Deleting reviewer");

        self.session.remove(reviewer).await?;
        Ok(self.session.commit().await? > 0)
    }
}
