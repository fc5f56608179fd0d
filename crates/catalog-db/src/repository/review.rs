//! # Review Repository
//!
//! Database operations for reviews, including the batch delete used by the
//! reviewer and pokemon cascades.

use tracing::debug;

use crate::error::DbResult;
use crate::session::{Record, Session, SqliteQuery};
use catalog_core::{EntityId, Review};

impl Record for Review {
    const TABLE: &'static str = "reviews";
    const KEY_COLUMNS: &'static [&'static str] = &["id"];
    const VALUE_COLUMNS: &'static [&'static str] =
        &["title", "text", "rating", "pokemon_id", "reviewer_id"];
    const GENERATED_KEY: bool = true;

    fn key(&self) -> Vec<EntityId> {
        vec![self.id]
    }

    fn bind_values<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.title.clone())
            .bind(self.text.clone())
            .bind(self.rating)
            .bind(self.pokemon_id)
            .bind(self.reviewer_id)
    }
}

const REVIEW_COLUMNS: &str = "id, title, text, rating, pokemon_id, reviewer_id";

/// Repository for review database operations.
#[derive(Debug)]
pub struct ReviewRepository<'s> {
    session: &'s mut Session,
}

impl<'s> ReviewRepository<'s> {
    pub fn new(session: &'s mut Session) -> Self {
        ReviewRepository { session }
    }

    /// Lists all reviews, ordered by id.
    pub async fn list(&mut self) -> DbResult<Vec<Review>> {
        let sql = format!("SELECT {} FROM reviews ORDER BY id", REVIEW_COLUMNS);
        let reviews = self
            .session
            .fetch_all(sqlx::query_as::<_, Review>(&sql))
            .await?;

        debug!(count = reviews.len(), "Listed reviews");
        Ok(reviews)
    }

    pub async fn get_by_id(&mut self, id: EntityId) -> DbResult<Option<Review>> {
        debug!(id = %id, "Getting review by ID");

        let sql = format!("SELECT {} FROM reviews WHERE id = ?", REVIEW_COLUMNS);
        self.session
            .fetch_optional(sqlx::query_as::<_, Review>(&sql).bind(id))
            .await
    }

    pub async fn exists(&mut self, id: EntityId) -> DbResult<bool> {
        self.session
            .fetch_scalar(
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM reviews WHERE id = ?)")
                    .bind(id),
            )
            .await
    }

    /// Reviews of one pokemon, ordered by id.
    pub async fn of_pokemon(&mut self, pokemon_id: EntityId) -> DbResult<Vec<Review>> {
        let sql = format!(
            "SELECT {} FROM reviews WHERE pokemon_id = ? ORDER BY id",
            REVIEW_COLUMNS
        );
        let reviews = self
            .session
            .fetch_all(sqlx::query_as::<_, Review>(&sql).bind(pokemon_id))
            .await?;

        debug!(pokemon_id = %pokemon_id, count = reviews.len(), "Listed reviews of pokemon");
        Ok(reviews)
    }

    pub async fn create(&mut self, review: &mut Review) -> DbResult<bool> {
        debug!(
            pokemon_id = %review.pokemon_id,
            reviewer_id = %review.reviewer_id,
            rating = review.rating,
            "Creating review"
        );

        let id = self.session.add(&*review).await?;
        let saved = self.session.commit().await? > 0;
        if saved {
            review.id = id;
        }

        Ok(saved)
    }

    pub async fn update(&mut self, review: &Review) -> DbResult<bool> {
        debug!(id = %review.id, "Updating review");

        self.session.update(review).await?;
        Ok(self.session.commit().await? > 0)
    }

    pub async fn delete(&mut self, review: &Review) -> DbResult<bool> {
        debug!(id = %review.id, "Deleting review");

        self.session.remove(review).await?;
        Ok(self.session.commit().await? > 0)
    }

    /// Removes every review in one commit.
    ///
    /// An empty batch commits nothing and reports `false`.
    pub async fn delete_many(&mut self, reviews: &[Review]) -> DbResult<bool> {
        debug!(count = reviews.len(), "Deleting reviews");

        self.session.remove_all(reviews).await?;
        Ok(self.session.commit().await? > 0)
    }
}
