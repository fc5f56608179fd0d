//! # Rating Aggregation
//!
//! Computes a pokemon's average review rating in one query.
//!
//! ```text
//! SELECT COALESCE(SUM(rating), 0), COUNT(*) FROM reviews WHERE pokemon_id = ?
//!            │                        │
//!            └──────► Rating::from_totals(total, count)
//!                          │
//!                          ├── mean()        unrounded, 0 when count = 0
//!                          └── hundredths()  2 places, half to even
//! ```

use tracing::debug;

use crate::error::DbResult;
use crate::session::Session;
use catalog_core::{EntityId, Rating};

/// Sum and count of the pokemon's review ratings.
///
/// An unknown pokemon id has no reviews and yields an empty rating.
pub async fn pokemon_rating(session: &mut Session, pokemon_id: EntityId) -> DbResult<Rating> {
    let (total, count) = session
        .fetch_one(
            sqlx::query_as::<_, (i64, i64)>(
                "SELECT COALESCE(SUM(rating), 0), COUNT(*) FROM reviews WHERE pokemon_id = ?",
            )
            .bind(pokemon_id),
        )
        .await?;

    let rating = Rating::from_totals(total, count);
    debug!(pokemon_id = %pokemon_id, total, count, rating = %rating, "Computed rating");
    Ok(rating)
}
