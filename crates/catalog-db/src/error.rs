//! # Database Error Types
//!
//! What the store can refuse while a session runs.
//!
//! ## Where Each Variant Comes From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Catalog Failures by Origin                             │
//! │                                                                         │
//! │  PokemonRepository::create  ── owner/category id missing ─► NotFound    │
//! │  PokemonOwnerResolver::link ── pair linked twice ─► UniqueViolation     │
//! │  ReviewerRepository::delete ── reviews still point at it ─► ForeignKey  │
//! │  ReviewRepository::delete_many ── statement aborted ───► QueryFailed    │
//! │  Session::connection ── write lock not granted in time ─► QueryFailed   │
//! │  Session::commit ── COMMIT refused ──────────────► TransactionFailed    │
//! │                                                                         │
//! │  A refused statement rolls the session back before it is returned.      │
//! │  catalog-service then maps: NotFound → 404, ForeignKey → 409,           │
//! │  UniqueViolation → 422, the rest → StorageFailure (500).                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed `commit` is *not* an error: it is a change count of zero.
//! `DbError` covers statements the store refused outright.

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - Pokemon creation with an owner or category id that does not resolve
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Linking the same pokemon to the same category (or owner) twice;
    ///   junction primary keys report as UNIQUE in SQLite
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Junction row referencing a missing pokemon/category/owner
    /// - Removing a reviewer whose reviews were not deleted first
    /// - Removing a country that owners still reference
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    ///
    /// ## When This Occurs
    /// - A statement aborted by the store (a trigger, a full disk)
    /// - SQLITE_BUSY once `busy_timeout` runs out waiting for another session
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction could not be opened, committed or rolled back.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite error messages for constraints:
                // UNIQUE constraint: "UNIQUE constraint failed: <table>.<column>"
                // PRIMARY KEY on junctions reports the same message
                // FK constraint: "FOREIGN KEY constraint failed"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DbError::not_found("Owner", 42);
        assert_eq!(err.to_string(), "Owner not found: 42");
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[test]
    fn test_pool_timeout_maps_to_exhausted() {
        let err: DbError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, DbError::PoolExhausted));
    }
}
