//! # Storage Session
//!
//! Request-scoped unit of work over one SQLite transaction.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Lifecycle                                 │
//! │                                                                         │
//! │  db.session()            ← no connection held yet                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  first statement         ← BEGIN IMMEDIATE (write lock held)            │
//! │       │                                                                 │
//! │       ├── add / update / remove / remove_all  → staged change count    │
//! │       ├── reads see the staged rows                                     │
//! │       │                                                                 │
//! │       ├── statement fails?  → ROLLBACK, staged count reset, Err        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  commit()                ← COMMIT, returns staged change count         │
//! │       │                                                                 │
//! │       └── next statement opens a fresh transaction                     │
//! │                                                                         │
//! │  drop without commit     ← ROLLBACK                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Success Signal
//! `commit` returns the number of rows the flushed statements affected.
//! Repositories report `commit()? > 0` as their boolean result; a count of
//! zero is a failed save, not an error.

use catalog_core::EntityId;
use std::fmt;
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::sqlite::{
    Sqlite, SqliteArguments, SqliteConnection, SqliteQueryResult, SqliteRow,
};
use sqlx::{FromRow, SqlitePool, Transaction};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::relationship::{PokemonCategoryResolver, PokemonOwnerResolver};
use crate::repository::{
    CategoryRepository, CountryRepository, OwnerRepository, PokemonRepository, ReviewRepository,
    ReviewerRepository,
};

/// Bindable SQLite statement.
pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

// =============================================================================
// Record
// =============================================================================

/// A row type the session can add, update and remove generically.
///
/// ## Column Layout
/// - `KEY_COLUMNS` identify the row (`id`, or a composite junction key)
/// - `VALUE_COLUMNS` are the mutable fields, bound in this order by
///   [`Record::bind_values`]
/// - When `GENERATED_KEY` is true, storage assigns the key on insert and
///   the key columns are left out of the `INSERT`
pub trait Record {
    const TABLE: &'static str;
    const KEY_COLUMNS: &'static [&'static str];
    const VALUE_COLUMNS: &'static [&'static str];
    const GENERATED_KEY: bool;

    /// Key values, in `KEY_COLUMNS` order.
    fn key(&self) -> Vec<EntityId>;

    /// Binds the mutable fields, in `VALUE_COLUMNS` order.
    fn bind_values<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

fn insert_sql<R: Record>() -> String {
    let columns: Vec<&str> = if R::GENERATED_KEY {
        R::VALUE_COLUMNS.to_vec()
    } else {
        R::KEY_COLUMNS
            .iter()
            .chain(R::VALUE_COLUMNS.iter())
            .copied()
            .collect()
    };
    let placeholders = vec!["?"; columns.len()].join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        R::TABLE,
        columns.join(", "),
        placeholders
    )
}

fn key_predicate<R: Record>() -> String {
    R::KEY_COLUMNS
        .iter()
        .map(|column| format!("{} = ?", column))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn update_sql<R: Record>() -> String {
    let assignments = R::VALUE_COLUMNS
        .iter()
        .map(|column| format!("{} = ?", column))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE {} SET {} WHERE {}",
        R::TABLE,
        assignments,
        key_predicate::<R>()
    )
}

fn delete_sql<R: Record>() -> String {
    format!("DELETE FROM {} WHERE {}", R::TABLE, key_predicate::<R>())
}

fn bind_key<'q, R: Record>(mut query: SqliteQuery<'q>, record: &R) -> SqliteQuery<'q> {
    for value in record.key() {
        query = query.bind(value);
    }
    query
}

// =============================================================================
// Session
// =============================================================================

/// Unit of work scoped to one inbound operation.
///
/// ## Usage
/// ```rust,ignore
/// let mut session = db.session();
///
/// let mut category = Category::new("Electric");
/// let saved = session.categories().create(&mut category).await?;
///
/// let pokemon = session.categories().pokemon(category.id).await?;
/// ```
pub struct Session {
    pool: SqlitePool,
    tx: Option<Transaction<'static, Sqlite>>,
    staged: u64,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("in_transaction", &self.tx.is_some())
            .field("staged", &self.staged)
            .finish()
    }
}

impl Session {
    pub(crate) fn new(pool: SqlitePool) -> Self {
        Session {
            pool,
            tx: None,
            staged: 0,
        }
    }

    /// Rows affected by statements since the last commit.
    pub fn staged_changes(&self) -> u64 {
        self.staged
    }

    /// True while a transaction is open.
    pub fn in_transaction(&self) -> bool {
        self.tx.is_some()
    }

    /// Returns the transaction connection, opening the transaction on first use.
    ///
    /// The write lock is taken up front: a deferred transaction that reads
    /// first (duplicate scans, existence checks) cannot upgrade once another
    /// session has committed, and SQLite fails it without waiting.
    async fn connection(&mut self) -> DbResult<&mut SqliteConnection> {
        if self.tx.is_none() {
            let tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
            debug!("Session transaction opened");
            self.tx = Some(tx);
        }

        self.tx
            .as_deref_mut()
            .ok_or_else(|| DbError::Internal("session transaction missing".to_string()))
    }

    /// Rolls back everything staged after a failed statement.
    async fn abandon(&mut self) {
        let discarded = self.staged;
        self.staged = 0;

        if let Some(tx) = self.tx.take() {
            warn!(discarded, "Statement failed, rolling back session");
            if let Err(e) = tx.rollback().await {
                warn!(error = %e, "Rollback after failed statement did not complete");
            }
        }
    }

    // -------------------------------------------------------------------------
    // Statement primitives (used by repositories and resolvers)
    // -------------------------------------------------------------------------

    /// Executes a mutating statement and stages its affected row count.
    pub(crate) async fn execute(&mut self, query: SqliteQuery<'_>) -> DbResult<SqliteQueryResult> {
        let conn = self.connection().await?;

        match query.execute(conn).await {
            Ok(result) => {
                self.staged += result.rows_affected();
                Ok(result)
            }
            Err(e) => {
                self.abandon().await;
                Err(e.into())
            }
        }
    }

    /// Fetches every row of a typed query.
    pub(crate) async fn fetch_all<'q, T>(
        &mut self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
    ) -> DbResult<Vec<T>>
    where
        T: Send + Unpin + for<'r> FromRow<'r, SqliteRow>,
    {
        let conn = self.connection().await?;

        match query.fetch_all(conn).await {
            Ok(rows) => Ok(rows),
            Err(e) => {
                self.abandon().await;
                Err(e.into())
            }
        }
    }

    /// Fetches at most one row of a typed query.
    pub(crate) async fn fetch_optional<'q, T>(
        &mut self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
    ) -> DbResult<Option<T>>
    where
        T: Send + Unpin + for<'r> FromRow<'r, SqliteRow>,
    {
        let conn = self.connection().await?;

        match query.fetch_optional(conn).await {
            Ok(row) => Ok(row),
            Err(e) => {
                self.abandon().await;
                Err(e.into())
            }
        }
    }

    /// Fetches exactly one row of a typed query.
    pub(crate) async fn fetch_one<'q, T>(
        &mut self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
    ) -> DbResult<T>
    where
        T: Send + Unpin + for<'r> FromRow<'r, SqliteRow>,
    {
        let conn = self.connection().await?;

        match query.fetch_one(conn).await {
            Ok(row) => Ok(row),
            Err(e) => {
                self.abandon().await;
                Err(e.into())
            }
        }
    }

    /// Fetches a single scalar (`COUNT`, `EXISTS`, ...).
    pub(crate) async fn fetch_scalar<'q, T>(
        &mut self,
        query: QueryScalar<'q, Sqlite, T, SqliteArguments<'q>>,
    ) -> DbResult<T>
    where
        T: Send + Unpin,
        (T,): Send + Unpin + for<'r> FromRow<'r, SqliteRow>,
    {
        let conn = self.connection().await?;

        match query.fetch_one(conn).await {
            Ok(value) => Ok(value),
            Err(e) => {
                self.abandon().await;
                Err(e.into())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Unit-of-work operations
    // -------------------------------------------------------------------------

    /// Stages an insert. Returns the storage-assigned row id.
    pub async fn add<R: Record>(&mut self, record: &R) -> DbResult<EntityId> {
        let sql = insert_sql::<R>();
        let mut query = sqlx::query(&sql);
        if !R::GENERATED_KEY {
            query = bind_key(query, record);
        }
        let query = record.bind_values(query);

        let result = self.execute(query).await?;
        debug!(table = R::TABLE, "Staged insert");
        Ok(result.last_insert_rowid())
    }

    /// Stages a full replace of the record's mutable columns.
    ///
    /// Returns the number of rows matched (0 when the key is unknown).
    pub async fn update<R: Record>(&mut self, record: &R) -> DbResult<u64> {
        if R::VALUE_COLUMNS.is_empty() {
            return Err(DbError::Internal(format!(
                "{} rows have no mutable columns",
                R::TABLE
            )));
        }

        let sql = update_sql::<R>();
        let query = record.bind_values(sqlx::query(&sql));
        let query = bind_key(query, record);

        let result = self.execute(query).await?;
        debug!(table = R::TABLE, rows = result.rows_affected(), "Staged update");
        Ok(result.rows_affected())
    }

    /// Stages a delete by key.
    pub async fn remove<R: Record>(&mut self, record: &R) -> DbResult<u64> {
        let sql = delete_sql::<R>();
        let query = bind_key(sqlx::query(&sql), record);

        let result = self.execute(query).await?;
        debug!(table = R::TABLE, rows = result.rows_affected(), "Staged delete");
        Ok(result.rows_affected())
    }

    /// Stages deletes for every record. Stops at the first failure.
    pub async fn remove_all<R: Record>(&mut self, records: &[R]) -> DbResult<u64> {
        let mut removed = 0;
        for record in records {
            removed += self.remove(record).await?;
        }
        Ok(removed)
    }

    /// Flushes all staged statements atomically.
    ///
    /// ## Returns
    /// * `Ok(n)` - `n` rows were affected since the last commit
    /// * `Ok(0)` - nothing was staged (callers treat this as a failed save)
    /// * `Err(DbError::TransactionFailed)` - the store refused the commit;
    ///   nothing was applied
    pub async fn commit(&mut self) -> DbResult<u64> {
        let changes = self.staged;
        self.staged = 0;

        let Some(tx) = self.tx.take() else {
            return Ok(0);
        };

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(changes, "Session committed");
        Ok(changes)
    }

    /// Discards everything staged since the last commit.
    pub async fn rollback(&mut self) -> DbResult<()> {
        self.staged = 0;

        if let Some(tx) = self.tx.take() {
            tx.rollback()
                .await
                .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
            debug!("Session rolled back");
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Repository access
    // -------------------------------------------------------------------------

    pub fn categories(&mut self) -> CategoryRepository<'_> {
        CategoryRepository::new(self)
    }

    pub fn countries(&mut self) -> CountryRepository<'_> {
        CountryRepository::new(self)
    }

    pub fn owners(&mut self) -> OwnerRepository<'_> {
        OwnerRepository::new(self)
    }

    pub fn pokemon(&mut self) -> PokemonRepository<'_> {
        PokemonRepository::new(self)
    }

    pub fn reviews(&mut self) -> ReviewRepository<'_> {
        ReviewRepository::new(self)
    }

    pub fn reviewers(&mut self) -> ReviewerRepository<'_> {
        ReviewerRepository::new(self)
    }

    pub fn pokemon_categories(&mut self) -> PokemonCategoryResolver<'_> {
        PokemonCategoryResolver::new(self)
    }

    pub fn pokemon_owners(&mut self) -> PokemonOwnerResolver<'_> {
        PokemonOwnerResolver::new(self)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{Category, PokemonCategory};

    #[test]
    fn test_insert_sql_skips_generated_key() {
        assert_eq!(
            insert_sql::<Category>(),
            "INSERT INTO categories (name) VALUES (?)"
        );
    }

    #[test]
    fn test_insert_sql_keeps_composite_key() {
        assert_eq!(
            insert_sql::<PokemonCategory>(),
            "INSERT INTO pokemon_categories (pokemon_id, category_id) VALUES (?, ?)"
        );
    }

    #[test]
    fn test_update_and_delete_sql() {
        assert_eq!(
            update_sql::<Category>(),
            "UPDATE categories SET name = ? WHERE id = ?"
        );
        assert_eq!(
            delete_sql::<PokemonCategory>(),
            "DELETE FROM pokemon_categories WHERE pokemon_id = ? AND category_id = ?"
        );
    }
}
