//! # Service Error Type
//!
//! Unified error type for catalog operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Review Catalog                     │
//! │                                                                         │
//! │  Service operation                                                      │
//! │  Result<T, ServiceError>                                                │
//! │         │                                                               │
//! │         ├── ValidationError ─────────────► Validation            400    │
//! │         ├── CoreError::Conflict ─────────► Conflict              422    │
//! │         ├── unknown id ──────────────────► NotFound              404    │
//! │         ├── category/country still used ─► ReferentialIntegrity  409    │
//! │         ├── commit reported 0 rows ──────► StorageFailure        500    │
//! │         └── DbError ─────────────────────► (mapped below)               │
//! │                                                                         │
//! │  Caller                                                                 │
//! │  ErrorResponse { code: "NOT_FOUND", message: "Pokemon not found: 7" }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use catalog_core::{CoreError, EntityId, EntityKind, ValidationError};
use catalog_db::DbError;

/// Errors returned by every service operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The addressed entity, or an entity it references, does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// An entity with the same natural key already exists.
    #[error("{entity} already exists: '{key}'")]
    Conflict { entity: String, key: String },

    /// The entity is still referenced and cannot be deleted.
    #[error("Unable to delete {entity} {id}: {reason}")]
    ReferentialIntegrity {
        entity: String,
        id: String,
        reason: String,
    },

    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The store did not apply the change, or failed outright.
    #[error("{0}")]
    StorageFailure(String),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Machine-readable error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Duplicate natural key (422)
    Conflict,

    /// Entity still referenced (409)
    ReferentialIntegrity,

    /// Input validation failed (400)
    ValidationError,

    /// Store refused or did not apply the change (500)
    StorageFailure,
}

impl ErrorCode {
    /// HTTP-style status code.
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorCode::NotFound => 404,
            ErrorCode::Conflict => 422,
            ErrorCode::ReferentialIntegrity => 409,
            ErrorCode::ValidationError => 400,
            ErrorCode::StorageFailure => 500,
        }
    }
}

impl ServiceError {
    /// Creates a NotFound error for an entity id.
    pub fn not_found(entity: EntityKind, id: EntityId) -> Self {
        ServiceError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Creates a ReferentialIntegrity error.
    pub fn still_referenced(entity: EntityKind, id: EntityId, reason: impl Into<String>) -> Self {
        ServiceError::ReferentialIntegrity {
            entity: entity.to_string(),
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a StorageFailure error.
    pub fn storage(message: impl Into<String>) -> Self {
        ServiceError::StorageFailure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::NotFound { .. } => ErrorCode::NotFound,
            ServiceError::Conflict { .. } => ErrorCode::Conflict,
            ServiceError::ReferentialIntegrity { .. } => ErrorCode::ReferentialIntegrity,
            ServiceError::Validation(_) => ErrorCode::ValidationError,
            ServiceError::StorageFailure(_) => ErrorCode::StorageFailure,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.code().status_code()
    }
}

/// Converts a commit result into success or a StorageFailure.
pub(crate) fn ensure_saved(saved: bool, message: &str) -> ServiceResult<()> {
    if saved {
        Ok(())
    } else {
        tracing::error!("{}", message);
        Err(ServiceError::storage(message))
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Converts core errors to service errors.
impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Conflict { entity, key } => ServiceError::Conflict {
                entity: entity.to_string(),
                key,
            },
            CoreError::Validation(e) => ServiceError::Validation(e),
        }
    }
}

/// Converts database errors to service errors.
///
/// Anything that is not a missing row or a constraint is a storage failure;
/// the detail is logged here and the caller gets a generic message.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            DbError::UniqueViolation { field, value } => ServiceError::Conflict {
                entity: field,
                key: value,
            },
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                ServiceError::ReferentialIntegrity {
                    entity: "Record".to_string(),
                    id: "unknown".to_string(),
                    reason: "it is referenced by another entity".to_string(),
                }
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ServiceError::storage("Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ServiceError::storage("Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ServiceError::storage("Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ServiceError::storage("Database transaction failed")
            }
            DbError::PoolExhausted => {
                tracing::error!("Database pool exhausted");
                ServiceError::storage("Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ServiceError::storage("Database operation failed")
            }
        }
    }
}

// =============================================================================
// Response Body
// =============================================================================

/// What a caller receives when an operation fails.
///
/// ```json
/// {
///   "code": "CONFLICT",
///   "status": 422,
///   "message": "Category already exists: 'fire'"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub status: u16,
    pub message: String,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        ErrorResponse {
            code: err.code(),
            status: err.status_code(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ServiceError::not_found(EntityKind::Pokemon, 7).status_code(), 404);
        assert_eq!(
            ServiceError::from(CoreError::Conflict {
                entity: EntityKind::Category,
                key: "fire".to_string(),
            })
            .status_code(),
            422
        );
        assert_eq!(
            ServiceError::still_referenced(EntityKind::Country, 1, "owners live there")
                .status_code(),
            409
        );
        assert_eq!(
            ServiceError::from(ValidationError::Required {
                field: "name".to_string(),
            })
            .status_code(),
            400
        );
        assert_eq!(ServiceError::storage("boom").status_code(), 500);
    }

    #[test]
    fn test_db_not_found_stays_not_found() {
        let err: ServiceError = DbError::not_found("Owner", 9).into();
        assert!(matches!(err, ServiceError::NotFound { .. }));
        assert_eq!(err.to_string(), "Owner not found: 9");
    }

    #[test]
    fn test_db_failures_become_storage_failures() {
        let err: ServiceError = DbError::QueryFailed("syntax error".to_string()).into();
        assert_eq!(err.code(), ErrorCode::StorageFailure);
        assert_eq!(err.to_string(), "Database operation failed");
    }

    #[test]
    fn test_error_response_serialization() {
        let err = ServiceError::not_found(EntityKind::Pokemon, 7);
        let body = serde_json::to_value(ErrorResponse::from(&err)).unwrap();

        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["status"], 404);
        assert_eq!(body["message"], "Pokemon not found: 7");
    }
}
