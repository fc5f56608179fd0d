//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  ├── CoreError        - Natural-key conflicts, wraps validation         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  catalog-service errors                                                │
//! │  └── ServiceError     - What the caller sees (with status code)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError                      │
//! │        DbError ─────────────────────┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::{EntityId, EntityKind};

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations detected without touching storage.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An entity with the same natural key already exists.
    ///
    /// ## When This Occurs
    /// - Creating category "fire " when "Fire" exists
    /// - Creating owner "ash KETCHUM" when "Ash Ketchum" exists
    #[error("{entity} already exists: '{key}'")]
    Conflict { entity: EntityKind, key: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised before any session is opened.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// The id in the path does not match the id in the payload.
    #[error("{entity} id mismatch: path {path_id}, payload {payload_id}")]
    IdMismatch {
        entity: EntityKind,
        path_id: EntityId,
        payload_id: EntityId,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_message() {
        let err = CoreError::Conflict {
            entity: EntityKind::Category,
            key: "fire".to_string(),
        };
        assert_eq!(err.to_string(), "Category already exists: 'fire'");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::IdMismatch {
            entity: EntityKind::Owner,
            path_id: 1,
            payload_id: 2,
        };
        assert_eq!(err.to_string(), "Owner id mismatch: path 1, payload 2");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "title".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
