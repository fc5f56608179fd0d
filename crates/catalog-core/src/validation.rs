//! # Validation Module
//!
//! Input validation and natural-key duplicate detection.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: catalog-service                                              │
//! │  ├── THIS MODULE: required fields, rating range, id mismatch           │
//! │  └── THIS MODULE: natural-key duplicate scan (trim + ignore case)      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repositories (catalog-db)                                    │
//! │  └── No dedup, no validation: they trust the caller                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::types::Category;
//! use catalog_core::validation::ensure_unique;
//!
//! let existing = vec![Category::new("Fire")];
//! assert!(ensure_unique(&Category::new("fire "), &existing).is_err());
//! assert!(ensure_unique(&Category::new("Water"), &existing).is_ok());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Category, Country, EntityId, EntityKind, Owner, Pokemon, Review, Reviewer};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted name/title.
pub const MAX_NAME_LENGTH: usize = 100;

/// Longest accepted review body.
pub const MAX_TEXT_LENGTH: usize = 2000;

/// Lowest accepted review rating.
pub const MIN_RATING: i32 = 1;

/// Highest accepted review rating.
pub const MAX_RATING: i32 = 5;

// =============================================================================
// Natural Keys
// =============================================================================

/// A human-meaningful key used for application-level duplicate detection.
///
/// ## Keys Per Entity
/// | Entity   | Key parts              |
/// |----------|------------------------|
/// | Category | name                   |
/// | Country  | name                   |
/// | Owner    | first_name, last_name  |
/// | Pokemon  | name                   |
/// | Review   | title                  |
/// | Reviewer | last_name              |
pub trait NaturalKey {
    /// Entity the key belongs to (for conflict messages).
    const KIND: EntityKind;

    /// Key parts, compared pairwise.
    fn key_parts(&self) -> Vec<&str>;
}

impl NaturalKey for Category {
    const KIND: EntityKind = EntityKind::Category;

    fn key_parts(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl NaturalKey for Country {
    const KIND: EntityKind = EntityKind::Country;

    fn key_parts(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl NaturalKey for Owner {
    const KIND: EntityKind = EntityKind::Owner;

    fn key_parts(&self) -> Vec<&str> {
        vec![self.first_name.as_str(), self.last_name.as_str()]
    }
}

impl NaturalKey for Pokemon {
    const KIND: EntityKind = EntityKind::Pokemon;

    fn key_parts(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl NaturalKey for Review {
    const KIND: EntityKind = EntityKind::Review;

    fn key_parts(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }
}

impl NaturalKey for Reviewer {
    const KIND: EntityKind = EntityKind::Reviewer;

    fn key_parts(&self) -> Vec<&str> {
        vec![self.last_name.as_str()]
    }
}

/// Normalizes one key part: surrounding whitespace trimmed, case folded.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Compares two key parts the way duplicate detection does.
///
/// ## Example
/// ```rust
/// use catalog_core::validation::same_natural_key;
///
/// assert!(same_natural_key("Fire", "fire "));
/// assert!(!same_natural_key("Fire", "Fir"));
/// ```
pub fn same_natural_key(a: &str, b: &str) -> bool {
    normalize_key(a) == normalize_key(b)
}

/// Rejects `candidate` if any entry of `existing` has the same natural key.
///
/// This is a linear scan over the listing. Callers pass the full
/// `list()` of the repository.
pub fn ensure_unique<T: NaturalKey>(candidate: &T, existing: &[T]) -> CoreResult<()> {
    let wanted = candidate.key_parts();

    let clash = existing.iter().any(|entry| {
        let parts = entry.key_parts();
        parts.len() == wanted.len()
            && parts
                .iter()
                .zip(wanted.iter())
                .all(|(a, b)| same_natural_key(a, b))
    });

    if clash {
        let key = wanted
            .iter()
            .map(|part| part.trim())
            .collect::<Vec<_>>()
            .join(" ");
        return Err(CoreError::Conflict {
            entity: T::KIND,
            key,
        });
    }

    Ok(())
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required short text field (names, titles).
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a review rating.
///
/// ## Rules
/// - Must be between 1 and 5 (inclusive)
pub fn validate_rating(rating: i32) -> ValidationResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: MIN_RATING as i64,
            max: MAX_RATING as i64,
        });
    }
    Ok(())
}

/// Validates that an update payload targets the id it was addressed to.
pub fn validate_matching_id(
    entity: EntityKind,
    path_id: EntityId,
    payload_id: EntityId,
) -> ValidationResult<()> {
    if path_id != payload_id {
        return Err(ValidationError::IdMismatch {
            entity,
            path_id,
            payload_id,
        });
    }
    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

pub fn validate_category(category: &Category) -> ValidationResult<()> {
    validate_name("name", &category.name)
}

pub fn validate_country(country: &Country) -> ValidationResult<()> {
    validate_name("name", &country.name)
}

pub fn validate_owner(owner: &Owner) -> ValidationResult<()> {
    validate_name("first_name", &owner.first_name)?;
    validate_name("last_name", &owner.last_name)
}

pub fn validate_pokemon(pokemon: &Pokemon) -> ValidationResult<()> {
    validate_name("name", &pokemon.name)
}

pub fn validate_reviewer(reviewer: &Reviewer) -> ValidationResult<()> {
    validate_name("first_name", &reviewer.first_name)?;
    validate_name("last_name", &reviewer.last_name)
}

/// Validates a review: title required, body length capped, rating in range.
pub fn validate_review(review: &Review) -> ValidationResult<()> {
    validate_name("title", &review.title)?;

    if review.text.chars().count() > MAX_TEXT_LENGTH {
        return Err(ValidationError::TooLong {
            field: "text".to_string(),
            max: MAX_TEXT_LENGTH,
        });
    }

    validate_rating(review.rating)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_natural_key() {
        assert!(same_natural_key("Fire", "fire "));
        assert!(same_natural_key("  WATER", "water"));
        assert!(!same_natural_key("Fire", "Fir"));
    }

    #[test]
    fn test_ensure_unique_category() {
        let existing = vec![Category::new("fire "), Category::new("Water")];

        let err = ensure_unique(&Category::new("Fire"), &existing).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Conflict {
                entity: EntityKind::Category,
                ..
            }
        ));
        assert!(ensure_unique(&Category::new("Electric"), &existing).is_ok());
    }

    #[test]
    fn test_ensure_unique_owner_needs_both_names() {
        let existing = vec![Owner::new("Jack", "London", 1)];

        assert!(ensure_unique(&Owner::new(" jack", "LONDON ", 2), &existing).is_err());
        assert!(ensure_unique(&Owner::new("Harry", "London", 1), &existing).is_ok());
    }

    #[test]
    fn test_ensure_unique_reviewer_by_last_name_only() {
        let existing = vec![Reviewer::new("Teddy", "Smith")];

        assert!(ensure_unique(&Reviewer::new("Taylor", "smith"), &existing).is_err());
        assert!(ensure_unique(&Reviewer::new("Teddy", "Jones"), &existing).is_ok());
    }

    #[test]
    fn test_ensure_unique_on_empty_listing() {
        assert!(ensure_unique(&Country::new("Kanto"), &[]).is_ok());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Pikachu").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"A".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-3).is_err());
    }

    #[test]
    fn test_validate_review() {
        let review = Review::new("Great", "Best pokemon", 5, 1, 1);
        assert!(validate_review(&review).is_ok());

        let too_long = Review::new("Long", "x".repeat(2001), 3, 1, 1);
        assert!(matches!(
            validate_review(&too_long),
            Err(ValidationError::TooLong { .. })
        ));

        let bad_rating = Review::new("Bad", "", 9, 1, 1);
        assert!(matches!(
            validate_review(&bad_rating),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_matching_id() {
        assert!(validate_matching_id(EntityKind::Pokemon, 4, 4).is_ok());
        assert!(validate_matching_id(EntityKind::Pokemon, 4, 5).is_err());
    }
}
