//! # Domain Types
//!
//! Entities and junction records of the review catalog.
//!
//! ## Relationship Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Relationships                           │
//! │                                                                         │
//! │   Country 1 ──── * Owner * ──┐                                          │
//! │                              │ pokemon_owners (junction)                │
//! │                              ▼                                          │
//! │   Category * ─────────── * Pokemon 1 ──── * Review * ──── 1 Reviewer    │
//! │          pokemon_categories (junction)                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity carries an integer `id` assigned by storage on creation.
//! Values built with `new` carry [`UNSAVED_ID`] until a repository
//! writes the assigned id back.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Surrogate identity of every catalog entity.
pub type EntityId = i64;

/// Placeholder id for entities that have not been persisted yet.
pub const UNSAVED_ID: EntityId = 0;

// =============================================================================
// Entity Kind
// =============================================================================

/// Names each entity table, used in error messages and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Category,
    Country,
    Owner,
    Pokemon,
    Review,
    Reviewer,
}

impl EntityKind {
    /// Returns the display name of the entity.
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Category => "Category",
            EntityKind::Country => "Country",
            EntityKind::Owner => "Owner",
            EntityKind::Pokemon => "Pokemon",
            EntityKind::Review => "Review",
            EntityKind::Reviewer => "Reviewer",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Category
// =============================================================================

/// A pokemon category such as "Electric" or "Water".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: EntityId,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            id: UNSAVED_ID,
            name: name.into(),
        }
    }
}

// =============================================================================
// Country
// =============================================================================

/// Home country of one or more owners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Country {
    pub id: EntityId,
    pub name: String,
}

impl Country {
    pub fn new(name: impl Into<String>) -> Self {
        Country {
            id: UNSAVED_ID,
            name: name.into(),
        }
    }
}

// =============================================================================
// Owner
// =============================================================================

/// A pokemon trainer. Belongs to exactly one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Owner {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    /// Foreign key into `countries`.
    pub country_id: EntityId,
}

impl Owner {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        country_id: EntityId,
    ) -> Self {
        Owner {
            id: UNSAVED_ID,
            first_name: first_name.into(),
            last_name: last_name.into(),
            country_id,
        }
    }
}

// =============================================================================
// Pokemon
// =============================================================================

/// A pokemon. Linked to categories and owners through junction records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Pokemon {
    pub id: EntityId,
    pub name: String,
    pub birth_date: NaiveDate,
}

impl Pokemon {
    pub fn new(name: impl Into<String>, birth_date: NaiveDate) -> Self {
        Pokemon {
            id: UNSAVED_ID,
            name: name.into(),
            birth_date,
        }
    }
}

// =============================================================================
// Review
// =============================================================================

/// A reviewer's rating of one pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Review {
    pub id: EntityId,
    pub title: String,
    pub text: String,
    /// 1 to 5, see [`crate::validation::validate_rating`].
    pub rating: i32,
    pub pokemon_id: EntityId,
    pub reviewer_id: EntityId,
}

impl Review {
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        rating: i32,
        pokemon_id: EntityId,
        reviewer_id: EntityId,
    ) -> Self {
        Review {
            id: UNSAVED_ID,
            title: title.into(),
            text: text.into(),
            rating,
            pokemon_id,
            reviewer_id,
        }
    }
}

// =============================================================================
// Reviewer
// =============================================================================

/// Author of reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Reviewer {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
}

impl Reviewer {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Reviewer {
            id: UNSAVED_ID,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

// =============================================================================
// Junction Records
// =============================================================================

/// One edge of the pokemon ↔ category relation.
///
/// ## Lifecycle
/// - Created in the same commit as its pokemon
/// - Never updated
/// - Removed only when the pokemon (or category) is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PokemonCategory {
    pub pokemon_id: EntityId,
    pub category_id: EntityId,
}

impl PokemonCategory {
    pub const fn new(pokemon_id: EntityId, category_id: EntityId) -> Self {
        PokemonCategory {
            pokemon_id,
            category_id,
        }
    }
}

/// One edge of the pokemon ↔ owner relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PokemonOwner {
    pub pokemon_id: EntityId,
    pub owner_id: EntityId,
}

impl PokemonOwner {
    pub const fn new(pokemon_id: EntityId, owner_id: EntityId) -> Self {
        PokemonOwner {
            pokemon_id,
            owner_id,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
