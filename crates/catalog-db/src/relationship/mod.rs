//! # Relationship Resolvers
//!
//! Accessors for the two junction tables.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Many-to-Many Through Junctions                      │
//! │                                                                         │
//! │   categories ◄── pokemon_categories ──► pokemon ◄── pokemon_owners ──► owners
//! │                  (pokemon_id,                      (pokemon_id,         │
//! │                   category_id)                      owner_id)           │
//! │                                                                         │
//! │  Traversal filters the junction in SQL (JOIN / EXISTS); whole          │
//! │  collections are never loaded and filtered in memory.                  │
//! │                                                                         │
//! │  Junction rows are:                                                     │
//! │  • staged in the same commit as their pokemon (link)                   │
//! │  • never updated                                                        │
//! │  • removed only when the pokemon or the owner is deleted (unlink_*)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `link` and `unlink_*` only stage; the owning repository commits.

pub mod pokemon_category;
pub mod pokemon_owner;

pub use pokemon_category::PokemonCategoryResolver;
pub use pokemon_owner::PokemonOwnerResolver;
