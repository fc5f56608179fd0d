//! # catalog-core: Pure Domain Logic for the Review Catalog
//!
//! Entities, natural-key rules and rating arithmetic, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Review Catalog Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                catalog-service (controller layer)               │   │
//! │  │    existence checks, duplicate scan, cascade ordering           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐                 │   │
//! │  │   │   types   │  │  rating   │  │ validation │                 │   │
//! │  │   │ Category  │  │  Rating   │  │ NaturalKey │                 │   │
//! │  │   │ Pokemon   │  │ (sum/cnt) │  │ rules      │                 │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    catalog-db (Database Layer)                  │   │
//! │  │        Session, repositories, junction resolvers               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities and junction records
//! - [`rating`] - Average review rating with exact rounding
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules and natural-key duplicate detection
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::rating::Rating;
//! use catalog_core::validation::same_natural_key;
//!
//! assert!(same_natural_key("Fire", "fire "));
//! assert_eq!(Rating::from_ratings([4, 5]).to_string(), "4.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod rating;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use rating::Rating;
pub use types::*;
pub use validation::NaturalKey;
