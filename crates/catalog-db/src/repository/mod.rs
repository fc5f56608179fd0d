//! # Repository Module
//!
//! Entity repositories for the review catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories Over One Session                        │
//! │                                                                         │
//! │  Service operation                                                     │
//! │       │                                                                 │
//! │       │  let mut session = db.session();                               │
//! │       │  session.pokemon().create(owner_id, category_id, &mut p)       │
//! │       ▼                                                                 │
//! │  PokemonRepository<'_>   (borrows the Session mutably)                 │
//! │  ├── reads: list / get_by_id / exists / traversals                     │
//! │  └── writes: stage via Session::add/update/remove, then commit         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Session ── one SQLite transaction ──► SQLite                          │
//! │                                                                         │
//! │  Repositories never deduplicate and never decide NotFound for the      │
//! │  entity being written; that belongs to the service layer.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CategoryRepository`] - categories, ordered by name
//! - [`CountryRepository`] - countries and their owners
//! - [`OwnerRepository`] - owners and the pokemon they own
//! - [`PokemonRepository`] - pokemon, creation with junction rows, rating
//! - [`ReviewRepository`] - reviews, batch deletion
//! - [`ReviewerRepository`] - reviewers and their reviews

pub mod category;
pub mod country;
pub mod owner;
pub mod pokemon;
pub mod review;
pub mod reviewer;

pub use category::CategoryRepository;
pub use country::CountryRepository;
pub use owner::OwnerRepository;
pub use pokemon::PokemonRepository;
pub use review::ReviewRepository;
pub use reviewer::ReviewerRepository;
