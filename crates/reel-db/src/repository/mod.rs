//! # Repository Module
//!
//! Database repository implementations for Reelhouse.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Route handler / RentalManager                                         │
//! │       │                                                                 │
//! │       │  db.movies().get_by_id(&id)          (pool, no transaction)    │
//! │       │  db.rentals().insert(&mut uow, ..)   (inside a unit of work)   │
//! │       ▼                                                                 │
//! │  MovieRepository / RentalRepository / ...                              │
//! │  ├── list(&self)                                                       │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, entity)                                             │
//! │  ├── update(&self, entity)                                             │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`GenreRepository`] - Genre CRUD
//! - [`CustomerRepository`] - Customer CRUD
//! - [`MovieRepository`] - Movie catalog (stock goes through the ledger)
//! - [`RentalRepository`] - Rental records, open/close
//! - [`UserRepository`] - Registered users
//!
//! [`GenreRepository`]: genre::GenreRepository
//! [`CustomerRepository`]: customer::CustomerRepository
//! [`MovieRepository`]: movie::MovieRepository
//! [`RentalRepository`]: rental::RentalRepository
//! [`UserRepository`]: user::UserRepository

pub mod customer;
pub mod genre;
pub mod movie;
pub mod rental;
pub mod user;

use uuid::Uuid;

/// Generates a new entity id (UUID v4).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
