//! # reel-db: Database Layer for Reelhouse
//!
//! This crate provides database access for Reelhouse. It uses SQLite with
//! sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Reelhouse Data Flow                              │
//! │                                                                         │
//! │  RentalManager::checkout / route handlers                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     reel-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  genre, movie │    │  (embedded)  │  │   │
//! │  │   │               │    │  customer,    │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  rental, user │    │ 001_init.sql │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  │   ┌───────▼───────┐    ┌───────────────┐                       │   │
//! │  │   │  UnitOfWork   │◄───│InventoryLedger│                       │   │
//! │  │   │ (transaction) │    │ stock ± 1     │                       │   │
//! │  │   └───────────────┘    └───────────────┘                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (WAL)                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`unit_of_work`] - Transaction boundary for multi-write operations
//! - [`ledger`] - Inventory ledger (stock counts)
//! - [`repository`] - Repository implementations
//! - [`password`] - Argon2 password hashing
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use reel_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("reelhouse.db")).await?;
//!
//! let mut uow = db.begin().await?;
//! db.ledger().decrement(&mut uow, &movie_id).await?;
//! db.rentals().insert(&mut uow, &rental).await?;
//! uow.commit().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod migrations;
pub mod password;
pub mod pool;
pub mod repository;
pub mod unit_of_work;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use ledger::{InventoryLedger, LedgerError};
pub use password::{hash_password, verify_password};
pub use pool::{Database, DbConfig};
pub use unit_of_work::UnitOfWork;

// Repository re-exports for convenience
pub use repository::customer::CustomerRepository;
pub use repository::genre::GenreRepository;
pub use repository::movie::MovieRepository;
pub use repository::rental::RentalRepository;
pub use repository::user::UserRepository;
