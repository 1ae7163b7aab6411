//! # reel-core: Pure Business Logic for Reelhouse
//!
//! This crate is the **heart** of Reelhouse. It holds the domain types, the
//! rental fee rules and the error taxonomy as pure code with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Reelhouse Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    Access Control Gate ──► Rental Transaction Manager           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ reel-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │  Movie    │  │   Money   │  │ days, fee │  │   rules   │  │   │
//! │  │   │  Rental   │  │           │  │           │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    reel-db (Database Layer)                     │   │
//! │  │        SQLite, unit of work, inventory ledger, repositories     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Movie, Customer, Rental, Identity, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Days rented and rental fee
//! - [`clock`] - Injectable time source
//! - [`error`] - Domain error types and the failure taxonomy
//! - [`validation`] - Field-level validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use reel_core::money::Money;
//! use reel_core::pricing::{days_rented, rental_fee};
//!
//! let date_out = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
//! let now = date_out + Duration::days(7);
//!
//! let days = days_rented(date_out, now);
//! assert_eq!(days, 7);
//! assert_eq!(rental_fee(Money::from_cents(200), days).cents(), 1400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper bound on a movie's stock count accepted from catalog edits.
pub const MAX_NUMBER_IN_STOCK: i64 = 255;

/// Upper bound on a daily rental rate, in cents.
pub const MAX_DAILY_RENTAL_RATE_CENTS: i64 = 25_500;
