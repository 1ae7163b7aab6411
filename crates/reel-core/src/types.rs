//! # Domain Types
//!
//! Core domain types used throughout Reelhouse.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Genre       │   │     Movie       │   │    Customer     │       │
//! │  │  ─────────────  │◄──│  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  title          │   │  name, phone    │       │
//! │  └─────────────────┘   │  genre snapshot │   │  is_gold        │       │
//! │                        │  stock, rate    │   └────────┬────────┘       │
//! │                        └────────┬────────┘            │                │
//! │                                 │ snapshot            │ snapshot       │
//! │                                 ▼                     ▼                │
//! │                        ┌──────────────────────────────────────┐        │
//! │                        │               Rental                 │        │
//! │                        │  date_out, date_returned, rental_fee │        │
//! │                        └──────────────────────────────────────┘        │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      User       │──►│    Identity     │  (decoded from a token,    │
//! │  │  email, hash    │   │  user_id, admin │   lives for one request)   │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshots
//! A rental copies the customer and movie fields it needs at checkout. Later
//! catalog edits (a renamed movie, a new rate) never change an existing
//! rental or the fee it is closed with.
//!
//! All types serialize with camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::pricing;

// =============================================================================
// Identity & Roles
// =============================================================================

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Subject of the token (a user id).
    pub user_id: String,
    pub is_admin: bool,
}

/// Role an operation requires of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredRole {
    /// Any valid identity.
    Authenticated,
    /// A valid identity with the admin flag set.
    Admin,
}

impl RequiredRole {
    /// Whether `identity` satisfies this role.
    pub fn permits(&self, identity: &Identity) -> bool {
        match self {
            RequiredRole::Authenticated => true,
            RequiredRole::Admin => identity.is_admin,
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub id: String,
    pub name: String,
}

/// The genre fields embedded in a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreSnapshot {
    pub id: String,
    pub name: String,
}

impl From<&Genre> for GenreSnapshot {
    fn from(genre: &Genre) -> Self {
        GenreSnapshot {
            id: genre.id.clone(),
            name: genre.name.clone(),
        }
    }
}

/// A movie in the catalog.
///
/// `number_in_stock` is written by the inventory ledger only, once the
/// movie exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub genre: GenreSnapshot,
    pub number_in_stock: i64,
    #[serde(rename = "dailyRentalRateCents")]
    pub daily_rental_rate: Money,
}

impl Movie {
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.number_in_stock > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub is_gold: bool,
}

// =============================================================================
// Rental
// =============================================================================

/// Customer fields copied onto a rental at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSnapshot {
    pub id: String,
    pub name: String,
    pub phone: String,
}

impl From<&Customer> for CustomerSnapshot {
    fn from(customer: &Customer) -> Self {
        CustomerSnapshot {
            id: customer.id.clone(),
            name: customer.name.clone(),
            phone: customer.phone.clone(),
        }
    }
}

/// Movie fields copied onto a rental at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSnapshot {
    pub id: String,
    pub title: String,
    #[serde(rename = "dailyRentalRateCents")]
    pub daily_rental_rate: Money,
}

impl From<&Movie> for MovieSnapshot {
    fn from(movie: &Movie) -> Self {
        MovieSnapshot {
            id: movie.id.clone(),
            title: movie.title.clone(),
            daily_rental_rate: movie.daily_rental_rate,
        }
    }
}

/// A rental of one movie by one customer.
///
/// ## Lifecycle
/// ```text
///   checkout                         return
///      │                               │
///      ▼                               ▼
///  ┌────────┐  date_returned = now  ┌────────┐
///  │  OPEN  │ ────────────────────► │ CLOSED │  (immutable)
///  └────────┘  rental_fee = rate×d  └────────┘
/// ```
/// `date_returned` and `rental_fee` are set together, exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: String,
    pub customer: CustomerSnapshot,
    pub movie: MovieSnapshot,
    pub date_out: DateTime<Utc>,
    pub date_returned: Option<DateTime<Utc>>,
    #[serde(rename = "rentalFeeCents")]
    pub rental_fee: Option<Money>,
}

impl Rental {
    /// An open rental has not been returned yet.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.date_returned.is_none()
    }

    /// Fee owed if the rental were returned at `now`.
    pub fn fee_at(&self, now: DateTime<Utc>) -> Money {
        let days = pricing::days_rented(self.date_out, now);
        pricing::rental_fee(self.movie.daily_rental_rate, days)
    }
}

// =============================================================================
// Users
// =============================================================================

/// A registered user. The source of identities.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string. Never serialized.
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// What a user sees about themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        UserProfile {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
