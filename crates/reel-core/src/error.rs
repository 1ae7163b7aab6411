//! # Error Types
//!
//! Domain-specific error types for reel-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  reel-core errors (this file)                                          │
//! │  ├── CoreError        - Domain and access errors                       │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── ErrorKind        - Caller-visible failure category                │
//! │                                                                         │
//! │  reel-db errors (separate crate)                                       │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  apps/api errors                                                       │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ErrorKind → ApiError → Client     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Categories
//! Every `CoreError` belongs to exactly one [`ErrorKind`]. Clients use the
//! kind to tell "fix your input" from "not authorized" from "server fault".

use thiserror::Error;

// =============================================================================
// Error Kind
// =============================================================================

/// Caller-visible failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No credential was supplied.
    Unauthenticated,
    /// A credential was supplied but is malformed, expired or forged.
    InvalidCredentialFormat,
    /// Valid credential, insufficient role.
    Forbidden,
    /// Missing or invalid reference, out of stock, malformed input.
    BadRequest,
    /// No matching rental or resource.
    NotFound,
    /// The rental has already been closed.
    AlreadyReturned,
    /// The operation could not complete atomically.
    Internal,
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No token on the request.
    #[error("Access denied. No token provided.")]
    AuthenticationRequired,

    /// Token present but unusable.
    #[error("Invalid token.")]
    MalformedCredentials,

    /// Authenticated, but the action needs an administrator.
    #[error("Access denied. Insufficient privilege.")]
    InsufficientPrivilege,

    /// Checkout references a customer that does not exist.
    #[error("Invalid customer.")]
    InvalidCustomer(String),

    /// Checkout references a movie that does not exist.
    #[error("Invalid movie.")]
    InvalidMovie(String),

    /// Movie create/update references a genre that does not exist.
    #[error("Invalid genre.")]
    InvalidGenre(String),

    /// The movie has no copies left.
    ///
    /// ## User Workflow
    /// ```text
    /// POST /api/rentals { customerId, movieId }
    ///      │
    ///      ▼
    /// Ledger decrement: numberInStock = 0
    ///      │
    ///      ▼
    /// NotInStock → 400 "Movie not in stock."
    /// ```
    #[error("Movie not in stock.")]
    NotInStock { movie_id: String },

    /// The customer still has an open rental of this movie.
    #[error("Customer already has this movie.")]
    AlreadyRented {
        customer_id: String,
        movie_id: String,
    },

    /// No rental exists for the customer/movie pair.
    #[error("Rental not found for customer {customer_id} and movie {movie_id}")]
    RentalNotFound {
        customer_id: String,
        movie_id: String,
    },

    /// The rental was already closed by an earlier return.
    #[error("Rental {rental_id} has already been returned")]
    AlreadyReturned { rental_id: String },

    /// Generic lookup miss.
    #[error("The {entity} with the given ID was not found.")]
    NotFound { entity: String, id: String },

    /// Login failed. The message does not say which part was wrong.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Storage or transaction failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CoreError::Internal(message.into())
    }

    /// Returns the caller-visible category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::AuthenticationRequired => ErrorKind::Unauthenticated,
            CoreError::MalformedCredentials => ErrorKind::InvalidCredentialFormat,
            CoreError::InsufficientPrivilege => ErrorKind::Forbidden,
            CoreError::InvalidCustomer(_)
            | CoreError::InvalidMovie(_)
            | CoreError::InvalidGenre(_)
            | CoreError::NotInStock { .. }
            | CoreError::AlreadyRented { .. }
            | CoreError::InvalidCredentials
            | CoreError::Validation(_) => ErrorKind::BadRequest,
            CoreError::RentalNotFound { .. } | CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::AlreadyReturned { .. } => ErrorKind::AlreadyReturned,
            CoreError::Internal(_) => ErrorKind::Internal,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., an email already registered).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
