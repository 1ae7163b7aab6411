//! # Validation Module
//!
//! Field rules for catalog, user and rental input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Route handler (axum)                                         │
//! │  ├── JSON shape (deserialization)                                      │
//! │  └── THIS MODULE: length, range and format rules                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Rental manager                                               │
//! │  └── Referenced customer/movie exist, stock available                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK (number_in_stock >= 0)                                      │
//! │  ├── UNIQUE (users.email)                                              │
//! │  └── CHECK (date_returned/rental_fee both or neither)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lengths are counted in characters after trimming.
//!
//! ## Usage
//! ```rust
//! use reel_core::validation::{validate_genre_name, validate_uuid};
//!
//! assert!(validate_genre_name("Comedy").is_ok());
//! assert!(validate_genre_name("Cat").is_err());
//! assert!(validate_uuid("movieId", "not-a-uuid").is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_DAILY_RENTAL_RATE_CENTS, MAX_NUMBER_IN_STOCK};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Checks that a trimmed string is present and within `min..=max` chars.
pub fn validate_length(field: &str, value: &str, min: usize, max: usize) -> ValidationResult<()> {
    let value = value.trim();
    let len = value.chars().count();

    if len == 0 {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if len < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    if len > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Genre name: 5 to 50 characters.
pub fn validate_genre_name(name: &str) -> ValidationResult<()> {
    validate_length("name", name, 5, 50)
}

/// Customer name and phone: 5 to 50 characters each.
///
/// ## Example
/// ```rust
/// use reel_core::validation::validate_customer;
///
/// assert!(validate_customer("Grace Hopper", "555-0199").is_ok());
/// assert!(validate_customer("Grace Hopper", "555").is_err());
/// ```
pub fn validate_customer(name: &str, phone: &str) -> ValidationResult<()> {
    validate_length("name", name, 5, 50)?;
    validate_length("phone", phone, 5, 50)
}

/// Movie title: 5 to 255 characters.
pub fn validate_movie_title(title: &str) -> ValidationResult<()> {
    validate_length("title", title, 5, 255)
}

/// Initial or restocked count: 0 to 255.
pub fn validate_number_in_stock(count: i64) -> ValidationResult<()> {
    if !(0..=MAX_NUMBER_IN_STOCK).contains(&count) {
        return Err(ValidationError::OutOfRange {
            field: "numberInStock".to_string(),
            min: 0,
            max: MAX_NUMBER_IN_STOCK,
        });
    }
    Ok(())
}

/// Daily rate in cents: strictly positive, at most 255.00.
pub fn validate_daily_rental_rate_cents(cents: i64) -> ValidationResult<()> {
    if !(1..=MAX_DAILY_RENTAL_RATE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "dailyRentalRateCents".to_string(),
            min: 1,
            max: MAX_DAILY_RENTAL_RATE_CENTS,
        });
    }
    Ok(())
}

// =============================================================================
// User Validators
// =============================================================================

/// Validates registration input.
///
/// ## Rules
/// - name: 5 to 50 characters
/// - email: 5 to 255 characters, one `@` with text on both sides
/// - password: 5 to 1024 characters
pub fn validate_registration(name: &str, email: &str, password: &str) -> ValidationResult<()> {
    validate_length("name", name, 5, 50)?;
    validate_email(email)?;
    validate_password(password)
}

pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_length("email", email, 5, 255)?;

    let email = email.trim();
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    if !well_formed {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be a valid email address".to_string(),
        });
    }
    Ok(())
}

/// Passwords are not trimmed; spaces are significant.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    let len = password.chars().count();
    if len == 0 {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    if len < 5 {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: 5,
        });
    }
    if len > 1024 {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: 1024,
        });
    }
    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a UUID-formatted reference.
///
/// ## Example
/// ```rust
/// use reel_core::validation::validate_uuid;
///
/// assert!(validate_uuid("customerId", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("customerId", "").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
