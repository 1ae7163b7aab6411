//! HTTP routes.
//!
//! ## Route Map
//! ```text
//! GET    /health
//!
//! GET    /api/genres            public
//! GET    /api/genres/{id}       public
//! POST   /api/genres            AuthUser
//! PUT    /api/genres/{id}       AuthUser
//! DELETE /api/genres/{id}       AdminUser
//!   (same shape for /api/customers and /api/movies)
//!
//! GET    /api/rentals           public
//! GET    /api/rentals/{id}      public
//! POST   /api/rentals           AuthUser   checkout
//! POST   /api/returns           AuthUser   return
//!
//! POST   /api/users             AuthUser   register
//! GET    /api/users/me          AuthUser
//! POST   /api/auth              public     login
//! ```

mod auth;
mod customers;
mod genres;
mod health;
mod movies;
mod rentals;
mod returns;
mod users;

use axum::routing::get;
use axum::Router;
use reel_core::validation::validate_uuid;
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .nest("/api/genres", genres::routes())
        .nest("/api/customers", customers::routes())
        .nest("/api/movies", movies::routes())
        .nest("/api/rentals", rentals::routes())
        .nest("/api/returns", returns::routes())
        .nest("/api/users", users::routes())
        .nest("/api/auth", auth::routes())
        .with_state(state)
}

/// A path id that is not a UUID can never match a row.
fn parse_id<'a>(entity: &str, id: &'a str) -> Result<&'a str, ApiError> {
    validate_uuid("id", id).map_err(|e| {
        debug!(entity = %entity, id = %id, reason = %e, "Malformed path id");
        ApiError::not_found(entity)
    })?;
    Ok(id)
}
