//! # Reelhouse API
//!
//! HTTP server for the movie rental backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Reelhouse API                                   │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  Catalog       │  │  Rentals       │  │  Users                     ││
//! │  │                │  │                │  │                            ││
//! │  │ • /api/genres  │  │ • /api/rentals │  │ • POST /api/users          ││
//! │  │ • /api/movies  │  │ • /api/returns │  │ • GET  /api/users/me       ││
//! │  │ • /api/custom..│  │                │  │ • POST /api/auth           ││
//! │  └───────┬────────┘  └───────┬────────┘  └─────────────┬──────────────┘│
//! │          │                   │                         │               │
//! │          ▼                   ▼                         ▼               │
//! │   AuthUser / AdminUser ─► RentalManager ─► reel-db (SQLite)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (see [`config::AppConfig`]):
//! - `REEL_JWT_PRIVATE_KEY` - Secret for token signing (required)
//! - `REEL_PORT` - HTTP port (default: 3000)
//! - `REEL_DB_PATH` - SQLite file (default: ./reelhouse.db)
//! - `REEL_DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `REEL_JWT_LIFETIME_SECS` - Token lifetime (default: 86400)
//! - `REEL_LOG_FILTER` - Tracing filter when `RUST_LOG` is unset

pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod routes;
pub mod services;
pub mod telemetry;

use std::sync::Arc;

use reel_core::Clock;
use reel_db::Database;

// Re-exports
pub use auth::IdentityVerifier;
pub use config::AppConfig;
pub use error::ApiError;
pub use gate::AccessGate;
pub use routes::build_router;
pub use services::RentalManager;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub gate: AccessGate,
    pub rentals: Arc<RentalManager>,
}

impl AppState {
    /// Wires the gate and the rental manager around one database.
    pub fn new(db: Database, verifier: IdentityVerifier, clock: Arc<dyn Clock>) -> Self {
        AppState {
            gate: AccessGate::new(Arc::new(verifier)),
            rentals: Arc::new(RentalManager::new(db.clone(), clock)),
            db,
        }
    }
}
